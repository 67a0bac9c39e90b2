use crate::errors::CoreError;
use crate::models::expense::Expense;
use crate::ports::traits::{ExpenseStore, KeyValueStore};

use super::manager::{StorageManager, Vault};

/// Encrypted single-file persistence adapter (native only).
///
/// One vault file backs both ports: expense records answer the
/// [`ExpenseStore`] contract, the byte-valued section answers
/// [`KeyValueStore`]. Expense saves are staged in the in-memory vault and
/// hit disk on `commit`; key-value writes are flushed immediately, since
/// the coordinator persists the budget map on every budget write.
pub struct FileStore {
    path: String,
    password: String,
    vault: Vault,
}

impl FileStore {
    /// Start a brand-new vault at `path`. Nothing is written until the
    /// first flush.
    pub fn create(path: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: password.into(),
            vault: Vault::new(),
        }
    }

    /// Open an existing vault file, decrypting it with `password`.
    pub fn open(path: impl Into<String>, password: impl Into<String>) -> Result<Self, CoreError> {
        let path = path.into();
        let password = password.into();
        let vault = StorageManager::load_from_file(&path, &password)?;
        Ok(Self {
            path,
            password,
            vault,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn flush(&self) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.vault, &self.path, &self.password)
    }
}

impl ExpenseStore for FileStore {
    fn fetch_all(&self) -> Result<Vec<Expense>, CoreError> {
        Ok(self.vault.expenses.clone())
    }

    fn save(&mut self, expense: &Expense) -> Result<(), CoreError> {
        self.vault.expenses.push(expense.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), CoreError> {
        self.flush()
            .map_err(|e| CoreError::SaveFailed(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.vault.kv.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CoreError> {
        self.vault.kv.insert(key.to_string(), value.to_vec());
        self.flush()
            .map_err(|e| CoreError::SaveFailed(e.to_string()))
    }
}
