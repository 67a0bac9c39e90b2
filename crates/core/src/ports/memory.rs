use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::expense::Expense;

use super::traits::{ExpenseStore, KeyValueStore};

/// In-memory adapter implementing both the expense store and the
/// key-value store. Backs brand-new ledgers that have no file yet, and
/// doubles as a fake in tests. Nothing survives the process; `commit`
/// is a no-op.
#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: Vec<Expense>,
    kv: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store with expenses (useful for tests).
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            expenses,
            kv: HashMap::new(),
        }
    }
}

impl ExpenseStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Expense>, CoreError> {
        Ok(self.expenses.clone())
    }

    fn save(&mut self, expense: &Expense) -> Result<(), CoreError> {
        self.expenses.push(expense.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), CoreError> {
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.kv.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CoreError> {
        self.kv.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
