use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::expense::Expense;

use super::encryption::{self, KdfParams};
use super::format;

/// Everything a ledger file holds: the expense records plus the flat
/// key-value section (budgets live there under their fixed key).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vault {
    /// All expense records, in insertion order.
    pub expenses: Vec<Expense>,

    /// Auxiliary key-value section, byte-valued.
    #[serde(default)]
    pub kv: HashMap<String, Vec<u8>>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }
}

/// High-level vault operations: save/load to/from encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Encrypt and serialize a vault to raw bytes.
    ///
    /// Flow: Vault → bincode → AES-256-GCM(Argon2id(password)) → EXTK bytes
    pub fn save_to_bytes(vault: &Vault, password: &str) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(vault)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize vault: {e}")))?;

        let salt = encryption::fresh_salt()?;
        let nonce = encryption::fresh_nonce()?;

        let kdf_params = KdfParams::default();
        let key = encryption::derive_key(password, &salt, &kdf_params)?;

        let ciphertext = encryption::seal(&plaintext, &key, &nonce)?;

        Ok(format::write_vault(
            format::CURRENT_VERSION,
            &kdf_params,
            &salt,
            &nonce,
            &ciphertext,
        ))
    }

    /// Decrypt and deserialize a vault from raw bytes.
    ///
    /// Flow: EXTK bytes → parse header → Argon2id(password, salt) →
    /// AES-256-GCM decrypt → bincode → Vault
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Vault, CoreError> {
        let (header, ciphertext) = format::read_vault(data)?;

        let key = encryption::derive_key(password, &header.salt, &header.kdf_params)?;

        let plaintext = encryption::open(ciphertext, &key, &header.nonce)?;

        let vault: Vault = bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Serialization(format!("Failed to deserialize vault: {e}")))?;

        Ok(vault)
    }

    /// Save a vault to an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(vault: &Vault, path: &str, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(vault, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a vault from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Vault, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
