use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::expense::Expense;

/// Durable storage for expense records (the persistence port).
///
/// Mutations may be staged in memory; `commit` is the generic "flush
/// pending changes" call the coordinator issues after every mutating
/// operation. Implementations that write through immediately may make
/// `commit` a no-op.
pub trait ExpenseStore: Send + Sync {
    /// Load every persisted expense, in insertion order.
    fn fetch_all(&self) -> Result<Vec<Expense>, CoreError>;

    /// Stage a newly created expense for persistence.
    fn save(&mut self, expense: &Expense) -> Result<(), CoreError>;

    /// Flush pending changes to durable storage.
    fn commit(&mut self) -> Result<(), CoreError>;
}

/// Flat byte-valued map for small auxiliary state (the key-value port).
/// The budget map lives here under a fixed key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Write `value` under `key`, replacing any previous value.
    /// Writes are durable when this call returns.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CoreError>;
}

/// One record of the remote diagnostic payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub amount: f64,
    pub category: String,
}

/// Fetches and decodes a remote payload of expense-shaped records
/// (the network port).
///
/// The feed is diagnostic only: the coordinator logs what it returns and
/// never folds it into local state. A failing or absent feed must not
/// affect anything else.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RemoteFeed: Send + Sync {
    /// Human-readable name of this feed (for logs).
    fn name(&self) -> &str;

    /// Fetch and decode the remote records.
    async fn fetch_records(&self) -> Result<Vec<RemoteRecord>, CoreError>;
}
