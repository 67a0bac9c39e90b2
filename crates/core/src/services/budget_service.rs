use crate::errors::CoreError;
use crate::models::budget::BudgetBook;
use crate::ports::traits::KeyValueStore;

/// Fixed key the budget map is stored under in the key-value port.
pub const BUDGETS_KEY: &str = "budgets";

/// Budget persistence: encodes the budget book as a flat
/// category → amount JSON object and moves it through the key-value port.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the budget book to the bytes stored under [`BUDGETS_KEY`].
    pub fn encode(&self, budgets: &BudgetBook) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(budgets).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Decode a budget book from stored bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<BudgetBook, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load the budget book from the key-value port.
    /// An absent key yields an empty book; a decode failure is an error
    /// the caller may downgrade to empty.
    pub fn load(&self, kv: &dyn KeyValueStore) -> Result<BudgetBook, CoreError> {
        match kv.get(BUDGETS_KEY)? {
            Some(bytes) => self.decode(&bytes),
            None => Ok(BudgetBook::new()),
        }
    }

    /// Persist the full budget book under [`BUDGETS_KEY`].
    pub fn persist(
        &self,
        kv: &mut dyn KeyValueStore,
        budgets: &BudgetBook,
    ) -> Result<(), CoreError> {
        let bytes = self.encode(budgets)?;
        kv.set(BUDGETS_KEY, &bytes)
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
