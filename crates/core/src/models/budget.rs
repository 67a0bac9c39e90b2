use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-category budget ceilings.
///
/// A category with no entry has an implicit budget of 0. Negative amounts
/// are not rejected — the coordinator treats the value as user-owned data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetBook {
    entries: HashMap<String, f64>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Budget for a category, 0.0 when absent.
    #[must_use]
    pub fn get(&self, category: &str) -> f64 {
        self.entries.get(category).copied().unwrap_or(0.0)
    }

    /// Set or replace the budget for a category.
    pub fn set(&mut self, category: impl Into<String>, amount: f64) {
        self.entries.insert(category.into(), amount);
    }

    /// Remove the budget entry for a category.
    /// Returns the previous amount if one was set.
    pub fn remove(&mut self, category: &str) -> Option<f64> {
        self.entries.remove(category)
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.entries.iter()
    }
}
