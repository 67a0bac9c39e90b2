use std::collections::HashMap;

use crate::models::expense::Expense;

/// Aggregate bucket for expenses whose category is blank.
/// Records created through the coordinator always carry a category, but
/// reloaded stores may contain blanks.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Aggregation and input validation over the expense list.
///
/// Pure business logic — no I/O, no ports. Easy to test.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Recompute the full category → total mapping from scratch.
    ///
    /// Always a full recompute, never an incremental correction, so the
    /// result cannot drift from the expense list. Blank categories are
    /// bucketed under [`UNKNOWN_CATEGORY`].
    pub fn totals_by_category(&self, expenses: &[Expense]) -> HashMap<String, f64> {
        let mut totals: HashMap<String, f64> = HashMap::new();

        for expense in expenses {
            let key = if expense.category.trim().is_empty() {
                UNKNOWN_CATEGORY.to_string()
            } else {
                expense.category.clone()
            };
            *totals.entry(key).or_insert(0.0) += expense.amount;
        }

        totals
    }

    /// Sum of amounts over expenses whose category equals `category`.
    ///
    /// Computed directly from the list, independent of any cached
    /// aggregate. Note the literal-equality filter: blank-category
    /// expenses are NOT counted under [`UNKNOWN_CATEGORY`] here, matching
    /// how the aggregate and the direct total have always diverged for
    /// that bucket.
    pub fn total_for_category(&self, expenses: &[Expense], category: &str) -> f64 {
        expenses
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount)
            .sum()
    }

    /// Whether `(amount, category)` is acceptable input for a new expense.
    /// Amount must be finite, category non-blank. Violations make
    /// `add_expense` a silent no-op rather than an error.
    pub fn is_valid_input(&self, amount: f64, category: &str) -> bool {
        amount.is_finite() && !category.trim().is_empty()
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
