use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded monetary transaction.
///
/// **Important**: Expenses are immutable once created — there is no edit
/// operation. The coordinator only ever appends, reloads, or re-aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, generated at creation
    pub id: Uuid,

    /// Amount in the ledger currency, rounded to 2 fractional digits
    pub amount: f64,

    /// Category label (non-empty at creation; reloaded records may be blank)
    pub category: String,

    /// Date of the expense (daily granularity, no time component)
    pub date: NaiveDate,

    /// Optional free-text note (merchant, reason, memo)
    #[serde(default)]
    pub note: Option<String>,
}

impl Expense {
    /// Create an expense. The amount is rounded to cents; the date defaults
    /// to today when none is given.
    pub fn new(amount: f64, category: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: Self::round_to_cents(amount),
            category: category.into(),
            date: date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
            note: None,
        }
    }

    /// Create an expense with a note attached.
    pub fn with_note(
        amount: f64,
        category: impl Into<String>,
        date: Option<NaiveDate>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::new(amount, category, date)
        }
    }

    /// Round an amount to 2 decimal places, half away from zero.
    /// `10.005` becomes `10.01` (subject to the usual binary-float caveats
    /// of representing decimal fractions).
    #[must_use]
    pub fn round_to_cents(amount: f64) -> f64 {
        (amount * 100.0).round() / 100.0
    }
}
