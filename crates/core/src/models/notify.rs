use uuid::Uuid;

/// State-change notifications emitted by the coordinator.
///
/// Listeners are invoked synchronously, after the in-memory mutation and
/// aggregate recompute have completed, so a listener always observes the
/// post-mutation state.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A new expense was recorded.
    ExpenseAdded {
        id: Uuid,
        category: String,
        amount: f64,
    },
    /// The expense list was reloaded from the store.
    ExpensesReloaded { count: usize },
    /// A category was appended to the list.
    CategoryAdded { name: String },
    /// A category (and its budget entry) was removed.
    CategoryDeleted { name: String },
    /// A budget ceiling was written.
    BudgetChanged { category: String, amount: f64 },
    /// A persistence call failed; the in-memory mutation stands.
    PersistFailed {
        operation: &'static str,
        message: String,
    },
}

/// Subscriber callback. Registered once, called for every event.
pub type Listener = Box<dyn Fn(&ChangeEvent) + Send>;
