pub mod errors;
pub mod models;
pub mod ports;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use errors::CoreError;
use models::{
    budget::BudgetBook,
    expense::Expense,
    notify::{ChangeEvent, Listener},
};
use ports::traits::{ExpenseStore, KeyValueStore, RemoteFeed};
use services::{budget_service::BudgetService, ledger_service::LedgerService};

/// The expense/budget state coordinator — main entry point of the library.
///
/// Owns the in-memory view of expenses, categories, and budgets, keeps the
/// derived per-category aggregate consistent after every mutation, and
/// mediates between the injected persistence, key-value, and remote ports.
///
/// Single logical owner: all mutations happen through `&mut self` on one
/// control flow; there is no internal locking. The remote feed is the only
/// async collaborator and never touches coordinator state.
#[must_use]
pub struct ExpenseCoordinator {
    expenses: Vec<Expense>,
    categories: Vec<String>,
    budgets: BudgetBook,
    expenses_by_category: HashMap<String, f64>,
    expense_store: Box<dyn ExpenseStore>,
    kv_store: Box<dyn KeyValueStore>,
    remote: Option<Box<dyn RemoteFeed>>,
    ledger_service: LedgerService,
    budget_service: BudgetService,
    listeners: Vec<Listener>,
    /// Non-fatal errors recorded while loading initial state.
    startup_issues: Vec<CoreError>,
}

impl std::fmt::Debug for ExpenseCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseCoordinator")
            .field("expenses", &self.expenses.len())
            .field("categories", &self.categories)
            .field("budgets", &self.budgets.len())
            .field("listeners", &self.listeners.len())
            .field("startup_issues", &self.startup_issues.len())
            .finish()
    }
}

impl ExpenseCoordinator {
    /// Build a coordinator over the given ports and load initial state:
    ///
    /// 1. Fetch all persisted expenses. A failure is recorded in
    ///    [`startup_issues`](Self::startup_issues) and logged, the ledger
    ///    starts empty — construction never aborts.
    /// 2. Recompute the per-category aggregate.
    /// 3. Load the budget map from the key-value port. Absence or a decode
    ///    failure leaves budgets empty; not fatal.
    pub fn new(expense_store: Box<dyn ExpenseStore>, kv_store: Box<dyn KeyValueStore>) -> Self {
        let ledger_service = LedgerService::new();
        let budget_service = BudgetService::new();
        let mut startup_issues = Vec::new();

        let expenses = match expense_store.fetch_all() {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "initial expense fetch failed; starting empty");
                startup_issues.push(e);
                Vec::new()
            }
        };

        let budgets = match budget_service.load(kv_store.as_ref()) {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!(error = %e, "budget load failed; starting with no budgets");
                startup_issues.push(e);
                BudgetBook::new()
            }
        };

        let expenses_by_category = ledger_service.totals_by_category(&expenses);

        Self {
            expenses,
            categories: Vec::new(),
            budgets,
            expenses_by_category,
            expense_store,
            kv_store,
            remote: None,
            ledger_service,
            budget_service,
            listeners: Vec::new(),
            startup_issues,
        }
    }

    /// Attach a remote feed for the startup diagnostic refresh.
    pub fn with_remote(mut self, remote: Box<dyn RemoteFeed>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Full startup protocol: [`new`](Self::new) plus the best-effort
    /// remote refresh. The refresh result is informational only.
    pub async fn start(
        expense_store: Box<dyn ExpenseStore>,
        kv_store: Box<dyn KeyValueStore>,
        remote: Option<Box<dyn RemoteFeed>>,
    ) -> Self {
        let mut coordinator = Self::new(expense_store, kv_store);
        if let Some(feed) = remote {
            coordinator = coordinator.with_remote(feed);
        }
        coordinator.remote_refresh().await;
        coordinator
    }

    /// Errors swallowed while loading initial state (see [`new`](Self::new)).
    #[must_use]
    pub fn startup_issues(&self) -> &[CoreError] {
        &self.startup_issues
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Reload the expense list from the persistence port and recompute
    /// the aggregate.
    ///
    /// On failure returns `FetchFailed` and leaves the previous in-memory
    /// state fully intact — no partial overwrite.
    pub fn fetch_expenses(&mut self) -> Result<(), CoreError> {
        let fetched = self.expense_store.fetch_all()?;

        self.expenses = fetched;
        self.update_expenses_by_category();
        self.emit(&ChangeEvent::ExpensesReloaded {
            count: self.expenses.len(),
        });
        Ok(())
    }

    /// Record a new expense.
    ///
    /// The amount is rounded to cents; the date defaults to today. Returns
    /// the id of the new expense, or `None` when the input is invalid
    /// (non-finite amount or blank category) — invalid input is dropped
    /// silently rather than raised as an error.
    ///
    /// A persistence failure is reported through
    /// [`ChangeEvent::PersistFailed`] and a warning log, but the in-memory
    /// mutation stands: losing a write never loses the user's entry for
    /// the session.
    pub fn add_expense(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        note: Option<String>,
        date: Option<NaiveDate>,
    ) -> Option<Uuid> {
        let category = category.into();
        if !self.ledger_service.is_valid_input(amount, &category) {
            tracing::debug!(amount, category = %category, "dropping invalid expense input");
            return None;
        }

        let expense = match note {
            Some(n) => Expense::with_note(amount, category, date, n),
            None => Expense::new(amount, category, date),
        };
        let id = expense.id;

        let persisted = self
            .expense_store
            .save(&expense)
            .and_then(|()| self.expense_store.commit());
        if let Err(e) = persisted {
            self.report_persist_failure("add_expense", &e);
        }

        self.expenses.push(expense.clone());
        self.update_expenses_by_category();
        self.emit(&ChangeEvent::ExpenseAdded {
            id,
            category: expense.category,
            amount: expense.amount,
        });
        Some(id)
    }

    /// All expenses, in insertion order.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Expenses whose category equals `category`, in insertion order.
    #[must_use]
    pub fn expenses_for_category(&self, category: &str) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Number of recorded expenses.
    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    // ── Categories ──────────────────────────────────────────────────

    /// Append a category to the display-ordered list.
    ///
    /// Duplicates are NOT deduplicated — calling this twice with the same
    /// name yields two entries. Long-standing app behavior, pinned by test.
    pub fn add_category(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.categories.push(name.clone());

        if let Err(e) = self.expense_store.commit() {
            self.report_persist_failure("add_category", &e);
        }
        self.emit(&ChangeEvent::CategoryAdded { name });
    }

    /// Remove the category at `index` and drop its budget entry.
    ///
    /// Out-of-range indices are a no-op. Expenses already tagged with the
    /// category are left untouched: they keep counting toward its
    /// aggregate total even though the category is no longer listed.
    pub fn delete_category(&mut self, index: usize) -> Option<String> {
        if index >= self.categories.len() {
            return None;
        }
        let name = self.categories.remove(index);

        if self.budgets.remove(&name).is_some() {
            if let Err(e) = self
                .budget_service
                .persist(self.kv_store.as_mut(), &self.budgets)
            {
                self.report_persist_failure("delete_category", &e);
            }
        }
        if let Err(e) = self.expense_store.commit() {
            self.report_persist_failure("delete_category", &e);
        }

        self.emit(&ChangeEvent::CategoryDeleted { name: name.clone() });
        Some(name)
    }

    /// Categories in display order (duplicates possible).
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Set the budget ceiling for a category and persist the full map.
    ///
    /// Negative amounts are accepted as-is. The `BudgetChanged` event is
    /// emitted even when the write fails — the in-memory value is the one
    /// the UI shows either way, and the failure arrives separately as
    /// `PersistFailed`.
    pub fn set_budget(&mut self, category: impl Into<String>, amount: f64) {
        let category = category.into();
        self.budgets.set(category.clone(), amount);

        if let Err(e) = self
            .budget_service
            .persist(self.kv_store.as_mut(), &self.budgets)
        {
            self.report_persist_failure("set_budget", &e);
        }

        self.emit(&ChangeEvent::BudgetChanged { category, amount });
    }

    /// Budget for a category, 0.0 when none is set. Pure read.
    #[must_use]
    pub fn get_budget(&self, category: &str) -> f64 {
        self.budgets.get(category)
    }

    /// The full budget book.
    #[must_use]
    pub fn budgets(&self) -> &BudgetBook {
        &self.budgets
    }

    // ── Totals & Aggregates ─────────────────────────────────────────

    /// Sum of amounts over expenses tagged exactly `category`.
    /// Computed from the expense list, independent of the cached aggregate.
    #[must_use]
    pub fn total_for_category(&self, category: &str) -> f64 {
        self.ledger_service
            .total_for_category(&self.expenses, category)
    }

    /// `get_budget(category) - total_for_category(category)`.
    /// Negative when over budget; no clamping.
    #[must_use]
    pub fn remaining_budget(&self, category: &str) -> f64 {
        self.get_budget(category) - self.total_for_category(category)
    }

    /// The derived category → total mapping, recomputed after every
    /// mutation of the expense list. Blank categories appear under the
    /// literal `"Unknown"` bucket.
    #[must_use]
    pub fn expenses_by_category(&self) -> &HashMap<String, f64> {
        &self.expenses_by_category
    }

    /// Total spent across all categories.
    #[must_use]
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    // ── Remote Refresh ──────────────────────────────────────────────

    /// Best-effort diagnostic fetch from the remote feed.
    ///
    /// Logs the decoded record count and amount sum, or the failure.
    /// Never mutates coordinator state; without a configured feed it does
    /// nothing. Returns the record count when the fetch succeeded.
    pub async fn remote_refresh(&self) -> Option<usize> {
        let feed = self.remote.as_ref()?;

        match feed.fetch_records().await {
            Ok(records) => {
                let total: f64 = records.iter().map(|r| r.amount).sum();
                tracing::info!(
                    feed = feed.name(),
                    count = records.len(),
                    total,
                    "remote refresh completed"
                );
                Some(records.len())
            }
            Err(e) => {
                tracing::warn!(feed = feed.name(), error = %e, "remote refresh failed");
                None
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────

    /// Subscribe to state-change events. Listeners are called
    /// synchronously, in registration order, for every event.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export all expenses as a pretty-printed JSON string.
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.expenses)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize expenses: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Recompute the full aggregate from the expense list.
    fn update_expenses_by_category(&mut self) {
        self.expenses_by_category = self.ledger_service.totals_by_category(&self.expenses);
    }

    fn emit(&self, event: &ChangeEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    fn report_persist_failure(&self, operation: &'static str, error: &CoreError) {
        tracing::warn!(operation, error = %error, "persistence failure; keeping in-memory state");
        self.emit(&ChangeEvent::PersistFailed {
            operation,
            message: error.to_string(),
        });
    }
}
