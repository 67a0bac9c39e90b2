pub mod budget_service;
pub mod ledger_service;
