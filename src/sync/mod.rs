mod classify;
mod effect;
mod identity;
mod orchestrator;
mod resolver;
mod writer;

pub use classify::{counterparties, net_movement};
pub use effect::{tinybar_to_hbar, AccountingEffect};
pub use identity::{derive_date, derive_key};
pub use orchestrator::{run_reconciliation, BatchReport, OutcomeStatus, TransactionOutcome};
pub use resolver::{remote_duplicate, CANDIDATE_CAP};
