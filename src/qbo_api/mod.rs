mod accounts;
mod backend;
mod client;
mod records;
mod session;

pub use accounts::{
    bootstrap_chart, wallet_account_name, ChartOfAccounts, LedgerAccountRef,
    CLEARING_ACCOUNT_NAME, OUTFLOW_ACCOUNT_NAME,
};
pub use backend::LedgerBackend;
pub use client::QboClient;
pub use records::{list_accounts, list_records, AccountRow, RecordRow};
pub use session::SessionContext;
