use std::collections::HashMap;

use super::backend::LedgerBackend;
use crate::error::SyncError;

pub const CLEARING_ACCOUNT_NAME: &str = "Hedera Clearing";
pub const OUTFLOW_ACCOUNT_NAME: &str = "Hedera External Outflow";

pub fn wallet_account_name(hedera_account: &str) -> String {
    format!("Hedera Wallet {hedera_account}")
}

/// Reference to one QuickBooks account, as used in record payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAccountRef {
    pub value: String,
    pub name: String,
}

/// The QuickBooks accounts one batch writes against: a wallet account per
/// tracked Hedera account, a clearing account for inbound deposits, and an
/// outflow account for transfers leaving the tracked set.
#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    wallets: HashMap<String, LedgerAccountRef>,
    pub clearing: LedgerAccountRef,
    pub outflow: LedgerAccountRef,
}

impl ChartOfAccounts {
    pub fn wallet(&self, hedera_account: &str) -> Option<&LedgerAccountRef> {
        self.wallets.get(hedera_account)
    }

    #[cfg(test)]
    pub(crate) fn for_test(
        wallets: HashMap<String, LedgerAccountRef>,
        clearing: LedgerAccountRef,
        outflow: LedgerAccountRef,
    ) -> ChartOfAccounts {
        ChartOfAccounts {
            wallets,
            clearing,
            outflow,
        }
    }
}

/// Find-or-create the chart of accounts. Runs once per batch, before any
/// transaction is processed; a failure here aborts the whole run.
pub async fn bootstrap_chart(
    backend: &impl LedgerBackend,
    tracked_accounts: &[String],
) -> Result<ChartOfAccounts, SyncError> {
    log::info!("Bootstrapping chart of accounts...");

    let mut wallets = HashMap::new();
    for hedera_account in tracked_accounts {
        let account_ref = backend
            .ensure_account(&wallet_account_name(hedera_account), "Bank")
            .await?;
        wallets.insert(hedera_account.clone(), account_ref);
    }
    let clearing = backend
        .ensure_account(CLEARING_ACCOUNT_NAME, "Other Current Asset")
        .await?;
    let outflow = backend
        .ensure_account(OUTFLOW_ACCOUNT_NAME, "Other Current Asset")
        .await?;

    log::info!("Bootstrapping chart of accounts...done");
    Ok(ChartOfAccounts {
        wallets,
        clearing,
        outflow,
    })
}
