use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::mirror_api::MirrorSource;
use crate::qbo_api::{bootstrap_chart, LedgerBackend};

use super::effect::{tinybar_to_hbar, AccountingEffect};
use super::{classify, identity, resolver, writer};

/// Terminal state of one transaction within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// A new record was written.
    Created,
    /// The key was already seen earlier in this run; no backend query made.
    DuplicateLocal,
    /// The backend already holds a record with this key.
    DuplicateRemote,
    /// The backend rejected the query or write for this transaction. The
    /// raw fault payload rides along for diagnostics.
    Failed {
        message: String,
        fault: serde_json::Value,
    },
}

#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    pub transaction_id: String,
    pub key: String,
    /// "Deposit" or "Transfer".
    pub entity: &'static str,
    /// Signed HBAR movement of the tracked account.
    pub amount: Decimal,
    pub status: OutcomeStatus,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per actionable transaction, in processing order.
    pub outcomes: Vec<TransactionOutcome>,
}

impl BatchReport {
    pub fn created(&self) -> usize {
        self.count(|status| matches!(status, OutcomeStatus::Created))
    }

    pub fn duplicates_local(&self) -> usize {
        self.count(|status| matches!(status, OutcomeStatus::DuplicateLocal))
    }

    pub fn duplicates_remote(&self) -> usize {
        self.count(|status| matches!(status, OutcomeStatus::DuplicateRemote))
    }

    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, OutcomeStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&OutcomeStatus) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| pred(&outcome.status))
            .count()
    }
}

/// Runs one reconciliation batch for the configured target account.
///
/// Setup (chart bootstrap, page fetch) failures abort the run before any
/// transaction is touched. Per-transaction backend rejections are recorded
/// as `Failed` and the batch continues; transport failures abort the batch.
///
/// The existence check and the write are two separate backend calls. Two
/// runs executing concurrently for the same account can both pass the check
/// before either writes, creating the record twice; the backend offers no
/// uniqueness constraint on the annotation, so operate with a single writer
/// per tracked account.
pub async fn run_reconciliation(
    mirror: &impl MirrorSource,
    backend: &impl LedgerBackend,
    config: &SyncConfig,
) -> Result<BatchReport, SyncError> {
    let chart = bootstrap_chart(backend, &config.tracked_accounts).await?;
    let transactions = mirror
        .latest_transactions(&config.target_account, config.page_limit)
        .await?;

    // Guard scoped to this invocation only; it saves redundant backend
    // round-trips within one run and nothing more.
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut report = BatchReport::default();

    for tx in &transactions {
        let net = classify::net_movement(tx, &config.target_account);
        let Some(effect) = AccountingEffect::from_net(tx, &config.target_account, net, &chart)
        else {
            continue;
        };
        let key = identity::derive_key(tx);

        let status = if !seen_keys.insert(key.clone()) {
            OutcomeStatus::DuplicateLocal
        } else {
            match reconcile_one(backend, &effect, &key).await {
                Ok(status) => status,
                Err(SyncError::BackendRejected { message, fault }) => {
                    OutcomeStatus::Failed { message, fault }
                }
                Err(err) => return Err(err),
            }
        };

        log::info!("{} {key}: {status:?}", tx.transaction_id);
        report.outcomes.push(TransactionOutcome {
            transaction_id: tx.transaction_id.clone(),
            key,
            entity: effect.entity(),
            amount: tinybar_to_hbar(net),
            status,
        });
    }

    Ok(report)
}

async fn reconcile_one(
    backend: &impl LedgerBackend,
    effect: &AccountingEffect,
    key: &str,
) -> Result<OutcomeStatus, SyncError> {
    if resolver::remote_duplicate(backend, effect, key).await? {
        return Ok(OutcomeStatus::DuplicateRemote);
    }
    writer::create(backend, effect, key).await?;
    Ok(OutcomeStatus::Created)
}
