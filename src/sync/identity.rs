use chrono::{DateTime, NaiveDate, Utc};

use crate::mirror_api::MirrorTransaction;

pub const KEY_NAMESPACE: &str = "hedera";

/// Deterministic identity of a mirror transaction, stored in the record's
/// `PrivateNote`. Transaction id plus consensus timestamp is unique per the
/// ledger's own guarantees; degenerate inputs still yield a stable key.
pub fn derive_key(tx: &MirrorTransaction) -> String {
    format!(
        "{KEY_NAMESPACE}:{}:{}",
        tx.transaction_id, tx.consensus_timestamp
    )
}

/// UTC calendar date of the integer-seconds part of a consensus timestamp
/// ("1700000000.000000001"). An unparseable timestamp falls back to today's
/// date; callers must not rely on precision for malformed input.
pub fn derive_date(consensus_timestamp: &str) -> NaiveDate {
    consensus_timestamp
        .split('.')
        .next()
        .and_then(|seconds| seconds.parse::<i64>().ok())
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| Utc::now().date_naive())
}
