use crate::error::SyncError;
use crate::qbo_api::LedgerBackend;

use super::effect::AccountingEffect;

/// Upper bound on same-day candidates fetched per duplicate check. A day
/// holding more records than this can hide a duplicate beyond the cap; an
/// accepted approximation, not a correctness guarantee.
// TODO Paginate same-day candidates instead of relying on the cap.
pub const CANDIDATE_CAP: usize = 200;

/// Whether a record for this effect already exists in the backend.
///
/// The backend's query language can only filter these entities by
/// transaction date, so we fetch all same-day candidates of the effect's
/// kind and compare their annotations against the key by exact string
/// equality. Same-day records with other keys are expected and ignored; the
/// date is derived deterministically, so the same input always queries the
/// same bucket.
pub async fn remote_duplicate(
    backend: &impl LedgerBackend,
    effect: &AccountingEffect,
    key: &str,
) -> Result<bool, SyncError> {
    let annotations = backend
        .query_annotations(effect.entity(), effect.date(), CANDIDATE_CAP)
        .await?;
    Ok(annotations.iter().any(|note| note == key))
}
