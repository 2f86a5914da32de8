use crate::error::SyncError;
use crate::qbo_api::LedgerBackend;

use super::effect::AccountingEffect;

/// Creates the accounting record for `effect`, carrying `key` in its
/// annotation. A backend fault propagates untouched; the caller decides how
/// far the failure reaches. Never retried here.
pub async fn create(
    backend: &impl LedgerBackend,
    effect: &AccountingEffect,
    key: &str,
) -> Result<String, SyncError> {
    log::info!("Creating {} for {key}...", effect.entity());
    let record_id = backend
        .create_record(effect.entity(), effect.payload(key))
        .await?;
    log::info!("Creating {} for {key}...done (Id {record_id})", effect.entity());
    Ok(record_id)
}
