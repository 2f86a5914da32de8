use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use super::client::MirrorClient;
use crate::error::SyncError;

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorTransaction {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub consensus_timestamp: String,
    #[serde(default)]
    pub transfers: Vec<MirrorTransfer>,
}

/// One signed entry of a transaction's transfer list, in tinybar.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorTransfer {
    #[serde(default)]
    pub account: String,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub amount: i64,
}

/// Mirror nodes occasionally serve amounts as strings, and third-party
/// mirrors have been seen omitting the field. An entry we can't read counts
/// as no movement rather than aborting the whole page.
fn amount_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0),
        serde_json::Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    })
}

#[derive(Deserialize)]
struct TransactionsResponse {
    #[serde(default)]
    transactions: Vec<MirrorTransaction>,
}

#[async_trait]
pub trait MirrorSource: Sync {
    /// The most recent transactions touching `account_id`, newest first.
    async fn latest_transactions(
        &self,
        account_id: &str,
        limit: u32,
    ) -> Result<Vec<MirrorTransaction>, SyncError>;
}

#[async_trait]
impl MirrorSource for MirrorClient {
    async fn latest_transactions(
        &self,
        account_id: &str,
        limit: u32,
    ) -> Result<Vec<MirrorTransaction>, SyncError> {
        log::info!("Requesting transactions for {account_id}...");

        let url = format!("{}/api/v1/transactions", self.base_url());
        let response = self
            .http()
            .get(&url)
            .query(&[
                ("account.id", account_id),
                ("limit", &limit.to_string()),
                ("order", "desc"),
            ])
            .send()
            .await
            .map_err(|err| SyncError::upstream("mirror node", err))?;
        if !response.status().is_success() {
            return Err(SyncError::upstream(
                "mirror node",
                format!("HTTP {}", response.status()),
            ));
        }
        let page: TransactionsResponse = response
            .json()
            .await
            .map_err(|err| SyncError::upstream("mirror node", err))?;

        log::info!(
            "Requesting transactions for {account_id}...done ({} received)",
            page.transactions.len()
        );
        Ok(page.transactions)
    }
}
