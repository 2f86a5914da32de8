use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use super::accounts::LedgerAccountRef;
use super::client::{escape_query_literal, QboClient};
use crate::error::SyncError;

/// The accounting backend as the reconciliation core sees it.
///
/// The query surface is deliberately narrow: the backend can filter records
/// by transaction date, nothing else we rely on. Identity lives in the
/// `PrivateNote` annotation and is matched client-side.
#[async_trait]
pub trait LedgerBackend: Sync {
    /// `PrivateNote` values of all records of `entity` dated `date`, capped
    /// at `cap` results. Records without a note are omitted.
    async fn query_annotations(
        &self,
        entity: &str,
        date: NaiveDate,
        cap: usize,
    ) -> Result<Vec<String>, SyncError>;

    /// Creates one record of `entity` and returns its backend id.
    async fn create_record(&self, entity: &str, payload: Value) -> Result<String, SyncError>;

    /// Finds an account by exact name, creating it when absent.
    async fn ensure_account(
        &self,
        name: &str,
        account_type: &str,
    ) -> Result<LedgerAccountRef, SyncError>;
}

#[async_trait]
impl LedgerBackend for QboClient {
    async fn query_annotations(
        &self,
        entity: &str,
        date: NaiveDate,
        cap: usize,
    ) -> Result<Vec<String>, SyncError> {
        let stmt = format!(
            "select Id, PrivateNote from {entity} where TxnDate = '{date}' maxresults {cap}"
        );
        let body = self.query(&stmt).await?;
        Ok(collect_annotations(&body, entity))
    }

    async fn create_record(&self, entity: &str, payload: Value) -> Result<String, SyncError> {
        let body = self.create(entity, &payload).await?;
        body.pointer(&format!("/{entity}/Id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                SyncError::rejected(format!("created {entity} is missing an Id"), body.clone())
            })
    }

    async fn ensure_account(
        &self,
        name: &str,
        account_type: &str,
    ) -> Result<LedgerAccountRef, SyncError> {
        let stmt = format!(
            "select Id, Name from Account where Name = '{}'",
            escape_query_literal(name)
        );
        let body = self.query(&stmt).await?;
        if let Some(id) = body
            .pointer("/QueryResponse/Account/0/Id")
            .and_then(Value::as_str)
        {
            return Ok(LedgerAccountRef {
                value: id.to_string(),
                name: name.to_string(),
            });
        }

        log::info!("Creating QuickBooks account {name:?}...");
        let payload = serde_json::json!({"Name": name, "AccountType": account_type});
        let created = self.create("Account", &payload).await?;
        let id = created
            .pointer("/Account/Id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SyncError::rejected("created Account is missing an Id", created.clone())
            })?;
        Ok(LedgerAccountRef {
            value: id.to_string(),
            name: name.to_string(),
        })
    }
}

fn collect_annotations(body: &Value, entity: &str) -> Vec<String> {
    body.pointer(&format!("/QueryResponse/{entity}"))
        .and_then(Value::as_array)
        .map(|records| {
            records
                .iter()
                .filter_map(|record| record.get("PrivateNote"))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_annotations_from_query_response() {
        let body = json!({
            "QueryResponse": {
                "Deposit": [
                    {"Id": "1", "PrivateNote": "hedera:0.0.1-1-1:1700000000.0"},
                    {"Id": "2"},
                    {"Id": "3", "PrivateNote": "hedera:0.0.1-2-2:1700000700.0"},
                ],
                "maxResults": 3,
            },
        });
        assert_eq!(
            collect_annotations(&body, "Deposit"),
            vec![
                "hedera:0.0.1-1-1:1700000000.0".to_string(),
                "hedera:0.0.1-2-2:1700000700.0".to_string(),
            ]
        );
    }

    #[test]
    fn empty_query_response_yields_nothing() {
        assert!(collect_annotations(&json!({"QueryResponse": {}}), "Transfer").is_empty());
        assert!(collect_annotations(&json!({}), "Transfer").is_empty());
    }
}
