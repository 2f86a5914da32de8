use rust_decimal::prelude::FromPrimitive as _;
use rust_decimal::Decimal;
use serde_json::Value;

use super::client::QboClient;
use crate::error::SyncError;

/// Read-only row for the `list-*` commands. No reconciliation logic here.
#[derive(Debug, Clone)]
pub struct RecordRow {
    pub id: String,
    pub txn_date: String,
    pub amount: Option<Decimal>,
    pub private_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub account_type: String,
}

pub async fn list_records(
    client: &QboClient,
    entity: &str,
    limit: usize,
) -> Result<Vec<RecordRow>, SyncError> {
    let stmt = format!("select * from {entity} orderby TxnDate desc maxresults {limit}");
    let body = client.query(&stmt).await?;
    let records = body
        .pointer(&format!("/QueryResponse/{entity}"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    Ok(records.iter().map(record_row).collect())
}

pub async fn list_accounts(client: &QboClient, limit: usize) -> Result<Vec<AccountRow>, SyncError> {
    let stmt = format!("select Id, Name, AccountType from Account maxresults {limit}");
    let body = client.query(&stmt).await?;
    let accounts = body
        .pointer("/QueryResponse/Account")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    Ok(accounts
        .iter()
        .map(|account| AccountRow {
            id: string_field(account, "Id"),
            name: string_field(account, "Name"),
            account_type: string_field(account, "AccountType"),
        })
        .collect())
}

fn record_row(record: &Value) -> RecordRow {
    // Deposits carry TotalAmt, transfers carry Amount.
    let amount = record
        .get("TotalAmt")
        .or_else(|| record.get("Amount"))
        .and_then(Value::as_f64)
        .and_then(Decimal::from_f64);
    RecordRow {
        id: string_field(record, "Id"),
        txn_date: string_field(record, "TxnDate"),
        amount,
        private_note: record
            .get("PrivateNote")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn string_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_row_reads_deposit_shape() {
        let row = record_row(&json!({
            "Id": "42",
            "TxnDate": "2023-11-14",
            "TotalAmt": 5.0,
            "PrivateNote": "hedera:0.0.1-1-1:1700000000.0",
        }));
        assert_eq!(row.id, "42");
        assert_eq!(row.txn_date, "2023-11-14");
        assert_eq!(row.amount, Some(Decimal::new(5, 0)));
        assert_eq!(
            row.private_note.as_deref(),
            Some("hedera:0.0.1-1-1:1700000000.0")
        );
    }

    #[test]
    fn record_row_reads_transfer_shape() {
        let row = record_row(&json!({
            "Id": "7",
            "TxnDate": "2023-11-14",
            "Amount": 3.0,
        }));
        assert_eq!(row.amount, Some(Decimal::new(3, 0)));
        assert_eq!(row.private_note, None);
    }
}
