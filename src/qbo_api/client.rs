use serde_json::Value;

use super::session::SessionContext;
use crate::error::SyncError;

pub struct QboClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl QboClient {
    pub fn new(session: SessionContext, base_url: String) -> QboClient {
        QboClient {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Runs a statement in the QuickBooks query language and returns the
    /// response body.
    pub async fn query(&self, stmt: &str) -> Result<Value, SyncError> {
        log::debug!("QuickBooks query: {stmt}");
        let url = format!(
            "{}/v3/company/{}/query",
            self.base_url,
            self.session.realm_id()
        );
        let response = self
            .http
            .get(&url)
            .query(&[("query", stmt), ("minorversion", "65")])
            .bearer_auth(self.session.bearer_token())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| SyncError::upstream("quickbooks query", err))?;
        Self::read_body("quickbooks query", response).await
    }

    /// Creates an entity (`Account`, `Deposit`, `Transfer`) and returns the
    /// response body.
    pub async fn create(&self, entity: &str, payload: &Value) -> Result<Value, SyncError> {
        let url = format!(
            "{}/v3/company/{}/{}",
            self.base_url,
            self.session.realm_id(),
            entity.to_ascii_lowercase()
        );
        let response = self
            .http
            .post(&url)
            .query(&[("minorversion", "65")])
            .bearer_auth(self.session.bearer_token())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|err| SyncError::upstream("quickbooks create", err))?;
        Self::read_body("quickbooks create", response).await
    }

    /// QuickBooks reports semantic faults in the response body, sometimes
    /// under HTTP 200. A fault body always wins over the status code.
    async fn read_body(context: &'static str, response: reqwest::Response) -> Result<Value, SyncError> {
        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) if status.is_success() => return Err(SyncError::upstream(context, err)),
            Err(_) => {
                return Err(SyncError::upstream(context, format!("HTTP {status}")));
            }
        };
        if let Some(err) = extract_fault(&body) {
            return Err(err);
        }
        if !status.is_success() {
            return Err(SyncError::upstream(context, format!("HTTP {status}")));
        }
        Ok(body)
    }
}

/// Pulls a `Fault` object out of a response body, if present.
pub(super) fn extract_fault(body: &Value) -> Option<SyncError> {
    let fault = body.get("Fault").or_else(|| body.get("fault"))?;
    Some(SyncError::rejected(fault_message(fault), fault.clone()))
}

fn fault_message(fault: &Value) -> String {
    let error = fault.pointer("/Error/0");
    let message = error
        .and_then(|e| e.get("Message"))
        .and_then(Value::as_str);
    let detail = error.and_then(|e| e.get("Detail")).and_then(Value::as_str);
    match (message, detail) {
        (Some(message), Some(detail)) => format!("{message}: {detail}"),
        (Some(message), None) => message.to_string(),
        _ => fault.to_string(),
    }
}

/// Escapes a string literal for the QuickBooks query language.
pub(super) fn escape_query_literal(value: &str) -> String {
    value.replace('\'', "\\'")
}
