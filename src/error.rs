use thiserror::Error;

/// Failures the reconciliation core can surface to its caller.
///
/// `BackendRejected` is scoped to a single transaction; the batch keeps going.
/// Everything else aborts the run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport or HTTP-level failure talking to the mirror node or QuickBooks.
    #[error("upstream unavailable ({context}): {message}")]
    UpstreamUnavailable {
        context: &'static str,
        message: String,
    },

    /// QuickBooks returned a semantic fault, possibly inside an HTTP 200 body.
    #[error("backend rejected the request: {message}")]
    BackendRejected {
        message: String,
        fault: serde_json::Value,
    },

    /// Missing token or session bound to a different company than expected.
    #[error("session invalid: {reason}")]
    SessionInvalid { reason: String },
}

impl SyncError {
    pub(crate) fn upstream(context: &'static str, err: impl std::fmt::Display) -> Self {
        SyncError::UpstreamUnavailable {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn rejected(message: impl Into<String>, fault: serde_json::Value) -> Self {
        SyncError::BackendRejected {
            message: message.into(),
            fault,
        }
    }
}
