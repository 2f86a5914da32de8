use crate::error::SyncError;

/// Authenticated QuickBooks session, bound to exactly one company (realm).
///
/// Passed explicitly into every backend-facing operation; there is no ambient
/// token state anywhere in the crate.
pub struct SessionContext {
    access_token: String,
    realm_id: String,
}

impl SessionContext {
    pub fn new(access_token: String, realm_id: String) -> SessionContext {
        SessionContext {
            access_token,
            realm_id,
        }
    }

    pub fn realm_id(&self) -> &str {
        &self.realm_id
    }

    pub(super) fn bearer_token(&self) -> &str {
        &self.access_token
    }

    /// Hard-fails when the session can't be used against `expected_realm`.
    /// Operating against the wrong company must never happen silently.
    pub fn ensure_realm(&self, expected_realm: &str) -> Result<(), SyncError> {
        if self.access_token.trim().is_empty() {
            return Err(SyncError::SessionInvalid {
                reason: "no access token".to_string(),
            });
        }
        if self.realm_id != expected_realm {
            return Err(SyncError::SessionInvalid {
                reason: format!(
                    "session is bound to company {}, expected {}",
                    self.realm_id, expected_realm
                ),
            });
        }
        Ok(())
    }
}

// The token is a secret, keep it out of Debug output.
impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("realm_id", &self.realm_id)
            .field("access_token", &"[redacted]")
            .finish()
    }
}
