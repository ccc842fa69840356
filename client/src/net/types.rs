//! GoTrue wire DTOs and the persisted session record.
//!
//! DESIGN
//! ======
//! Only the fields the client acts on are typed. Profile data is handed to
//! [`Identity`] as opaque metadata.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use session::Identity;

/// Refresh the access token when it has less than this many seconds left.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Fallback lifetime when the backend omits both `expires_at` and `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// User object returned by `/auth/v1/user` and embedded in token responses.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub app_metadata: serde_json::Value,
}

impl GoTrueUser {
    #[must_use]
    pub fn into_identity(self) -> Identity {
        let metadata = serde_json::json!({
            "user_metadata": self.user_metadata,
            "app_metadata": self.app_metadata,
        });
        Identity { id: self.id, email: self.email.filter(|e| !e.is_empty()), metadata }
    }
}

/// Body of a successful `/auth/v1/token` call.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: GoTrueUser,
}

impl TokenResponse {
    /// Convert into the record persisted in `localStorage`.
    #[must_use]
    pub fn into_session(self, now_secs: i64) -> StoredSession {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now_secs.saturating_add(secs)))
            .unwrap_or_else(|| {
                log::debug!("token response carried no expiry; assuming {DEFAULT_TOKEN_LIFETIME_SECS}s");
                now_secs.saturating_add(DEFAULT_TOKEN_LIFETIME_SECS)
            });
        StoredSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into_identity(),
        }
    }
}

/// Session as persisted between page loads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token expiry, seconds since the Unix epoch.
    pub expires_at: i64,
    pub user: Identity,
}

impl StoredSession {
    #[must_use]
    pub fn needs_refresh(&self, now_secs: i64) -> bool {
        self.expires_at.saturating_sub(now_secs) <= REFRESH_MARGIN_SECS
    }
}

/// Error body shapes GoTrue has used across versions.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GoTrueErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl GoTrueErrorBody {
    /// First non-empty human-readable field.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        [&self.msg, &self.error_description, &self.message, &self.error]
            .into_iter()
            .filter_map(Option::as_deref)
            .map(str::trim)
            .find(|m| !m.is_empty())
    }

    #[must_use]
    pub fn is_invalid_credentials(&self) -> bool {
        self.error_code.as_deref() == Some("invalid_credentials") || self.error.as_deref() == Some("invalid_grant")
    }
}
