//! Identity and credential types.
//!
//! DESIGN
//! ======
//! `Identity` is whatever the auth backend says the principal is. The core
//! only reads `id` and `email`; `metadata` is carried as opaque JSON so
//! backend-specific profile fields never leak into the state machine.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Local validation message shown when the sign-in form is incomplete.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Enter both email and password.";

/// The authenticated principal as known to the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque backend identifier.
    pub id: String,
    /// Sign-in email, if the backend reports one.
    #[serde(default)]
    pub email: Option<String>,
    /// Backend-issued metadata. Never inspected by the core.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), email: None, metadata: serde_json::Value::Null }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Label used by views: the email when known, otherwise the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// Email + password for a single sign-in attempt.
///
/// Never persisted. `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from raw form input.
    ///
    /// The email is trimmed; the password is taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`MISSING_CREDENTIALS_MESSAGE`] when either field is empty.
    pub fn from_input(email: &str, password: &str) -> Result<Self, &'static str> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(MISSING_CREDENTIALS_MESSAGE);
        }
        Ok(Self { email: email.to_owned(), password: password.to_owned() })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
