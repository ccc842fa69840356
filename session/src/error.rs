//! Auth error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Expected outcomes (bad credentials, no session) are values, not panics.
//! Sign-in failures reach the user through [`AuthError::user_message`];
//! sign-out and initial-query failures are logged and swallowed by the flows.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by [`crate::SessionClient`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the email/password pair.
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// The backend could not be reached.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The backend answered with a non-success status.
    #[error("backend rejected request: status {status}: {message}")]
    BackendRejected { status: u16, message: String },

    /// No session is held. Callers of `current_identity` see this as `None`.
    #[error("no active session")]
    NoActiveSession,
}

impl AuthError {
    /// Stable machine-readable code, for logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::NetworkFailure(_) => "E_NETWORK_FAILURE",
            Self::BackendRejected { .. } => "E_BACKEND_REJECTED",
            Self::NoActiveSession => "E_NO_ACTIVE_SESSION",
        }
    }

    /// Human-readable message for the sign-in form. Never empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid email or password.".to_owned(),
            Self::NetworkFailure(_) => {
                "Could not reach the sign-in service. Check your connection and try again.".to_owned()
            }
            Self::BackendRejected { status, message } => {
                let message = message.trim();
                if message.is_empty() {
                    format!("Sign-in was rejected (status {status}).")
                } else {
                    message.to_owned()
                }
            }
            Self::NoActiveSession => "You are not signed in.".to_owned(),
        }
    }
}
