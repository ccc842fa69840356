//! Sign-in flow and form model.
//!
//! SYSTEM CONTEXT
//! ==============
//! The flow calls the client and navigates on success; it never writes the
//! store. The store flips to `Authenticated` through the `SignedIn` event the
//! client emits.
//!
//! CONCURRENCY
//! ===========
//! One attempt at a time. A submission while another is in flight returns
//! [`SignInOutcome::Busy`] without touching the backend.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::client::SessionClient;
use crate::error::AuthError;
use crate::identity::{Credentials, Identity};
use crate::nav::{Navigator, Route};

/// Result of one submission.
#[derive(Clone, Debug, PartialEq)]
pub enum SignInOutcome {
    /// Backend accepted the credentials; navigation to `/admin` was issued.
    SignedIn(Identity),
    /// Backend refused or could not be reached.
    Failed { error: AuthError, message: String },
    /// Form input was incomplete; no backend call was made.
    Invalid(&'static str),
    /// Another attempt is still in flight.
    Busy,
}

/// Drives sign-in attempts against a [`SessionClient`].
#[derive(Clone)]
pub struct SignInFlow {
    client: Arc<dyn SessionClient>,
    in_flight: Arc<AtomicBool>,
}

impl SignInFlow {
    #[must_use]
    pub fn new(client: Arc<dyn SessionClient>) -> Self {
        Self { client, in_flight: Arc::default() }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate the raw form input and attempt a sign-in.
    pub async fn submit<N>(&self, email: &str, password: &str, navigator: &N) -> SignInOutcome
    where
        N: Navigator + ?Sized,
    {
        let Some(_attempt) = AttemptGuard::acquire(&self.in_flight) else {
            log::debug!("sign-in ignored: attempt already in flight");
            return SignInOutcome::Busy;
        };

        let credentials = match Credentials::from_input(email, password) {
            Ok(credentials) => credentials,
            Err(message) => return SignInOutcome::Invalid(message),
        };

        match self.client.sign_in(&credentials).await {
            Ok(identity) => {
                log::info!("signed in as {}", identity.id);
                navigator.navigate(Route::Admin);
                SignInOutcome::SignedIn(identity)
            }
            Err(error) => {
                log::warn!("sign-in failed [{}]: {error}", error.error_code());
                SignInOutcome::Failed { message: error.user_message(), error }
            }
        }
    }
}

/// Holds the in-flight flag for the lifetime of one attempt.
struct AttemptGuard<'a>(&'a AtomicBool);

impl<'a> AttemptGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// FORM MODEL
// =============================================================================

/// Sign-in form fields and feedback.
///
/// Plain data so the UI can keep it in a single signal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub message: Option<String>,
    pub busy: bool,
}

impl SignInForm {
    /// Mark an attempt as started. Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.message = None;
        true
    }

    /// Fold an outcome back into the form.
    ///
    /// The email is always kept; the password is cleared after any backend
    /// answer.
    pub fn settle(&mut self, outcome: &SignInOutcome) {
        match outcome {
            SignInOutcome::Busy => return,
            SignInOutcome::SignedIn(_) => {
                self.password.clear();
                self.message = None;
            }
            SignInOutcome::Failed { message, .. } => {
                self.password.clear();
                self.message = Some(message.clone());
            }
            SignInOutcome::Invalid(message) => {
                self.message = Some((*message).to_owned());
            }
        }
        self.busy = false;
    }
}
