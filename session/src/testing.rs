//! In-memory [`SessionClient`] for deterministic tests.
//!
//! The fake keeps a list of accounts, a current session and a subscriber set.
//! Tests can fail operations, hold a call open until released, and push
//! backend events as if they came from another tab or a token expiry.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::client::{ChangeHandler, SessionClient, SessionEvent, SubscriberSet, Subscription};
use crate::error::AuthError;
use crate::identity::{Credentials, Identity};

/// Call counters recorded by [`FakeSessionClient`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FakeCalls {
    pub current_identity: usize,
    pub sign_in: usize,
    pub sign_out: usize,
}

#[derive(Default)]
struct FakeState {
    accounts: Vec<(String, String, Identity)>,
    current: Option<Identity>,
    sign_in_error: Option<AuthError>,
    sign_out_error: Option<AuthError>,
    held_sign_in: Option<oneshot::Receiver<()>>,
    held_identity: Option<oneshot::Receiver<()>>,
    calls: FakeCalls,
}

#[derive(Default)]
pub struct FakeSessionClient {
    events: SubscriberSet,
    state: Mutex<FakeState>,
}

impl FakeSessionClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that `sign_in` will accept.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str, identity: Identity) -> Self {
        self.lock()
            .accounts
            .push((email.to_owned(), password.to_owned(), identity));
        self
    }

    /// Start with a restorable session, as if a token were persisted.
    #[must_use]
    pub fn with_session(self, identity: Identity) -> Self {
        self.lock().current = Some(identity);
        self
    }

    /// Make every `sign_in` fail with `error`, regardless of credentials.
    pub fn fail_sign_in(&self, error: AuthError) {
        self.lock().sign_in_error = Some(error);
    }

    /// Make the backend half of `sign_out` fail with `error`.
    pub fn fail_sign_out(&self, error: AuthError) {
        self.lock().sign_out_error = Some(error);
    }

    /// Hold the next `sign_in` open until the returned sender fires or drops.
    pub fn hold_next_sign_in(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().held_sign_in = Some(rx);
        tx
    }

    /// Hold the next `current_identity` response in transit.
    ///
    /// The answer is computed when the call starts, so events pushed while it
    /// is held make the eventual answer stale.
    pub fn hold_current_identity(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().held_identity = Some(rx);
        tx
    }

    /// Simulate a backend-originated change (other tab, refresh, expiry).
    pub fn push(&self, event: SessionEvent) {
        self.lock().current = event.identity.clone();
        self.events.emit(&event);
    }

    #[must_use]
    pub fn calls(&self) -> FakeCalls {
        self.lock().calls
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait(?Send)]
impl SessionClient for FakeSessionClient {
    async fn current_identity(&self) -> Option<Identity> {
        let (answer, held) = {
            let mut state = self.lock();
            state.calls.current_identity += 1;
            (state.current.clone(), state.held_identity.take())
        };
        if let Some(rx) = held {
            let _ = rx.await;
        }
        answer
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let held = {
            let mut state = self.lock();
            state.calls.sign_in += 1;
            state.held_sign_in.take()
        };
        if let Some(rx) = held {
            let _ = rx.await;
        }

        let result = {
            let state = self.lock();
            if let Some(error) = state.sign_in_error.clone() {
                Err(error)
            } else {
                state
                    .accounts
                    .iter()
                    .find(|(email, password, _)| *email == credentials.email && *password == credentials.password)
                    .map(|(_, _, identity)| identity.clone())
                    .ok_or(AuthError::InvalidCredentials)
            }
        };

        if let Ok(identity) = &result {
            self.push(SessionEvent::signed_in(identity.clone()));
        }
        result
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let error = {
            let mut state = self.lock();
            state.calls.sign_out += 1;
            state.sign_out_error.clone()
        };
        self.push(SessionEvent::signed_out());
        error.map_or(Ok(()), Err)
    }

    fn subscribe(&self, handler: ChangeHandler) -> Subscription {
        self.events.subscribe(handler)
    }
}
