//! Session client contract and the subscription registry backends share.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionClient` is the only way the app talks to the auth backend. Every
//! change of authority (sign-in here or in another tab, token refresh,
//! expiry, sign-out) is pushed to subscribers as a [`SessionEvent`]; the
//! store is updated from those events and nothing else.
//!
//! CONCURRENCY
//! ===========
//! The UI runs on a single cooperative event loop, so client futures are
//! `?Send`. The client itself is `Send + Sync` so it can sit in Leptos
//! context and cleanup closures.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use async_trait::async_trait;

use crate::error::AuthError;
use crate::identity::{Credentials, Identity};
use crate::store::SessionState;

// =============================================================================
// EVENTS
// =============================================================================

/// Why the backend's view of the session changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEventKind {
    /// Session restored from persisted state on load.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl SessionEventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
        }
    }
}

/// A single notification on the subscription channel.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionEvent {
    pub kind: SessionEventKind,
    pub identity: Option<Identity>,
}

impl SessionEvent {
    #[must_use]
    pub fn new(kind: SessionEventKind, identity: Option<Identity>) -> Self {
        Self { kind, identity }
    }

    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self::new(SessionEventKind::SignedIn, Some(identity))
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::new(SessionEventKind::SignedOut, None)
    }

    /// The resolved state this event implies. Never `Unresolved`.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::from_identity(self.identity.clone())
    }
}

// =============================================================================
// CLIENT CONTRACT
// =============================================================================

/// Handler registered on the subscription channel.
pub type ChangeHandler = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Client-side interface to the external auth backend.
#[async_trait(?Send)]
pub trait SessionClient: Send + Sync {
    /// Identity backed by whatever session is currently valid.
    ///
    /// Returns `None` when there is no session or the lookup failed in a way
    /// the caller cannot act on.
    async fn current_identity(&self) -> Option<Identity>;

    /// Exchange credentials for a session.
    ///
    /// Emits [`SessionEventKind::SignedIn`] on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`], [`AuthError::NetworkFailure`]
    /// or [`AuthError::BackendRejected`].
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// End the session.
    ///
    /// The local session is always dropped and [`SessionEventKind::SignedOut`]
    /// is always emitted; the result only reports whether the backend
    /// acknowledged the revocation.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the backend call failed.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register `handler` for every subsequent [`SessionEvent`].
    fn subscribe(&self, handler: ChangeHandler) -> Subscription;
}

// =============================================================================
// SUBSCRIBER REGISTRY
// =============================================================================

type SharedHandler = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

struct Entry {
    id: u64,
    active: Arc<AtomicBool>,
    handler: SharedHandler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Ordered set of change handlers.
///
/// Backends embed one of these and call [`SubscriberSet::emit`] whenever the
/// session changes. Handlers run in registration order, outside the lock.
#[derive(Clone, Default)]
pub struct SubscriberSet {
    registry: Arc<Mutex<Registry>>,
}

impl SubscriberSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.push(Entry { id, active: active.clone(), handler: Arc::new(handler) });
        Subscription { id, active, registry: Arc::downgrade(&self.registry) }
    }

    /// Deliver `event` to every live handler.
    pub fn emit(&self, event: &SessionEvent) {
        let live: Vec<(Arc<AtomicBool>, SharedHandler)> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry
                .entries
                .iter()
                .map(|e| (e.active.clone(), e.handler.clone()))
                .collect()
        };
        for (active, handler) in live {
            // Re-checked per handler: an earlier handler may have cancelled a later one.
            if active.load(Ordering::Acquire) {
                handler(event);
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability to cancel one subscription.
///
/// Cancelling is idempotent and also happens on drop. After cancellation the
/// handler is never invoked again, including for an event mid-dispatch.
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// A subscription that was never attached to anything.
    #[must_use]
    pub fn detached() -> Self {
        Self { id: 0, active: Arc::new(AtomicBool::new(false)), registry: Weak::new() }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .retain(|e| e.id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
