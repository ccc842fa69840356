//! Session store: the app's single belief about who is signed in.
//!
//! DESIGN
//! ======
//! Three states instead of `Option<User>`: `Unresolved` covers the window
//! between page load and the backend's first answer, so views can hold off on
//! a sign-in prompt until the answer arrives.
//!
//! Writes are crate-private. Only [`crate::SessionSync`] transitions the store
//! (initial query result, then subscription events); views get `state()` and
//! `watch()`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::client::SessionEvent;
use crate::identity::Identity;

/// Client-side belief about the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// The backend has not answered yet.
    #[default]
    Unresolved,
    Anonymous,
    Authenticated(Identity),
}

impl SessionState {
    /// Resolved state for an optional identity.
    #[must_use]
    pub fn from_identity(identity: Option<Identity>) -> Self {
        identity.map_or(Self::Anonymous, Self::Authenticated)
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unresolved | Self::Anonymous => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Anonymous => "anonymous",
            Self::Authenticated(_) => "authenticated",
        }
    }
}

/// Handle returned by [`SessionStore::watch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

#[derive(Default)]
struct StoreInner {
    state: SessionState,
    revision: u64,
    next_listener: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Shared, injectable session store. Cloning shares the same state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl SessionStore {
    /// A fresh store in [`SessionState::Unresolved`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// Number of transitions applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Call `listener` with the new state after every transition.
    pub fn watch<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.next_listener += 1;
        let id = inner.next_listener;
        inner.listeners.push((id, Arc::new(listener)));
        ListenerId(id)
    }

    pub fn unwatch(&self, id: ListenerId) {
        self.lock().listeners.retain(|(lid, _)| *lid != id.0);
    }

    /// Apply the initial identity query.
    ///
    /// Ignored once anything has resolved the store: a subscription event is
    /// always newer than the query that raced it. Returns whether it applied.
    pub(crate) fn resolve_initial(&self, identity: Option<Identity>) -> bool {
        if self.lock().state.is_resolved() {
            return false;
        }
        self.transition(SessionState::from_identity(identity));
        true
    }

    /// Apply a subscription event. Last writer wins.
    pub(crate) fn apply_event(&self, event: &SessionEvent) {
        self.transition(event.state());
    }

    fn transition(&self, next: SessionState) {
        let (state, listeners) = {
            let mut inner = self.lock();
            inner.state = next;
            inner.revision += 1;
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.state.clone(), listeners)
        };
        for listener in listeners {
            listener(&state);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("state", &inner.state)
            .field("revision", &inner.revision)
            .finish_non_exhaustive()
    }
}
