//! Wiring between the session client and the store.
//!
//! ARCHITECTURE
//! ============
//! `start` subscribes first and only then asks for the current identity, so
//! no event can slip between the query and the subscription. Events are
//! applied in delivery order; the query result only lands if nothing else has
//! resolved the store in the meantime.
//!
//! One live subscription per browsing context: `start` cancels the previous
//! one before subscribing again, and `stop` (or dropping the last clone)
//! tears it down.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::{SessionClient, Subscription};
use crate::store::SessionStore;

#[derive(Default)]
struct SyncInner {
    /// Bumped on every start/stop; a pending initial query from an older
    /// generation is dropped.
    generation: u64,
    subscription: Option<Subscription>,
}

/// Keeps a [`SessionStore`] in step with a [`SessionClient`].
#[derive(Clone)]
pub struct SessionSync {
    client: Arc<dyn SessionClient>,
    store: SessionStore,
    inner: Arc<Mutex<SyncInner>>,
}

impl SessionSync {
    #[must_use]
    pub fn new(client: Arc<dyn SessionClient>, store: SessionStore) -> Self {
        Self { client, store, inner: Arc::default() }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn SessionClient> {
        &self.client
    }

    /// Whether a subscription is currently live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock()
            .subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Subscribe to backend changes, then resolve the initial identity.
    pub async fn start(&self) {
        let generation = self.attach();

        let identity = self.client.current_identity().await;

        if self.lock().generation != generation {
            log::debug!("session sync: initial identity from a cancelled start discarded");
            return;
        }
        let found = identity.is_some();
        if self.store.resolve_initial(identity) {
            log::debug!("session sync: initial identity resolved (authenticated: {found})");
        } else {
            log::debug!("session sync: initial identity superseded by a session event");
        }
    }

    /// Cancel the live subscription. Further backend events are ignored.
    pub fn stop(&self) {
        let previous = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.subscription.take()
        };
        if let Some(subscription) = previous {
            subscription.unsubscribe();
            log::debug!("session sync: stopped");
        }
    }

    fn attach(&self) -> u64 {
        let previous = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.subscription.take()
        };
        if let Some(subscription) = previous {
            subscription.unsubscribe();
            log::debug!("session sync: replacing previous subscription");
        }

        let store = self.store.clone();
        let subscription = self.client.subscribe(Box::new(move |event| {
            log::debug!("session event: {}", event.kind.as_str());
            store.apply_event(event);
        }));

        let mut inner = self.lock();
        inner.subscription = Some(subscription);
        inner.generation
    }

    fn lock(&self) -> MutexGuard<'_, SyncInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
