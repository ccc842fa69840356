//! Session state for the current browsing context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the framework-free [`SessionSync`] and mirrors its store into a
//! signal. Views read `state` and call the client; only the sync writes the
//! store.
//!
//! NAVIGATION
//! ==========
//! Flows navigate through `pending_route` instead of a router closure, so
//! they can run inside spawned tasks. An effect installed by the app shell
//! performs the actual route change.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::signin::SignInFlow;
use session::{Navigator, Route, SessionClient, SessionState, SessionStore, SessionSync};

/// Everything session-aware views need, provided once by the app shell.
#[derive(Clone)]
pub struct SessionContext {
    pub sync: SessionSync,
    pub state: RwSignal<SessionState>,
    pub sign_in: SignInFlow,
    pub pending_route: RwSignal<Option<Route>>,
}

impl SessionContext {
    pub fn new(client: Arc<dyn SessionClient>) -> Self {
        let store = SessionStore::new();
        let state = RwSignal::new(store.state());
        store.watch(move |next: &SessionState| {
            if state.try_set(next.clone()).is_some() {
                log::debug!("session state changed after its signal was disposed");
            }
        });

        Self {
            sync: SessionSync::new(Arc::clone(&client), store),
            state,
            sign_in: SignInFlow::new(client),
            pending_route: RwSignal::new(None),
        }
    }

    pub fn client(&self) -> Arc<dyn SessionClient> {
        Arc::clone(self.sync.client())
    }

    /// Navigator that queues the route for the app shell's router effect.
    pub fn navigator(&self) -> SignalNavigator {
        SignalNavigator(self.pending_route)
    }
}

/// [`Navigator`] writing into a pending-route signal.
#[derive(Clone, Copy, Debug)]
pub struct SignalNavigator(pub RwSignal<Option<Route>>);

impl Navigator for SignalNavigator {
    fn navigate(&self, route: Route) {
        self.0.set(Some(route));
    }
}
