//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical redirect behavior for the admin gate, and
//! the app shell turns queued flow navigations into router calls.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::nav::admin_access;
use session::{AdminAccess, Route, SessionState};

/// Route the admin gate should redirect to, if any.
///
/// `Unresolved` never redirects so a restored session does not flash the
/// sign-in page.
pub fn gate_redirect(state: &SessionState) -> Option<Route> {
    match admin_access(state) {
        AdminAccess::Redirect(route) => Some(route),
        AdminAccess::Pending | AdminAccess::Granted(_) => None,
    }
}

/// Redirect to `/signin` whenever the session resolves to anonymous.
pub fn install_admin_gate<F>(state: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(route) = gate_redirect(&state.get()) {
            navigate(route.path(), NavigateOptions::default());
        }
    });
}

/// Perform navigations queued by session flows.
pub fn install_pending_navigation<F>(pending: RwSignal<Option<Route>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let Some(route) = pending.get() else {
            return;
        };
        pending.set(None);
        navigate(route.path(), NavigateOptions { replace: route == Route::SignIn, ..NavigateOptions::default() });
    });
}
