//! Routes, navbar items and the admin gate, derived purely from session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Navigation chrome is a reactive consumer of the store. Nothing here talks
//! to the backend; every function is a pure mapping from [`SessionState`].

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::identity::Identity;
use crate::store::SessionState;

/// App routes that care about the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignOut,
    Admin,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::SignIn => "/signin",
            Self::SignOut => "/signout",
            Self::Admin => "/admin",
        }
    }

    /// Route segment without the leading slash, as used by router definitions.
    #[must_use]
    pub fn segment(self) -> &'static str {
        &self.path()[1..]
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/signin" => Some(Self::SignIn),
            "/signout" => Some(Self::SignOut),
            "/admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Something that can move the user to another route.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

impl<F> Navigator for F
where
    F: Fn(Route),
{
    fn navigate(&self, route: Route) {
        self(route);
    }
}

// =============================================================================
// NAVBAR
// =============================================================================

/// One entry rendered by the navbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, route: Route },
    SignOutButton,
}

impl NavItem {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Link { label, .. } => label,
            Self::SignOutButton => "Sign Out",
        }
    }
}

/// Navbar contents for `state`.
///
/// `Unresolved` renders like `Anonymous`; the admin link only appears once the
/// backend has confirmed an identity.
#[must_use]
pub fn nav_items(state: &SessionState) -> Vec<NavItem> {
    match state {
        SessionState::Authenticated(_) => vec![
            NavItem::Link { label: "Admin", route: Route::Admin },
            NavItem::SignOutButton,
        ],
        SessionState::Unresolved | SessionState::Anonymous => {
            vec![NavItem::Link { label: "Sign In", route: Route::SignIn }]
        }
    }
}

// =============================================================================
// ADMIN GATE
// =============================================================================

/// What the `/admin` route should do for the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminAccess {
    /// Waiting for the backend; render a placeholder, do not redirect.
    Pending,
    Granted(Identity),
    Redirect(Route),
}

#[must_use]
pub fn admin_access(state: &SessionState) -> AdminAccess {
    match state {
        SessionState::Unresolved => AdminAccess::Pending,
        SessionState::Anonymous => AdminAccess::Redirect(Route::SignIn),
        SessionState::Authenticated(identity) => AdminAccess::Granted(identity.clone()),
    }
}
