//! # session
//!
//! Client-side session-state synchronization for the DevUps Notes site.
//!
//! The auth backend is the only source of truth. A [`SessionClient`] wraps
//! it, a [`SessionStore`] mirrors the identity it reports, and
//! [`SessionSync`] is the single funnel through which backend events reach
//! the store. Views read the store and call the client; they never write the
//! store themselves.
//!
//! The crate is framework-free so the same flows drive the Leptos UI in
//! `client` and the deterministic tests here.

pub mod client;
pub mod error;
pub mod identity;
pub mod nav;
pub mod signin;
pub mod signout;
pub mod store;
pub mod sync;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{SessionClient, SessionEvent, SessionEventKind, SubscriberSet, Subscription};
pub use error::AuthError;
pub use identity::{Credentials, Identity};
pub use nav::{AdminAccess, NavItem, Navigator, Route};
pub use store::{SessionState, SessionStore};
pub use sync::SessionSync;
