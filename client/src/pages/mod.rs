//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session logic to
//! the `session` crate flows.

pub mod admin;
pub mod signin;
pub mod signout;
