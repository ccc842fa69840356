//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome from the session signal in context. They
//! never query the auth backend for state.

pub mod footer;
pub mod navbar;
