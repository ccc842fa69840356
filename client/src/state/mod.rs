//! Reactive application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` bridges the framework-free session store into signals that
//! pages and components read.

pub mod session;
