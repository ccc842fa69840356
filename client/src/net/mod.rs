//! Networking for the auth backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `config` carries the public backend settings injected by the server,
//! `gotrue` implements the session client over the GoTrue REST API,
//! `transport` is the HTTP seam it sends through, and `types` defines its
//! wire schema and persisted session record.

pub mod config;
pub mod gotrue;
pub mod transport;
pub mod types;
