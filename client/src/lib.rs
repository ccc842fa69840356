//! # client
//!
//! Leptos + WASM frontend for the DevUps Notes site: app shell, navbar and
//! the `/signin`, `/signout` and `/admin` pages, plus the GoTrue-backed
//! session client.
//!
//! Session semantics live in the framework-free `session` crate; this crate
//! renders them and supplies the browser transport.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod site;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
