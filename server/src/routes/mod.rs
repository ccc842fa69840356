//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the Leptos SSR app, its `/pkg` assets and the health endpoint under a
//! single Axum router. Every other path is answered from the pre-built
//! documentation site.

pub mod health;

use std::path::PathBuf;

use axum::Router;
use axum::routing::get;
use client::net::config::AuthConfig;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;

/// Leptos SSR app + `/pkg` assets + `/healthz` + docs fallback.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn app(config: &SiteConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let auth = config.auth.clone().unwrap_or_default();
    let leptos_router = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || provide_auth_config(&auth),
            {
                let opts = leptos_options.clone();
                move || client::app::shell(opts.clone())
            },
        )
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    let docs_service = ServeDir::new(&config.docs_dir).append_index_html_on_directories(true);

    Ok(Router::new()
        .route("/healthz", get(health::healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(docs_service)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

/// Public auth config for the shell's `<meta>` tags and the app.
fn provide_auth_config(auth: &AuthConfig) {
    provide_context(auth.clone());
}
