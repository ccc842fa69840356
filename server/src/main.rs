mod config;
mod reachability;
mod routes;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::SiteConfig::from_env().expect("invalid server configuration");

    // Check the auth backend in the background (non-fatal: logs only).
    if let Some(auth) = config.auth.clone() {
        let _check = reachability::spawn_check(auth);
    }

    let app = routes::app(&config).expect("leptos configuration failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, docs_dir = %config.docs_dir.display(), "devups-notes listening");
    axum::serve(listener, app).await.expect("server failed");
}
