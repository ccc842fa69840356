//! Startup reachability check for the auth backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site serves whether or not the backend answers. The check only logs, so
//! a bad `SUPABASE_URL` or key shows up in the server log instead of as
//! failed sign-ins in the browser.

#[cfg(test)]
#[path = "reachability_test.rs"]
mod reachability_test;

use std::time::Duration;

use client::net::config::AuthConfig;

const CHECK_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    Reachable { status: u16 },
    Rejected { status: u16 },
    Unreachable(String),
}

/// Ask GoTrue for its public settings using the anon key.
pub async fn check_auth_backend(http: &reqwest::Client, auth: &AuthConfig) -> Reachability {
    let url = auth.endpoint("settings");
    match http.get(&url).header("apikey", &auth.anon_key).send().await {
        Ok(resp) if resp.status().is_success() => Reachability::Reachable { status: resp.status().as_u16() },
        Ok(resp) => Reachability::Rejected { status: resp.status().as_u16() },
        Err(e) => Reachability::Unreachable(e.to_string()),
    }
}

/// Run the check in the background and log the result.
pub fn spawn_check(auth: AuthConfig) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let http = match reqwest::Client::builder()
            .timeout(Duration::from_secs(CHECK_TIMEOUT_SECS))
            .build()
        {
            Ok(http) => http,
            Err(e) => {
                tracing::warn!(error = %e, "auth check client build failed");
                return;
            }
        };
        match check_auth_backend(&http, &auth).await {
            Reachability::Reachable { status } => {
                tracing::info!(url = %auth.url, status, "auth backend reachable");
            }
            Reachability::Rejected { status } => {
                tracing::warn!(url = %auth.url, status, "auth backend rejected the anon key; check SUPABASE_ANON_KEY");
            }
            Reachability::Unreachable(error) => {
                tracing::warn!(url = %auth.url, %error, "auth backend unreachable");
            }
        }
    })
}
