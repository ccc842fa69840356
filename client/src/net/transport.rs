//! HTTP transport seam for the GoTrue client.
//!
//! Client-side (hydrate): [`BrowserTransport`] sends through `gloo-net`.
//! Server-side (SSR): the same type reports the backend as unavailable, so
//! rendering never reaches the network.

#![allow(clippy::unused_async)]

use async_trait::async_trait;
use session::AuthError;

pub(crate) const SERVER_UNAVAILABLE: &str = "not available on server";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

/// One request to the auth backend.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub verb: Verb,
    pub url: String,
    /// Sent as the `apikey` header.
    pub api_key: String,
    /// Sent as `Authorization: Bearer ...` when present.
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Status and raw body of a backend response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait AuthTransport: Send + Sync {
    /// Whether requests can be made at all from this environment.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NetworkFailure`] when they cannot.
    fn availability(&self) -> Result<(), AuthError> {
        Ok(())
    }

    /// Send `request` and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NetworkFailure`] when no response arrived.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AuthError>;
}

/// `gloo-net` transport in the browser, inert on the server.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl AuthTransport for BrowserTransport {
    fn availability(&self) -> Result<(), AuthError> {
        if cfg!(feature = "hydrate") {
            Ok(())
        } else {
            Err(AuthError::NetworkFailure(SERVER_UNAVAILABLE.to_owned()))
        }
    }

    #[cfg(feature = "hydrate")]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AuthError> {
        use gloo_net::http::Request;

        let mut builder = match request.verb {
            Verb::Get => Request::get(&request.url),
            Verb::Post => Request::post(&request.url),
        }
        .header("apikey", &request.api_key);
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let resp = match &request.body {
            Some(body) => builder.json(body).map_err(network_failure)?.send().await,
            None => builder.send().await,
        }
        .map_err(network_failure)?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }

    #[cfg(not(feature = "hydrate"))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AuthError> {
        let _ = request;
        Err(AuthError::NetworkFailure(SERVER_UNAVAILABLE.to_owned()))
    }
}

#[cfg(feature = "hydrate")]
#[allow(clippy::needless_pass_by_value)]
fn network_failure(e: gloo_net::Error) -> AuthError {
    AuthError::NetworkFailure(e.to_string())
}
