//! Supabase GoTrue-backed [`SessionClient`].
//!
//! Requests go through an [`AuthTransport`] and the session is kept in a
//! [`SessionStorage`]. [`GoTrueClient::new`] wires the browser versions:
//! `gloo-net` and `localStorage`, with cross-tab changes picked up from
//! `storage` events. Server-side (SSR) those are inert: no identity, and
//! sign-in/sign-out report a network failure.
//!
//! ERROR HANDLING
//! ==============
//! Expected auth failures come back as [`AuthError`] values. Lookups that only
//! decide "signed in or not" degrade to `None` and log instead.

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod gotrue_test;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use session::client::ChangeHandler;
use session::{AuthError, Credentials, Identity, SessionClient, SessionEvent, SessionEventKind, SubscriberSet, Subscription};

use super::config::AuthConfig;
use super::transport::{AuthTransport, BrowserTransport, HttpRequest, HttpResponse, Verb};
use super::types::{GoTrueErrorBody, GoTrueUser, StoredSession, TokenResponse};
use crate::util::clock::now_secs;
use crate::util::persistence::{LocalSessionStorage, SessionStorage};

pub(crate) const NOT_CONFIGURED: &str = "Sign-in is not configured for this site.";

/// Session client speaking the GoTrue REST API with the public anon key.
pub struct GoTrueClient {
    config: AuthConfig,
    events: SubscriberSet,
    transport: Arc<dyn AuthTransport>,
    storage: Arc<dyn SessionStorage>,
}

impl GoTrueClient {
    /// Client over `gloo-net` and `localStorage`.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self::with_parts(config, Arc::new(BrowserTransport), Arc::new(LocalSessionStorage))
    }

    #[must_use]
    pub fn with_parts(config: AuthConfig, transport: Arc<dyn AuthTransport>, storage: Arc<dyn SessionStorage>) -> Self {
        Self { config, events: SubscriberSet::new(), transport, storage }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply a session written by another tab.
    ///
    /// `raw` is the new value of the storage entry; absent or unreadable
    /// means the other tab signed out.
    pub fn apply_storage_change(&self, raw: Option<&str>) -> SessionEvent {
        let identity = raw
            .and_then(|raw| serde_json::from_str::<StoredSession>(raw).ok())
            .map(|session| session.user);
        let event = match identity {
            Some(identity) => SessionEvent::signed_in(identity),
            None => SessionEvent::signed_out(),
        };
        self.events.emit(&event);
        event
    }

    fn load_session(&self) -> Option<StoredSession> {
        self.storage.load(&self.config.storage_key())
    }

    fn save_session(&self, session: &StoredSession) {
        self.storage.save(&self.config.storage_key(), session);
    }

    fn clear_session(&self) {
        self.storage.remove(&self.config.storage_key());
    }

    fn ensure_configured(&self) -> Result<(), AuthError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(AuthError::BackendRejected { status: 503, message: NOT_CONFIGURED.to_owned() })
        }
    }

    async fn send(
        &self,
        verb: Verb,
        path: &str,
        bearer: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, AuthError> {
        let request = HttpRequest {
            verb,
            url: self.config.endpoint(path),
            api_key: self.config.anon_key.clone(),
            bearer: bearer.map(str::to_owned),
            body,
        };
        self.transport.send(request).await
    }

    async fn refresh(&self, session: &StoredSession) -> Result<StoredSession, AuthError> {
        if session.refresh_token.is_empty() {
            return Err(AuthError::NoActiveSession);
        }
        let body = serde_json::json!({ "refresh_token": session.refresh_token });
        let resp = self
            .send(Verb::Post, "token?grant_type=refresh_token", None, Some(body))
            .await?;
        let token: TokenResponse = parse_response(&resp)?;
        Ok(token.into_session(now_secs()))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<Identity, AuthError> {
        let resp = self.send(Verb::Get, "user", Some(access_token), None).await?;
        let user: GoTrueUser = parse_response(&resp)?;
        Ok(user.into_identity())
    }

    async fn revoke(&self) -> Result<(), AuthError> {
        self.transport.availability()?;
        self.ensure_configured()?;
        let Some(session) = self.load_session() else {
            return Ok(());
        };
        let resp = self.send(Verb::Post, "logout", Some(&session.access_token), None).await?;
        if resp.is_success() {
            Ok(())
        } else {
            Err(auth_error_from_response(resp.status, &resp.body))
        }
    }
}

#[async_trait(?Send)]
impl SessionClient for GoTrueClient {
    async fn current_identity(&self) -> Option<Identity> {
        if !self.config.is_configured() {
            return None;
        }
        let mut session = self.load_session()?;

        if session.needs_refresh(now_secs()) {
            match self.refresh(&session).await {
                Ok(fresh) => {
                    self.save_session(&fresh);
                    self.events
                        .emit(&SessionEvent::new(SessionEventKind::TokenRefreshed, Some(fresh.user.clone())));
                    session = fresh;
                }
                Err(AuthError::NetworkFailure(e)) => {
                    log::warn!("token refresh unreachable: {e}");
                    return None;
                }
                Err(e) => {
                    log::warn!("token refresh failed ({}): {e}", e.error_code());
                    self.clear_session();
                    self.events.emit(&SessionEvent::signed_out());
                    return None;
                }
            }
        }

        match self.fetch_user(&session.access_token).await {
            Ok(identity) => {
                if identity != session.user {
                    session.user = identity.clone();
                    self.save_session(&session);
                }
                Some(identity)
            }
            Err(AuthError::BackendRejected { status: 401 | 403, .. }) => {
                log::info!("stored session no longer accepted; clearing");
                self.clear_session();
                None
            }
            Err(e) => {
                log::warn!("current user lookup failed ({}): {e}", e.error_code());
                None
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        self.ensure_configured()?;
        self.transport.availability()?;

        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let resp = self.send(Verb::Post, "token?grant_type=password", None, Some(body)).await?;
        let token: TokenResponse = parse_response(&resp)?;
        let session = token.into_session(now_secs());
        self.save_session(&session);

        let identity = session.user;
        self.events.emit(&SessionEvent::signed_in(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.revoke().await;
        self.clear_session();
        self.events.emit(&SessionEvent::signed_out());
        result
    }

    fn subscribe(&self, handler: ChangeHandler) -> Subscription {
        self.events.subscribe(handler)
    }
}

/// Forward `storage` events for the session key to `client`.
///
/// The listener lives for the rest of the page.
#[cfg(feature = "hydrate")]
pub fn install_storage_listener(client: Arc<GoTrueClient>) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };
    let key = client.config.storage_key();
    let cb = Closure::wrap(Box::new(move |ev: web_sys::StorageEvent| {
        if ev.key().as_deref() != Some(key.as_str()) {
            return;
        }
        let event = client.apply_storage_change(ev.new_value().as_deref());
        log::debug!("session changed in another tab: {}", event.kind.as_str());
    }) as Box<dyn FnMut(web_sys::StorageEvent)>);

    if window
        .add_event_listener_with_callback("storage", cb.as_ref().unchecked_ref())
        .is_ok()
    {
        cb.forget();
    }
}

/// Map a non-success GoTrue response onto the auth taxonomy.
pub(crate) fn auth_error_from_response(status: u16, body: &str) -> AuthError {
    let parsed: GoTrueErrorBody = serde_json::from_str(body).unwrap_or_default();
    if status == 400 && parsed.is_invalid_credentials() {
        return AuthError::InvalidCredentials;
    }
    AuthError::BackendRejected { status, message: parsed.message().unwrap_or_default().to_owned() }
}

fn parse_response<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, AuthError> {
    if !resp.is_success() {
        return Err(auth_error_from_response(resp.status, &resp.body));
    }
    serde_json::from_str(&resp.body)
        .map_err(|e| AuthError::BackendRejected { status: resp.status, message: format!("unexpected response: {e}") })
}
