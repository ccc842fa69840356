//! Browser `localStorage` helpers for the persisted auth session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hydrate-only read/write glue so the GoTrue client never touches web-sys
//! storage directly. On the server every call is a no-op.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::types::StoredSession;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a JSON value from `localStorage` for `key`.
///
/// Unparseable entries read as absent.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding unreadable storage entry {key}: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("failed to persist storage entry {key}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Remove `key` from `localStorage`.
pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

/// Where the GoTrue client keeps its session between page loads.
pub trait SessionStorage: Send + Sync {
    fn load(&self, key: &str) -> Option<StoredSession>;
    fn save(&self, key: &str, session: &StoredSession);
    fn remove(&self, key: &str);
}

/// [`SessionStorage`] over `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSessionStorage;

impl SessionStorage for LocalSessionStorage {
    fn load(&self, key: &str) -> Option<StoredSession> {
        load_json(key)
    }

    fn save(&self, key: &str, session: &StoredSession) {
        save_json(key, session);
    }

    fn remove(&self, key: &str) {
        remove(key);
    }
}
