//! Public auth backend configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server learns the backend URL and anon key from its environment and
//! renders them into the HTML shell as `<meta>` tags; the hydrated client
//! reads them back. Both values are public; the anon key only identifies the
//! project.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

pub const AUTH_URL_META: &str = "auth-url";
pub const AUTH_ANON_KEY_META: &str = "auth-anon-key";

/// Where the auth backend lives and how to identify this project to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Project base URL, without trailing slash (e.g. `https://abcd.supabase.co`).
    pub url: String,
    /// Public anon key sent as the `apikey` header.
    pub anon_key: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self { url: url.trim().trim_end_matches('/').to_owned(), anon_key: anon_key.trim().to_owned() }
    }

    /// Build from optional raw values. Returns `None` if either is missing or blank.
    #[must_use]
    pub fn from_parts(url: Option<String>, anon_key: Option<String>) -> Option<Self> {
        let config = Self::new(&url?, &anon_key?);
        config.is_configured().then_some(config)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// `{url}/auth/v1/{path}`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }

    /// First host label of the project URL (`abcd` for `https://abcd.supabase.co`).
    #[must_use]
    pub fn project_ref(&self) -> Option<&str> {
        let rest = self.url.split_once("://").map_or(self.url.as_str(), |(_, rest)| rest);
        let host = rest.split(['/', ':']).next()?;
        host.split('.').next().filter(|label| !label.is_empty())
    }

    /// `localStorage` key holding the persisted session.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self.project_ref() {
            Some(project) => format!("sb-{project}-auth-token"),
            None => "sb-auth-token".to_owned(),
        }
    }

    /// Read the config the server rendered into the document head.
    #[must_use]
    pub fn from_document() -> Option<Self> {
        #[cfg(feature = "hydrate")]
        {
            let document = web_sys::window()?.document()?;
            let read = |name: &str| {
                document
                    .query_selector(&format!("meta[name=\"{name}\"]"))
                    .ok()
                    .flatten()
                    .and_then(|el| el.get_attribute("content"))
            };
            Self::from_parts(read(AUTH_URL_META), read(AUTH_ANON_KEY_META))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}
