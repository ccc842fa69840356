//! Server configuration parsed from environment variables.
//!
//! Optional (a `.env` file is loaded first when present):
//! - `PORT`: listen port, default 3000
//! - `DOCS_DIR`: pre-built documentation site, default `../docs/out`
//!   relative to this crate
//! - `SUPABASE_URL` + `SUPABASE_ANON_KEY`: public auth backend settings; when
//!   either is missing the site still serves with sign-in disabled

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use client::net::config::AuthConfig;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),
    #[error("{0} is not set")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub port: u16,
    pub docs_dir: PathBuf,
    pub auth: Option<AuthConfig>,
}

impl SiteConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_port(non_empty(lookup("PORT")).as_deref())?;
        let docs_dir = non_empty(lookup("DOCS_DIR")).map_or_else(default_docs_dir, PathBuf::from);
        let auth = match auth_from_lookup(&lookup) {
            Ok(auth) => Some(auth),
            Err(e) => {
                tracing::warn!(error = %e, "auth backend not configured; sign-in disabled");
                None
            }
        };
        Ok(Self { port, docs_dir, auth })
    }
}

fn auth_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<AuthConfig, ConfigError> {
    let url = non_empty(lookup("SUPABASE_URL")).ok_or(ConfigError::MissingVar("SUPABASE_URL"))?;
    let anon_key = non_empty(lookup("SUPABASE_ANON_KEY")).ok_or(ConfigError::MissingVar("SUPABASE_ANON_KEY"))?;
    Ok(AuthConfig::new(&url, &anon_key))
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw.to_owned())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../docs/out")
}
