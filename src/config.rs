//! Client configuration.
//!
//! The recipe API lives at a fixed public address, so every setting has a
//! default. Hosts can override them through the environment:
//!
//! - `GASTRONOGEEK_API_URL`: base URL the `recipes/` paths are resolved against
//! - `GASTRONOGEEK_TIMEOUT_SECS`: optional per-request timeout

use std::{env, time::Duration};

use thiserror::Error;
use tracing::info;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api-gastronogeek.vercel.app/api/";
pub const BASE_URL_VAR: &str = "GASTRONOGEEK_API_URL";
pub const TIMEOUT_VAR: &str = "GASTRONOGEEK_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid {key} value: {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Settings for [`RecipeClient`](crate::fetcher::RecipeClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, always ending with `/`
    pub base_url: Url,
    /// Request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Creates a configuration for the public Gastronogeek API.
    pub fn public_api() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Loads the configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| {
            info!("{BASE_URL_VAR} not set, using default: {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                key: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    Url::parse(&with_slash).map_err(|source| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("gastronogeek/"));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "http://localhost:3000/api")]))
                .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/api/");
        assert_eq!(
            config.base_url.join("recipes/").unwrap().as_str(),
            "http://localhost:3000/api/recipes/"
        );
    }

    #[test]
    fn test_timeout_from_env() {
        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, " 15 ")])).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_values() {
        let result = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));

        let result = ClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "not a url")]));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }
}
