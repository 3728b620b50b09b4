//! Client configuration.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Connection settings for `BeerClient` and the bundled transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the `/beer` resource lives under, e.g. `https://host/api/v1`.
    pub base_url: String,
    /// Total request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("beer-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// - `BEER_API_BASE_URL`
    /// - `BEER_API_TIMEOUT_SECS`
    /// - `BEER_API_CONNECT_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base_url) = lookup("BEER_API_BASE_URL") {
            config.base_url = check_base_url(base_url)?;
        }
        if let Some(secs) = read_secs(&lookup, "BEER_API_TIMEOUT_SECS")? {
            config.timeout = secs;
        }
        if let Some(secs) = read_secs(&lookup, "BEER_API_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = secs;
        }
        Ok(config)
    }
}

fn check_base_url(raw: String) -> Result<String, ConfigError> {
    match Url::parse(raw.trim()) {
        Ok(url) if url.cannot_be_a_base() => Err(ConfigError::InvalidBaseUrl {
            url: raw,
            reason: "cannot carry a path".to_string(),
        }),
        Ok(_) => Ok(raw),
        Err(e) => Err(ConfigError::InvalidBaseUrl {
            url: raw,
            reason: e.to_string(),
        }),
    }
}

fn read_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| ConfigError::InvalidValue { name, value: raw })
}
