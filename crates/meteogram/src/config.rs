//! HTTP client configuration for the meteogram provider.

use std::time::Duration;

use atmo_common::{AtmoError, AtmoResult};

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://node.windy.com";

/// Connection settings for [`crate::WindyClient`].
///
/// The request timeout is the only time limit applied to `process`; the
/// pipeline after the fetch is pure computation.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host, without trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("meteogram/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `METEOGRAM_BASE_URL`, `METEOGRAM_TIMEOUT_SECS`
    /// and `METEOGRAM_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> AtmoResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AtmoResult<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("METEOGRAM_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(secs) = lookup("METEOGRAM_TIMEOUT_SECS") {
            config.request_timeout = parse_secs("METEOGRAM_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("METEOGRAM_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = parse_secs("METEOGRAM_CONNECT_TIMEOUT_SECS", &secs)?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn parse_secs(key: &str, value: &str) -> AtmoResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| AtmoError::configuration(format!("{} must be whole seconds, got '{}'", key, value)))
}
