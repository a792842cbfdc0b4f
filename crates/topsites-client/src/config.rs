//! Client configuration.
//!
//! Provides [`TopSitesConfig`]. Values are loaded from environment variables
//! and fall back to the public service defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use topsites_auth::{DEFAULT_HOST, Endpoint};
use typed_builder::TypedBuilder;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("topsites/", env!("CARGO_PKG_VERSION"));

/// Top Sites client configuration.
///
/// # Examples
///
/// ```
/// use topsites_client::config::TopSitesConfig;
///
/// let config = TopSitesConfig::default();
/// assert_eq!(config.host, "ats.amazonaws.com");
/// assert_eq!(config.request_timeout_secs, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct TopSitesConfig {
    /// Service host, optionally with a port. Also used in the string to sign.
    #[builder(default = String::from(DEFAULT_HOST))]
    pub host: String,

    /// URI scheme.
    #[builder(default = String::from("http"))]
    pub scheme: String,

    /// Whole-request timeout in seconds.
    #[builder(default = 30)]
    pub request_timeout_secs: u64,

    /// `User-Agent` header sent with each request.
    #[builder(default = String::from(DEFAULT_USER_AGENT))]
    pub user_agent: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for TopSitesConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            scheme: String::from("http"),
            request_timeout_secs: 30,
            user_agent: String::from(DEFAULT_USER_AGENT),
            log_level: String::from("info"),
        }
    }
}

impl TopSitesConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TOPSITES_HOST` | `ats.amazonaws.com` |
    /// | `TOPSITES_SCHEME` | `http` |
    /// | `TOPSITES_TIMEOUT_SECS` | `30` |
    /// | `TOPSITES_USER_AGENT` | `topsites/<version>` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("TOPSITES_HOST") {
            config.host = v;
        }
        if let Ok(v) = std::env::var("TOPSITES_SCHEME") {
            config.scheme = v;
        }
        if let Ok(v) = std::env::var("TOPSITES_TIMEOUT_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                config.request_timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("TOPSITES_USER_AGENT") {
            config.user_agent = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// The endpoint requests are signed for and sent to.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.scheme.clone(), self.host.clone())
    }

    /// The request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
