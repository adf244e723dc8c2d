use std::env;
use std::time::Duration;

/// Default market-data endpoint.
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Yahoo Finance base URL (overridable for mirrors and tests).
    pub yahoo_base_url: String,
    /// Timeout for each upstream HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let yahoo_base_url = env::var("YAHOO_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.yahoo_base_url);

        let request_timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.request_timeout_secs);

        Self {
            host,
            port,
            yahoo_base_url,
            request_timeout_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Socket address to bind, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            request_timeout_secs: 15,
        }
    }
}
