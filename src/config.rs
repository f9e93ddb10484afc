//! Configuration management for the dashboard

use crate::error::{DashboardError, Result};
use worker::Env;

/// Default coin detail endpoint; the coin id is appended as a path segment
pub const DEFAULT_DETAIL_ENDPOINT: &str = "https://api.coingecko.com/api/v3/coins";

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level forwarded to the console logger
    pub log_level: String,

    /// Remote catalog document; `None` serves the bundled catalog
    pub catalog_url: Option<String>,

    /// Base URL of the per-coin detail API
    pub detail_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            log_level: "info".to_string(),
            catalog_url: None,
            detail_endpoint: DEFAULT_DETAIL_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        Self::from_lookup(|name| env.var(name).ok().map(|v| v.to_string()))
    }

    /// Build configuration from any variable lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: lookup("LOG_LEVEL")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or(defaults.log_level),

            catalog_url: lookup("CATALOG_URL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),

            detail_endpoint: lookup("DETAIL_ENDPOINT")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.detail_endpoint),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.detail_endpoint) {
            return Err(DashboardError::Config(format!(
                "DETAIL_ENDPOINT must be an http(s) URL, got {:?}",
                self.detail_endpoint
            )));
        }
        if let Some(url) = &self.catalog_url {
            if !is_http_url(url) {
                return Err(DashboardError::Config(format!(
                    "CATALOG_URL must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.log_filter().is_none() {
            return Err(DashboardError::Config(format!(
                "LOG_LEVEL {:?} is not one of off, error, warn, info, debug, trace",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Parsed log level
    pub fn log_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }

    /// Detail URL for one coin; also the cache key for that coin
    pub fn detail_url(&self, coin_id: &str) -> String {
        format!("{}/{coin_id}", self.detail_endpoint)
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}
