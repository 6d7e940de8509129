//! Planner configuration from environment.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend serving `/api/*`
    pub api_url: String,
    /// Quiet period after the last keystroke before a search is issued
    pub search_debounce: Duration,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            search_debounce: Duration::from_millis(1200),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("FLOODROUTE_API_URL").unwrap_or(defaults.api_url),
            search_debounce: env::var("FLOODROUTE_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            http_timeout: env::var("FLOODROUTE_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
        }
    }
}
