//! Dashboard Configuration
//!
//! Defaults are baked in at build time from `CHEFSYNC_API_URL` and
//! `CHEFSYNC_LOG_LEVEL`. Missing fields keep their defaults when deserialized.

use serde::Deserialize;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend base URL, without trailing endpoint paths
    pub api_base_url: String,
    /// Rows requested from the backend per list call
    pub fetch_limit: u32,
    /// Rows shown per table page
    pub page_size: u32,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// How long a notice stays on screen
    pub notice_timeout_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("CHEFSYNC_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            fetch_limit: 200,
            page_size: 25,
            log_level: option_env!("CHEFSYNC_LOG_LEVEL").unwrap_or("info").to_string(),
            notice_timeout_ms: 4000,
        }
    }
}

impl DashboardConfig {
    /// Unknown level names fall back to `Info`
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
