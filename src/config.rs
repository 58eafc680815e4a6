use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Backend
    pub backend_url: String,
    pub request_timeout_secs: u64,

    // Session
    pub user_id: String,

    // Dashboard / Sentinel
    pub analytics_period_days: u32,
    pub sentinel_last_n: u32,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            backend_url: normalize_base_url(&env("BACKEND_URL", DEFAULT_BACKEND_URL)),
            request_timeout_secs: env("REQUEST_TIMEOUT_SECS", "15").parse().unwrap_or(15),
            user_id: env("JOURNAL_USER_ID", "demo-user"),
            analytics_period_days: env("ANALYTICS_PERIOD_DAYS", "90").parse().unwrap_or(90),
            sentinel_last_n: env("SENTINEL_LAST_N", "10").parse().unwrap_or(10),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    pub fn with_backend_url(mut self, url: &str) -> Self {
        self.backend_url = normalize_base_url(url);
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: 15,
            user_id: "demo-user".to_string(),
            analytics_period_days: 90,
            sentinel_last_n: 10,
            log_level: "info".to_string(),
        }
    }
}

/// Paths are appended as `/api/...`, so the base never keeps a trailing slash.
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BACKEND_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slashes() {
        let cfg = Config::default().with_backend_url("https://journal.example.com//");
        assert_eq!(cfg.backend_url, "https://journal.example.com");
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        let cfg = Config::default().with_backend_url("   ");
        assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let mut cfg = Config::default();
        cfg.request_timeout_secs = 0;
        assert_eq!(cfg.request_timeout(), Duration::from_secs(1));
    }
}
