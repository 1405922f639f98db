use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Environment variable that sizes the worker pool
pub const MAX_WORKERS_ENV: &str = "SCRAPER_MAX_WORKERS";

/// Environment variable that bounds a single fetch, in seconds
pub const FETCH_TIMEOUT_ENV: &str = "SCRAPER_FETCH_TIMEOUT_SECS";

/// Configuration for a batch scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Maximum number of URLs processed at once
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Upper bound on a single fetch, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User-Agent sent by the HTTP fetcher
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Treat bot-wall and rate-limit pages as fetch errors
    #[serde(default)]
    pub reject_blocked_pages: bool,
}

/// Default value for max_workers
fn default_max_workers() -> usize {
    10
}

/// Default value for fetch_timeout_secs
fn default_fetch_timeout_secs() -> u64 {
    30
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            reject_blocked_pages: false,
        }
    }
}

impl ScraperConfig {
    /// Build a configuration from the process environment.
    ///
    /// Values that are missing, unparsable or zero fall back to the defaults.
    pub fn from_env() -> Self {
        Self::default().with_process_env()
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(MAX_WORKERS_ENV) {
            match parse_positive(MAX_WORKERS_ENV, &raw) {
                Ok(value) => self.max_workers = value as usize,
                Err(e) => ::log::warn!("{}, using {}", e, self.max_workers),
            }
        }

        if let Some(raw) = lookup(FETCH_TIMEOUT_ENV) {
            match parse_positive(FETCH_TIMEOUT_ENV, &raw) {
                Ok(value) => self.fetch_timeout_secs = value,
                Err(e) => ::log::warn!("{}, using {}", e, self.fetch_timeout_secs),
            }
        }

        self
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Override the worker count
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Override the per-fetch timeout
    pub fn with_fetch_timeout(mut self, seconds: u64) -> Self {
        self.fetch_timeout_secs = seconds;
        self
    }

    /// Reject zero-sized pools and zero timeouts
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_workers".to_string(),
                value: "0".to_string(),
            });
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "fetch_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(self)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert!(!config.reject_blocked_pages);
    }

    #[test]
    fn test_env_overrides() {
        let config = ScraperConfig::default().with_env_overrides(lookup(&[
            (MAX_WORKERS_ENV, "4"),
            (FETCH_TIMEOUT_ENV, " 12 "),
        ]));
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.fetch_timeout_secs, 12);
    }

    #[test]
    fn test_invalid_env_values_fall_back() {
        for bad in ["0", "-3", "ten", ""] {
            let config = ScraperConfig::default()
                .with_env_overrides(lookup(&[(MAX_WORKERS_ENV, bad), (FETCH_TIMEOUT_ENV, bad)]));
            assert_eq!(config.max_workers, 10, "value {:?}", bad);
            assert_eq!(config.fetch_timeout_secs, 30, "value {:?}", bad);
        }
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = ScraperConfig::from_json(r#"{"max_workers": 3}"#).unwrap();
        assert_eq!(config.max_workers, 3);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_from_json_rejects_zero_workers() {
        let err = ScraperConfig::from_json(r#"{"max_workers": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
