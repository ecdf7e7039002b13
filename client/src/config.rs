//! Client configuration.
//!
//! Values come from `Default`, from `EXPENSES_*` environment variables, or from
//! a JSON document. Unset or unparsable environment values fall back to the
//! defaults.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_COLLECTION: &str = "expenses";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RECENT_DAYS: i64 = 7;

/// Runtime configuration for the expense client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the remote service, e.g. `http://localhost:3000/api`.
    /// `None` runs against the in-process collection.
    pub base_url: Option<String>,
    /// Collection path appended to the base URL
    pub collection: String,
    pub request_timeout_secs: u64,
    /// Window of the "recent expenses" view, in days
    pub recent_days: i64,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            collection: DEFAULT_COLLECTION.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            recent_days: DEFAULT_RECENT_DAYS,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Build configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from a JSON document; missing keys take defaults.
    /// A negative `recent_days` falls back to the default, as it does from the
    /// environment.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.recent_days < 0 {
            config.recent_days = DEFAULT_RECENT_DAYS;
        }
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            base_url: non_empty("EXPENSES_API_URL"),
            collection: non_empty("EXPENSES_COLLECTION").unwrap_or(defaults.collection),
            request_timeout_secs: non_empty("EXPENSES_TIMEOUT_SECS")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            recent_days: non_empty("EXPENSES_RECENT_DAYS")
                .and_then(|value| value.trim().parse().ok())
                .filter(|days: &i64| *days >= 0)
                .unwrap_or(defaults.recent_days),
            log_level: non_empty("EXPENSES_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.collection, "expenses");
        assert_eq!(config.recent_days, 7);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_environment_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("EXPENSES_API_URL", "http://localhost:3000/api"),
            ("EXPENSES_COLLECTION", "spending"),
            ("EXPENSES_TIMEOUT_SECS", "3"),
            ("EXPENSES_RECENT_DAYS", "30"),
            ("EXPENSES_LOG_LEVEL", "debug"),
        ]));

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:3000/api"));
        assert_eq!(config.collection, "spending");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.recent_days, 30);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("EXPENSES_TIMEOUT_SECS", "soon"),
            ("EXPENSES_RECENT_DAYS", "-2"),
            ("EXPENSES_API_URL", "  "),
        ]));

        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.recent_days, DEFAULT_RECENT_DAYS);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            ClientConfig::from_json_str(r#"{"base_url": "http://example.test", "recent_days": 14}"#)
                .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://example.test"));
        assert_eq!(config.recent_days, 14);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
    }

    #[test]
    fn test_from_json_recent_days_bounds() {
        let negative = ClientConfig::from_json_str(r#"{"recent_days": -3}"#).unwrap();
        assert_eq!(negative.recent_days, DEFAULT_RECENT_DAYS);

        let huge = ClientConfig::from_json_str(r#"{"recent_days": 1000000000}"#).unwrap();
        assert_eq!(huge.recent_days, 1_000_000_000);
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(crate::domain::recent_expenses(&[], today, huge.recent_days).is_empty());
    }
}
