//! Runtime configuration for the request layer and polling views.
//!
//! Values come from the environment with built-in defaults:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `MARKETDASH_ALPHAVANTAGE_API_KEY` | `demo` |
//! | `MARKETDASH_BASE_URL` | `https://www.alphavantage.co/query` |
//! | `MARKETDASH_TIMEOUT_MS` | `5000` |
//! | `MARKETDASH_QUOTE_INTERVAL_SECS` | `60` |
//! | `MARKETDASH_MARKET_STATUS_INTERVAL_SECS` | `300` |
//! | `MARKETDASH_MOVERS_INTERVAL_SECS` | `300` |
//!
//! The API key is never logged or included in `Debug` output.

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

pub const API_KEY_ENV: &str = "MARKETDASH_ALPHAVANTAGE_API_KEY";
pub const BASE_URL_ENV: &str = "MARKETDASH_BASE_URL";
pub const TIMEOUT_ENV: &str = "MARKETDASH_TIMEOUT_MS";
pub const QUOTE_INTERVAL_ENV: &str = "MARKETDASH_QUOTE_INTERVAL_SECS";
pub const MARKET_STATUS_INTERVAL_ENV: &str = "MARKETDASH_MARKET_STATUS_INTERVAL_SECS";
pub const MOVERS_INTERVAL_ENV: &str = "MARKETDASH_MOVERS_INTERVAL_SECS";

/// Endpoint and credential injected into [`crate::VantageClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    api_key: String,
    timeout_ms: u64,
}

impl ApiConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('?').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl { value: base_url });
        }

        let api_key = api_key.into().trim().to_owned();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(Self {
            base_url,
            api_key,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; missing or blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let config = Self::new(
            value(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            value(API_KEY_ENV).unwrap_or_else(|| DEFAULT_API_KEY.to_owned()),
        )?;

        match value(TIMEOUT_ENV) {
            Some(raw) => Ok(config.with_timeout_ms(parse_positive(TIMEOUT_ENV, &raw)?)),
            None => Ok(config),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: DEFAULT_API_KEY.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Debug for ApiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Refresh periods per view. `None` means the view never polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub quote: Option<Duration>,
    pub overview: Option<Duration>,
    pub market_status: Option<Duration>,
    pub top_movers: Option<Duration>,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            quote: Some(Duration::from_secs(60)),
            overview: None,
            market_status: Some(Duration::from_secs(300)),
            top_movers: Some(Duration::from_secs(300)),
        }
    }
}

impl PollSchedule {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut schedule = Self::default();
        let secs = |name: &'static str| -> Result<Option<Duration>, ConfigError> {
            match lookup(name).filter(|value| !value.trim().is_empty()) {
                Some(raw) => parse_positive(name, &raw).map(|secs| Some(Duration::from_secs(secs))),
                None => Ok(None),
            }
        };

        if let Some(period) = secs(QUOTE_INTERVAL_ENV)? {
            schedule.quote = Some(period);
        }
        if let Some(period) = secs(MARKET_STATUS_INTERVAL_ENV)? {
            schedule.market_status = Some(period);
        }
        if let Some(period) = secs(MOVERS_INTERVAL_ENV)? {
            schedule.top_movers = Some(period);
        }
        Ok(schedule)
    }
}

/// Everything a dashboard session needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub polling: PollSchedule,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api: ApiConfig::from_env()?,
            polling: PollSchedule::from_env()?,
        })
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            name,
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = ApiConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key(), DEFAULT_API_KEY);
        assert_eq!(config.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = ApiConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "abc123"),
            (BASE_URL_ENV, "http://localhost:9000/query"),
            (TIMEOUT_ENV, "250"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.api_key(), "abc123");
        assert_eq!(config.base_url(), "http://localhost:9000/query");
        assert_eq!(config.timeout_ms(), 250);
    }

    #[test]
    fn debug_output_masks_api_key() {
        let config = ApiConfig::new(DEFAULT_BASE_URL, "super-secret").expect("valid");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            ApiConfig::new("ftp://example.test", "k"),
            Err(ConfigError::InvalidBaseUrl {
                value: String::from("ftp://example.test")
            })
        );
        assert_eq!(
            ApiConfig::new(DEFAULT_BASE_URL, "  "),
            Err(ConfigError::EmptyApiKey)
        );
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")])),
            Err(ConfigError::InvalidNumber { name: TIMEOUT_ENV, .. })
        ));
    }

    #[test]
    fn poll_schedule_defaults_and_overrides() {
        let defaults = PollSchedule::default();
        assert_eq!(defaults.quote, Some(Duration::from_secs(60)));
        assert_eq!(defaults.overview, None);
        assert_eq!(defaults.market_status, Some(Duration::from_secs(300)));
        assert_eq!(defaults.top_movers, Some(Duration::from_secs(300)));

        let schedule = PollSchedule::from_lookup(lookup(&[(QUOTE_INTERVAL_ENV, "15")]))
            .expect("valid override");
        assert_eq!(schedule.quote, Some(Duration::from_secs(15)));
        assert!(PollSchedule::from_lookup(lookup(&[(MOVERS_INTERVAL_ENV, "soon")])).is_err());
    }
}
