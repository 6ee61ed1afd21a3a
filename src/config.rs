//! Resolver configuration.
//!
//! Sources, highest priority first:
//!
//! 1. Environment variables (`PRICEBOOK_FALLBACK_CURRENCY`,
//!    `PRICEBOOK_REFRESH_INTERVAL_SECS`, `PRICEBOOK_API_BASE_URL`)
//! 2. JSON passed to [`ResolverConfig::from_json`]
//! 3. Defaults
//!
//! ```json
//! {
//!   "fallback_currency": "USD",
//!   "refresh_interval_secs": 300,
//!   "http": {
//!     "base_url": "https://shop.example.com",
//!     "timeout_secs": 30
//!   }
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Settings for currency resolution and reference-data refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Hard fallback when no source yields a currency.
    pub fallback_currency: String,
    /// Seconds between background refreshes.
    pub refresh_interval_secs: u64,
    pub http: HttpConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_currency: "USD".to_string(),
            refresh_interval_secs: 300,
            http: HttpConfig::default(),
        }
    }
}

/// Where the backend serves reference data. Paths contain an `{org}`
/// placeholder for the organization id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub currencies_path: String,
    pub default_currency_path: String,
    pub tax_rates_path: String,
    pub default_tax_rate_path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
            currencies_path: "/api/organizations/{org}/currencies".to_string(),
            default_currency_path: "/api/organizations/{org}/currencies/default".to_string(),
            tax_rates_path: "/api/organizations/{org}/tax-rates".to_string(),
            default_tax_rate_path: "/api/organizations/{org}/tax-rates/default".to_string(),
        }
    }
}

impl HttpConfig {
    /// Absolute URL for `path` with `{org}` substituted.
    pub fn url(&self, path: &str, org: &str) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            path.replace("{org}", org)
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ResolverConfig {
    /// Parse from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PRICEBOOK_*` environment overrides.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(code) = lookup("PRICEBOOK_FALLBACK_CURRENCY") {
            self.fallback_currency = code.trim().to_string();
        }
        if let Some(secs) = lookup("PRICEBOOK_REFRESH_INTERVAL_SECS") {
            self.refresh_interval_secs = secs.trim().parse().map_err(|_| {
                ConfigError::invalid(
                    "PRICEBOOK_REFRESH_INTERVAL_SECS",
                    format!("'{secs}' is not a number"),
                )
            })?;
        }
        if let Some(url) = lookup("PRICEBOOK_API_BASE_URL") {
            self.http.base_url = url.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let code = &self.fallback_currency;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::invalid(
                "fallback_currency",
                format!("'{code}' is not a 3-letter ISO code"),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "refresh_interval_secs",
                "must be greater than zero",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "http.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.fallback_currency, "USD");
        assert_eq!(config.refresh_interval(), Duration::from_secs(300));
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            ResolverConfig::from_json(r#"{"fallback_currency":"EUR","http":{"timeout_secs":5}}"#)
                .unwrap();
        assert_eq!(config.fallback_currency, "EUR");
        assert_eq!(config.refresh_interval_secs, 300);
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.base_url, "http://localhost:3000");
    }

    #[test]
    fn rejects_bad_fallback() {
        let err = ResolverConfig::from_json(r#"{"fallback_currency":"usd"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ResolverConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PRICEBOOK_FALLBACK_CURRENCY", "GBP"),
            ("PRICEBOOK_REFRESH_INTERVAL_SECS", "60"),
            ("PRICEBOOK_API_BASE_URL", "https://api.example.com/"),
        ]);
        let config = ResolverConfig::default()
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.fallback_currency, "GBP");
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(
            config.http.url(&config.http.currencies_path, "42"),
            "https://api.example.com/api/organizations/42/currencies"
        );
    }

    #[test]
    fn override_rejects_non_numeric_interval() {
        let result = ResolverConfig::default().apply_overrides(|k| {
            (k == "PRICEBOOK_REFRESH_INTERVAL_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
