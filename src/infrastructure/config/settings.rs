//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. The
//! configuration is read from a TOML file; every section is optional and
//! `RETAILDASH_INVENTORY_URL` / `RETAILDASH_SALES_URL` override the
//! endpoint URLs.
//!
//! # Example
//!
//! ```no_run
//! use retaildash::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init(None);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::endpoint::EndpointConfig;
use super::logging::LoggingConfig;
use crate::adapter::outbound::http::HttpConfig;
use crate::application::{DashboardKind, Endpoint};
use crate::error::{ConfigError, Result};

pub const INVENTORY_URL_ENV: &str = "RETAILDASH_INVENTORY_URL";
pub const SALES_URL_ENV: &str = "RETAILDASH_SALES_URL";

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP transport shared by both endpoints.
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub inventory: EndpointConfig,

    #[serde(default)]
    pub sales: EndpointConfig,
}

impl Config {
    /// Parse configuration from TOML content, then apply environment
    /// overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load an explicit path, else `fallback` when it exists, else the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// An explicit path must exist and parse; a fallback that exists must
    /// parse.
    pub fn load_or_default(path: Option<&Path>, fallback: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        if fallback.is_file() {
            debug!(path = %fallback.display(), "Loading default config");
            return Self::load(fallback);
        }
        Self::parse_toml("")
    }

    /// Resolved endpoint for one dashboard.
    #[must_use]
    pub fn endpoint(&self, kind: DashboardKind) -> Endpoint {
        self.section(kind).resolve(kind)
    }

    /// The configuration with every endpoint key spelled out, as written by
    /// `config init`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            inventory: EndpointConfig::defaults_for(DashboardKind::Inventory),
            sales: EndpointConfig::defaults_for(DashboardKind::Sales),
            ..Self::default()
        }
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }

    const fn section(&self, kind: DashboardKind) -> &EndpointConfig {
        match kind {
            DashboardKind::Inventory => &self.inventory,
            DashboardKind::Sales => &self.sales,
        }
    }

    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(INVENTORY_URL_ENV) {
            self.inventory.url = Some(url);
        }
        if let Some(url) = lookup(SALES_URL_ENV) {
            self.sales.url = Some(url);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.http.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.retry_max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }
        for kind in DashboardKind::ALL {
            self.section(kind).validate(kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FailurePolicy;
    use crate::error::Error;
    use std::time::Duration;

    fn parse_without_env(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|_| None);
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_without_env("").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.http.connect_timeout_ms, 5000);
        assert_eq!(
            config.endpoint(DashboardKind::Sales).url,
            DashboardKind::Sales.default_url()
        );
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = parse_without_env(
            r#"
[logging]
level = "debug"
format = "json"

[inventory]
url = "http://localhost:9000/stores"
timeout_ms = 2000
on_failure = "fatal"
"#,
        )
        .unwrap();
        let endpoint = config.endpoint(DashboardKind::Inventory);
        assert_eq!(endpoint.url, "http://localhost:9000/stores");
        assert_eq!(endpoint.timeout, Some(Duration::from_secs(2)));
        assert_eq!(endpoint.on_failure, FailurePolicy::Fatal);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_env_override_replaces_url() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == SALES_URL_ENV).then(|| "http://127.0.0.1:3000/api".to_string())
        });
        assert_eq!(config.sales.url.as_deref(), Some("http://127.0.0.1:3000/api"));
        assert_eq!(config.inventory.url, None);
    }

    #[test]
    fn test_rejects_zero_retry_attempts() {
        let result = parse_without_env("[http]\nretry_max_attempts = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "http.retry_max_attempts",
                ..
            }))
        ));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let result = parse_without_env("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }

    #[test]
    fn test_with_defaults_round_trips_through_toml() {
        let written = Config::with_defaults().to_toml().unwrap();
        let parsed = parse_without_env(&written).unwrap();
        assert_eq!(parsed, Config::with_defaults());
        assert!(written.contains("[sales]"));
        assert!(written.contains("timeout_ms = 10000"));
    }
}
