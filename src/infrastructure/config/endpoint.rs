//! Per-dashboard endpoint settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::{DashboardKind, Endpoint, FailurePolicy};
use crate::error::ConfigError;

/// One `[inventory]` or `[sales]` section. Unset keys fall back to the
/// dashboard's built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Cache lifetime in seconds; 0 disables caching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
    /// Request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<FailurePolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_status: Option<bool>,
}

impl EndpointConfig {
    /// Every key spelled out with the built-in value for `kind`.
    #[must_use]
    pub fn defaults_for(kind: DashboardKind) -> Self {
        Self {
            url: Some(kind.default_url().to_string()),
            ttl_secs: Some(kind.default_ttl().as_secs()),
            timeout_ms: kind
                .default_timeout()
                .map(|timeout| u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)),
            on_failure: Some(kind.default_policy()),
            require_status: Some(kind.requires_status()),
        }
    }

    /// Resolve into the endpoint the fetcher uses.
    ///
    /// An inventory section without `timeout_ms` stays unbounded, matching
    /// the built-in default.
    #[must_use]
    pub fn resolve(&self, kind: DashboardKind) -> Endpoint {
        Endpoint {
            name: kind.name(),
            url: self
                .url
                .clone()
                .unwrap_or_else(|| kind.default_url().to_string()),
            ttl: self
                .ttl_secs
                .map_or_else(|| kind.default_ttl(), Duration::from_secs),
            timeout: self
                .timeout_ms
                .map(Duration::from_millis)
                .or_else(|| kind.default_timeout()),
            on_failure: self.on_failure.unwrap_or_else(|| kind.default_policy()),
            require_status: self
                .require_status
                .unwrap_or_else(|| kind.requires_status()),
        }
    }

    pub(crate) fn validate(&self, kind: DashboardKind) -> Result<(), ConfigError> {
        if let Some(raw) = &self.url {
            let field = match kind {
                DashboardKind::Inventory => "inventory.url",
                DashboardKind::Sales => "sales.url",
            };
            if raw.trim().is_empty() {
                return Err(ConfigError::MissingField { field });
            }
            let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: match kind {
                    DashboardKind::Inventory => "inventory.timeout_ms",
                    DashboardKind::Sales => "sales.timeout_ms",
                },
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
