//! Transport settings shared by every reporting endpoint.

use serde::{Deserialize, Serialize};

/// HTTP transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Attempts per request, including the first; only timeouts and
    /// connection failures are retried.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_connect_timeout_ms() -> u64 {
    5000
}

const fn default_retry_max_attempts() -> u32 {
    1
}

const fn default_retry_backoff_ms() -> u64 {
    0
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: HttpConfig = toml::from_str("retry_max_attempts = 3").unwrap();
        assert_eq!(config.retry_max_attempts, 3);
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.retry_backoff_ms, 0);
    }
}
