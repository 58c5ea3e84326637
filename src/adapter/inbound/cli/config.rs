//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use crate::application::DashboardKind;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, Config::with_defaults().to_toml()?)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your endpoints", path.display()));
    output::note(&format!(
        "2. Run: retaildash config validate --config {}",
        path.display()
    ));
    output::note("3. Run: retaildash inventory");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    if output::is_json() {
        let endpoints: Vec<_> = DashboardKind::ALL
            .iter()
            .map(|kind| {
                let endpoint = config.endpoint(*kind);
                json!({
                    "name": endpoint.name,
                    "url": endpoint.url,
                    "ttl_secs": endpoint.ttl.as_secs(),
                    "timeout_ms": endpoint.timeout.map(|t| t.as_millis() as u64),
                    "on_failure": endpoint.on_failure,
                    "require_status": endpoint.require_status,
                })
            })
            .collect();
        output::json_output(json!({
            "command": "config.show",
            "logging": config.logging,
            "http": config.http,
            "endpoints": endpoints,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("HTTP");
    output::field(
        "Connect timeout",
        format!("{}ms", config.http.connect_timeout_ms),
    );
    output::field("Max attempts", config.http.retry_max_attempts);
    output::field("Backoff", format!("{}ms", config.http.retry_backoff_ms));

    for kind in DashboardKind::ALL {
        let endpoint = config.endpoint(kind);
        output::section(&format!("Endpoint: {}", endpoint.name));
        output::field("URL", &endpoint.url);
        if endpoint.ttl.is_zero() {
            output::field("Cache TTL", "disabled");
        } else {
            output::field("Cache TTL", format!("{}s", endpoint.ttl.as_secs()));
        }
        match endpoint.timeout {
            Some(timeout) => output::field("Timeout", format!("{}ms", timeout.as_millis())),
            None => output::field("Timeout", "none"),
        }
        output::field("On failure", format!("{:?}", endpoint.on_failure).to_lowercase());
        output::field("Require status", endpoint.require_status);
    }
    Ok(())
}

/// Execute `config validate`. Loading already validated the file; this
/// reports the outcome.
pub fn execute_validate(path: Option<&Path>, config: &Config) -> Result<()> {
    let target = path.map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "valid": true,
            "path": target,
        }));
        return Ok(());
    }

    output::success(&format!("Configuration is valid: {target}"));
    for kind in DashboardKind::ALL {
        output::field(kind.name(), config.endpoint(kind).url);
    }
    Ok(())
}
