//! Path utilities for retaildash.
//!
//! Everything lives under `~/.retaildash/`:
//! - `~/.retaildash/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the retaildash home directory (`~/.retaildash/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".retaildash")
}

/// Returns the default config file path (`~/.retaildash/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_retaildash_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".retaildash"));
    }
}
