//! Configuration loading and validation
//!
//! Loads a TOML file into [`Config`], applying serde defaults for anything
//! omitted, then validates the resolved values. CLI flag overrides are
//! applied by the binary after loading.

use crate::config::Config;
use crate::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;

/// Loads and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Parsed and validated configuration
/// * `Err(ConfigError)` - File unreadable, malformed TOML, or invalid values
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates resolved configuration values
///
/// Called both after file loading and after CLI overrides have been applied,
/// so a nonsensical flag value is rejected the same way as a file value.
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if config.crawler.workers == 0 {
        return Err(ConfigError::Validation(
            "workers must be at least 1".to_string(),
        ));
    }

    if config.crawler.queue_capacity == 0 {
        return Err(ConfigError::Validation(
            "queue-capacity must be at least 1".to_string(),
        ));
    }

    if config.http.timeout == 0 {
        return Err(ConfigError::Validation(
            "timeout must be at least 1 second".to_string(),
        ));
    }

    if let Some(0) = config.crawler.max_time {
        return Err(ConfigError::Validation(
            "max-time must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}
