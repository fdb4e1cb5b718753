//! # Configuration Loader
//!
//! Reads the TOML file and maps it onto the [`AppConfig`] DTO. Accepts
//! whatever is in the file: no validation and no defaults here.

use anyhow::Context;
use sm_core::config::AppConfig;
use std::path::PathBuf;

/// Load configuration from a TOML file.
///
/// Empty strings and zero timeouts are valid facts; missing sections give
/// empty values.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}
