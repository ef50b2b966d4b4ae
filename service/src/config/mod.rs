//! Configuration loading for the conversion pipeline
//!
//! This module provides configuration loading from YAML files with
//! environment variable substitution support.

pub mod validation;

use once_cell::sync::Lazy;
use pointimp_core::config::PipelineConfig;
use pointimp_core::{PointImpError, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::debug;

pub use validation::validate_config;

/// Pattern for `${VAR}` and `${VAR:-default}` references
static ENV_VAR_PATTERN: Lazy<Option<regex::Regex>> =
    Lazy::new(|| regex::Regex::new(r"\$\{([^}:]+)(?::(-)?([^}]*))?\}").ok());

/// Load configuration from `YAML` file with environment variable substitution
///
/// # Errors
///
/// Returns `PointImpError::IoError` if the file cannot be read
/// Returns `PointImpError::ConfigError` if the YAML cannot be parsed
pub fn load_config<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(PointImpError::IoError)?;
    parse_config(&contents)
}

/// Parse configuration from `YAML` text with environment variable substitution
///
/// # Errors
///
/// Returns `PointImpError::ConfigError` if the YAML cannot be parsed
pub fn parse_config<T: for<'de> Deserialize<'de>>(contents: &str) -> Result<T> {
    let substituted = substitute_env_vars(contents);

    serde_yaml::from_str(&substituted)
        .map_err(|e| PointImpError::config(format!("Failed to parse YAML config: {e}")))
}

/// Load and validate the pipeline configuration
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or if the resulting
/// configuration is invalid
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig> {
    let config: PipelineConfig = load_config(path)?;
    validate_config(&config)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Substitute environment variables in the format ${VAR:-default}
fn substitute_env_vars(content: &str) -> String {
    let Some(re) = ENV_VAR_PATTERN.as_ref() else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default_value = caps.get(3).map_or("", |m| m.as_str());

        env::var(var_name).unwrap_or_else(|_| default_value.to_string())
    })
    .to_string()
}
