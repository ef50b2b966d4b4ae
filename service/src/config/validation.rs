//! Configuration validation
//!
//! Rejects settings that would make the rules file or the import file
//! ambiguous.

use pointimp_core::config::PipelineConfig;
use pointimp_core::{PointImpError, Result};

/// Validate a pipeline configuration
///
/// # Errors
///
/// Returns a `ConfigError` listing every problem found
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    let mut errors = Vec::new();

    // An empty marker is contained in every first cell
    if config.rules.type_marker.is_empty() {
        errors.push("rules.type_marker must not be empty".to_string());
    }
    if config.rules.required_marker.is_empty() {
        errors.push("rules.required_marker must not be empty".to_string());
    }
    if config.output.object.contains('"') || config.output.action.contains('"') {
        errors.push("output.object and output.action must not contain quotes".to_string());
    }
    for (label, path) in [
        ("paths.rules", &config.paths.rules),
        ("paths.workbook", &config.paths.workbook),
        ("paths.output", &config.paths.output),
    ] {
        if path.as_os_str().is_empty() {
            errors.push(format!("{label} must not be empty"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PointImpError::config(format!(
            "Configuration validation failed:\n{}",
            errors
                .iter()
                .map(|e| format!("- {e}"))
                .collect::<Vec<_>>()
                .join("\n")
        )))
    }
}
