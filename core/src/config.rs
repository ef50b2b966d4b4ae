//! Configuration types for the point import pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{INDEX_FIELD, POINT_NAME_FIELD};

/// Main configuration for a conversion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input and output file locations
    pub paths: PathsConfig,

    /// Rules file parsing configuration
    pub rules: RulesConfig,

    /// Workbook extraction configuration
    pub extract: ExtractConfig,

    /// Import file output configuration
    pub output: OutputConfig,
}

/// File locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Rules file with required flags and defaults
    pub rules: PathBuf,

    /// Workbook with one sheet per record type
    pub workbook: PathBuf,

    /// Import file to write
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            rules: PathBuf::from("Defaults.csv"),
            workbook: PathBuf::from("Points.xlsx"),
            output: PathBuf::from("output.imp"),
        }
    }
}

/// Rules file parsing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Fail on malformed rows instead of skipping them
    pub strict: bool,

    /// Marker contained in the first cell of a section row
    pub type_marker: String,

    /// First cell of a column header row
    pub header_token: String,

    /// Required-flag value marking a field as required
    pub required_marker: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            strict: false,
            type_marker: "Type".to_string(),
            header_token: "Field".to_string(),
            required_marker: "x".to_string(),
        }
    }
}

/// Workbook extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// 0-based column holding the point name
    pub point_name_column: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            point_name_column: 1,
        }
    }
}

/// Import file output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `OBJECT` keyword of each block header
    pub object: String,

    /// `ACTION` keyword of each block header
    pub action: String,

    /// Fields never written to a block body
    pub suppressed_fields: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            object: "POINT".to_string(),
            action: "INSERT".to_string(),
            suppressed_fields: vec![POINT_NAME_FIELD.to_string(), INDEX_FIELD.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.paths.rules, PathBuf::from("Defaults.csv"));
        assert_eq!(config.paths.workbook, PathBuf::from("Points.xlsx"));
        assert_eq!(config.paths.output, PathBuf::from("output.imp"));
        assert_eq!(config.extract.point_name_column, 1);
        assert_eq!(config.rules.required_marker, "x");
        assert_eq!(config.output.suppressed_fields, vec!["POINT_NAME", "INDEX"]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "extract:\n  point_name_column: 0\npaths:\n  output: out/points.imp\n";
        let config: PipelineConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(config.extract.point_name_column, 0);
        assert_eq!(config.paths.output, PathBuf::from("out/points.imp"));
        assert_eq!(config.paths.rules, PathBuf::from("Defaults.csv"));
        assert_eq!(config.output.object, "POINT");
    }
}
