//! Error types for point import operations

use thiserror::Error;

/// Main error type for point import operations
#[derive(Error, Debug)]
pub enum PointImpError {
    /// Rules file parsing errors
    #[error("Failed to parse rules file: {message}")]
    RulesParseError {
        /// Error message
        message: String,
        /// 1-based line in the rules file if available
        line: Option<u64>,
    },

    /// Workbook opening or reading errors
    #[error("Failed to read workbook: {message}")]
    WorkbookError {
        /// Error message
        message: String,
        /// Sheet being read when the error occurred
        sheet: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for point import operations
pub type Result<T> = std::result::Result<T, PointImpError>;

impl PointImpError {
    /// Create a new rules parse error
    #[must_use]
    pub fn rules_parse(message: impl Into<String>) -> Self {
        Self::RulesParseError {
            message: message.into(),
            line: None,
        }
    }

    /// Create a new rules parse error at a line
    #[must_use]
    pub fn rules_parse_at(message: impl Into<String>, line: u64) -> Self {
        Self::RulesParseError {
            message: message.into(),
            line: Some(line),
        }
    }

    /// Create a new workbook error
    #[must_use]
    pub fn workbook(message: impl Into<String>) -> Self {
        Self::WorkbookError {
            message: message.into(),
            sheet: None,
        }
    }

    /// Create a new workbook error for a specific sheet
    #[must_use]
    pub fn workbook_sheet(message: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self::WorkbookError {
            message: message.into(),
            sheet: Some(sheet.into()),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }
}
