//! # Point Import Core
//!
//! Core types for converting a point workbook into a point import file:
//! record type rules, extracted records, the ordered output store,
//! configuration and the shared error type.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types
pub mod error;

/// Record, rule and store types
pub mod types;

/// Configuration types for a conversion run
pub mod config;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{PointImpError, Result};
pub use types::{
    CellValue, FieldRule, OutputStore, Record, RecordTypeName, RecordTypeSchema, SchemaSet,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{PointImpError, Result};
    pub use crate::types::*;
}
