//! Prelude module for the point import service
//!
//! This module re-exports commonly used types and functions for convenient import.

// Re-export core types
pub use pointimp_core::prelude::*;

// Re-export the pipeline stages
pub use crate::generator::ImpGenerator;
pub use crate::loader::{Extraction, ExtractionSummary, SheetExtractor};
pub use crate::rules::RulesParser;
pub use crate::validator::{ValidationEngine, ValidationFailure, ValidationReport};

// Re-export the pipeline
pub use crate::pipeline::{Pipeline, PipelineReport};
