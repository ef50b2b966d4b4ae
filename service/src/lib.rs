//! # Point Import Service
//!
//! Converts a point workbook into a point import (`.imp`) file.
//!
//! ## Overview
//!
//! The conversion runs three stages once, in order:
//!
//! - **Rules**: parse the rules file into one schema per record type, naming
//!   the recognized fields, which of them are required, and their defaults
//! - **Extraction**: read every workbook sheet named after a record type and
//!   turn each row into a point record keyed by its point name
//! - **Validation and output**: fill in defaults, stop at the first required
//!   field left empty, and write one block per point (or the failure message)
//!
//! ## Quick Start
//!
//! ```no_run
//! use pointimp_core::PipelineConfig;
//! use pointimp_service::pipeline::Pipeline;
//!
//! fn main() -> pointimp_core::Result<()> {
//!     let report = Pipeline::new(PipelineConfig::default()).run()?;
//!
//!     if let Some(failure) = &report.failure {
//!         eprintln!("{failure}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Rules file parsing
pub mod rules;

/// Workbook extraction
pub mod loader;

/// Record validation
pub mod validator;

/// Import file generation
pub mod generator;

/// Stage sequencing
pub mod pipeline;

/// Configuration loading and validation
pub mod config;

/// Command-line interface
pub mod cli;

/// Commonly used types
pub mod prelude;

pub use generator::ImpGenerator;
pub use loader::SheetExtractor;
pub use pipeline::{Pipeline, PipelineReport};
pub use rules::RulesParser;
pub use validator::{ValidationEngine, ValidationFailure, ValidationReport};
