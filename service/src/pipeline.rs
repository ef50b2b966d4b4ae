//! Conversion pipeline
//!
//! Runs the stages in order: load the rules file, extract the workbook,
//! validate the records and write the import file. Each stage hands its
//! output to the next; nothing is shared between runs.

use pointimp_core::config::PipelineConfig;
use pointimp_core::error::Result;
use pointimp_core::types::RecordTypeName;
use std::path::PathBuf;
use tracing::info;

use crate::generator::ImpGenerator;
use crate::loader::{Extraction, SheetExtractor};
use crate::rules::RulesParser;
use crate::validator::{ValidationEngine, ValidationFailure};

/// Summary of a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Record types defined by the rules file
    pub record_types: usize,
    /// Sheets converted, in workbook order
    pub sheets_processed: Vec<RecordTypeName>,
    /// Sheets without a record type in the rules file
    pub sheets_skipped: Vec<String>,
    /// Point blocks written to the import file
    pub points_written: usize,
    /// Default values inserted during validation
    pub defaults_filled: usize,
    /// Failure that replaced the import file content
    pub failure: Option<ValidationFailure>,
    /// Import file written
    pub output: PathBuf,
}

impl PipelineReport {
    /// Check if the import file holds point blocks rather than a failure
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Point workbook to import file conversion
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline for a configuration
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the conversion once
    ///
    /// Missing input files, unknown sheets and validation failures do not
    /// fail the run; they are logged and reflected in the import file.
    ///
    /// # Errors
    ///
    /// Returns error if an input exists but cannot be read or parsed, or if
    /// the import file cannot be written
    pub fn run(&self) -> Result<PipelineReport> {
        info!("start");
        let paths = &self.config.paths;

        let schemas = RulesParser::with_config(self.config.rules.clone()).load(&paths.rules)?;

        let Extraction { mut store, summary } =
            SheetExtractor::with_config(self.config.extract.clone())
                .extract_file(&paths.workbook, &schemas)?;

        let validation = ValidationEngine::new(&schemas).validate(&mut store);

        ImpGenerator::with_config(self.config.output.clone()).write_file(
            &paths.output,
            &store,
            validation.failure.as_ref(),
        )?;

        let points_written = if validation.is_valid() { store.len() } else { 0 };
        info!("end");

        Ok(PipelineReport {
            record_types: schemas.len(),
            sheets_processed: summary.sheets_processed,
            sheets_skipped: summary.sheets_skipped,
            points_written,
            defaults_filled: validation.defaults_filled,
            failure: validation.failure,
            output: paths.output.clone(),
        })
    }
}
