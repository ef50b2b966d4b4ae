//! Point import (`.imp`) generator
//!
//! Every point becomes one block:
//!
//! ```text
//! OBJECT="POINT" ACTION="INSERT" POINT_NAME="D004P1B1L1"
//!   RECORD_TYPE = "RM"
//!   NETWORK_ID = "0"
//!
//! ```
//!
//! When validation failed the file holds only the failure message.

use pointimp_core::config::OutputConfig;
use pointimp_core::error::{PointImpError, Result};
use pointimp_core::types::{OutputStore, Record};
use std::fmt::Write;
use std::path::Path;
use tracing::info;

use crate::validator::ValidationFailure;

/// Generator for point import files
pub struct ImpGenerator {
    config: OutputConfig,
}

impl Default for ImpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpGenerator {
    /// Create a generator writing `OBJECT="POINT" ACTION="INSERT"` blocks
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: OutputConfig::default(),
        }
    }

    /// Create a generator with custom keywords and suppressed fields
    #[must_use]
    pub fn with_config(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the import file content
    ///
    /// # Errors
    ///
    /// Returns error if formatting fails
    pub fn generate(
        &self,
        store: &OutputStore,
        failure: Option<&ValidationFailure>,
    ) -> Result<String> {
        if let Some(failure) = failure {
            return Ok(failure.to_string());
        }

        let mut output = String::new();
        for record in store.iter() {
            self.write_record(&mut output, record)?;
        }
        Ok(output)
    }

    /// Create or truncate `path` and write the import file to it
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn write_file(
        &self,
        path: &Path,
        store: &OutputStore,
        failure: Option<&ValidationFailure>,
    ) -> Result<()> {
        let content = self.generate(store, failure)?;
        std::fs::write(path, content)?;

        info!(
            path = %path.display(),
            points = if failure.is_some() { 0 } else { store.len() },
            "Wrote import file"
        );
        Ok(())
    }

    fn write_record(&self, output: &mut String, record: &Record) -> Result<()> {
        writeln!(
            output,
            "OBJECT=\"{}\" ACTION=\"{}\" POINT_NAME=\"{}\"",
            self.config.object,
            self.config.action,
            record.point_name()
        )
        .map_err(Self::fmt_error)?;

        for (field, value) in record.fields() {
            if self.is_suppressed(field) {
                continue;
            }
            writeln!(output, "  {field} = \"{value}\"").map_err(Self::fmt_error)?;
        }

        writeln!(output).map_err(Self::fmt_error)?;
        Ok(())
    }

    fn is_suppressed(&self, field: &str) -> bool {
        self.config.suppressed_fields.iter().any(|s| s == field)
    }

    fn fmt_error(err: std::fmt::Error) -> PointImpError {
        PointImpError::serialization(format!("Failed to format import file: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointimp_core::types::{CellValue, RecordTypeName};
    use pretty_assertions::assert_eq;

    fn point(name: &str, fields: &[(&str, CellValue)]) -> Record {
        let mut record = Record::new(name, RecordTypeName::from("RM"));
        for (field, value) in fields {
            record.set(*field, value.clone());
        }
        record
    }

    #[test]
    fn test_block_layout() {
        let mut store = OutputStore::new();
        store.upsert(point(
            "D004P1B1L1",
            &[
                ("RECORD_TYPE", CellValue::from("RM")),
                ("DROP_ID", CellValue::Float(4.0)),
                ("IO_LOCATION", CellValue::from("1.1.1")),
            ],
        ));

        let output = ImpGenerator::new().generate(&store, None).unwrap();

        assert_eq!(
            output,
            "OBJECT=\"POINT\" ACTION=\"INSERT\" POINT_NAME=\"D004P1B1L1\"\n  \
             RECORD_TYPE = \"RM\"\n  DROP_ID = \"4\"\n  IO_LOCATION = \"1.1.1\"\n\n"
        );
    }

    #[test]
    fn test_point_name_and_index_suppressed() {
        let mut store = OutputStore::new();
        store.upsert(point(
            "P1",
            &[
                ("INDEX", CellValue::Int(3)),
                ("RECORD_TYPE", CellValue::from("RM")),
                ("X", CellValue::from("1")),
            ],
        ));

        let output = ImpGenerator::new().generate(&store, None).unwrap();
        let body: Vec<&str> = output.lines().skip(1).filter(|l| !l.is_empty()).collect();

        assert_eq!(body, vec!["  RECORD_TYPE = \"RM\"", "  X = \"1\""]);
        assert!(output.starts_with("OBJECT=\"POINT\" ACTION=\"INSERT\" POINT_NAME=\"P1\"\n"));
    }

    #[test]
    fn test_failure_replaces_content() {
        let mut store = OutputStore::new();
        store.upsert(point("P1", &[("RECORD_TYPE", CellValue::from("RM"))]));
        let failure = ValidationFailure::RequiredFieldEmpty {
            field: "A".to_string(),
            point_name: "P1".to_string(),
            record_type: "RM".to_string(),
        };

        let output = ImpGenerator::new().generate(&store, Some(&failure)).unwrap();

        assert_eq!(output, "Field: A is required for point: P1 on sheet RM");
    }

    #[test]
    fn test_empty_store_yields_empty_file() {
        let output = ImpGenerator::new()
            .generate(&OutputStore::new(), None)
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_custom_keywords_and_suppression() {
        let generator = ImpGenerator::with_config(OutputConfig {
            object: "POINT".to_string(),
            action: "MODIFY".to_string(),
            suppressed_fields: vec!["POINT_NAME".to_string(), "NOTES".to_string()],
        });
        let mut store = OutputStore::new();
        store.upsert(point(
            "P1",
            &[
                ("INDEX", CellValue::Int(1)),
                ("NOTES", CellValue::from("internal")),
            ],
        ));

        let output = generator.generate(&store, None).unwrap();

        assert_eq!(
            output,
            "OBJECT=\"POINT\" ACTION=\"MODIFY\" POINT_NAME=\"P1\"\n  INDEX = \"1\"\n\n"
        );
    }
}
