//! Rules file parser
//!
//! Parses the comma-separated rules file into a [`SchemaSet`].

use csv::{ReaderBuilder, StringRecord};
use pointimp_core::config::RulesConfig;
use pointimp_core::error::{PointImpError, Result};
use pointimp_core::types::{FieldRule, RecordTypeName, SchemaSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parser for rules files
pub struct RulesParser {
    config: RulesConfig,
}

impl Default for RulesParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesParser {
    /// Create a new rules parser that skips malformed rows
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RulesConfig::default(),
        }
    }

    /// Create a new strict parser (fails on malformed rows)
    #[must_use]
    pub fn new_strict() -> Self {
        Self {
            config: RulesConfig {
                strict: true,
                ..RulesConfig::default()
            },
        }
    }

    /// Create a parser with custom markers and strictness
    #[must_use]
    pub fn with_config(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Load the rules file at `path`
    ///
    /// A missing file is reported and yields an empty [`SchemaSet`]; the run
    /// continues without any record types.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The file exists but cannot be read
    /// - The file is not valid UTF-8
    /// - A row is malformed (in strict mode)
    pub fn load(&self, path: &Path) -> Result<SchemaSet> {
        if !path.is_file() {
            warn!("Failed to find {}", path.display());
            return Ok(SchemaSet::new());
        }

        let file = File::open(path)?;
        let schemas = self.parse_reader(file)?;

        info!(
            path = %path.display(),
            record_types = schemas.len(),
            "Loaded rules file"
        );
        Ok(schemas)
    }

    /// Parse rules from a string
    ///
    /// # Errors
    ///
    /// Returns error if a row is malformed (in strict mode)
    pub fn parse_str(&self, content: &str) -> Result<SchemaSet> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse rules from any reader
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be read or decoded, or if a row is
    /// malformed (in strict mode)
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<SchemaSet> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut schemas = SchemaSet::new();
        let mut section: Option<RecordTypeName> = None;

        for result in csv_reader.records() {
            let record = result.map_err(csv_error)?;
            let line = record.position().map_or(0, csv::Position::line);
            self.parse_row(&record, line, &mut section, &mut schemas)?;
        }

        Ok(schemas)
    }

    /// Apply one row to the schema set
    fn parse_row(
        &self,
        record: &StringRecord,
        line: u64,
        section: &mut Option<RecordTypeName>,
        schemas: &mut SchemaSet,
    ) -> Result<()> {
        let first = cell(record, 0).trim_start_matches('\u{feff}');

        if first.contains(self.config.type_marker.as_str()) {
            let type_name = cell(record, 1);
            if type_name.is_empty() {
                if self.config.strict {
                    return Err(PointImpError::rules_parse_at(
                        format!("'{first}' row without a record type name"),
                        line,
                    ));
                }
                warn!(line, "Ignoring '{first}' row without a record type name");
                *section = None;
                return Ok(());
            }

            let name = RecordTypeName::from(type_name);
            if schemas.contains(name.as_str()) {
                warn!(
                    line,
                    record_type = %name,
                    "Record type defined again, earlier field rules are discarded"
                );
            }
            debug!(line, record_type = %name, "Starting record type section");
            schemas.register(name.clone());
            *section = Some(name);
            return Ok(());
        }

        // Header and spacer rows
        if first.is_empty() || first == self.config.header_token {
            return Ok(());
        }

        let Some(name) = section.as_ref() else {
            if self.config.strict {
                return Err(PointImpError::rules_parse_at(
                    format!("field '{first}' is not inside a record type section"),
                    line,
                ));
            }
            warn!(line, field = first, "Skipping field outside of a record type section");
            return Ok(());
        };

        let rule = FieldRule::new(
            cell(record, 1) == self.config.required_marker,
            cell(record, 2),
        );
        if let Some(schema) = schemas.get_mut(name.as_str()) {
            schema.insert(first, rule);
        }
        Ok(())
    }
}

/// Cell at `index`, empty when the row is shorter
fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn csv_error(err: csv::Error) -> PointImpError {
    let line = err.position().map(csv::Position::line);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => PointImpError::IoError(io_err),
        _ => PointImpError::RulesParseError { message, line },
    }
}
