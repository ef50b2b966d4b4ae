//! Workbook extractor for point records
//!
//! Each sheet of the workbook holds the points of one record type, named by
//! the sheet. The first row of a sheet holds the column names; every further
//! row becomes a [`Record`] keyed by the point name found in the point-name
//! column.

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use chrono::NaiveDateTime;
use pointimp_core::config::ExtractConfig;
use pointimp_core::error::{PointImpError, Result};
use pointimp_core::types::{CellValue, OutputStore, Record, RecordTypeName, SchemaSet};
use std::collections::HashSet;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters and sheet lists gathered while extracting a workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Sheets matched to a record type, in workbook order
    pub sheets_processed: Vec<RecordTypeName>,
    /// Sheets without a matching record type
    pub sheets_skipped: Vec<String>,
    /// Data rows turned into records
    pub rows_read: usize,
    /// Data rows dropped for lack of a point name
    pub rows_skipped: usize,
    /// Rows that replaced an earlier record with the same point name
    pub duplicate_points: usize,
}

/// Records extracted from a workbook
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Extracted records in first-seen order
    pub store: OutputStore,
    /// What happened along the way
    pub summary: ExtractionSummary,
}

/// Extracts point records from a workbook
pub struct SheetExtractor {
    config: ExtractConfig,
}

impl Default for SheetExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetExtractor {
    /// Create an extractor reading point names from the second column
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ExtractConfig::default(),
        }
    }

    /// Create an extractor with custom options
    #[must_use]
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extract every sheet of the workbook at `path` that names a known
    /// record type
    ///
    /// A missing workbook is reported and yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns error if the workbook exists but cannot be opened or one of
    /// its matching sheets cannot be read
    pub fn extract_file(&self, path: &Path, schemas: &SchemaSet) -> Result<Extraction> {
        if !path.is_file() {
            warn!("Failed to find {}", path.display());
            return Ok(Extraction::default());
        }

        info!("Loading workbook: {}", path.display());
        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        let extraction = self.extract_workbook(&mut workbook, schemas)?;

        info!(
            records = extraction.store.len(),
            sheets = extraction.summary.sheets_processed.len(),
            skipped_sheets = extraction.summary.sheets_skipped.len(),
            "Extracted points from workbook"
        );
        Ok(extraction)
    }

    /// Extract from an already opened workbook
    ///
    /// # Errors
    ///
    /// Returns error if a matching sheet cannot be read
    pub fn extract_workbook<RS>(
        &self,
        workbook: &mut Sheets<RS>,
        schemas: &SchemaSet,
    ) -> Result<Extraction>
    where
        RS: Read + Seek,
    {
        let mut extraction = Extraction::default();

        for sheet_name in workbook.sheet_names() {
            let Some(record_type) = schemas.resolve(&sheet_name).cloned() else {
                warn!("Missing Data Type: {sheet_name} from Defaults File");
                extraction.summary.sheets_skipped.push(sheet_name);
                continue;
            };

            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                PointImpError::workbook_sheet(
                    format!("Failed to read sheet '{sheet_name}': {e}"),
                    sheet_name.as_str(),
                )
            })?;

            let before = extraction.store.len();
            self.process_range(&range, &record_type, &mut extraction);
            debug!(
                sheet = %record_type,
                new_points = extraction.store.len() - before,
                "Processed sheet"
            );
            extraction.summary.sheets_processed.push(record_type);
        }

        Ok(extraction)
    }

    /// Turn the rows of one sheet into records
    fn process_range(
        &self,
        range: &Range<Data>,
        record_type: &RecordTypeName,
        extraction: &mut Extraction,
    ) {
        let Some((_, start_col)) = range.start() else {
            debug!(sheet = %record_type, "Sheet is empty");
            return;
        };
        // Columns are addressed from column A even when it is unused
        let start_col = start_col as usize;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return;
        };
        let headers = extract_headers(header_row, start_col);

        let point_col = self.config.point_name_column;
        if point_col >= headers.len() {
            warn!(
                sheet = %record_type,
                "Point name column {point_col} is outside the sheet's {} columns",
                headers.len()
            );
        }

        for (offset, row) in rows.enumerate() {
            let point_name = cell_at(row, start_col, point_col).to_string();
            if point_name.is_empty() {
                debug!(
                    sheet = %record_type,
                    row = offset + 2,
                    "Skipping row without a point name"
                );
                extraction.summary.rows_skipped += 1;
                continue;
            }

            let mut record = Record::new(point_name, record_type.clone());
            for (col, header) in headers.iter().enumerate() {
                record.set(header.as_str(), cell_at(row, start_col, col));
            }
            record.ensure_record_type();

            if let Some(previous) = extraction.store.upsert(record) {
                debug!(
                    point = previous.point_name(),
                    previous_sheet = %previous.record_type(),
                    "Point defined again, later row replaces earlier one"
                );
                extraction.summary.duplicate_points += 1;
            }
            extraction.summary.rows_read += 1;
        }
    }
}

/// Column names for a sheet, addressed from column A
///
/// Blank names become `Unnamed: <index>` and repeated names get `.1`, `.2`,
/// ... suffixes.
fn extract_headers(header_row: &[Data], start_col: usize) -> Vec<String> {
    let width = start_col + header_row.len();
    let mut seen = HashSet::with_capacity(width);
    let mut headers = Vec::with_capacity(width);

    for col in 0..width {
        let mut name = cell_at(header_row, start_col, col).to_string();
        if name.is_empty() {
            name = format!("Unnamed: {col}");
        }
        if seen.contains(&name) {
            let mut suffix = 1;
            while seen.contains(&format!("{name}.{suffix}")) {
                suffix += 1;
            }
            name = format!("{name}.{suffix}");
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

/// Value at absolute column `col` of a row starting at `start_col`
fn cell_at(row: &[Data], start_col: usize, col: usize) -> CellValue {
    col.checked_sub(start_col)
        .and_then(|idx| row.get(idx))
        .map_or_else(CellValue::empty, cell_value)
}

/// Convert a workbook cell into a [`CellValue`]
///
/// Empty and error cells become the empty marker.
#[must_use]
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| CellValue::Float(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map_or_else(|_| CellValue::Text(s.clone()), CellValue::DateTime),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::empty(),
    }
}

fn workbook_error(err: calamine::Error) -> PointImpError {
    match err {
        calamine::Error::Io(io_err) => PointImpError::IoError(io_err),
        other => PointImpError::workbook(format!("Failed to open workbook: {other}")),
    }
}
