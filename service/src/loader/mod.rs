//! Point workbook loading
//!
//! Reads the point workbook into an [`OutputStore`](pointimp_core::OutputStore),
//! one record per row, using the rules file to decide which sheets are known
//! record types.

pub mod excel;

pub use excel::{Extraction, ExtractionSummary, SheetExtractor, cell_value};
