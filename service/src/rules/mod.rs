//! Rules file support
//!
//! The rules file declares, per record type, which fields are recognized,
//! which of them must not be left empty, and the default value filled in when
//! a point does not provide the field at all.
//!
//! ## Format
//!
//! Comma-separated rows. A row whose first cell contains `Type` opens a
//! section for the record type named in its second cell. The rows that follow
//! describe fields: name, required flag (`x` or empty) and default value. Rows
//! with an empty first cell, or a first cell of `Field`, are column headers and
//! are skipped.
//!
//! ```text
//! Type,RM
//! Field,Required,Default
//! RECORD_TYPE,x,
//! NETWORK_ID,,0
//! IO_LOCATION,x,
//! Type,LD
//! Field,Required,Default
//! DESCRIPTION,,
//! AUTO_RESET,,1
//! ```

pub mod parser;

pub use parser::RulesParser;
