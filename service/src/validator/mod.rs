//! Record validation against the rules file
//!
//! Validation completes every record with the defaults of its record type
//! and stops at the first record that cannot be imported: a required field
//! left empty, or a `RECORD_TYPE` the rules file does not define.

pub mod engine;
pub mod report;

pub use engine::ValidationEngine;
pub use report::{ValidationFailure, ValidationReport};
