//! Validation outcome types

use thiserror::Error;

/// Reason a run cannot produce point blocks
///
/// The display text is the exact line written to the import file in place of
/// the points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// A required field is present but empty
    #[error("Field: {field} is required for point: {point_name} on sheet {record_type}")]
    RequiredFieldEmpty {
        /// Field that is empty
        field: String,
        /// Point holding the field
        point_name: String,
        /// Record type the point was validated against
        record_type: String,
    },

    /// The point's `RECORD_TYPE` names no section of the rules file
    #[error("Record type: {record_type} for point: {point_name} is not defined in the rules file")]
    UnknownRecordType {
        /// Point with the unknown type
        point_name: String,
        /// Value of its `RECORD_TYPE` field
        record_type: String,
    },
}

/// Result of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// First blocking failure, if any
    pub failure: Option<ValidationFailure>,
    /// Records visited, including the failing one
    pub records_checked: usize,
    /// Default values inserted
    pub defaults_filled: usize,
}

impl ValidationReport {
    /// Check if the pass completed without a blocking failure
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// Text of the blocking failure
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }
}
