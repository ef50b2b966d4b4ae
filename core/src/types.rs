//! Data model for point records and their rules
//!
//! A [`SchemaSet`] holds one [`RecordTypeSchema`] per record type. The sheet
//! extractor turns workbook rows into [`Record`]s collected in an
//! [`OutputStore`], which the validator completes and the import generator
//! serializes.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Synthetic field holding the point name of a record
pub const POINT_NAME_FIELD: &str = "POINT_NAME";

/// Field naming the record type a record is validated against
pub const RECORD_TYPE_FIELD: &str = "RECORD_TYPE";

/// Row index column carried by some workbooks, never written out
pub const INDEX_FIELD: &str = "INDEX";

/// Name of a record type
///
/// The same identifier names a section of the rules file and a sheet of the
/// workbook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTypeName(String);

impl RecordTypeName {
    /// Create a record type name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RecordTypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordTypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordTypeName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RecordTypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Rule for a single field of a record type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Whether an explicitly empty value is rejected
    pub required: bool,
    /// Value inserted when the field is absent; empty means no default
    pub default: String,
}

impl FieldRule {
    /// Create a field rule
    #[must_use]
    pub fn new(required: bool, default: impl Into<String>) -> Self {
        Self {
            required,
            default: default.into(),
        }
    }

    /// The default value, if one is configured
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        if self.default.is_empty() {
            None
        } else {
            Some(&self.default)
        }
    }
}

/// Ordered field rules of one record type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTypeSchema {
    fields: IndexMap<String, FieldRule>,
}

impl RecordTypeSchema {
    /// Create an empty schema
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule for a field. A repeated field keeps its first position.
    pub fn insert(&mut self, field: impl Into<String>, rule: FieldRule) -> Option<FieldRule> {
        self.fields.insert(field.into(), rule)
    }

    /// Look up the rule for a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.fields.get(field)
    }

    /// Iterate over field rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of declared fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All record type schemas loaded from a rules file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSet {
    types: IndexMap<RecordTypeName, RecordTypeSchema>,
}

impl SchemaSet {
    /// Create an empty schema set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty schema for a record type, replacing any earlier one,
    /// and return it for population.
    pub fn register(&mut self, name: RecordTypeName) -> &mut RecordTypeSchema {
        let entry = self.types.entry(name).or_default();
        *entry = RecordTypeSchema::new();
        entry
    }

    /// Insert a complete schema
    pub fn insert(
        &mut self,
        name: RecordTypeName,
        schema: RecordTypeSchema,
    ) -> Option<RecordTypeSchema> {
        self.types.insert(name, schema)
    }

    /// Look up a schema by record type name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RecordTypeSchema> {
        self.types.get(name)
    }

    /// Mutable lookup by record type name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut RecordTypeSchema> {
        self.types.get_mut(name)
    }

    /// Whether a record type is defined
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Resolve a sheet or field value to a known record type name
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&RecordTypeName> {
        self.types.get_key_value(name).map(|(key, _)| key)
    }

    /// Iterate over record types in rules file order
    pub fn iter(&self) -> impl Iterator<Item = (&RecordTypeName, &RecordTypeSchema)> {
        self.types.iter()
    }

    /// Number of record types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no record types are defined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Raw value of a workbook cell
///
/// Empty cells are stored as `Text("")`; there is no null variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text, including the empty marker
    Text(String),
    /// Integer number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Date and time
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// The empty marker
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Whether this is the empty marker
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            // Whole floats print without a fraction, as integer columns do;
            // from 1e15 up they switch to exponent form
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => {
                if v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v:e}")
                }
            }
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One point read from a workbook row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    point_name: String,
    record_type: RecordTypeName,
    fields: IndexMap<String, CellValue>,
}

impl Record {
    /// Create a record whose first field is `POINT_NAME`
    #[must_use]
    pub fn new(point_name: impl Into<String>, record_type: RecordTypeName) -> Self {
        let point_name = point_name.into();
        let mut fields = IndexMap::new();
        fields.insert(
            POINT_NAME_FIELD.to_string(),
            CellValue::Text(point_name.clone()),
        );
        Self {
            point_name,
            record_type,
            fields,
        }
    }

    /// Point name the record is keyed by
    #[must_use]
    pub fn point_name(&self) -> &str {
        &self.point_name
    }

    /// Record type of the sheet the record came from
    #[must_use]
    pub fn record_type(&self) -> &RecordTypeName {
        &self.record_type
    }

    /// Value of a field, `None` when the field was never set
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Whether a field is present
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field. New fields are appended; existing ones keep their position.
    pub fn set(&mut self, field: impl Into<String>, value: CellValue) {
        self.fields.insert(field.into(), value);
    }

    /// Text of the `RECORD_TYPE` field, if present
    #[must_use]
    pub fn declared_record_type(&self) -> Option<String> {
        self.fields.get(RECORD_TYPE_FIELD).map(ToString::to_string)
    }

    /// Make `RECORD_TYPE` name the record's sheet when the sheet left it out
    ///
    /// A missing field is inserted right after `POINT_NAME`; a blank cell is
    /// filled in where it stands. A non-empty value is kept.
    pub fn ensure_record_type(&mut self) {
        let sheet_type = CellValue::Text(self.record_type.to_string());
        match self.fields.get_mut(RECORD_TYPE_FIELD) {
            Some(value) if value.is_empty_text() => *value = sheet_type,
            Some(_) => {}
            None => {
                let index = usize::from(self.fields.contains_key(POINT_NAME_FIELD));
                self.fields
                    .shift_insert(index, RECORD_TYPE_FIELD.to_string(), sheet_type);
            }
        }
    }

    /// Iterate over fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Records keyed by point name, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputStore {
    records: IndexMap<String, Record>,
}

impl OutputStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A repeated point name replaces the earlier record but
    /// keeps its position; the replaced record is returned.
    pub fn upsert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.point_name.clone(), record)
    }

    /// Look up a record by point name
    #[must_use]
    pub fn get(&self, point_name: &str) -> Option<&Record> {
        self.records.get(point_name)
    }

    /// Iterate over records in order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Iterate mutably over records in order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.values_mut()
    }

    /// Point names in order
    pub fn point_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
