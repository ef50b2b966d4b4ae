//! Validation engine
//!
//! Walks the output store in order, filling defaults and enforcing required
//! fields. The first failure ends the pass; later records are not checked.

use pointimp_core::types::{CellValue, OutputStore, Record, SchemaSet};
use tracing::{debug, error, info};

use super::report::{ValidationFailure, ValidationReport};

/// Validates records against the schemas of their record types
pub struct ValidationEngine<'a> {
    schemas: &'a SchemaSet,
}

impl<'a> ValidationEngine<'a> {
    /// Create an engine over a loaded schema set
    #[must_use]
    pub fn new(schemas: &'a SchemaSet) -> Self {
        Self { schemas }
    }

    /// Complete every record in the store, stopping at the first failure
    pub fn validate(&self, store: &mut OutputStore) -> ValidationReport {
        let mut report = ValidationReport::default();

        for record in store.iter_mut() {
            report.records_checked += 1;
            if let Err(failure) = self.complete_record(record, &mut report.defaults_filled) {
                error!("{failure}");
                report.failure = Some(failure);
                return report;
            }
        }

        info!(
            records = report.records_checked,
            defaults_filled = report.defaults_filled,
            "Validation completed"
        );
        report
    }

    /// Check one record and add its missing defaults
    fn complete_record(
        &self,
        record: &mut Record,
        defaults_filled: &mut usize,
    ) -> Result<(), ValidationFailure> {
        let record_type = record.declared_record_type().unwrap_or_default();
        let Some(schema) = self.schemas.get(&record_type) else {
            return Err(ValidationFailure::UnknownRecordType {
                point_name: record.point_name().to_string(),
                record_type,
            });
        };

        for (field, rule) in schema.iter() {
            match record.get(field) {
                Some(value) if rule.required && value.is_empty_text() => {
                    return Err(ValidationFailure::RequiredFieldEmpty {
                        field: field.to_string(),
                        point_name: record.point_name().to_string(),
                        record_type,
                    });
                }
                Some(_) => {}
                None => {
                    if let Some(default) = rule.default_value() {
                        debug!(
                            point = record.point_name(),
                            field,
                            default,
                            "Filling default"
                        );
                        record.set(field, CellValue::from(default));
                        *defaults_filled += 1;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointimp_core::types::{FieldRule, RECORD_TYPE_FIELD, RecordTypeName};
    use pretty_assertions::assert_eq;

    fn schemas() -> SchemaSet {
        let mut schemas = SchemaSet::new();
        let rm = schemas.register(RecordTypeName::from("RM"));
        rm.insert("A", FieldRule::new(true, ""));
        rm.insert("B", FieldRule::new(false, "default1"));
        rm.insert("C", FieldRule::new(false, ""));
        schemas
    }

    fn record(point: &str, fields: &[(&str, &str)]) -> Record {
        let mut record = Record::new(point, RecordTypeName::from("RM"));
        for (name, value) in fields {
            record.set(*name, CellValue::from(*value));
        }
        record.ensure_record_type();
        record
    }

    #[test]
    fn test_default_filled_when_absent() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        store.upsert(record("P1", &[("A", "1")]));

        let report = ValidationEngine::new(&schemas).validate(&mut store);

        assert!(report.is_valid());
        assert_eq!(report.defaults_filled, 1);
        let p1 = store.get("P1").unwrap();
        assert_eq!(p1.get("B"), Some(&CellValue::from("default1")));
        assert!(p1.get("C").is_none());
    }

    #[test]
    fn test_existing_value_kept() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        store.upsert(record("P1", &[("A", "1"), ("B", "custom")]));

        ValidationEngine::new(&schemas).validate(&mut store);

        assert_eq!(
            store.get("P1").and_then(|r| r.get("B")),
            Some(&CellValue::from("custom"))
        );
    }

    #[test]
    fn test_empty_optional_field_not_defaulted() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        store.upsert(record("P1", &[("A", "1"), ("B", "")]));

        let report = ValidationEngine::new(&schemas).validate(&mut store);

        assert!(report.is_valid());
        assert_eq!(
            store.get("P1").and_then(|r| r.get("B")),
            Some(&CellValue::empty())
        );
    }

    #[test]
    fn test_required_empty_halts_pass() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        store.upsert(record("P1", &[("A", "")]));
        store.upsert(record("P2", &[("A", "2")]));

        let report = ValidationEngine::new(&schemas).validate(&mut store);

        assert_eq!(report.records_checked, 1);
        assert_eq!(
            report.failure_message().as_deref(),
            Some("Field: A is required for point: P1 on sheet RM")
        );
        // P2 was never visited
        assert!(store.get("P2").unwrap().get("B").is_none());
    }

    #[test]
    fn test_absent_required_field_is_not_a_failure() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        store.upsert(record("P1", &[]));

        let report = ValidationEngine::new(&schemas).validate(&mut store);

        assert!(report.is_valid());
        assert!(store.get("P1").unwrap().get("A").is_none());
    }

    #[test]
    fn test_numeric_zero_satisfies_required() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        let mut p1 = record("P1", &[]);
        p1.set("A", CellValue::Int(0));
        store.upsert(p1);

        assert!(ValidationEngine::new(&schemas).validate(&mut store).is_valid());
    }

    #[test]
    fn test_unknown_record_type_halts_pass() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        let mut p1 = record("P1", &[("A", "1")]);
        p1.set(RECORD_TYPE_FIELD, CellValue::from("ZZ"));
        store.upsert(p1);

        let report = ValidationEngine::new(&schemas).validate(&mut store);

        assert_eq!(
            report.failure,
            Some(ValidationFailure::UnknownRecordType {
                point_name: "P1".to_string(),
                record_type: "ZZ".to_string(),
            })
        );
    }

    #[test]
    fn test_undeclared_fields_retained() {
        let schemas = schemas();
        let mut store = OutputStore::new();
        store.upsert(record("P1", &[("A", "1"), ("EXTRA", "kept")]));

        ValidationEngine::new(&schemas).validate(&mut store);

        let names: Vec<&str> = store.get("P1").unwrap().fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["POINT_NAME", "RECORD_TYPE", "A", "EXTRA", "B"]);
    }
}
