// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Schema validation for records.

use super::types::{FieldValue, Record, Schema};
use crate::error::{ReedError, ReedResult};
use log::warn;

/// Validate `record` against `schema`.
///
/// ## Input
/// - `record`: the row to validate
/// - `schema`: field name -> declared type
///
/// ## Output
/// - `Ok(())`: every schema field is present with a matching type, and the
///   record carries no field the schema doesn't declare.
/// - `Err(ReedError::SchemaViolation)`: otherwise.
pub fn validate_record(record: &Record, schema: &Schema) -> ReedResult<()> {
    for (field, kind) in schema {
        match record.get(field) {
            None => {
                warn!("schema violation: required field '{field}' is missing");
                return Err(ReedError::SchemaViolation {
                    field: field.clone(),
                    reason: "required field is missing".to_string(),
                })
            }
            Some(value) if value.kind() != *kind => {
                warn!("schema violation: field '{field}' expected {kind}, got {}", value.kind());
                return Err(ReedError::SchemaViolation {
                    field: field.clone(),
                    reason: format!("expected {kind}, got {}", value.kind()),
                })
            }
            Some(_) => {}
        }
    }

    for field in record.keys() {
        if !schema.contains_key(field) {
            warn!("schema violation: field '{field}' is not declared in the schema");
            return Err(ReedError::SchemaViolation {
                field: field.clone(),
                reason: "field is not declared in the schema".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::FieldKind;

    fn schema() -> Schema {
        let mut s = Schema::new();
        s.insert("id".to_string(), FieldKind::Integer);
        s.insert("name".to_string(), FieldKind::Text);
        s
    }

    #[test]
    fn accepts_matching_record() {
        let mut record = Record::new();
        record.insert("id".to_string(), FieldValue::Integer(1));
        record.insert("name".to_string(), FieldValue::Text("a".into()));
        assert!(validate_record(&record, &schema()).is_ok());
    }

    #[test]
    fn rejects_missing_field() {
        let mut record = Record::new();
        record.insert("id".to_string(), FieldValue::Integer(1));
        let err = validate_record(&record, &schema()).unwrap_err();
        assert!(matches!(err, ReedError::SchemaViolation { field, .. } if field == "name"));
    }

    #[test]
    fn rejects_wrong_type() {
        let mut record = Record::new();
        record.insert("id".to_string(), FieldValue::Text("not an int".into()));
        record.insert("name".to_string(), FieldValue::Text("a".into()));
        let err = validate_record(&record, &schema()).unwrap_err();
        assert!(matches!(err, ReedError::SchemaViolation { field, .. } if field == "id"));
    }

    #[test]
    fn rejects_undeclared_field() {
        let mut record = Record::new();
        record.insert("id".to_string(), FieldValue::Integer(1));
        record.insert("name".to_string(), FieldValue::Text("a".into()));
        record.insert("extra".to_string(), FieldValue::Boolean(true));
        let err = validate_record(&record, &schema()).unwrap_err();
        assert!(matches!(err, ReedError::SchemaViolation { field, .. } if field == "extra"));
    }
}
