// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end coverage of the `Table` and `Catalog` collaborators,
//! including a whole-catalog snapshot round-trip.

use reedkv::schema::{FieldKind, FieldValue, Record, RecordKey};
use reedkv::{Catalog, ReedError, Schema};

fn people_schema() -> Schema {
    let mut schema = Schema::new();
    schema.insert("id".to_string(), FieldKind::Integer);
    schema.insert("name".to_string(), FieldKind::Text);
    schema
}

fn person(id: i64, name: &str) -> Record {
    let mut record = Record::new();
    record.insert("id".to_string(), FieldValue::Integer(id));
    record.insert("name".to_string(), FieldValue::Text(name.to_string()));
    record
}

#[test]
fn table_rejects_duplicate_insert_and_search_key_mutation() {
    let mut catalog = Catalog::new();
    catalog.create_database("app").unwrap();
    catalog
        .create_table("app", "people", people_schema(), 4, Some("id".to_string()))
        .unwrap();

    let table = catalog.get_table_mut("app", "people").unwrap();
    table.insert(person(1, "a")).unwrap();

    let dup = table.insert(person(1, "b"));
    assert!(matches!(dup, Err(ReedError::DuplicateKey { .. })));

    let mutated_key = table.update(&RecordKey::Integer(1), person(2, "b"));
    assert!(matches!(mutated_key, Err(ReedError::SearchKeyMutation { .. })));

    table.update(&RecordKey::Integer(1), person(1, "b")).unwrap();
    let got = table.get(&RecordKey::Integer(1)).unwrap();
    assert_eq!(got.get("name"), Some(&FieldValue::Text("b".to_string())));
}

#[test]
fn catalog_snapshot_roundtrip_preserves_every_database_and_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.snap");

    let mut catalog = Catalog::new();
    for db in ["north", "south"] {
        catalog.create_database(db).unwrap();
        catalog
            .create_table(db, "people", people_schema(), 4, Some("id".to_string()))
            .unwrap();
        let table = catalog.get_table_mut(db, "people").unwrap();
        table.insert(person(1, "a")).unwrap();
        table.insert(person(2, "b")).unwrap();
    }

    catalog.save(&path).unwrap();
    let restored = Catalog::load(&path).unwrap();

    assert_eq!(restored.list_databases(), vec!["north", "south"]);
    for db in ["north", "south"] {
        assert_eq!(restored.list_tables(db).unwrap(), vec!["people"]);
        assert_eq!(
            restored.get_table(db, "people").unwrap().get_all(),
            catalog.get_table(db, "people").unwrap().get_all()
        );
    }
}

#[test]
fn deleting_a_database_removes_access_to_its_tables() {
    let mut catalog = Catalog::new();
    catalog.create_database("app").unwrap();
    catalog
        .create_table("app", "people", people_schema(), 4, Some("id".to_string()))
        .unwrap();
    catalog.delete_database("app").unwrap();

    let err = catalog.get_table("app", "people").unwrap_err();
    assert!(matches!(err, ReedError::DatabaseNotFound { .. }));
}
