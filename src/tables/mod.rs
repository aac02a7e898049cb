// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Schema-validated table: a named, typed collection of records backed by
//! a [`Tree`] keyed on one designated search field.

use crate::btree::Tree;
use crate::error::{ReedError, ReedResult};
use crate::schema::{validate_record, Record, RecordKey, Schema};
use log::warn;
use serde::{Deserialize, Serialize};

/// A table: a schema, a search key field, and the tree holding its rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    name: String,
    schema: Schema,
    search_key: Option<String>,
    data: Tree<RecordKey, Record>,
}

impl Table {
    /// Create an empty table. `order` governs the underlying tree's
    /// branching factor; `search_key` names the schema field used as the
    /// tree's key (required before any mutating operation).
    pub fn new(
        name: impl Into<String>,
        schema: Schema,
        order: u16,
        search_key: Option<String>,
    ) -> ReedResult<Self> {
        Ok(Self {
            name: name.into(),
            schema,
            search_key,
            data: Tree::new(order)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn search_key(&self) -> Option<&str> {
        self.search_key.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn search_key_field(&self) -> ReedResult<&str> {
        self.search_key
            .as_deref()
            .ok_or_else(|| ReedError::MissingSearchKey {
                table: self.name.clone(),
            })
    }

    fn extract_key(&self, record: &Record) -> ReedResult<RecordKey> {
        let field = self.search_key_field()?;
        RecordKey::from_record(record, field).ok_or_else(|| ReedError::SchemaViolation {
            field: field.to_string(),
            reason: "search key field is missing or not a key-eligible type".to_string(),
        })
    }

    /// Validate `record` against this table's schema.
    pub fn validate_record(&self, record: &Record) -> ReedResult<()> {
        validate_record(record, &self.schema)
    }

    /// Insert a new record. Fails if the record violates the schema or a
    /// record with the same search key already exists.
    pub fn insert(&mut self, record: Record) -> ReedResult<()> {
        self.validate_record(&record)?;
        let key = self.extract_key(&record)?;
        if self.data.search(&key).is_some() {
            warn!("rejected insert into '{}': key '{key}' already exists", self.name);
            return Err(ReedError::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.data.insert(key, record)
    }

    /// Look up a record by its search key.
    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.data.search(key)
    }

    /// All records in ascending key order.
    pub fn get_all(&self) -> Vec<(RecordKey, Record)> {
        self.data.get_all()
    }

    /// Replace the record at `key` with `new_record`. The search key field
    /// of `new_record` must equal `key`; a table's search key is immutable
    /// once a record exists.
    pub fn update(&mut self, key: &RecordKey, new_record: Record) -> ReedResult<()> {
        self.validate_record(&new_record)?;
        let new_key = self.extract_key(&new_record)?;
        if &new_key != key {
            warn!(
                "rejected update on '{}': search key would change from '{key}' to '{new_key}'",
                self.name
            );
            return Err(ReedError::SearchKeyMutation {
                id: key.to_string(),
            });
        }
        if self.data.search(key).is_none() {
            warn!("rejected update on '{}': key '{key}' not found", self.name);
            return Err(ReedError::RecordNotFound {
                key: key.to_string(),
            });
        }
        self.data.update(key, new_record);
        Ok(())
    }

    /// Remove the record at `key`.
    pub fn delete(&mut self, key: &RecordKey) -> ReedResult<()> {
        if !self.data.delete(key)? {
            warn!("rejected delete on '{}': key '{key}' not found", self.name);
            return Err(ReedError::RecordNotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// All records with `lo <= key <= hi`, in ascending key order.
    pub fn range_query(&self, lo: &RecordKey, hi: &RecordKey) -> Vec<(RecordKey, Record)> {
        self.data.range_query(lo, hi)
    }

    /// Re-check the underlying tree's `NodeId` links after deserializing
    /// this table from a snapshot.
    pub(crate) fn validate_structure(&self) -> ReedResult<()> {
        self.data.validate_structure()
    }
}
