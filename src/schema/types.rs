// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Record, schema, and field-value types.
//!
//! A [`Record`] is an ordered map of field names to typed [`FieldValue`]s;
//! a [`Schema`] names the [`FieldKind`] each field must hold. [`RecordKey`]
//! is the subset of `FieldValue` a table may use as its B+ tree search key
//! (integers and text only: floats make an unreliable equality key, and a
//! boolean key space has at most two entries).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A single field's value, tagged by runtime type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Integer(_) => FieldKind::Integer,
            Self::Float(_) => FieldKind::Float,
            Self::Text(_) => FieldKind::Text,
            Self::Boolean(_) => FieldKind::Boolean,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
        }
    }
}

/// The declared type of a field, independent of any particular value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
        };
        write!(f, "{name}")
    }
}

/// A row: an ordered map from field name to value. Ordered so that two
/// records built from the same fields serialize identically regardless of
/// insertion order, which keeps catalog snapshots reproducible.
pub type Record = BTreeMap<String, FieldValue>;

/// Field name -> declared type, for every field a table's records must
/// carry.
pub type Schema = BTreeMap<String, FieldKind>;

/// The restricted subset of [`FieldValue`] usable as a table's search key.
///
/// Excludes `Float` (equality on floats is unreliable as a lookup key) and
/// `Boolean` (a key space of size two defeats the point of a tree index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKey {
    Integer(i64),
    Text(String),
}

impl RecordKey {
    /// Extract the value of `field` from `record` as a `RecordKey`, if the
    /// field is present and of a key-eligible type.
    pub fn from_record(record: &Record, field: &str) -> Option<Self> {
        match record.get(field)? {
            FieldValue::Integer(v) => Some(Self::Integer(*v)),
            FieldValue::Text(v) => Some(Self::Text(v.clone())),
            FieldValue::Float(_) | FieldValue::Boolean(_) => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Orders by variant first (all integers before all text), then by value.
/// Arbitrary but total and stable, which is all a B+ tree key needs.
impl PartialOrd for RecordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Integer(_)) => Ordering::Greater,
        }
    }
}
