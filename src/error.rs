// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the storage engine, table layer, and catalog.
//!
//! Every fallible public operation returns [`ReedResult`]. Caller-induced
//! errors (bad schema, duplicate key, malformed snapshot) are ordinary
//! `Err` values; a broken structural invariant is also returned as an
//! `Err` rather than a panic, but callers should treat it as fatal.

use std::fmt;

/// Standard result type for all operations in this crate.
pub type ReedResult<T> = Result<T, ReedError>;

/// Error type covering the tree, table, catalog, and snapshot layers.
#[derive(Debug, Clone)]
pub enum ReedError {
    /// B+ tree order below the minimum of 3.
    InvalidOrder { order: u16 },

    /// A structural invariant was violated (child missing from its parent,
    /// arity mismatch, or similar). The tree should be considered corrupted.
    InvariantViolation { reason: String },

    /// Record passed to `Table::insert`/`update` is missing a field the
    /// schema declares, or a field's runtime type doesn't match its tag.
    SchemaViolation { field: String, reason: String },

    /// `Table::insert` with a key already present.
    DuplicateKey { key: String },

    /// `Table::update` where the new record's search-key value differs
    /// from the id passed in.
    SearchKeyMutation { id: String },

    /// `Table::update`/`delete` on a key that isn't present.
    RecordNotFound { key: String },

    /// `search_key` not configured on a table that requires it.
    MissingSearchKey { table: String },

    /// Database not found in the catalog.
    DatabaseNotFound { name: String },

    /// Database already exists in the catalog.
    DatabaseAlreadyExists { name: String },

    /// Table not found in a database.
    TableNotFound { db: String, table: String },

    /// Table already exists in a database.
    TableAlreadyExists { db: String, table: String },

    /// I/O error during snapshot save/load.
    IoError { operation: String, reason: String },

    /// Snapshot bytes failed to serialize.
    SerializationError { reason: String },

    /// Snapshot bytes failed to deserialize, or carried an unexpected
    /// format version/magic.
    DeserializationError { reason: String },
}

impl fmt::Display for ReedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder { order } => {
                write!(f, "B+ tree order must be >= 3, got {}", order)
            }
            Self::InvariantViolation { reason } => {
                write!(f, "internal invariant violated: {}", reason)
            }
            Self::SchemaViolation { field, reason } => {
                write!(f, "schema violation on field '{}': {}", field, reason)
            }
            Self::DuplicateKey { key } => {
                write!(f, "duplicate key '{}'", key)
            }
            Self::SearchKeyMutation { id } => {
                write!(f, "search key cannot be modified during update of '{}'", id)
            }
            Self::RecordNotFound { key } => {
                write!(f, "no record found with key '{}'", key)
            }
            Self::MissingSearchKey { table } => {
                write!(f, "table '{}' has no search key configured", table)
            }
            Self::DatabaseNotFound { name } => {
                write!(f, "database '{}' does not exist", name)
            }
            Self::DatabaseAlreadyExists { name } => {
                write!(f, "database '{}' already exists", name)
            }
            Self::TableNotFound { db, table } => {
                write!(f, "table '{}' does not exist in database '{}'", table, db)
            }
            Self::TableAlreadyExists { db, table } => {
                write!(
                    f,
                    "table '{}' already exists in database '{}'",
                    table, db
                )
            }
            Self::IoError { operation, reason } => {
                write!(f, "I/O error during '{}': {}", operation, reason)
            }
            Self::SerializationError { reason } => {
                write!(f, "serialization error: {}", reason)
            }
            Self::DeserializationError { reason } => {
                write!(f, "deserialization error: {}", reason)
            }
        }
    }
}

impl std::error::Error for ReedError {}

impl From<std::io::Error> for ReedError {
    fn from(err: std::io::Error) -> Self {
        ReedError::IoError {
            operation: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}
