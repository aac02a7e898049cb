// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! An in-memory ordered key-value storage engine organized as a B+ tree,
//! with a schema-validated table layer and a snapshot-capable database
//! catalog on top.
//!
//! ## Quick Start
//!
//! ```rust
//! use reedkv::catalog::Catalog;
//! use reedkv::schema::{FieldKind, FieldValue, Record, Schema};
//!
//! let mut catalog = Catalog::new();
//! catalog.create_database("app")?;
//!
//! let mut schema = Schema::new();
//! schema.insert("id".to_string(), FieldKind::Integer);
//! schema.insert("name".to_string(), FieldKind::Text);
//! catalog.create_table("app", "users", schema, 8, Some("id".to_string()))?;
//!
//! let table = catalog.get_table_mut("app", "users")?;
//! let mut record = Record::new();
//! record.insert("id".to_string(), FieldValue::Integer(1));
//! record.insert("name".to_string(), FieldValue::Text("alice".to_string()));
//! table.insert(record)?;
//! # Ok::<(), reedkv::ReedError>(())
//! ```
//!
//! ## Architecture
//!
//! - **btree**: the arena-based B+ tree (`Tree`) that stores every table's
//!   rows in sorted order.
//! - **schema**: typed records (`Record`, `FieldValue`) and the schemas
//!   (`Schema`, `FieldKind`) tables validate against.
//! - **tables**: `Table`, a schema-validated CRUD layer over a `Tree`.
//! - **catalog**: `Catalog`, the two-level database/table registry with
//!   whole-catalog snapshot persistence.

pub mod btree;
pub mod catalog;
pub mod error;
pub mod schema;
pub mod tables;

pub use btree::{Order, Tree};
pub use catalog::Catalog;
pub use error::{ReedError, ReedResult};
pub use schema::{FieldKind, FieldValue, Record, RecordKey, Schema};
pub use tables::Table;
