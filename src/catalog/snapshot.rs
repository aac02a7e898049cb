// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! On-disk snapshot envelope for a [`Catalog`].
//!
//! ## Format
//!
//! ```text
//! +----------+----------------+---------------------------+
//! | "RBKV"   | version (u16)  | bincode(CatalogSnapshot)   |
//! | 4 bytes  | little-endian  | remaining bytes             |
//! +----------+----------------+---------------------------+
//! ```
//!
//! `Table` already derives `Serialize`/`Deserialize` with exactly the
//! fields a restore needs (name, schema, search key, and the tree's own
//! arena/root/free-list), so the snapshot body stores tables directly
//! rather than through a separate mirror type.

use super::Catalog;
use crate::error::{ReedError, ReedResult};
use crate::tables::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

const MAGIC: &[u8; 4] = b"RBKV";
const FORMAT_VERSION: u16 = 1;

/// The serialized shape of a [`Catalog`].
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub version: u16,
    pub databases: BTreeMap<String, BTreeMap<String, Table>>,
}

impl From<&Catalog> for CatalogSnapshot {
    fn from(catalog: &Catalog) -> Self {
        Self {
            version: FORMAT_VERSION,
            databases: catalog.databases.clone(),
        }
    }
}

impl From<CatalogSnapshot> for Catalog {
    fn from(snapshot: CatalogSnapshot) -> Self {
        Catalog {
            databases: snapshot.databases,
        }
    }
}

fn with_snap_extension(path: &Path) -> std::path::PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("snap")
    }
}

pub fn save(catalog: &Catalog, path: &Path) -> ReedResult<()> {
    let path = with_snap_extension(path);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| ReedError::IoError {
            operation: "create_snapshot_dir".to_string(),
            reason: e.to_string(),
        })?;
    }

    let snapshot = CatalogSnapshot::from(catalog);
    let body = bincode::serialize(&snapshot).map_err(|e| ReedError::SerializationError {
        reason: e.to_string(),
    })?;

    let mut file = fs::File::create(&path).map_err(|e| ReedError::IoError {
        operation: format!("create_snapshot_file({})", path.display()),
        reason: e.to_string(),
    })?;
    file.write_all(MAGIC).map_err(|e| ReedError::IoError {
        operation: "write_snapshot_magic".to_string(),
        reason: e.to_string(),
    })?;
    file.write_all(&FORMAT_VERSION.to_le_bytes())
        .map_err(|e| ReedError::IoError {
            operation: "write_snapshot_version".to_string(),
            reason: e.to_string(),
        })?;
    file.write_all(&body).map_err(|e| ReedError::IoError {
        operation: "write_snapshot_body".to_string(),
        reason: e.to_string(),
    })?;
    log::info!("saved catalog snapshot to '{}'", path.display());
    Ok(())
}

pub fn load(path: &Path) -> ReedResult<Catalog> {
    let path = with_snap_extension(path);
    let bytes = fs::read(&path).map_err(|e| ReedError::IoError {
        operation: format!("read_snapshot_file({})", path.display()),
        reason: e.to_string(),
    })?;

    if bytes.len() < 6 || &bytes[0..4] != MAGIC {
        return Err(ReedError::DeserializationError {
            reason: "missing or invalid snapshot magic bytes".to_string(),
        });
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(ReedError::DeserializationError {
            reason: format!(
                "unsupported snapshot format version {version}, expected {FORMAT_VERSION}"
            ),
        });
    }

    let snapshot: CatalogSnapshot =
        bincode::deserialize(&bytes[6..]).map_err(|e| ReedError::DeserializationError {
            reason: e.to_string(),
        })?;

    for (db_name, tables) in &snapshot.databases {
        for (table_name, table) in tables {
            table.validate_structure().map_err(|e| ReedError::DeserializationError {
                reason: format!("table '{db_name}.{table_name}': {e}"),
            })?;
        }
    }

    log::info!("loaded catalog snapshot from '{}'", path.display());
    Ok(Catalog::from(snapshot))
}
