// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Catalog: a two-level `db_name -> table_name -> Table` mapping with
//! whole-catalog snapshot persistence.

mod snapshot;

pub use snapshot::CatalogSnapshot;

use crate::error::{ReedError, ReedResult};
use crate::schema::Schema;
use crate::tables::Table;
use log::info;
use std::collections::BTreeMap;
use std::path::Path;

/// Every database known to this catalog, keyed by name. `BTreeMap` keeps
/// `list_databases`/`list_tables` output in a stable, deterministic order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    databases: BTreeMap<String, BTreeMap<String, Table>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_database(&mut self, db_name: &str) -> ReedResult<()> {
        if self.databases.contains_key(db_name) {
            return Err(ReedError::DatabaseAlreadyExists {
                name: db_name.to_string(),
            });
        }
        self.databases.insert(db_name.to_string(), BTreeMap::new());
        info!("created database '{db_name}'");
        Ok(())
    }

    pub fn delete_database(&mut self, db_name: &str) -> ReedResult<()> {
        self.databases
            .remove(db_name)
            .ok_or_else(|| ReedError::DatabaseNotFound {
                name: db_name.to_string(),
            })?;
        info!("deleted database '{db_name}'");
        Ok(())
    }

    pub fn list_databases(&self) -> Vec<&str> {
        self.databases.keys().map(String::as_str).collect()
    }

    fn database(&self, db_name: &str) -> ReedResult<&BTreeMap<String, Table>> {
        self.databases
            .get(db_name)
            .ok_or_else(|| ReedError::DatabaseNotFound {
                name: db_name.to_string(),
            })
    }

    fn database_mut(&mut self, db_name: &str) -> ReedResult<&mut BTreeMap<String, Table>> {
        self.databases
            .get_mut(db_name)
            .ok_or_else(|| ReedError::DatabaseNotFound {
                name: db_name.to_string(),
            })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_table(
        &mut self,
        db_name: &str,
        table_name: &str,
        schema: Schema,
        order: u16,
        search_key: Option<String>,
    ) -> ReedResult<()> {
        let db = self.database_mut(db_name)?;
        if db.contains_key(table_name) {
            return Err(ReedError::TableAlreadyExists {
                db: db_name.to_string(),
                table: table_name.to_string(),
            });
        }
        let table = Table::new(table_name, schema, order, search_key)?;
        db.insert(table_name.to_string(), table);
        info!("created table '{table_name}' in database '{db_name}'");
        Ok(())
    }

    pub fn delete_table(&mut self, db_name: &str, table_name: &str) -> ReedResult<()> {
        let db = self.database_mut(db_name)?;
        db.remove(table_name)
            .ok_or_else(|| ReedError::TableNotFound {
                db: db_name.to_string(),
                table: table_name.to_string(),
            })?;
        info!("deleted table '{table_name}' from database '{db_name}'");
        Ok(())
    }

    pub fn list_tables(&self, db_name: &str) -> ReedResult<Vec<&str>> {
        Ok(self.database(db_name)?.keys().map(String::as_str).collect())
    }

    pub fn get_table(&self, db_name: &str, table_name: &str) -> ReedResult<&Table> {
        self.database(db_name)?
            .get(table_name)
            .ok_or_else(|| ReedError::TableNotFound {
                db: db_name.to_string(),
                table: table_name.to_string(),
            })
    }

    pub fn get_table_mut(&mut self, db_name: &str, table_name: &str) -> ReedResult<&mut Table> {
        let db_name_owned = db_name.to_string();
        let table_name_owned = table_name.to_string();
        self.database_mut(db_name)?
            .get_mut(table_name)
            .ok_or(ReedError::TableNotFound {
                db: db_name_owned,
                table: table_name_owned,
            })
    }

    /// Serialize the whole catalog to `path`, creating parent directories
    /// and appending a `.snap` extension if absent.
    pub fn save(&self, path: impl AsRef<Path>) -> ReedResult<()> {
        snapshot::save(self, path.as_ref())
    }

    /// Load a catalog previously written by [`Catalog::save`].
    pub fn load(path: impl AsRef<Path>) -> ReedResult<Self> {
        snapshot::load(path.as_ref())
    }
}
