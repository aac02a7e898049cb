// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Thin command-line front end for the storage engine.
//!
//! Presentation only: every subcommand loads the catalog snapshot at
//! `path` (creating an empty one if it doesn't exist yet), performs one
//! operation, and for mutating commands saves the result back. No tree
//! logic lives here.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reedkv::schema::{FieldKind, FieldValue, Record, RecordKey, Schema};
use reedkv::Catalog;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reedkv")]
#[command(version = "0.1.0")]
#[command(about = "In-memory B+ tree key-value store with a table/catalog layer", long_about = None)]
struct Cli {
    /// Path to the catalog snapshot file.
    path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a database.
    CreateDatabase { db: String },

    /// Create a table with a JSON schema, e.g. '{"id":"integer","name":"text"}'.
    CreateTable {
        db: String,
        table: String,
        schema: String,
        #[arg(short, long, default_value_t = 8)]
        order: u16,
        #[arg(short, long)]
        search_key: String,
    },

    /// Insert a record given as a JSON object.
    Insert { db: String, table: String, record: String },

    /// Look up a record by its search key (a JSON scalar: `1` or `"alice"`).
    Get { db: String, table: String, key: String },

    /// Delete a record by its search key.
    Delete { db: String, table: String, key: String },

    /// Print every record with `lo <= key <= hi`.
    Range {
        db: String,
        table: String,
        lo: String,
        hi: String,
    },

    /// List databases, or tables within one database.
    List { db: Option<String> },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut catalog = if cli.path.exists() {
        Catalog::load(&cli.path)
            .with_context(|| format!("failed to load catalog at {}", cli.path.display()))?
    } else {
        Catalog::new()
    };

    match cli.command {
        Commands::CreateDatabase { db } => {
            catalog.create_database(&db)?;
            catalog.save(&cli.path)?;
            println!("created database '{db}'");
        }

        Commands::CreateTable {
            db,
            table,
            schema,
            order,
            search_key,
        } => {
            let schema = parse_schema(&schema)?;
            catalog.create_table(&db, &table, schema, order, Some(search_key))?;
            catalog.save(&cli.path)?;
            println!("created table '{table}' in database '{db}'");
        }

        Commands::Insert { db, table, record } => {
            let record = parse_record(&record)?;
            catalog.get_table_mut(&db, &table)?.insert(record)?;
            catalog.save(&cli.path)?;
            println!("inserted record into '{db}.{table}'");
        }

        Commands::Get { db, table, key } => {
            let key = parse_key(&key)?;
            match catalog.get_table(&db, &table)?.get(&key) {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record_as_json(record))?),
                None => println!("no record found for key '{key}'"),
            }
        }

        Commands::Delete { db, table, key } => {
            let key = parse_key(&key)?;
            catalog.get_table_mut(&db, &table)?.delete(&key)?;
            catalog.save(&cli.path)?;
            println!("deleted record '{key}' from '{db}.{table}'");
        }

        Commands::Range { db, table, lo, hi } => {
            let lo = parse_key(&lo)?;
            let hi = parse_key(&hi)?;
            for (key, record) in catalog.get_table(&db, &table)?.range_query(&lo, &hi) {
                println!("{key}: {}", serde_json::to_string(&record_as_json(&record))?);
            }
        }

        Commands::List { db } => match db {
            Some(db) => {
                for table in catalog.list_tables(&db)? {
                    println!("{table}");
                }
            }
            None => {
                for db in catalog.list_databases() {
                    println!("{db}");
                }
            }
        },
    }

    Ok(())
}

fn parse_schema(raw: &str) -> Result<Schema> {
    let parsed: std::collections::BTreeMap<String, String> =
        serde_json::from_str(raw).context("schema must be a JSON object of field -> type")?;
    let mut schema = Schema::new();
    for (field, kind) in parsed {
        let kind = match kind.as_str() {
            "integer" => FieldKind::Integer,
            "float" => FieldKind::Float,
            "text" => FieldKind::Text,
            "boolean" => FieldKind::Boolean,
            other => anyhow::bail!("unknown field type '{other}' for field '{field}'"),
        };
        schema.insert(field, kind);
    }
    Ok(schema)
}

fn parse_record(raw: &str) -> Result<Record> {
    let parsed: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(raw).context("record must be a JSON object")?;
    let mut record = Record::new();
    for (field, value) in parsed {
        record.insert(field, json_to_field_value(&value)?);
    }
    Ok(record)
}

fn json_to_field_value(value: &serde_json::Value) -> Result<FieldValue> {
    match value {
        serde_json::Value::String(s) => Ok(FieldValue::Text(s.clone())),
        serde_json::Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
        serde_json::Value::Number(n) if n.is_i64() => Ok(FieldValue::Integer(n.as_i64().unwrap())),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(FieldValue::Float)
            .context("numeric field value out of range"),
        other => anyhow::bail!("unsupported field value: {other}"),
    }
}

fn parse_key(raw: &str) -> Result<RecordKey> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(RecordKey::Integer(n));
    }
    let unquoted = raw.trim_matches('"');
    Ok(RecordKey::Text(unquoted.to_string()))
}

fn record_as_json(record: &Record) -> serde_json::Map<String, serde_json::Value> {
    record
        .iter()
        .map(|(field, value)| {
            let json = match value {
                FieldValue::Integer(v) => serde_json::json!(v),
                FieldValue::Float(v) => serde_json::json!(v),
                FieldValue::Text(v) => serde_json::json!(v),
                FieldValue::Boolean(v) => serde_json::json!(v),
            };
            (field.clone(), json)
        })
        .collect()
}
