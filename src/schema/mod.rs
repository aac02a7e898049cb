// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Record, schema, and field-value types shared by every table.

mod types;
mod validation;

pub use types::{FieldKind, FieldValue, Record, RecordKey, Schema};
pub use validation::validate_record;
