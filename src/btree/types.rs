// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Core types for the in-memory B+ tree: order configuration and arena
//! node identifiers.

use crate::error::{ReedError, ReedResult};
use serde::{Deserialize, Serialize};

/// Index into a tree's node arena. Stands in for the owned/weak pointers
/// a parent-and-children node graph would otherwise need.
pub type NodeId = u32;

/// B+ tree order (branching factor), validated at construction.
///
/// ## Constraints
/// - Minimum order: 3.
///
/// ## Derived quantities
/// - `max_keys()`: `order - 1`, the point at which a node overflows.
/// - `min_keys()`: `order / 2`, the minimum key count for a non-root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order(u16);

impl Order {
    /// Create a new order, rejecting values below 3.
    pub fn new(order: u16) -> ReedResult<Self> {
        if order < 3 {
            return Err(ReedError::InvalidOrder { order });
        }
        Ok(Self(order))
    }

    /// Maximum keys a node may hold before it must split.
    pub fn max_keys(&self) -> usize {
        (self.0 - 1) as usize
    }

    /// Minimum keys a non-root node must hold before it underflows.
    pub fn min_keys(&self) -> usize {
        (self.0 / 2) as usize
    }

    /// Raw configured order value.
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl Default for Order {
    fn default() -> Self {
        // 8 is the documented default for tables created without an
        // explicit order.
        Self(8)
    }
}
