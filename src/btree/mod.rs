// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory B+ tree: the storage core underneath [`crate::tables::Table`].

mod iter;
mod node;
mod tree;
mod types;

pub use iter::{Iter, RangeIter};
pub use node::{InternalNode, LeafNode, Node};
pub use tree::{Slot, Tree};
pub use types::{NodeId, Order};
