// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory B+ tree: sorted leaves, an internal routing index, recursive
//! split on overflow, and borrow/merge on underflow.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Tree                                          │
//! ├──────────────────────────────────────────────┤
//! │ - arena: Vec<Slot<K, V>>  (node pool)         │
//! │ - free_list: Vec<NodeId>  (reusable slots)    │
//! │ - root: NodeId                                │
//! │ - order: Order                                │
//! └──────────────────────────────────────────────┘
//!          │
//!          │ NodeId edges (parent/child/next), no owned pointers
//!          ▼
//! [ Internal { keys, children, parent } ]
//! [ Leaf { keys, values, next, parent } ] -> [ Leaf { .. } ] -> ...
//! ```
//!
//! Parent/child/leaf-chain links are plain array indices rather than
//! `Rc`/`Weak` pointers, so the structure has no reference cycles and
//! serializes directly (see [`crate::catalog::snapshot`]).
//!
//! ## Operations
//!
//! - **Point lookup**: O(log n) tree descent + binary search.
//! - **Range scan**: O(log n + k) descent to the start leaf, then a linear
//!   walk of the leaf chain.
//! - **Insert**: O(log n) amortised, occasional split cascades upward.
//! - **Delete**: O(log n) amortised, occasional borrow/merge cascades
//!   upward, possibly collapsing the root.
//!
//! ## Example
//!
//! ```rust
//! use reedkv::btree::Tree;
//!
//! let mut tree = Tree::<i32, &str>::new(4)?;
//! tree.insert(1, "one");
//! tree.insert(2, "two");
//! assert_eq!(tree.search(&1), Some(&"one"));
//! assert_eq!(tree.range_query(&1, &2), vec![(1, "one"), (2, "two")]);
//! # Ok::<(), reedkv::error::ReedError>(())
//! ```

use super::node::{InternalNode, LeafNode, Node};
use super::types::{NodeId, Order};
use crate::error::{ReedError, ReedResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// One arena slot: `None` once freed (merge target or collapsed root),
/// `Some` while live. Keeping freed slots around (rather than shifting
/// indices) means every other `NodeId` in the tree stays valid.
pub type Slot<K, V> = Option<Node<K, V>>;

/// In-memory B+ tree mapping totally-ordered keys to arbitrary payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree<K, V> {
    pub(crate) arena: Vec<Slot<K, V>>,
    pub(crate) free_list: Vec<NodeId>,
    pub(crate) root: NodeId,
    pub(crate) order: Order,
}

impl<K, V> Tree<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Create an empty tree. Fails if `order < 3`.
    pub fn new(order: u16) -> ReedResult<Self> {
        let order = Order::new(order)?;
        let mut tree = Self {
            arena: Vec::new(),
            free_list: Vec::new(),
            root: 0,
            order,
        };
        tree.root = tree.alloc(Node::Leaf(LeafNode::new()));
        Ok(tree)
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of entries, via a full leaf-chain walk.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut current = Some(self.leftmost_leaf());
        while let Some(id) = current {
            let leaf = self.node(id).as_leaf();
            count += leaf.keys.len();
            current = leaf.next;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.arena[id as usize] = Some(node);
            id
        } else {
            self.arena.push(Some(node));
            (self.arena.len() - 1) as NodeId
        }
    }

    fn free(&mut self, id: NodeId) {
        self.arena[id as usize] = None;
        self.free_list.push(id);
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.arena[id as usize]
            .as_ref()
            .expect("NodeId referenced a freed arena slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.arena[id as usize]
            .as_mut()
            .expect("NodeId referenced a freed arena slot")
    }

    /// Descend from the root to the leaf whose range contains `key`,
    /// whether or not the key is actually present.
    pub(crate) fn find_leaf(&self, key: &K) -> NodeId {
        let mut current = self.root;
        let mut depth = 0;
        loop {
            match self.node(current) {
                Node::Leaf(_) => {
                    debug!("descent from root {} reached leaf {current} at depth {depth}", self.root);
                    return current;
                }
                Node::Internal(internal) => {
                    let idx = internal.find_child(key);
                    current = internal.children[idx];
                    depth += 1;
                }
            }
        }
    }

    pub(crate) fn leftmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        loop {
            match self.node(current) {
                Node::Leaf(_) => return current,
                Node::Internal(internal) => current = internal.children[0],
            }
        }
    }

    /// Look up the payload for `key`.
    pub fn search(&self, key: &K) -> Option<&V> {
        let leaf_id = self.find_leaf(key);
        let leaf = self.node(leaf_id).as_leaf();
        leaf.position(key).ok().map(|idx| &leaf.values[idx])
    }

    /// Insert `(key, value)`. The tree does not reject duplicate keys
    /// (that is the `Table` layer's job); re-inserting an existing key
    /// updates its payload in place.
    pub fn insert(&mut self, key: K, value: V) -> ReedResult<()> {
        let leaf_id = self.find_leaf(&key);
        {
            let leaf = self.node_mut(leaf_id).as_leaf_mut();
            match leaf.position(&key) {
                Ok(idx) => {
                    leaf.values[idx] = value;
                    return Ok(());
                }
                Err(idx) => {
                    leaf.keys.insert(idx, key);
                    leaf.values.insert(idx, value);
                }
            }
        }
        if self.node(leaf_id).is_overflow(self.order) {
            debug!("leaf {leaf_id} overflowed order {:?}, splitting", self.order);
            self.split_leaf(leaf_id)?;
        }
        Ok(())
    }

    /// Remove `key`. Returns `false` if it wasn't present.
    pub fn delete(&mut self, key: &K) -> ReedResult<bool> {
        let leaf_id = self.find_leaf(key);
        let removed = {
            let leaf = self.node_mut(leaf_id).as_leaf_mut();
            match leaf.position(key) {
                Ok(idx) => {
                    leaf.keys.remove(idx);
                    leaf.values.remove(idx);
                    true
                }
                Err(_) => false,
            }
        };
        if removed && leaf_id != self.root && self.node(leaf_id).is_underflow(self.order) {
            debug!("leaf {leaf_id} underflowed order {:?}, rebalancing", self.order);
            self.handle_underflow(leaf_id)?;
        }
        Ok(removed)
    }

    /// Replace the payload for an existing `key`. Never changes structure.
    /// Returns `false` if `key` isn't present.
    pub fn update(&mut self, key: &K, value: V) -> bool {
        let leaf_id = self.find_leaf(key);
        let leaf = self.node_mut(leaf_id).as_leaf_mut();
        match leaf.position(key) {
            Ok(idx) => {
                leaf.values[idx] = value;
                true
            }
            Err(_) => false,
        }
    }

    /// All pairs with `lo <= key <= hi`, in ascending order. Empty if
    /// `lo > hi`.
    pub fn range_query(&self, lo: &K, hi: &K) -> Vec<(K, V)> {
        let mut results = Vec::new();
        if lo > hi {
            return results;
        }
        let mut current = Some(self.find_leaf(lo));
        while let Some(id) = current {
            let leaf = self.node(id).as_leaf();
            let start = leaf.keys.partition_point(|k| k < lo);
            for i in start..leaf.keys.len() {
                if &leaf.keys[i] > hi {
                    return results;
                }
                results.push((leaf.keys[i].clone(), leaf.values[i].clone()));
            }
            current = leaf.next;
        }
        results
    }

    /// All pairs in ascending key order.
    pub fn get_all(&self) -> Vec<(K, V)> {
        let mut results = Vec::new();
        let mut current = Some(self.leftmost_leaf());
        while let Some(id) = current {
            let leaf = self.node(id).as_leaf();
            for i in 0..leaf.keys.len() {
                results.push((leaf.keys[i].clone(), leaf.values[i].clone()));
            }
            current = leaf.next;
        }
        results
    }

    // ---- split path -----------------------------------------------------

    fn split_leaf(&mut self, id: NodeId) -> ReedResult<()> {
        let mid = self.order.min_keys().max(1);
        let (promoted, new_leaf, old_next) = {
            let leaf = self.node_mut(id).as_leaf_mut();
            let (promoted, new_leaf) = leaf.split(mid);
            let old_next = leaf.next;
            (promoted, new_leaf, old_next)
        };
        let new_id = self.alloc(Node::Leaf(new_leaf));
        debug_assert_eq!(self.node(new_id).as_leaf().next, old_next);
        self.node_mut(id).as_leaf_mut().next = Some(new_id);
        debug!("split leaf {id} -> ({id}, {new_id})");
        self.insert_in_parent(id, promoted, new_id)
    }

    fn split_internal(&mut self, id: NodeId) -> ReedResult<()> {
        let mid = self.order.min_keys().max(1);
        let (promoted, new_internal) = {
            let internal = self.node_mut(id).as_internal_mut();
            internal.split(mid)
        };
        let children_to_reparent = new_internal.children.clone();
        let new_id = self.alloc(Node::Internal(new_internal));
        for child in children_to_reparent {
            self.node_mut(child).set_parent(Some(new_id));
        }
        debug!("split internal node {id} -> ({id}, {new_id})");
        self.insert_in_parent(id, promoted, new_id)
    }

    fn insert_in_parent(&mut self, left: NodeId, promoted: K, right: NodeId) -> ReedResult<()> {
        match self.node(left).parent() {
            None => {
                let mut new_root = InternalNode::new();
                new_root.keys.push(promoted);
                new_root.children = vec![left, right];
                let new_root_id = self.alloc(Node::Internal(new_root));
                self.node_mut(left).set_parent(Some(new_root_id));
                self.node_mut(right).set_parent(Some(new_root_id));
                self.root = new_root_id;
                debug!("grew a new root {new_root_id} over ({left}, {right})");
                Ok(())
            }
            Some(parent_id) => {
                self.node_mut(right).set_parent(Some(parent_id));
                self.node_mut(parent_id)
                    .as_internal_mut()
                    .insert_key(promoted, right);
                if self.node(parent_id).is_overflow(self.order) {
                    self.split_internal(parent_id)?;
                }
                Ok(())
            }
        }
    }

    // ---- underflow path ---------------------------------------------------

    fn handle_underflow(&mut self, id: NodeId) -> ReedResult<()> {
        let parent_id = self.node(id).parent().ok_or_else(|| ReedError::InvariantViolation {
            reason: "underflowing node has no parent but is not the root".to_string(),
        })?;
        let i = {
            let parent = self.node(parent_id).as_internal();
            parent.index_of_child(id).ok_or_else(|| ReedError::InvariantViolation {
                reason: "underflowing node not found among its parent's children".to_string(),
            })?
        };
        let child_count = self.node(parent_id).as_internal().children.len();

        if i > 0 {
            let left_id = self.node(parent_id).as_internal().children[i - 1];
            if self.node(left_id).key_count() > self.order.min_keys() {
                debug!("node {id} borrows from left sibling {left_id}");
                return self.borrow_from_left(parent_id, id, left_id, i - 1);
            }
        }
        if i < child_count - 1 {
            let right_id = self.node(parent_id).as_internal().children[i + 1];
            if self.node(right_id).key_count() > self.order.min_keys() {
                debug!("node {id} borrows from right sibling {right_id}");
                return self.borrow_from_right(parent_id, id, right_id, i);
            }
        }
        if i > 0 {
            let left_id = self.node(parent_id).as_internal().children[i - 1];
            debug!("merging node {id} into left sibling {left_id}");
            self.merge(parent_id, left_id, id, i - 1)
        } else if i < child_count - 1 {
            let right_id = self.node(parent_id).as_internal().children[i + 1];
            debug!("merging right sibling {right_id} into node {id}");
            self.merge(parent_id, id, right_id, i)
        } else {
            Err(ReedError::InvariantViolation {
                reason: "underflowing node has neither a left nor a right sibling".to_string(),
            })
        }
    }

    fn borrow_from_left(
        &mut self,
        parent_id: NodeId,
        node_id: NodeId,
        left_id: NodeId,
        sep_idx: usize,
    ) -> ReedResult<()> {
        let is_leaf = self.node(node_id).is_leaf();
        if is_leaf {
            let (k, v) = {
                let left = self.node_mut(left_id).as_leaf_mut();
                let k = left.keys.pop().expect("left sibling had excess keys");
                let v = left.values.pop().expect("left sibling had excess keys");
                (k, v)
            };
            let node = self.node_mut(node_id).as_leaf_mut();
            node.keys.insert(0, k);
            node.values.insert(0, v);
            let new_sep = node.keys[0].clone();
            self.node_mut(parent_id).as_internal_mut().keys[sep_idx] = new_sep;
        } else {
            let sep_key = self.node(parent_id).as_internal().keys[sep_idx].clone();
            let (new_sep, child) = {
                let left = self.node_mut(left_id).as_internal_mut();
                let new_sep = left.keys.pop().expect("left sibling had excess keys");
                let child = left.children.pop().expect("left sibling had excess keys");
                (new_sep, child)
            };
            let node = self.node_mut(node_id).as_internal_mut();
            node.keys.insert(0, sep_key);
            node.children.insert(0, child);
            self.node_mut(parent_id).as_internal_mut().keys[sep_idx] = new_sep;
            self.node_mut(child).set_parent(Some(node_id));
        }
        Ok(())
    }

    fn borrow_from_right(
        &mut self,
        parent_id: NodeId,
        node_id: NodeId,
        right_id: NodeId,
        sep_idx: usize,
    ) -> ReedResult<()> {
        let is_leaf = self.node(node_id).is_leaf();
        if is_leaf {
            let (k, v) = {
                let right = self.node_mut(right_id).as_leaf_mut();
                (right.keys.remove(0), right.values.remove(0))
            };
            let node = self.node_mut(node_id).as_leaf_mut();
            node.keys.push(k);
            node.values.push(v);
            let new_sep = self
                .node(right_id)
                .as_leaf()
                .keys
                .first()
                .cloned()
                .ok_or_else(|| ReedError::InvariantViolation {
                    reason: "right sibling emptied by a legal borrow".to_string(),
                })?;
            self.node_mut(parent_id).as_internal_mut().keys[sep_idx] = new_sep;
        } else {
            let sep_key = self.node(parent_id).as_internal().keys[sep_idx].clone();
            let (new_sep, child) = {
                let right = self.node_mut(right_id).as_internal_mut();
                (right.keys.remove(0), right.children.remove(0))
            };
            let node = self.node_mut(node_id).as_internal_mut();
            node.keys.push(sep_key);
            node.children.push(child);
            self.node_mut(parent_id).as_internal_mut().keys[sep_idx] = new_sep;
            self.node_mut(child).set_parent(Some(node_id));
        }
        Ok(())
    }

    /// Merge `right` into `left`; both are children of `parent` at adjacent
    /// positions with `parent.keys[sep_idx]` between them.
    fn merge(
        &mut self,
        parent_id: NodeId,
        left_id: NodeId,
        right_id: NodeId,
        sep_idx: usize,
    ) -> ReedResult<()> {
        let is_leaf = self.node(left_id).is_leaf();
        if is_leaf {
            let right = self.node(right_id).as_leaf().clone();
            let left = self.node_mut(left_id).as_leaf_mut();
            left.keys.extend(right.keys);
            left.values.extend(right.values);
            left.next = right.next;
        } else {
            let sep_key = self.node(parent_id).as_internal().keys[sep_idx].clone();
            let right = self.node(right_id).as_internal().clone();
            let moved_children = right.children.clone();
            let left = self.node_mut(left_id).as_internal_mut();
            left.keys.push(sep_key);
            left.keys.extend(right.keys);
            left.children.extend(right.children);
            for child in moved_children {
                self.node_mut(child).set_parent(Some(left_id));
            }
        }
        self.free(right_id);
        debug!("freed node {right_id} after merging into {left_id}");

        let parent = self.node_mut(parent_id).as_internal_mut();
        parent.keys.remove(sep_idx);
        parent.children.remove(sep_idx + 1);

        if parent_id == self.root {
            self.maybe_collapse_root(parent_id);
        } else if self.node(parent_id).is_underflow(self.order) {
            self.handle_underflow(parent_id)?;
        }
        Ok(())
    }

    /// Check that every `NodeId` this tree references (root, free list,
    /// parent/child/next links) falls within the arena's bounds. A
    /// deserialized snapshot is plain data to `serde`/`bincode` and carries
    /// no such guarantee on its own.
    pub(crate) fn validate_structure(&self) -> ReedResult<()> {
        let len = self.arena.len();
        let in_bounds = |id: NodeId| (id as usize) < len;

        if !in_bounds(self.root) {
            return Err(ReedError::InvariantViolation {
                reason: format!("root {} is out of bounds for an arena of size {len}", self.root),
            });
        }
        for &id in &self.free_list {
            if !in_bounds(id) {
                return Err(ReedError::InvariantViolation {
                    reason: format!("free list entry {id} is out of bounds for an arena of size {len}"),
                });
            }
        }
        for (idx, slot) in self.arena.iter().enumerate() {
            let Some(node) = slot else { continue };
            if let Some(parent) = node.parent() {
                if !in_bounds(parent) {
                    return Err(ReedError::InvariantViolation {
                        reason: format!("node {idx}'s parent {parent} is out of bounds for an arena of size {len}"),
                    });
                }
            }
            match node {
                Node::Leaf(leaf) => {
                    if let Some(next) = leaf.next {
                        if !in_bounds(next) {
                            return Err(ReedError::InvariantViolation {
                                reason: format!(
                                    "leaf {idx}'s next {next} is out of bounds for an arena of size {len}"
                                ),
                            });
                        }
                    }
                }
                Node::Internal(internal) => {
                    for &child in &internal.children {
                        if !in_bounds(child) {
                            return Err(ReedError::InvariantViolation {
                                reason: format!(
                                    "internal node {idx}'s child {child} is out of bounds for an arena of size {len}"
                                ),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn maybe_collapse_root(&mut self, root_id: NodeId) {
        let only_child = match self.node(root_id) {
            Node::Internal(internal) if internal.keys.is_empty() && internal.children.len() == 1 => {
                Some(internal.children[0])
            }
            _ => None,
        };
        if let Some(child) = only_child {
            self.node_mut(child).set_parent(None);
            self.root = child;
            self.free(root_id);
            debug!("collapsed root {root_id}, new root is {child}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_leaf_chain(tree: &Tree<i32, i32>) -> Vec<Vec<i32>> {
        let mut chains = Vec::new();
        let mut current = Some(tree.leftmost_leaf());
        while let Some(id) = current {
            let leaf = tree.node(id).as_leaf();
            chains.push(leaf.keys.clone());
            current = leaf.next;
        }
        chains
    }

    fn assert_invariants(tree: &Tree<i32, i32>) {
        fn walk(tree: &Tree<i32, i32>, id: NodeId, expected_parent: Option<NodeId>, depth: usize, leaf_depth: &mut Option<usize>) {
            let node = tree.node(id);
            assert_eq!(node.parent(), expected_parent, "parent back-reference mismatch at node {id}");
            match node {
                Node::Leaf(leaf) => {
                    assert_eq!(leaf.keys.len(), leaf.values.len());
                    assert!(leaf.keys.windows(2).all(|w| w[0] < w[1]));
                    match leaf_depth {
                        Some(d) => assert_eq!(*d, depth, "leaves must be at identical depth"),
                        None => *leaf_depth = Some(depth),
                    }
                }
                Node::Internal(internal) => {
                    assert_eq!(internal.children.len(), internal.keys.len() + 1);
                    assert!(internal.keys.windows(2).all(|w| w[0] < w[1]));
                    for &child in &internal.children {
                        walk(tree, child, Some(id), depth + 1, leaf_depth);
                    }
                }
            }
            if id != tree.root {
                assert!(
                    node.key_count() >= tree.order.min_keys(),
                    "node {id} underflowed: {} < {}",
                    node.key_count(),
                    tree.order.min_keys()
                );
            }
        }
        let mut leaf_depth = None;
        walk(tree, tree.root, None, 0, &mut leaf_depth);

        // leaf chain strictly ascending across leaf boundaries
        let all = tree.get_all();
        assert!(all.windows(2).all(|w| w.0[0].0 < w[1].0), "global ordering broken");
    }

    #[test]
    fn search_insert_roundtrip() {
        let mut tree = Tree::new(4).unwrap();
        tree.insert(1, 100).unwrap();
        tree.insert(2, 200).unwrap();
        assert_eq!(tree.search(&1), Some(&100));
        assert_eq!(tree.search(&2), Some(&200));
        assert_eq!(tree.search(&3), None);
    }

    #[test]
    fn insert_triggers_split_and_keeps_invariants() {
        let mut tree = Tree::new(4).unwrap();
        for k in 1..=7 {
            tree.insert(k, k * 10).unwrap();
        }
        assert_eq!(
            tree.get_all(),
            (1..=7).map(|k| (k, k * 10)).collect::<Vec<_>>()
        );
        let chains = collect_leaf_chain(&tree);
        assert_eq!(chains.len(), 3, "expected three leaves for order=4, n=7");
        assert_eq!(tree.range_query(&2, &5), vec![(2, 20), (3, 30), (4, 40), (5, 50)]);
    }

    #[test]
    fn delete_borrows_then_merges() {
        let mut tree = Tree::new(4).unwrap();
        for k in 1..=7 {
            tree.insert(k, k * 10).unwrap();
        }
        assert!(tree.delete(&3).unwrap());
        assert!(tree.delete(&4).unwrap());
        assert_eq!(
            tree.get_all(),
            vec![(1, 10), (2, 20), (5, 50), (6, 60), (7, 70)]
        );
    }

    #[test]
    fn order_three_scenario_matches_expected_order() {
        let mut tree = Tree::new(3).unwrap();
        for k in [10, 20, 5, 6, 12, 30, 7, 17] {
            tree.insert(k, k).unwrap();
        }
        let keys: Vec<_> = tree.get_all().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![5, 6, 7, 10, 12, 17, 20, 30]);
    }

    #[test]
    fn deleting_everything_collapses_to_empty_leaf_root() {
        let mut tree = Tree::new(4).unwrap();
        for k in 1..=7 {
            tree.insert(k, k).unwrap();
        }
        for k in 1..=7 {
            assert!(tree.delete(&k).unwrap());
        }
        assert!(tree.get_all().is_empty());
        assert!(tree.node(tree.root).is_leaf());
    }

    #[test]
    fn single_element_delete_leaves_empty_leaf() {
        let mut tree = Tree::new(4).unwrap();
        tree.insert(1, 1).unwrap();
        assert!(tree.delete(&1).unwrap());
        assert_eq!(tree.search(&1), None);
        assert!(tree.node(tree.root).is_leaf());
    }

    #[test]
    fn range_query_lo_greater_than_hi_is_empty() {
        let mut tree = Tree::new(4).unwrap();
        tree.insert(1, 1).unwrap();
        tree.insert(2, 2).unwrap();
        assert!(tree.range_query(&2, &1).is_empty());
    }

    #[test]
    fn range_query_outside_bounds_is_empty() {
        let mut tree = Tree::new(4).unwrap();
        for k in 1..=5 {
            tree.insert(k, k).unwrap();
        }
        assert!(tree.range_query(&100, &200).is_empty());
        assert!(tree.range_query(&-50, &0).is_empty());
    }

    #[test]
    fn update_does_not_change_structure() {
        let mut tree = Tree::new(4).unwrap();
        for k in 1..=7 {
            tree.insert(k, k).unwrap();
        }
        let before: Vec<_> = tree.get_all().into_iter().map(|(k, _)| k).collect();
        assert!(tree.update(&4, 999));
        let after: Vec<_> = tree.get_all().into_iter().map(|(k, _)| k).collect();
        assert_eq!(before, after);
        assert_eq!(tree.search(&4), Some(&999));
        assert!(!tree.update(&999, 0));
    }

    #[test]
    fn empty_tree_operations_are_well_defined() {
        let tree: Tree<i32, i32> = Tree::new(4).unwrap();
        assert_eq!(tree.search(&1), None);
        assert!(tree.get_all().is_empty());
        assert!(tree.range_query(&0, &10).is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn validate_structure_accepts_a_freshly_built_tree() {
        let mut tree = Tree::new(4).unwrap();
        for k in 1..=10 {
            tree.insert(k, k).unwrap();
        }
        assert!(tree.validate_structure().is_ok());
    }

    #[test]
    fn validate_structure_rejects_out_of_bounds_root() {
        let mut tree = Tree::new(4).unwrap();
        tree.insert(1, 1).unwrap();
        tree.root = 99;
        let err = tree.validate_structure().unwrap_err();
        assert!(matches!(err, ReedError::InvariantViolation { .. }));
    }

    #[test]
    fn validate_structure_rejects_out_of_bounds_child_link() {
        let mut tree = Tree::new(3).unwrap();
        for k in 1..=10 {
            tree.insert(k, k).unwrap();
        }
        let root_id = tree.root;
        if let Node::Internal(internal) = tree.node_mut(root_id) {
            internal.children[0] = 999;
        } else {
            panic!("expected the root to have split into an internal node by now");
        }
        let err = tree.validate_structure().unwrap_err();
        assert!(matches!(err, ReedError::InvariantViolation { .. }));
    }

    #[test]
    fn stress_insert_then_shuffled_delete_preserves_invariants() {
        // Small xorshift so this test doesn't depend on `rand` being a
        // dependency, while still exercising a pseudo-random workload.
        struct XorShift(u64);
        impl XorShift {
            fn next(&mut self) -> u64 {
                self.0 ^= self.0 << 13;
                self.0 ^= self.0 >> 7;
                self.0 ^= self.0 << 17;
                self.0
            }
        }
        let mut rng = XorShift(0x9E3779B97F4A7C15);

        let mut keys: Vec<i32> = (0..2000).collect();
        let mut tree = Tree::new(5).unwrap();
        for &k in &keys {
            tree.insert(k, k).unwrap();
        }
        assert_invariants(&tree);

        // Fisher-Yates shuffle using the xorshift source.
        for i in (1..keys.len()).rev() {
            let j = (rng.next() as usize) % (i + 1);
            keys.swap(i, j);
        }

        for &k in &keys {
            assert!(tree.delete(&k).unwrap());
        }
        assert_invariants(&tree);
        assert!(tree.get_all().is_empty());
        assert!(tree.node(tree.root).is_leaf());
    }
}
