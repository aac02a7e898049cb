// Copyright 2025 the reedkv authors. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Reference oracle for cross-checking `Tree` against a dead-simple
//! unordered linear-scan store. Test-only: no caller should reach for
//! this over `Tree` for anything but differential testing.

pub struct BruteForceDb<K, V> {
    data: Vec<(K, V)>,
}

impl<K, V> BruteForceDb<K, V>
where
    K: Clone + PartialOrd + PartialEq,
    V: Clone,
{
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn search(&self, key: &K) -> Option<&V> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: K, value: V) {
        match self.data.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.data.push((key, value)),
        }
    }

    pub fn delete(&mut self, key: &K) -> bool {
        let before = self.data.len();
        self.data.retain(|(k, _)| k != key);
        self.data.len() != before
    }

    pub fn get_all(&self) -> Vec<(K, V)> {
        let mut all = self.data.clone();
        all.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        all
    }

    pub fn range_query(&self, lo: &K, hi: &K) -> Vec<(K, V)> {
        self.get_all()
            .into_iter()
            .filter(|(k, _)| k >= lo && k <= hi)
            .collect()
    }
}

impl<K, V> Default for BruteForceDb<K, V>
where
    K: Clone + PartialOrd,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
