// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node storage backing the prefix tree.
//!
//! Records live in a [`Slab`], which keeps a node's key stable for as long as
//! the node is stored and hands vacated keys out again. Every entry is stamped
//! with a generation drawn from a counter that only ever grows, so a handle
//! kept across a removal resolves to `None` instead of aliasing whichever node
//! was stored under the same key later.

use std::ops::{Index, IndexMut};

use slab::Slab;

use super::node::NodeRecord;

/// Stable handle to a node stored in a [`PrefixTree`](super::PrefixTree).
///
/// Handles are cheap to copy and remain meaningful across mutations: once the
/// node they point at has been detached, lookups through the handle fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    key: usize,
    generation: u64,
}

impl NodeId {
    /// Slab key the node is stored under.
    pub fn index(&self) -> usize {
        self.key
    }

    /// Generation the node was stamped with when it was stored.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    generation: u64,
    record: NodeRecord<T>,
}

/// Generational storage for node records.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    entries: Slab<Entry<T>>,
    next_generation: u64,
}

impl<T> NodeArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Slab::new(),
            next_generation: 0,
        }
    }

    /// Stores a record, reusing a vacated key when one is available.
    pub(crate) fn insert(&mut self, record: NodeRecord<T>) -> NodeId {
        let generation = self.next_generation;
        self.next_generation += 1;
        let key = self.entries.insert(Entry { generation, record });
        NodeId { key, generation }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&NodeRecord<T>> {
        self.entries
            .get(id.key)
            .filter(|entry| entry.generation == id.generation)
            .map(|entry| &entry.record)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord<T>> {
        self.entries
            .get_mut(id.key)
            .filter(|entry| entry.generation == id.generation)
            .map(|entry| &mut entry.record)
    }

    /// Takes the record out of storage and invalidates every handle to it.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<NodeRecord<T>> {
        self.get(id)?;
        Some(self.entries.remove(id.key).record)
    }

    /// Number of records currently stored.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = NodeRecord<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(record) => record,
            None => panic!("node handle {id:?} does not refer to a live node"),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(record) => record,
            None => panic!("node handle {id:?} does not refer to a live node"),
        }
    }
}
