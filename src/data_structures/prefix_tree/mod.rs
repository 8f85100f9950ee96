// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lanai Prefix Tree Implementation
//!
//! A trie keyed by sequences of characters that stores an arbitrary payload
//! at each distinct path. Characters are compared as opaque code points.
//!
//! # Example
//!
//! ```
//! use lanai_trie_lib::data_structures::prefix_tree::PrefixTree;
//!
//! let mut tree = PrefixTree::new();
//! tree.add_str("abc", vec!["first"]);
//!
//! let (node, matched) = tree.find_str("abc");
//! assert!(matched);
//! assert_eq!(node.data(), Some(&["first"][..]));
//! assert_eq!(node.depth(), 3);
//! ```
//!
//! # Removal
//!
//! [`PrefixTree::remove`] walks from the removed node's parent up to the root
//! and, at every ancestor with more than one child, detaches the child that
//! lies on the removed path. The walk does not stop after the first
//! detachment, so a removal can take siblings of the removed path with it
//! further up. [`PrefixTree::remove_pruned`] is the conventional "delete key
//! and prune empty ancestors" operation.

mod arena;
mod node;

use tracing::{debug, trace};

pub use arena::NodeId;
pub use node::{Node, NodeMut};

use arena::NodeArena;
use node::NodeRecord;

/// Character-keyed prefix tree with a payload of `T` values per path.
///
/// Key features:
/// * Lazily created intermediate nodes without payload
/// * Lookup of a single node or of every payload along a path
/// * Stable [`NodeId`] handles that stop resolving once their node is detached
#[derive(Debug, Clone)]
pub struct PrefixTree<T> {
    /// Storage for every live node
    nodes: NodeArena<T>,

    /// Sentinel root, never released
    root: NodeId,
}

impl<T> PrefixTree<T> {
    /// Creates an empty tree holding only a payload-less root at depth 0.
    pub fn new() -> Self {
        let mut nodes = NodeArena::new();
        let root = nodes.insert(NodeRecord::root());
        Self { nodes, root }
    }

    /// Returns the root node.
    pub fn root(&self) -> Node<'_, T> {
        self.view(self.root)
    }

    /// Resolves a handle, returning `None` if its node has been detached.
    pub fn node(&self, id: NodeId) -> Option<Node<'_, T>> {
        self.nodes
            .get(id)
            .map(|record| Node::new(self, id, record))
    }

    /// Resolves a handle for mutation.
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, T>> {
        self.nodes.get(id)?;
        Some(NodeMut::new(self, id))
    }

    /// Inserts `payload` at `path`, creating intermediate nodes as needed.
    ///
    /// Existing nodes along the way keep their payload. The terminal node's
    /// payload is overwritten; for an empty path that node is the root.
    ///
    /// # Returns
    ///
    /// The terminal node.
    pub fn add(&mut self, path: &[char], payload: Vec<T>) -> Node<'_, T> {
        let mut current = self.root;
        for &code in path {
            current = match self.nodes[current].children.get(&code).copied() {
                Some(child) => child,
                None => self.new_child(current, code, None),
            };
        }

        self.nodes[current].payload = Some(payload);
        trace!(depth = path.len(), "payload attached");
        self.view(current)
    }

    /// Looks up the node at `path`.
    ///
    /// # Returns
    ///
    /// * `(node, true)` - The node reached after consuming the whole path.
    /// * `(root, false)` - The path is empty, the tree has no nodes below the
    ///   root, or some character along the path is missing.
    pub fn find(&self, path: &[char]) -> (Node<'_, T>, bool) {
        let (id, matched) = self.find_descendant(self.root, path);
        (self.view(id), matched)
    }

    /// Collects the payload of every node visited while walking `path`.
    ///
    /// Payloads are returned in root-to-leaf order, one entry per consumed
    /// character, with `None` for nodes that were never inserted directly.
    /// On a mismatch the entries gathered before the missing character are
    /// returned together with `false`. An empty path or a root without
    /// children yields an empty list and `false`.
    pub fn find_all_data(&self, path: &[char]) -> (Vec<Option<&[T]>>, bool) {
        let mut data = Vec::new();
        if path.is_empty() || self.nodes[self.root].children.is_empty() {
            return (data, false);
        }

        let mut current = self.root;
        for code in path {
            let Some(&child) = self.nodes[current].children.get(code) else {
                return (data, false);
            };
            data.push(self.nodes[child].payload.as_deref());
            current = child;
        }
        (data, true)
    }

    /// Removes the node at `path` using the sibling-count rule.
    ///
    /// Starting at the node's parent and moving towards the root, every
    /// ancestor with more than one child loses the child keyed by the path
    /// character at its own depth. Ancestors with a single child are passed
    /// over, so a path whose every ancestor has one child stays in place.
    /// Paths that do not match are ignored.
    pub fn remove(&mut self, path: &[char]) {
        let (target, matched) = self.find_descendant(self.root, path);
        if !matched {
            return;
        }

        let mut distance = 0;
        let mut ancestor = self.nodes[target].parent;
        while let Some(current) = ancestor {
            distance += 1;
            if self.nodes[current].children.len() > 1 {
                let code = path
                    .len()
                    .checked_sub(distance)
                    .and_then(|position| path.get(position));
                if let Some(&code) = code {
                    debug!(depth = self.nodes[current].depth, %code, "detaching branch");
                    self.remove_child(current, code);
                }
            }
            ancestor = self.nodes[current].parent;
        }
    }

    /// Removes the payload at `path` and prunes the branches left empty.
    ///
    /// The node itself is detached when it has no children, and so is every
    /// ancestor that ends up with neither payload nor children. The root is
    /// never detached; an empty path only clears the root's payload.
    ///
    /// # Returns
    ///
    /// `true` if a payload was removed, `false` if nothing was stored at `path`.
    pub fn remove_pruned(&mut self, path: &[char]) -> bool {
        let Some(target) = self.locate(path) else {
            return false;
        };
        if self.nodes[target].payload.take().is_none() {
            return false;
        }

        let mut current = target;
        while let Some(parent) = self.nodes[current].parent {
            let record = &self.nodes[current];
            if record.payload.is_some() || !record.children.is_empty() {
                break;
            }
            let code = record.code;
            self.remove_child(parent, code);
            current = parent;
        }
        true
    }

    /// Detaches the child of `parent` keyed by `code` along with its subtree.
    ///
    /// # Returns
    ///
    /// `true` if a child was detached; `false` when `parent` is stale or has
    /// no such child.
    pub fn remove_child(&mut self, parent: NodeId, code: char) -> bool {
        let Some(record) = self.nodes.get_mut(parent) else {
            return false;
        };
        let removed = record.children.remove(&code);
        match removed {
            Some(child) => {
                self.release_subtree(child);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if a payload is stored at exactly `path`.
    pub fn contains(&self, path: &[char]) -> bool {
        self.locate(path)
            .is_some_and(|id| self.nodes[id].payload.is_some())
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing has been inserted, or everything was removed.
    pub fn is_empty(&self) -> bool {
        let root = &self.nodes[self.root];
        root.children.is_empty() && root.payload.is_none()
    }

    /// Drops every node below the root and clears the root's payload.
    pub fn clear(&mut self) {
        let root = &mut self.nodes[self.root];
        root.payload = None;
        let children: Vec<NodeId> = root.children.drain().map(|(_, id)| id).collect();
        for child in children {
            self.release_subtree(child);
        }
    }

    /// Same as [`add`](Self::add) with the path taken from a string's characters.
    pub fn add_str(&mut self, path: &str, payload: Vec<T>) -> Node<'_, T> {
        let path: Vec<char> = path.chars().collect();
        self.add(&path, payload)
    }

    /// Same as [`find`](Self::find) with the path taken from a string's characters.
    pub fn find_str(&self, path: &str) -> (Node<'_, T>, bool) {
        let path: Vec<char> = path.chars().collect();
        self.find(&path)
    }

    /// Same as [`find_all_data`](Self::find_all_data) with the path taken from a string's characters.
    pub fn find_all_data_str(&self, path: &str) -> (Vec<Option<&[T]>>, bool) {
        let path: Vec<char> = path.chars().collect();
        self.find_all_data(&path)
    }

    /// Same as [`remove`](Self::remove) with the path taken from a string's characters.
    pub fn remove_str(&mut self, path: &str) {
        let path: Vec<char> = path.chars().collect();
        self.remove(&path)
    }

    /// Walks `path` below `start`.
    ///
    /// An empty path or a childless `start` returns `(start, false)` without
    /// walking. A missing character also returns the original `start`, not the
    /// deepest node reached.
    fn find_descendant(&self, start: NodeId, path: &[char]) -> (NodeId, bool) {
        if path.is_empty() || self.nodes[start].children.is_empty() {
            return (start, false);
        }

        let mut current = start;
        for code in path {
            match self.nodes[current].children.get(code) {
                Some(&child) => current = child,
                None => return (start, false),
            }
        }
        (current, true)
    }

    /// Plain walk from the root; the empty path resolves to the root itself.
    fn locate(&self, path: &[char]) -> Option<NodeId> {
        path.iter().try_fold(self.root, |current, code| {
            self.nodes[current].children.get(code).copied()
        })
    }

    /// Allocates a child below `parent` and registers it under `code`.
    ///
    /// A child already registered under `code` is replaced and its subtree dropped.
    fn new_child(&mut self, parent: NodeId, code: char, payload: Option<Vec<T>>) -> NodeId {
        let depth = self.nodes[parent].depth;
        let child = self
            .nodes
            .insert(NodeRecord::child_of(parent, depth, code, payload));
        trace!(depth = depth + 1, %code, "node created");

        if let Some(replaced) = self.nodes[parent].children.insert(code, child) {
            self.release_subtree(replaced);
        }
        child
    }

    /// Releases `top` and everything below it.
    fn release_subtree(&mut self, top: NodeId) {
        let mut pending = vec![top];
        while let Some(id) = pending.pop() {
            if let Some(record) = self.nodes.release(id) {
                pending.extend(record.children.into_values());
            }
        }
    }

    fn view(&self, id: NodeId) -> Node<'_, T> {
        Node::new(self, id, &self.nodes[id])
    }
}

impl<T> Default for PrefixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
