// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node records and node views for the prefix tree.
//!
//! Records are the raw arena entries. Callers never see them directly; they
//! get a [`Node`] view that borrows the whole tree, which keeps the view valid
//! exactly as long as no mutation can restructure the tree underneath it.

use std::fmt;

use fnv::FnvHashMap;

use super::arena::NodeId;
use super::PrefixTree;

/// A node in the prefix tree as stored in the arena.
///
/// Each record represents one character position along one or more inserted
/// paths. The parent link is a plain handle and never owns the parent.
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord<T> {
    /// Character on the edge leading into this node (`'\0'` for the root)
    pub(crate) code: char,

    /// Distance from the root
    pub(crate) depth: usize,

    /// Map of characters to child nodes
    pub(crate) children: FnvHashMap<char, NodeId>,

    /// Owning node, `None` for the root
    pub(crate) parent: Option<NodeId>,

    /// Values attached by an insertion that ended exactly here
    pub(crate) payload: Option<Vec<T>>,
}

impl<T> NodeRecord<T> {
    /// Creates the sentinel root record.
    pub(crate) fn root() -> Self {
        Self {
            code: '\0',
            depth: 0,
            children: FnvHashMap::default(),
            parent: None,
            payload: None,
        }
    }

    /// Creates a childless record one level below `parent`.
    pub(crate) fn child_of(
        parent: NodeId,
        parent_depth: usize,
        code: char,
        payload: Option<Vec<T>>,
    ) -> Self {
        Self {
            code,
            depth: parent_depth + 1,
            children: FnvHashMap::default(),
            parent: Some(parent),
            payload,
        }
    }
}

/// Read-only view of a node, borrowed from its [`PrefixTree`].
pub struct Node<'a, T> {
    tree: &'a PrefixTree<T>,
    id: NodeId,
    record: &'a NodeRecord<T>,
}

impl<'a, T> Node<'a, T> {
    pub(crate) fn new(tree: &'a PrefixTree<T>, id: NodeId, record: &'a NodeRecord<T>) -> Self {
        Self { tree, id, record }
    }

    /// Handle that can be used to look this node up again after the borrow ends.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the parent node, or `None` for the root.
    pub fn father(&self) -> Option<Node<'a, T>> {
        self.record.parent.and_then(|parent| self.tree.node(parent))
    }

    /// Returns the payload attached to this exact node, if any.
    pub fn data(&self) -> Option<&'a [T]> {
        self.record.payload.as_deref()
    }

    /// Returns the children of this node keyed by character.
    pub fn children(&self) -> &'a FnvHashMap<char, NodeId> {
        &self.record.children
    }

    /// Returns the child reached through `code`, if present.
    pub fn child(&self, code: char) -> Option<Node<'a, T>> {
        self.record
            .children
            .get(&code)
            .and_then(|&child| self.tree.node(child))
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.record.children.len()
    }

    /// Returns the character this node represents.
    ///
    /// Meaningless for the root, which reports `'\0'`.
    pub fn code(&self) -> char {
        self.record.code
    }

    /// Returns the distance from the root.
    pub fn depth(&self) -> usize {
        self.record.depth
    }

    /// Whether this is the tree's root sentinel.
    pub fn is_root(&self) -> bool {
        self.record.parent.is_none()
    }
}

impl<T> Clone for Node<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Node<'_, T> {}

impl<T> PartialEq for Node<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<T> Eq for Node<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<char> = self.record.children.keys().copied().collect();
        codes.sort_unstable();
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("code", &self.record.code)
            .field("depth", &self.record.depth)
            .field("children", &codes)
            .field("payload", &self.record.payload)
            .finish()
    }
}

/// Mutable handle to a node, borrowed exclusively from its [`PrefixTree`].
pub struct NodeMut<'a, T> {
    tree: &'a mut PrefixTree<T>,
    id: NodeId,
}

impl<'a, T> NodeMut<'a, T> {
    pub(crate) fn new(tree: &'a mut PrefixTree<T>, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// Handle of the node this borrows.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Detaches the child keyed by `code` together with its whole subtree.
    ///
    /// Returns `false` and leaves the tree untouched when no such child exists.
    pub fn remove_child(&mut self, code: char) -> bool {
        self.tree.remove_child(self.id, code)
    }

    /// Downgrades to a read-only view of the same node.
    pub fn as_node(&self) -> Node<'_, T> {
        let tree: &PrefixTree<T> = &*self.tree;
        Node::new(tree, self.id, &tree.nodes[self.id])
    }
}
