//! Data structures for Lanai Trie.
//!
//! This module contains the in-memory structures the rest of the crate is
//! built around. All implementations adhere to the project requirements:
//! - No unsafe code
//! - Single-threaded, synchronous operations; callers supply their own locking
//! - Handles that cannot outlive the nodes they refer to

pub mod prefix_tree;

// Re-export common data structures
pub use prefix_tree::{Node, NodeId, NodeMut, PrefixTree};
