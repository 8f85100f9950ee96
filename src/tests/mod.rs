//! Test modules for Lanai Trie.
//!
//! This module contains crate-level testing infrastructure, including:
//! - Unit tests for configuration and error handling
//! - Property-based tests for the prefix tree using proptest
//! - Parameterised script parsing tests using test-case
//! - Test fixtures and utilities

pub mod prefix_tree_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{chars, path_strategy, payload_strategy, LogCapture, TestFixture};
