//! Lanai Trie Library
//!
//! This library contains a character-keyed prefix tree together with the
//! configuration, error handling and operation-script layers used by the
//! `lanai_trie` binary. The library can also be used on its own as a
//! dependency by other projects.
//!
//! # Architecture
//!
//! - [`data_structures::prefix_tree`] holds the tree itself
//! - [`script`] parses and applies line-oriented tree operations
//! - [`config`] loads and validates settings from files and the environment
//! - [`error`] defines the error types of the outer layers
//! - [`logging`] installs the global tracing subscriber

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;
pub mod script;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Lanai Trie.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
