//! Tree configuration module.
//!
//! This module defines how operation scripts drive the prefix tree,
//! including which removal rule `remove` commands use and path limits.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Removal rule applied by `remove` commands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemovalMode {
    /// Sibling-count rule of [`PrefixTree::remove`](crate::data_structures::PrefixTree::remove)
    #[default]
    Literal,
    /// Payload removal with pruning of empty ancestors
    Pruned,
}

/// Tree configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Removal rule used for `remove` commands
    pub removal_mode: RemovalMode,

    /// Longest path, in characters, a script may add or query
    pub max_path_length: usize,

    /// Whether to log every operation before applying it
    pub echo_operations: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            removal_mode: RemovalMode::default(),
            max_path_length: 1024,
            echo_operations: false,
        }
    }
}

impl Validate for TreeConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_path_length == 0 {
            return Err(ConfigError::ValidationError(
                "max_path_length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
