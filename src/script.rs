//! Operation scripts for the prefix tree.
//!
//! A script is a sequence of lines, one operation per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! add abc first second
//! find abc
//! find-all abc
//! remove abc
//! count
//! ```
//!
//! Paths are the first whitespace-separated token after the command; the
//! token `""` stands for the empty path. Remaining tokens of an `add` line
//! become the payload.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{RemovalMode, TreeConfig};
use crate::data_structures::PrefixTree;
use crate::error::script::ScriptError;

/// Token that spells the empty path.
const EMPTY_PATH: &str = "\"\"";

/// A single tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert `values` at `path`
    Add {
        /// Target path
        path: String,
        /// Payload to attach
        values: Vec<String>,
    },
    /// Look up the node at `path`
    Find {
        /// Target path
        path: String,
    },
    /// Collect every payload along `path`
    FindAll {
        /// Target path
        path: String,
    },
    /// Remove the node at `path`
    Remove {
        /// Target path
        path: String,
    },
    /// Report the number of live nodes
    Count,
}

impl Operation {
    /// Path the operation targets, if it takes one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Add { path, .. }
            | Self::Find { path }
            | Self::FindAll { path }
            | Self::Remove { path } => Some(path.as_str()),
            Self::Count => None,
        }
    }
}

impl FromStr for Operation {
    type Err = ScriptError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().ok_or(ScriptError::EmptyLine)?;

        if command == "count" {
            return match tokens.next() {
                Some(argument) => Err(ScriptError::UnexpectedArgument {
                    command: command.to_string(),
                    argument: argument.to_string(),
                }),
                None => Ok(Self::Count),
            };
        }

        if !matches!(command, "add" | "find" | "find-all" | "remove") {
            return Err(ScriptError::UnknownCommand(command.to_string()));
        }

        let path = match tokens.next() {
            Some(EMPTY_PATH) => String::new(),
            Some(token) => token.to_string(),
            None => return Err(ScriptError::MissingPath(command.to_string())),
        };

        if command == "add" {
            return Ok(Self::Add {
                path,
                values: tokens.map(str::to_string).collect(),
            });
        }

        if let Some(argument) = tokens.next() {
            return Err(ScriptError::UnexpectedArgument {
                command: command.to_string(),
                argument: argument.to_string(),
            });
        }

        Ok(match command {
            "find" => Self::Find { path },
            "find-all" => Self::FindAll { path },
            _ => Self::Remove { path },
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn path_token(path: &str) -> &str {
            if path.is_empty() {
                EMPTY_PATH
            } else {
                path
            }
        }

        match self {
            Self::Add { path, values } => {
                write!(f, "add {}", path_token(path))?;
                for value in values {
                    write!(f, " {value}")?;
                }
                Ok(())
            }
            Self::Find { path } => write!(f, "find {}", path_token(path)),
            Self::FindAll { path } => write!(f, "find-all {}", path_token(path)),
            Self::Remove { path } => write!(f, "remove {}", path_token(path)),
            Self::Count => f.write_str("count"),
        }
    }
}

/// Result of applying one operation, serialisable as a JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Outcome {
    /// A payload was attached
    Added {
        /// Target path
        path: String,
        /// Depth of the terminal node
        depth: usize,
    },
    /// Result of a single-node lookup
    Found {
        /// Target path
        path: String,
        /// Whether the whole path matched
        matched: bool,
        /// Depth of the returned node
        depth: usize,
        /// Payload of the returned node
        data: Option<Vec<String>>,
    },
    /// Result of a path-collecting lookup
    FoundAll {
        /// Target path
        path: String,
        /// Whether the whole path matched
        matched: bool,
        /// Payload of every visited node, root to leaf
        data: Vec<Option<Vec<String>>>,
    },
    /// A removal was attempted
    Removed {
        /// Target path
        path: String,
        /// Rule that was applied
        mode: RemovalMode,
        /// Whether the path stopped resolving to a stored payload
        removed: bool,
    },
    /// Number of live nodes
    Count {
        /// Live nodes, the root included
        nodes: usize,
    },
}

/// Applies operations to a tree of string payloads.
#[derive(Debug, Default)]
pub struct ScriptRunner {
    tree: PrefixTree<String>,
    config: TreeConfig,
}

impl ScriptRunner {
    /// Creates a runner over an empty tree.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            tree: PrefixTree::new(),
            config,
        }
    }

    /// The tree operations have been applied to.
    pub fn tree(&self) -> &PrefixTree<String> {
        &self.tree
    }

    /// Applies a single operation.
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` - What the operation observed or changed.
    /// * `Err(ScriptError)` - If the path is longer than the configured maximum.
    pub fn apply(&mut self, operation: Operation) -> Result<Outcome, ScriptError> {
        if self.config.echo_operations {
            info!(%operation, "applying operation");
        } else {
            debug!(%operation, "applying operation");
        }

        if let Some(path) = operation.path() {
            if path.chars().count() > self.config.max_path_length {
                return Err(ScriptError::PathTooLong {
                    path: path.to_string(),
                    max_length: self.config.max_path_length,
                });
            }
        }

        let outcome = match operation {
            Operation::Add { path, values } => {
                let depth = self.tree.add_str(&path, values).depth();
                Outcome::Added { path, depth }
            }
            Operation::Find { path } => {
                let (node, matched) = self.tree.find_str(&path);
                Outcome::Found {
                    matched,
                    depth: node.depth(),
                    data: node.data().map(<[String]>::to_vec),
                    path,
                }
            }
            Operation::FindAll { path } => {
                let (data, matched) = self.tree.find_all_data_str(&path);
                Outcome::FoundAll {
                    matched,
                    data: data
                        .into_iter()
                        .map(|payload| payload.map(<[String]>::to_vec))
                        .collect(),
                    path,
                }
            }
            Operation::Remove { path } => {
                let chars: Vec<char> = path.chars().collect();
                let mode = self.config.removal_mode;
                let removed = match mode {
                    RemovalMode::Literal => {
                        let before = self.tree.contains(&chars);
                        self.tree.remove(&chars);
                        before && !self.tree.contains(&chars)
                    }
                    RemovalMode::Pruned => self.tree.remove_pruned(&chars),
                };
                Outcome::Removed {
                    path,
                    mode,
                    removed,
                }
            }
            Operation::Count => Outcome::Count {
                nodes: self.tree.node_count(),
            },
        };

        Ok(outcome)
    }

    /// Parses and applies every operation in `script`.
    ///
    /// Blank lines and lines starting with `#` are skipped. Parsing happens
    /// before anything is applied, so a malformed script leaves the tree
    /// untouched.
    pub fn run(&mut self, script: &str) -> Result<Vec<Outcome>, ScriptError> {
        let mut outcomes = Vec::new();
        self.run_with(script, |outcome| {
            outcomes.push(outcome);
            Ok::<_, ScriptError>(())
        })?;
        Ok(outcomes)
    }

    /// Parses `script`, then applies its operations one at a time, handing
    /// each outcome to `sink` as soon as it is produced.
    ///
    /// Like [`run`](Self::run), nothing is applied if any line fails to
    /// parse. An error from `sink` stops the script; operations already
    /// applied stay applied.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of operations applied.
    /// * `Err(E)` - The first parse, apply or sink failure.
    pub fn run_with<E, F>(&mut self, script: &str, mut sink: F) -> Result<usize, E>
    where
        E: From<ScriptError>,
        F: FnMut(Outcome) -> Result<(), E>,
    {
        let operations = parse_script(script)?;
        debug!(operations = operations.len(), "script parsed");

        let total = operations.len();
        for operation in operations {
            sink(self.apply(operation)?)?;
        }
        Ok(total)
    }
}

/// Parses a whole script, annotating failures with their line number.
pub fn parse_script(script: &str) -> Result<Vec<Operation>, ScriptError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| line.parse().map_err(|e: ScriptError| e.at_line(index + 1)))
        .collect()
}
