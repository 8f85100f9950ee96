//! Operation script error module.
//!
//! This module defines the errors produced while parsing tree operation scripts.

use thiserror::Error;

/// Errors that can occur while parsing a script line into an operation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// The line holds no command at all.
    #[error("Empty operation")]
    EmptyLine,

    /// The command word is not one of the known operations.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The command requires a path argument that was not given.
    #[error("Missing path for command: {0}")]
    MissingPath(String),

    /// The command was given arguments it does not accept.
    #[error("Unexpected argument for command {command}: {argument}")]
    UnexpectedArgument {
        /// The command that was given too many arguments
        command: String,
        /// The first argument that was not expected
        argument: String,
    },

    /// The path exceeds the configured maximum length.
    #[error("Path '{path}' exceeds maximum length of {max_length}")]
    PathTooLong {
        /// The path that was too long
        path: String,
        /// The maximum allowed length in characters
        max_length: usize,
    },

    /// A parse failure annotated with its position in the script.
    #[error("Line {line}: {source}")]
    Line {
        /// One-based line number
        line: usize,
        /// The underlying parse failure
        #[source]
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    /// Attaches a one-based line number to this error.
    pub fn at_line(self, line: usize) -> Self {
        Self::Line {
            line,
            source: Box::new(self),
        }
    }
}
