//! Error types for the tree and its harness.

use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while building, checking or driving a tree
#[derive(Error, Debug)]
pub enum TreeError {
    /// Minimum degree outside the range a B-tree can be built with
    #[error("Invalid minimum degree {degree} (allowed: {min}..={max})")]
    InvalidDegree { degree: usize, min: usize, max: usize },

    /// A structural invariant does not hold
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// A line of input could not be read as a key
    #[error("Cannot parse {input:?} as an integer: {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// Input ended before a required line was read
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    /// I/O error from the harness streams
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be used
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TreeError {
    /// Create an invariant violation error with a message
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}
