//! Crate-level error types.

use std::fmt;

/// Errors produced by the shatter crate.
#[derive(Debug)]
pub enum ShatterError {
    /// A shape could not be split into fragments (malformed model data).
    Decomposition(String),
    /// An imported model container could not be read.
    ModelLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ShatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decomposition(msg) => {
                write!(f, "decomposition error: {msg}")
            }
            Self::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ShatterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShatterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
