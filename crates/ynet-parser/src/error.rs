//! Error types for the netlist parser.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing a netlist.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed line. Fatal; carries the 1-based line number and raw text.
    #[error("line {line}: {message}: '{text}'")]
    ParseError {
        line: usize,
        text: String,
        message: String,
    },

    /// The netlist file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn at(line: usize, text: &str, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            text: text.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, Error>;
