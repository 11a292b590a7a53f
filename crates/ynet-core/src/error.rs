//! Error types for core circuit structures.

use thiserror::Error;

/// Errors raised while assembling components and matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A component was given the wrong number of node references.
    #[error("component {name} expects {expected} nodes but {actual} were given")]
    NodeCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A node index lies outside the matrix.
    #[error("node {node} is outside the matrix (order {order})")]
    NodeOutOfRange { node: u32, order: usize },

    /// A matrix supplied as an admittance matrix was not square.
    #[error("admittance matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// An identifier was empty.
    #[error("component identifier is empty")]
    EmptyIdentifier,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
