//! Error types for assembly, reduction and sweeps.

use thiserror::Error;

/// Errors raised by the solver.
#[derive(Debug, Error)]
pub enum Error {
    /// A pivot vanished while eliminating an internal node.
    #[error("singular pivot at node {node} during two-port reduction (f = {frequency})")]
    SingularPivot { node: u32, frequency: f64 },

    /// A conversion or gain formula hit a (near-)zero denominator.
    #[error("{operation}: singular denominator for ports ({n1}, {n2}) (f = {frequency})")]
    Singular {
        operation: &'static str,
        n1: u32,
        n2: u32,
        frequency: f64,
    },

    /// A port node is ground or outside the matrix.
    #[error("invalid port node {node} for matrix of order {order}")]
    InvalidPort { node: u32, order: usize },

    /// Both ports refer to the same node.
    #[error("port nodes must be distinct (both are {0})")]
    CoincidentPorts(u32),

    /// An explicit elimination order is not a permutation of the internal nodes.
    #[error("invalid elimination order: {0}")]
    EliminationOrder(String),

    /// A component prefix did not map to a known kind.
    #[error("component {0} has an unrecognized prefix")]
    Unclassified(String),

    /// A frequency was negative or not finite.
    #[error("invalid frequency {0}")]
    InvalidFrequency(f64),

    /// A `.AC` line asks for more points than a sweep may hold.
    #[error("sweep of {requested} points exceeds the limit of {limit}")]
    SweepTooLarge { requested: f64, limit: usize },

    /// The sweep was cancelled between frequencies.
    #[error("sweep cancelled after {completed} of {total} frequencies")]
    Cancelled { completed: usize, total: usize },

    /// Matrix/vector dimensions do not agree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// LU factorization found the system singular.
    #[error("singular matrix")]
    SingularMatrix,

    /// A device could not be evaluated at a frequency.
    #[error("f = {frequency}: {source}")]
    Device {
        frequency: f64,
        #[source]
        source: ynet_devices::Error,
    },

    /// A device could not be built from its component record.
    #[error(transparent)]
    Component(#[from] ynet_devices::Error),

    #[error(transparent)]
    Core(#[from] ynet_core::Error),
}

impl Error {
    /// Whether this is a numeric failure (singular pivot, matrix or formula).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Error::SingularPivot { .. } | Error::Singular { .. } | Error::SingularMatrix
        ) || matches!(
            self,
            Error::Device {
                source: ynet_devices::Error::ZeroImpedance { .. },
                ..
            }
        )
    }
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;
