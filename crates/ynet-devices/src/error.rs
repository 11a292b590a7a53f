//! Error types for device stamping.

use thiserror::Error;

/// Errors raised while evaluating or stamping a device.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A transistor references a model that is not in the model table.
    #[error("{component}: model '{model}' is not defined")]
    MissingModel { component: String, model: String },

    /// A component carries a value of the wrong shape.
    #[error("{component}: {reason}")]
    InvalidValue { component: String, reason: String },

    /// A two-terminal element has zero impedance, so its admittance is unbounded.
    #[error("{component}: zero impedance at omega = {omega} rad/s")]
    ZeroImpedance { component: String, omega: f64 },

    /// A model definition is incomplete or inconsistent.
    #[error("model {model}: {reason}")]
    InvalidModel { model: String, reason: String },

    /// Matrix indexing failure.
    #[error(transparent)]
    Core(#[from] ynet_core::Error),
}

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, Error>;
