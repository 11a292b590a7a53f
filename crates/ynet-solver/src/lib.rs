//! Admittance assembly, two-port reduction and frequency sweeps for ynet.
//!
//! The pipeline per frequency is:
//!
//! 1. [`NodeMatrixBuilder`] stamps every component into a fresh
//!    [`NodeAdmittanceMatrix`](ynet_core::NodeAdmittanceMatrix).
//! 2. [`TwoPortReducer`] eliminates every node but the two ports.
//! 3. [`ParameterConverter`] and [`GainImpedanceCalculator`] derive
//!    S-parameters, gains and terminated impedances.
//!
//! [`FrequencySweep`] runs step 1 over a list of frequencies and the returned
//! [`SweepResult`] applies steps 2–3 per frequency on demand.

pub mod assemble;
pub mod config;
pub mod convert;
pub mod error;
pub mod gain;
pub mod linear;
pub mod reduce;
pub mod sweep;

pub use assemble::NodeMatrixBuilder;
pub use config::{FrequencyUnit, SolverConfig, UnknownComponentPolicy};
pub use convert::{ParameterConverter, SParameterMatrix};
pub use error::{Error, Result};
pub use gain::GainImpedanceCalculator;
pub use reduce::{TwoPortNetwork, TwoPortReducer};
pub use sweep::{
    CancelToken, FrequencySweep, MAX_SWEEP_POINTS, ProgressFn, SweepPoint, SweepResult,
    ac_frequencies, linspace, logspace, magnitude, magnitude_db, phase, phase_deg,
};
