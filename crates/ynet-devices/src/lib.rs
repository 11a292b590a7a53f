//! Device models and admittance stamps for ynet.
//!
//! This crate provides small-signal stamps for:
//! - Passive elements: R, L, C
//! - Voltage-controlled current sources (G)
//! - Bipolar transistors (Q) via a hybrid-π model table

pub mod bjt;
pub mod controlled;
pub mod error;
pub mod model;
pub mod passive;
pub mod stamp;

pub use bjt::Bjt;
pub use controlled::Vccs;
pub use error::{Error, Result};
pub use model::{HybridPiModel, ModelTable};
pub use passive::{Capacitor, Inductor, Resistor};
pub use stamp::Stamp;
