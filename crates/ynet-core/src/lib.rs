//! Core circuit representation for ynet.
//!
//! This crate provides:
//! - Node identifiers with ground handling
//! - SI-suffixed value parsing
//! - Typed components and the ordered component table
//! - The per-frequency nodal admittance matrix and its stamping primitives

pub mod component;
pub mod error;
pub mod matrix;
pub mod node;
pub mod table;
pub mod units;

pub use component::{Component, ComponentKind, ComponentValue};
pub use error::{Error, Result};
pub use matrix::{C64, NodeAdmittanceMatrix};
pub use node::NodeId;
pub use table::ComponentTable;
