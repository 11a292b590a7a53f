//! Netlist parser for ynet.
//!
//! The netlist holds one component per line:
//!
//! ```text
//! * common-emitter stage
//! R1 1 2 1k
//! C1 2 0 10p
//! Q1 2 3 0 BFR92
//! G1 3 0 2 0 10m
//! .MODEL BFR92 NPN(gm=0.04 rpi=2.5k cpi=1p cmu=0.1p)
//! .AC DEC 10 1MEG 1G
//! .END
//! ```
//!
//! The number of node tokens follows from the identifier prefix (R/L/C: 2,
//! Q: 3, G: 4); the trailing token is a number when it parses as one and a
//! model reference otherwise.

pub mod error;
pub mod parser;

pub use error::{Error, Result};
pub use parser::types::{AcSweep, AcSweepType, ParseResult};
pub use parser::{parse, parse_file};
