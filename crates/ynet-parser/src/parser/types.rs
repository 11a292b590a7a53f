//! Public types for the netlist parser.

use ynet_core::ComponentTable;
use ynet_devices::ModelTable;

/// AC sweep type parsed from netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcSweepType {
    /// Linear frequency spacing.
    Lin,
    /// Logarithmic spacing per decade.
    Dec,
    /// Logarithmic spacing per octave.
    Oct,
}

/// A `.AC type npoints fstart fstop` line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcSweep {
    pub sweep_type: AcSweepType,
    /// Total points for `Lin`, points per decade/octave otherwise.
    pub num_points: usize,
    pub fstart: f64,
    pub fstop: f64,
}

/// Result of parsing a netlist.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Components in definition order.
    pub table: ComponentTable,
    /// Small-signal models from `.MODEL` lines.
    pub models: ModelTable,
    /// The last `.AC` line, if any.
    pub ac: Option<AcSweep>,
}
