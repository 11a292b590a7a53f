//! Gain and terminated-impedance formulas.
//!
//! With the reduced two-port `[[y11, y12], [y21, y22]]`, a source of EMF `Vs`
//! and impedance `zs` driving port 1, and a load `zl` on port 2:
//!
//! ```text
//! V2/Vs = −y21·zl / ((1 + zs·y11)(1 + zl·y22) − zs·zl·y12·y21)
//! Zin   = (1 + zl·y22) / (y11·(1 + zl·y22) − zl·y12·y21)
//! Zout  = (1 + zs·y11) / (y22·(1 + zs·y11) − zs·y12·y21)
//! ```
//!
//! The impedance-scaled form keeps short-circuit terminations (`z = 0`) finite.

use num_complex::Complex;
use ynet_core::{C64, NodeAdmittanceMatrix, NodeId};

use crate::config::SolverConfig;
use crate::convert::{Site, check_denominator};
use crate::error::{Error, Result};
use crate::linear::solve_unit;
use crate::reduce::{TwoPortNetwork, TwoPortReducer, port_indices};

/// Derives voltage gain, network gain and terminated impedances.
#[derive(Debug, Clone, Copy)]
pub struct GainImpedanceCalculator {
    reducer: TwoPortReducer,
    singular_tolerance: f64,
}

impl Default for GainImpedanceCalculator {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl GainImpedanceCalculator {
    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            reducer: TwoPortReducer::from_config(config),
            singular_tolerance: config.singular_tolerance,
        }
    }

    /// Open-circuit voltage gain `V(n2)/V(n1)` for a unit current injected at
    /// `n1`, solved on the full matrix.
    pub fn voltage_gain(&self, y: &NodeAdmittanceMatrix, n1: NodeId, n2: NodeId) -> Result<C64> {
        let site = Site::new("voltage gain", n1, n2, y.frequency());
        let (p1, p2) = port_indices(y, n1, n2)?;
        let v = solve_unit(y.as_matrix(), p1).map_err(|e| match e {
            Error::SingularMatrix => site.singular(),
            other => other,
        })?;
        check_denominator(v[p1], 0.0, self.singular_tolerance, site)?;
        Ok(v[p2] / v[p1])
    }

    /// Complex transfer `V2/Vs` of the two-port terminated by `zs` and `zl`.
    pub fn network_transfer(
        &self,
        y: &NodeAdmittanceMatrix,
        n1: NodeId,
        n2: NodeId,
        zs: C64,
        zl: C64,
    ) -> Result<C64> {
        let tp = self.reducer.reduce(y, n1, n2)?;
        self.two_port_transfer(&tp, zs, zl)
    }

    /// Magnitude of the terminated network gain `|V2/Vs|`.
    pub fn network_gain(
        &self,
        y: &NodeAdmittanceMatrix,
        n1: NodeId,
        n2: NodeId,
        zs: C64,
        zl: C64,
    ) -> Result<f64> {
        Ok(self.network_transfer(y, n1, n2, zs, zl)?.norm())
    }

    /// Impedance looking into port 1 with port 2 terminated by `zl`.
    pub fn input_impedance(
        &self,
        y: &NodeAdmittanceMatrix,
        n1: NodeId,
        n2: NodeId,
        zl: C64,
    ) -> Result<C64> {
        let tp = self.reducer.reduce(y, n1, n2)?;
        self.two_port_input_impedance(&tp, zl)
    }

    /// Impedance looking into port 2 with port 1 terminated by `zs`.
    pub fn output_impedance(
        &self,
        y: &NodeAdmittanceMatrix,
        n1: NodeId,
        n2: NodeId,
        zs: C64,
    ) -> Result<C64> {
        let tp = self.reducer.reduce(y, n1, n2)?;
        self.two_port_output_impedance(&tp, zs)
    }

    pub fn two_port_transfer(&self, tp: &TwoPortNetwork, zs: C64, zl: C64) -> Result<C64> {
        let one = Complex::new(1.0, 0.0);
        let direct = (one + zs * tp.y11()) * (one + zl * tp.y22());
        let feedback = zs * zl * tp.y12() * tp.y21();
        let den = direct - feedback;
        check_denominator(
            den,
            direct.norm() + feedback.norm(),
            self.singular_tolerance,
            Site::of(tp, "network gain"),
        )?;
        Ok(-tp.y21() * zl / den)
    }

    pub fn two_port_input_impedance(&self, tp: &TwoPortNetwork, zl: C64) -> Result<C64> {
        terminated_impedance(
            tp.y11(),
            tp.y22(),
            tp.y12() * tp.y21(),
            zl,
            self.singular_tolerance,
            Site::of(tp, "input impedance"),
        )
    }

    pub fn two_port_output_impedance(&self, tp: &TwoPortNetwork, zs: C64) -> Result<C64> {
        terminated_impedance(
            tp.y22(),
            tp.y11(),
            tp.y12() * tp.y21(),
            zs,
            self.singular_tolerance,
            Site::of(tp, "output impedance"),
        )
    }
}

/// `(1 + z·y_far) / (y_near·(1 + z·y_far) − z·y12·y21)`, the same formula for
/// either port.
fn terminated_impedance(
    y_near: C64,
    y_far: C64,
    y12_y21: C64,
    z: C64,
    tolerance: f64,
    site: Site,
) -> Result<C64> {
    let loaded = Complex::new(1.0, 0.0) + z * y_far;
    let direct = y_near * loaded;
    let feedback = z * y12_y21;
    let den = direct - feedback;
    check_denominator(den, direct.norm() + feedback.norm(), tolerance, site)?;
    Ok(loaded / den)
}
