//! Passive two-terminal devices: R, L, C.

use num_complex::Complex;
use ynet_core::{C64, NodeAdmittanceMatrix, NodeId};

use crate::error::{Error, Result};
use crate::stamp::Stamp;

// ────────────────────── Resistor (R element) ──────────────────────

/// Resistor with admittance `1/R`, independent of frequency.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub name: String,
    pub node_pos: NodeId,
    pub node_neg: NodeId,
    pub resistance: f64,
}

impl Resistor {
    pub fn new(name: impl Into<String>, node_pos: NodeId, node_neg: NodeId, resistance: f64) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            resistance,
        }
    }

    /// Admittance at angular frequency `omega`.
    pub fn admittance(&self, omega: f64) -> Result<C64> {
        if self.resistance == 0.0 {
            return Err(Error::ZeroImpedance {
                component: self.name.clone(),
                omega,
            });
        }
        Ok(Complex::new(1.0 / self.resistance, 0.0))
    }
}

impl Stamp for Resistor {
    fn stamp(&self, y: &mut NodeAdmittanceMatrix) -> Result<()> {
        let g = self.admittance(y.omega())?;
        y.stamp_admittance(self.node_pos, self.node_neg, g)?;
        Ok(())
    }
}

// ────────────────────── Inductor (L element) ──────────────────────

/// Inductor with admittance `1/(jωL)`.
#[derive(Debug, Clone)]
pub struct Inductor {
    pub name: String,
    pub node_pos: NodeId,
    pub node_neg: NodeId,
    pub inductance: f64,
}

impl Inductor {
    pub fn new(name: impl Into<String>, node_pos: NodeId, node_neg: NodeId, inductance: f64) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            inductance,
        }
    }

    /// Admittance at angular frequency `omega`.
    ///
    /// At DC (or for a zero inductance) the inductor is a short and has no
    /// finite admittance.
    pub fn admittance(&self, omega: f64) -> Result<C64> {
        let reactance = omega * self.inductance;
        if reactance == 0.0 {
            return Err(Error::ZeroImpedance {
                component: self.name.clone(),
                omega,
            });
        }
        Ok(Complex::new(0.0, -1.0 / reactance))
    }
}

impl Stamp for Inductor {
    fn stamp(&self, y: &mut NodeAdmittanceMatrix) -> Result<()> {
        let yl = self.admittance(y.omega())?;
        y.stamp_admittance(self.node_pos, self.node_neg, yl)?;
        Ok(())
    }
}

// ────────────────────── Capacitor (C element) ──────────────────────

/// Capacitor with admittance `jωC`.
#[derive(Debug, Clone)]
pub struct Capacitor {
    pub name: String,
    pub node_pos: NodeId,
    pub node_neg: NodeId,
    pub capacitance: f64,
}

impl Capacitor {
    pub fn new(name: impl Into<String>, node_pos: NodeId, node_neg: NodeId, capacitance: f64) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            capacitance,
        }
    }

    /// Admittance at angular frequency `omega`.
    pub fn admittance(&self, omega: f64) -> C64 {
        Complex::new(0.0, omega * self.capacitance)
    }
}

impl Stamp for Capacitor {
    fn stamp(&self, y: &mut NodeAdmittanceMatrix) -> Result<()> {
        y.stamp_admittance(self.node_pos, self.node_neg, self.admittance(y.omega()))?;
        Ok(())
    }
}
