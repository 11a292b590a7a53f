//! Bipolar transistor small-signal stamp.

use num_complex::Complex;
use ynet_core::{NodeAdmittanceMatrix, NodeId};

use crate::error::{Error, Result};
use crate::model::{HybridPiModel, ModelTable};
use crate::stamp::Stamp;

/// Bipolar transistor linearized around its operating point.
///
/// Stamp pattern (hybrid-π):
///
/// ```text
///   B ──┬── yπ = gπ + jωCπ ──┬── E
///       └── yμ = gμ + jωCμ ── C
///   C ──── yo = go + jωCce ── E
///   C ◄── gm·V(B,E) ── E
/// ```
#[derive(Debug, Clone)]
pub struct Bjt {
    pub name: String,
    pub base: NodeId,
    pub collector: NodeId,
    pub emitter: NodeId,
    pub model: HybridPiModel,
}

impl Bjt {
    pub fn new(
        name: impl Into<String>,
        base: NodeId,
        collector: NodeId,
        emitter: NodeId,
        model: HybridPiModel,
    ) -> Self {
        Self {
            name: name.into(),
            base,
            collector,
            emitter,
            model,
        }
    }

    /// Resolve `model_name` in `models` and build the device.
    pub fn from_table(
        name: impl Into<String>,
        base: NodeId,
        collector: NodeId,
        emitter: NodeId,
        model_name: &str,
        models: &ModelTable,
    ) -> Result<Self> {
        let name = name.into();
        let model = *models.get(model_name).ok_or_else(|| Error::MissingModel {
            component: name.clone(),
            model: model_name.to_string(),
        })?;
        Ok(Self::new(name, base, collector, emitter, model))
    }
}

impl Stamp for Bjt {
    fn stamp(&self, y: &mut NodeAdmittanceMatrix) -> Result<()> {
        let w = y.omega();
        let m = &self.model;
        let (b, c, e) = (self.base, self.collector, self.emitter);

        y.stamp_admittance(b, e, Complex::new(m.gpi, w * m.cpi))?;
        y.stamp_admittance(b, c, Complex::new(m.gmu, w * m.cmu))?;
        y.stamp_admittance(c, e, Complex::new(m.go, w * m.cce))?;
        y.stamp_transconductance(c, e, b, e, Complex::new(m.gm, 0.0))?;
        Ok(())
    }
}
