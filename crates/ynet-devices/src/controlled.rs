//! Controlled source device models: VCCS (G).

use num_complex::Complex;
use ynet_core::{NodeAdmittanceMatrix, NodeId};

use crate::error::Result;
use crate::stamp::Stamp;

/// Voltage-controlled current source.
///
/// I(out+) = gm * V(ctrl+, ctrl-), and the negative at out-. Needs no branch
/// variable.
#[derive(Debug, Clone)]
pub struct Vccs {
    pub name: String,
    pub out_pos: NodeId,
    pub out_neg: NodeId,
    pub ctrl_pos: NodeId,
    pub ctrl_neg: NodeId,
    pub gm: f64,
}

impl Vccs {
    pub fn new(
        name: impl Into<String>,
        out_pos: NodeId,
        out_neg: NodeId,
        ctrl_pos: NodeId,
        ctrl_neg: NodeId,
        gm: f64,
    ) -> Self {
        Self {
            name: name.into(),
            out_pos,
            out_neg,
            ctrl_pos,
            ctrl_neg,
            gm,
        }
    }
}

impl Stamp for Vccs {
    fn stamp(&self, y: &mut NodeAdmittanceMatrix) -> Result<()> {
        // (out+, ctrl+) += gm, (out+, ctrl-) -= gm,
        // (out-, ctrl+) -= gm, (out-, ctrl-) += gm
        y.stamp_transconductance(
            self.out_pos,
            self.out_neg,
            self.ctrl_pos,
            self.ctrl_neg,
            Complex::new(self.gm, 0.0),
        )?;
        Ok(())
    }
}
