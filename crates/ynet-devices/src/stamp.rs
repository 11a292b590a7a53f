//! Stamping trait for admittance contributions.

use ynet_core::NodeAdmittanceMatrix;

use crate::error::Result;

/// A device that can add its small-signal admittance to a nodal matrix.
///
/// Reactive devices read the angular frequency from the matrix itself.
pub trait Stamp {
    /// Add this device's contribution to `y`.
    fn stamp(&self, y: &mut NodeAdmittanceMatrix) -> Result<()>;
}
