//! Nodal admittance matrix.

use nalgebra::DMatrix;
use num_complex::Complex;
use num_traits::Zero;

use crate::error::{Error, Result};
use crate::node::NodeId;

/// Complex scalar used throughout ynet.
pub type C64 = Complex<f64>;

/// Complex nodal admittance matrix for a single analysis frequency.
///
/// Rows and columns correspond to nodes `1..=order`; ground has no row or
/// column, so every stamp touching ground silently drops that term.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAdmittanceMatrix {
    frequency: f64,
    omega: f64,
    data: DMatrix<C64>,
}

impl NodeAdmittanceMatrix {
    /// Create a zeroed matrix of the given order.
    ///
    /// `frequency` is the sweep value as supplied by the caller; `omega` is the
    /// angular frequency used by reactive stamps.
    pub fn new(order: usize, frequency: f64, omega: f64) -> Self {
        Self {
            frequency,
            omega,
            data: DMatrix::zeros(order, order),
        }
    }

    /// Wrap an existing square matrix.
    pub fn from_matrix(data: DMatrix<C64>, frequency: f64, omega: f64) -> Result<Self> {
        if data.nrows() != data.ncols() {
            return Err(Error::NotSquare {
                rows: data.nrows(),
                cols: data.ncols(),
            });
        }
        Ok(Self {
            frequency,
            omega,
            data,
        })
    }

    /// Number of non-ground nodes.
    pub fn order(&self) -> usize {
        self.data.nrows()
    }

    /// Frequency this matrix was built for, as supplied to the sweep.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Angular frequency used for the reactive stamps.
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// The underlying zero-based matrix.
    pub fn as_matrix(&self) -> &DMatrix<C64> {
        &self.data
    }

    /// Consume into the underlying zero-based matrix.
    pub fn into_matrix(self) -> DMatrix<C64> {
        self.data
    }

    /// Entry at netlist node indices. Ground rows/columns read as zero.
    pub fn get(&self, row: NodeId, col: NodeId) -> Result<C64> {
        match (self.index(row)?, self.index(col)?) {
            (Some(i), Some(j)) => Ok(self.data[(i, j)]),
            _ => Ok(C64::zero()),
        }
    }

    /// Add `value` at (row, col). Terms on a ground row or column are dropped.
    pub fn add(&mut self, row: NodeId, col: NodeId, value: C64) -> Result<()> {
        if let (Some(i), Some(j)) = (self.index(row)?, self.index(col)?) {
            self.data[(i, j)] += value;
        }
        Ok(())
    }

    /// Reciprocal two-terminal stamp of admittance `y` between `a` and `b`.
    pub fn stamp_admittance(&mut self, a: NodeId, b: NodeId, y: C64) -> Result<()> {
        self.add(a, a, y)?;
        self.add(b, b, y)?;
        self.add(a, b, -y)?;
        self.add(b, a, -y)
    }

    /// Transconductance stamp: current `gm·(V(ctrl_pos) − V(ctrl_neg))`
    /// associated with the output pair `(out_pos, out_neg)`.
    pub fn stamp_transconductance(
        &mut self,
        out_pos: NodeId,
        out_neg: NodeId,
        ctrl_pos: NodeId,
        ctrl_neg: NodeId,
        gm: C64,
    ) -> Result<()> {
        self.add(out_pos, ctrl_pos, gm)?;
        self.add(out_pos, ctrl_neg, -gm)?;
        self.add(out_neg, ctrl_pos, -gm)?;
        self.add(out_neg, ctrl_neg, gm)
    }

    /// Whether `Y == Yᵀ` within a relative tolerance.
    pub fn is_symmetric(&self, rel_tol: f64) -> bool {
        let scale = self.max_abs();
        let n = self.order();
        (0..n).all(|i| {
            (i + 1..n).all(|j| (self.data[(i, j)] - self.data[(j, i)]).norm() <= rel_tol * scale)
        })
    }

    /// Largest entry magnitude.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|v| v.norm()).fold(0.0, f64::max)
    }

    fn index(&self, node: NodeId) -> Result<Option<usize>> {
        match node.matrix_index() {
            Some(i) if i >= self.order() => Err(Error::NodeOutOfRange {
                node: node.as_u32(),
                order: self.order(),
            }),
            other => Ok(other),
        }
    }
}
