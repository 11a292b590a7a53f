//! Two-port reduction by Kron (Schur complement) elimination.

use nalgebra::Matrix2;
use ynet_core::{C64, NodeAdmittanceMatrix, NodeId};

use crate::config::SolverConfig;
use crate::error::{Error, Result};

/// 2×2 admittance description of a network seen from two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPortNetwork {
    /// Port 1 node.
    pub n1: NodeId,
    /// Port 2 node.
    pub n2: NodeId,
    /// Frequency of the matrix this was reduced from.
    pub frequency: f64,
    /// `[[y11, y12], [y21, y22]]`.
    pub y: Matrix2<C64>,
}

impl TwoPortNetwork {
    pub fn new(n1: NodeId, n2: NodeId, frequency: f64, y: Matrix2<C64>) -> Self {
        Self { n1, n2, frequency, y }
    }

    pub fn y11(&self) -> C64 {
        self.y[(0, 0)]
    }

    pub fn y12(&self) -> C64 {
        self.y[(0, 1)]
    }

    pub fn y21(&self) -> C64 {
        self.y[(1, 0)]
    }

    pub fn y22(&self) -> C64 {
        self.y[(1, 1)]
    }

    /// Whether `y12 == y21` within a relative tolerance.
    pub fn is_reciprocal(&self, rel_tol: f64) -> bool {
        let scale = self.y.iter().map(|v| v.norm()).fold(0.0, f64::max);
        (self.y12() - self.y21()).norm() <= rel_tol * scale
    }
}

/// Eliminates every node except a chosen pair.
#[derive(Debug, Clone, Copy)]
pub struct TwoPortReducer {
    pivot_tolerance: f64,
}

impl Default for TwoPortReducer {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl TwoPortReducer {
    /// A pivot `Y[k][k]` is singular when `|pivot| <= pivot_tolerance · s`,
    /// where `s` is the largest magnitude left in row or column `k`.
    pub fn new(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.pivot_tolerance)
    }

    /// Reduce to the two-port at (n1, n2), eliminating internal nodes in
    /// increasing index order.
    pub fn reduce(&self, y: &NodeAdmittanceMatrix, n1: NodeId, n2: NodeId) -> Result<TwoPortNetwork> {
        let (p1, p2) = port_indices(y, n1, n2)?;
        let order: Vec<usize> = (0..y.order()).filter(|&k| k != p1 && k != p2).collect();
        self.eliminate(y, n1, n2, (p1, p2), &order)
    }

    /// Reduce with an explicit elimination order.
    ///
    /// `order` must list every node except n1 and n2 exactly once.
    pub fn reduce_with_order(
        &self,
        y: &NodeAdmittanceMatrix,
        n1: NodeId,
        n2: NodeId,
        order: &[NodeId],
    ) -> Result<TwoPortNetwork> {
        let (p1, p2) = port_indices(y, n1, n2)?;

        let mut seen = vec![false; y.order()];
        seen[p1] = true;
        seen[p2] = true;
        let mut indices = Vec::with_capacity(order.len());
        for &node in order {
            let k = node
                .matrix_index()
                .filter(|&k| k < y.order())
                .ok_or_else(|| Error::EliminationOrder(format!("node {node} is not internal")))?;
            if seen[k] {
                return Err(Error::EliminationOrder(format!(
                    "node {node} is a port or listed twice"
                )));
            }
            seen[k] = true;
            indices.push(k);
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(Error::EliminationOrder(format!(
                "node {} is never eliminated",
                missing + 1
            )));
        }

        self.eliminate(y, n1, n2, (p1, p2), &indices)
    }

    /// Eliminate the zero-based `order` indices from a working copy.
    ///
    /// Each step applies `Y[i][j] -= Y[i][k]·Y[k][j] / Y[k][k]` over the nodes
    /// still in the active set, then removes `k` from it.
    fn eliminate(
        &self,
        matrix: &NodeAdmittanceMatrix,
        n1: NodeId,
        n2: NodeId,
        (p1, p2): (usize, usize),
        order: &[usize],
    ) -> Result<TwoPortNetwork> {
        let frequency = matrix.frequency();
        let mut y = matrix.as_matrix().clone();
        let mut active = vec![true; y.nrows()];

        for &k in order {
            let pivot = y[(k, k)];
            let magnitude = pivot.norm();
            let scale = (0..y.nrows())
                .filter(|&i| active[i])
                .map(|i| y[(i, k)].norm().max(y[(k, i)].norm()))
                .fold(0.0, f64::max);
            if !(magnitude > self.pivot_tolerance * scale) || magnitude == 0.0 {
                return Err(Error::SingularPivot {
                    node: k as u32 + 1,
                    frequency,
                });
            }
            active[k] = false;

            let live: Vec<usize> = (0..y.nrows()).filter(|&i| active[i]).collect();
            for &i in &live {
                let factor = y[(i, k)] / pivot;
                if factor.re == 0.0 && factor.im == 0.0 {
                    continue;
                }
                for &j in &live {
                    let ykj = y[(k, j)];
                    y[(i, j)] -= factor * ykj;
                }
            }
        }

        let reduced = Matrix2::new(y[(p1, p1)], y[(p1, p2)], y[(p2, p1)], y[(p2, p2)]);
        log::trace!(
            "reduced order {} to two-port ({n1}, {n2}) at f = {frequency}",
            matrix.order()
        );
        Ok(TwoPortNetwork::new(n1, n2, frequency, reduced))
    }
}

/// Validate the port pair and return their zero-based indices.
pub(crate) fn port_indices(y: &NodeAdmittanceMatrix, n1: NodeId, n2: NodeId) -> Result<(usize, usize)> {
    let index = |node: NodeId| {
        node.matrix_index()
            .filter(|&i| i < y.order())
            .ok_or(Error::InvalidPort {
                node: node.as_u32(),
                order: y.order(),
            })
    };
    let (p1, p2) = (index(n1)?, index(n2)?);
    if p1 == p2 {
        return Err(Error::CoincidentPorts(n1.as_u32()));
    }
    Ok((p1, p2))
}
