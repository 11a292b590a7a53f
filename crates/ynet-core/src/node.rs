//! Circuit node identifiers.

use std::fmt;

/// A circuit node. Node 0 is ground and never appears in the admittance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(u32);

impl NodeId {
    /// The ground (reference) node.
    pub const GROUND: NodeId = NodeId(0);

    /// Create a node from its netlist index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Whether this is the ground node.
    pub const fn is_ground(self) -> bool {
        self.0 == 0
    }

    /// Netlist index of this node.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Zero-based matrix row/column, or `None` for ground.
    pub const fn matrix_index(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some((self.0 - 1) as usize)
        }
    }
}

impl From<u32> for NodeId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
