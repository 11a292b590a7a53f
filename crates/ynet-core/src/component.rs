//! Typed circuit components.

use std::fmt;

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::units::parse_value;

/// Component kind, derived once from the identifier's leading character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// `R`: resistor.
    Resistor,
    /// `L`: inductor.
    Inductor,
    /// `C`: capacitor.
    Capacitor,
    /// `Q`: bipolar transistor referencing a small-signal model.
    Transistor,
    /// `G`: voltage-controlled current source.
    Vccs,
    /// Any other prefix. Not stamped.
    Unknown,
}

impl ComponentKind {
    /// Classify an identifier by its first character (case-insensitive).
    pub fn classify(identifier: &str) -> Self {
        match identifier.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('R') => Self::Resistor,
            Some('L') => Self::Inductor,
            Some('C') => Self::Capacitor,
            Some('Q') => Self::Transistor,
            Some('G') => Self::Vccs,
            _ => Self::Unknown,
        }
    }

    /// Number of node references this kind takes, or `None` when unconstrained.
    pub const fn node_count(self) -> Option<usize> {
        match self {
            Self::Resistor | Self::Inductor | Self::Capacitor => Some(2),
            Self::Transistor => Some(3),
            Self::Vccs => Some(4),
            Self::Unknown => None,
        }
    }

    /// Whether the stamp of this kind is reciprocal (symmetric).
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Resistor | Self::Inductor | Self::Capacitor)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resistor => "resistor",
            Self::Inductor => "inductor",
            Self::Capacitor => "capacitor",
            Self::Transistor => "transistor",
            Self::Vccs => "VCCS",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// The trailing value of a component line.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A real number (resistance, inductance, capacitance, transconductance).
    Numeric(f64),
    /// The name of a device model.
    ModelReference(String),
}

impl ComponentValue {
    /// Parse a value token: numeric when possible, otherwise a model reference.
    pub fn parse(token: &str) -> Self {
        match parse_value(token) {
            Some(v) => Self::Numeric(v),
            None => Self::ModelReference(token.to_string()),
        }
    }

    /// The numeric value, if any.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::ModelReference(_) => None,
        }
    }

    /// The model name, if any.
    pub fn as_model(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::ModelReference(name) => Some(name),
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::ModelReference(name) => f.write_str(name),
        }
    }
}

/// A named component with its node references and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    pub nodes: Vec<NodeId>,
    pub value: ComponentValue,
}

impl Component {
    /// Create a component, classifying it from its name.
    ///
    /// Known kinds must be given exactly the node count they take.
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<NodeId>,
        value: ComponentValue,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyIdentifier);
        }

        let kind = ComponentKind::classify(&name);
        if let Some(expected) = kind.node_count() {
            if nodes.len() != expected {
                return Err(Error::NodeCount {
                    name,
                    expected,
                    actual: nodes.len(),
                });
            }
        }

        Ok(Self {
            name,
            kind,
            nodes,
            value,
        })
    }

    /// Highest node index this component touches.
    pub fn max_node(&self) -> u32 {
        self.nodes.iter().map(|n| n.as_u32()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ComponentKind::classify("R1"), ComponentKind::Resistor);
        assert_eq!(ComponentKind::classify("lbias"), ComponentKind::Inductor);
        assert_eq!(ComponentKind::classify("C12"), ComponentKind::Capacitor);
        assert_eq!(ComponentKind::classify("Q1"), ComponentKind::Transistor);
        assert_eq!(ComponentKind::classify("G1"), ComponentKind::Vccs);
        assert_eq!(ComponentKind::classify("X1"), ComponentKind::Unknown);
    }

    #[test]
    fn test_value_parse() {
        assert_eq!(ComponentValue::parse("1k"), ComponentValue::Numeric(1000.0));
        assert_eq!(
            ComponentValue::parse("BFP640"),
            ComponentValue::ModelReference("BFP640".to_string())
        );
    }

    #[test]
    fn test_node_count_enforced() {
        let err = Component::new("Q1", vec![NodeId::new(1), NodeId::new(2)], ComponentValue::parse("npn"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::NodeCount {
                name: "Q1".to_string(),
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_unknown_kind_accepts_any_nodes() {
        let c = Component::new(
            "X1",
            vec![NodeId::new(1), NodeId::new(2), NodeId::new(5)],
            ComponentValue::parse("sub"),
        )
        .unwrap();
        assert_eq!(c.kind, ComponentKind::Unknown);
        assert_eq!(c.max_node(), 5);
    }
}
