//! Ordered component table.

use indexmap::IndexMap;

use crate::component::{Component, ComponentKind};

/// Ordered mapping from identifier to component, plus the matrix order.
///
/// Inserting an identifier that already exists replaces the earlier
/// component (last write wins) but keeps its original position. The matrix
/// order only ever grows: nodes of a replaced component still count.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    components: IndexMap<String, Component>,
    order: usize,
}

impl ComponentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component. Returns the component it replaced, if any.
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        self.order = self.order.max(component.max_node() as usize);
        let replaced = self
            .components
            .insert(component.name.clone(), component);
        if let Some(old) = &replaced {
            log::warn!("component {} redefined; keeping the later definition", old.name);
        }
        replaced
    }

    /// Look up a component by identifier.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Components in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the table holds no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Admittance matrix order: the highest node index seen.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Components whose prefix did not map to a known kind.
    pub fn unclassified(&self) -> impl Iterator<Item = &Component> {
        self.iter().filter(|c| c.kind == ComponentKind::Unknown)
    }

    /// Whether every stamped component is reciprocal (R, L, C only).
    pub fn is_passive(&self) -> bool {
        self.iter()
            .all(|c| c.kind.is_passive() || c.kind == ComponentKind::Unknown)
    }
}

impl FromIterator<Component> for ComponentTable {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut table = Self::new();
        for component in iter {
            table.insert(component);
        }
        table
    }
}
