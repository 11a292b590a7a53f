//! Admittance matrix assembly.

use ynet_core::{Component, ComponentKind, ComponentTable, NodeAdmittanceMatrix, NodeId};
use ynet_devices::{Bjt, Capacitor, Inductor, ModelTable, Resistor, Stamp, Vccs};

use crate::config::{SolverConfig, UnknownComponentPolicy};
use crate::error::{Error, Result};

/// A component resolved to its device model.
#[derive(Debug, Clone)]
enum Device {
    Resistor(Resistor),
    Inductor(Inductor),
    Capacitor(Capacitor),
    Bjt(Bjt),
    Vccs(Vccs),
}

impl Device {
    /// Resolve a component. Returns `None` for unrecognized kinds.
    fn resolve(component: &Component, models: &ModelTable) -> Result<Option<Self>> {
        let name = component.name.as_str();
        let device = match component.kind {
            ComponentKind::Resistor => {
                let [a, b] = nodes(component)?;
                Device::Resistor(Resistor::new(name, a, b, numeric(component)?))
            }
            ComponentKind::Inductor => {
                let [a, b] = nodes(component)?;
                Device::Inductor(Inductor::new(name, a, b, numeric(component)?))
            }
            ComponentKind::Capacitor => {
                let [a, b] = nodes(component)?;
                Device::Capacitor(Capacitor::new(name, a, b, numeric(component)?))
            }
            ComponentKind::Vccs => {
                let [out_p, out_n, ctrl_p, ctrl_n] = nodes(component)?;
                Device::Vccs(Vccs::new(name, out_p, out_n, ctrl_p, ctrl_n, numeric(component)?))
            }
            ComponentKind::Transistor => {
                let [base, collector, emitter] = nodes(component)?;
                let model = component.value.as_model().ok_or_else(|| {
                    ynet_devices::Error::InvalidValue {
                        component: name.to_string(),
                        reason: format!("transistor needs a model name, got {}", component.value),
                    }
                })?;
                Device::Bjt(Bjt::from_table(name, base, collector, emitter, model, models)?)
            }
            ComponentKind::Unknown => return Ok(None),
        };
        Ok(Some(device))
    }
}

impl Stamp for Device {
    fn stamp(&self, y: &mut NodeAdmittanceMatrix) -> ynet_devices::Result<()> {
        match self {
            Device::Resistor(d) => d.stamp(y),
            Device::Inductor(d) => d.stamp(y),
            Device::Capacitor(d) => d.stamp(y),
            Device::Bjt(d) => d.stamp(y),
            Device::Vccs(d) => d.stamp(y),
        }
    }
}

/// The component's node references as a fixed-size array.
///
/// Fields of [`Component`] are public, so a hand-built record may not carry
/// the node count its kind takes.
fn nodes<const N: usize>(component: &Component) -> Result<[NodeId; N]> {
    <[NodeId; N]>::try_from(component.nodes.as_slice()).map_err(|_| {
        Error::Core(ynet_core::Error::NodeCount {
            name: component.name.clone(),
            expected: N,
            actual: component.nodes.len(),
        })
    })
}

fn numeric(component: &Component) -> Result<f64> {
    component.value.as_numeric().ok_or_else(|| {
        Error::Component(ynet_devices::Error::InvalidValue {
            component: component.name.clone(),
            reason: format!(
                "{} needs a numeric value, got '{}'",
                component.kind, component.value
            ),
        })
    })
}

/// Builds one nodal admittance matrix per frequency.
///
/// Components are classified and resolved against the model table once, at
/// construction; [`build`](Self::build) only evaluates and stamps.
#[derive(Debug, Clone)]
pub struct NodeMatrixBuilder {
    devices: Vec<Device>,
    order: usize,
    config: SolverConfig,
}

impl NodeMatrixBuilder {
    /// Resolve every component of `table`.
    ///
    /// Unrecognized components are handled per
    /// [`SolverConfig::unknown_policy`].
    pub fn new(table: &ComponentTable, models: &ModelTable, config: &SolverConfig) -> Result<Self> {
        let mut devices = Vec::with_capacity(table.len());
        for component in table.iter() {
            match Device::resolve(component, models)? {
                Some(device) => devices.push(device),
                None => match config.unknown_policy {
                    UnknownComponentPolicy::Ignore => {}
                    UnknownComponentPolicy::Warn => {
                        log::warn!("skipping {}: unrecognized component prefix", component.name);
                    }
                    UnknownComponentPolicy::Error => {
                        return Err(Error::Unclassified(component.name.clone()));
                    }
                },
            }
        }

        log::debug!(
            "resolved {} of {} components, matrix order {}",
            devices.len(),
            table.len(),
            table.order()
        );

        Ok(Self {
            devices,
            order: table.order(),
            config: config.clone(),
        })
    }

    /// Matrix order (highest node index).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Build a fresh matrix at `frequency`.
    pub fn build(&self, frequency: f64) -> Result<NodeAdmittanceMatrix> {
        if !frequency.is_finite() || frequency < 0.0 {
            return Err(Error::InvalidFrequency(frequency));
        }
        let omega = self.config.frequency_unit.omega(frequency);
        let mut y = NodeAdmittanceMatrix::new(self.order, frequency, omega);
        for device in &self.devices {
            device
                .stamp(&mut y)
                .map_err(|source| Error::Device { frequency, source })?;
        }
        Ok(y)
    }
}
