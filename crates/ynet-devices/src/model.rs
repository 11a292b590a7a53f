//! Small-signal device model table.
//!
//! Transistors do not carry their parameters inline; they reference a named
//! model. The table is supplied by the host, either programmatically or from
//! `.MODEL` lines in the netlist.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Thermal voltage at 300 K, used when deriving `gm` from a bias current.
pub const THERMAL_VOLTAGE: f64 = 0.025852;

/// Hybrid-π small-signal parameters of a bipolar transistor.
///
/// All conductances are in siemens, capacitances in farads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridPiModel {
    /// Transconductance, collector current per base-emitter volt.
    pub gm: f64,
    /// Base-emitter conductance (1/rπ).
    pub gpi: f64,
    /// Base-collector feedback conductance (1/rμ).
    pub gmu: f64,
    /// Output conductance (1/ro).
    pub go: f64,
    /// Base-emitter capacitance.
    pub cpi: f64,
    /// Base-collector capacitance.
    pub cmu: f64,
    /// Collector-emitter capacitance.
    pub cce: f64,
}

impl HybridPiModel {
    /// A pure transconductance with every other parameter zero.
    pub fn new(gm: f64) -> Self {
        Self {
            gm,
            gpi: 0.0,
            gmu: 0.0,
            go: 0.0,
            cpi: 0.0,
            cmu: 0.0,
            cce: 0.0,
        }
    }

    pub fn with_gpi(mut self, gpi: f64) -> Self {
        self.gpi = gpi;
        self
    }

    pub fn with_gmu(mut self, gmu: f64) -> Self {
        self.gmu = gmu;
        self
    }

    pub fn with_go(mut self, go: f64) -> Self {
        self.go = go;
        self
    }

    pub fn with_cpi(mut self, cpi: f64) -> Self {
        self.cpi = cpi;
        self
    }

    pub fn with_cmu(mut self, cmu: f64) -> Self {
        self.cmu = cmu;
        self
    }

    pub fn with_cce(mut self, cce: f64) -> Self {
        self.cce = cce;
        self
    }

    /// Build a model from `.MODEL` style `name=value` parameters.
    ///
    /// Accepted keys (case-insensitive): `gm`, `gpi`/`rpi`, `gmu`/`rmu`,
    /// `go`/`ro`, `cpi`, `cmu`, `cce`. When `gm` is absent it is derived from
    /// the bias current `ic` as `ic/vt`; when the base-emitter conductance is
    /// absent it is derived from `beta` as `gm/beta`.
    pub fn from_params(model: &str, params: &[(String, f64)]) -> Result<Self> {
        let mut gm = None;
        let mut gpi = None;
        let mut ic = None;
        let mut beta = None;
        let mut vt = THERMAL_VOLTAGE;
        let mut m = Self::new(0.0);

        for (key, value) in params {
            let value = *value;
            match key.to_ascii_lowercase().as_str() {
                "gm" => gm = Some(value),
                "gpi" => gpi = Some(value),
                "rpi" => gpi = Some(conductance(model, key, value)?),
                "gmu" => m.gmu = value,
                "rmu" => m.gmu = conductance(model, key, value)?,
                "go" => m.go = value,
                "ro" => m.go = conductance(model, key, value)?,
                "cpi" => m.cpi = value,
                "cmu" => m.cmu = value,
                "cce" => m.cce = value,
                "ic" => ic = Some(value),
                "beta" | "bf" => beta = Some(value),
                "vt" => vt = value,
                other => {
                    return Err(Error::InvalidModel {
                        model: model.to_string(),
                        reason: format!("unknown parameter '{other}'"),
                    });
                }
            }
        }

        m.gm = match (gm, ic) {
            (Some(gm), _) => gm,
            (None, Some(ic)) if vt > 0.0 => ic / vt,
            _ => {
                return Err(Error::InvalidModel {
                    model: model.to_string(),
                    reason: "either gm or ic must be given".to_string(),
                });
            }
        };

        m.gpi = match (gpi, beta) {
            (Some(gpi), _) => gpi,
            (None, Some(beta)) if beta > 0.0 => m.gm / beta,
            _ => 0.0,
        };

        Ok(m)
    }
}

/// Convert an `r*` parameter to a conductance. Infinite resistance is allowed
/// and maps to zero conductance.
fn conductance(model: &str, key: &str, resistance: f64) -> Result<f64> {
    if resistance == 0.0 {
        return Err(Error::InvalidModel {
            model: model.to_string(),
            reason: format!("{key} must be non-zero"),
        });
    }
    Ok(1.0 / resistance)
}

/// Named small-signal models, keyed case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ModelTable {
    models: IndexMap<String, HybridPiModel>,
}

impl ModelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a model. Returns the previous definition, if any.
    pub fn insert(&mut self, name: &str, model: HybridPiModel) -> Option<HybridPiModel> {
        let replaced = self.models.insert(name.to_ascii_uppercase(), model);
        if replaced.is_some() {
            log::warn!("model {name} redefined; keeping the later definition");
        }
        replaced
    }

    /// Look up a model by name.
    pub fn get(&self, name: &str) -> Option<&HybridPiModel> {
        self.models.get(&name.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Model names (upper-cased) in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}
