//! Solver configuration.

use std::f64::consts::TAU;

/// How sweep frequencies are interpreted by the reactive stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    /// Plain frequency in hertz; stamps use ω = 2πf.
    #[default]
    Hertz,
    /// Angular frequency in rad/s, used as ω directly.
    Angular,
}

impl FrequencyUnit {
    /// Angular frequency for a sweep value.
    pub fn omega(self, frequency: f64) -> f64 {
        match self {
            FrequencyUnit::Hertz => TAU * frequency,
            FrequencyUnit::Angular => frequency,
        }
    }
}

/// What to do with components whose prefix is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownComponentPolicy {
    /// Skip silently.
    Ignore,
    /// Skip, logging one warning per component.
    #[default]
    Warn,
    /// Refuse to build.
    Error,
}

/// Numeric tolerances and interpretation settings.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// A reduction pivot is singular when `|pivot| <= pivot_tolerance · s`,
    /// `s` being the largest magnitude left in its row or column.
    pub pivot_tolerance: f64,
    /// A formula denominator is singular when it is this small relative to
    /// the magnitude of the terms it is computed from.
    pub singular_tolerance: f64,
    /// Interpretation of sweep frequencies.
    pub frequency_unit: FrequencyUnit,
    /// Handling of unrecognized components.
    pub unknown_policy: UnknownComponentPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-13,
            singular_tolerance: 1e-12,
            frequency_unit: FrequencyUnit::Hertz,
            unknown_policy: UnknownComponentPolicy::Warn,
        }
    }
}

impl SolverConfig {
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    pub fn with_singular_tolerance(mut self, tol: f64) -> Self {
        self.singular_tolerance = tol;
        self
    }

    pub fn with_frequency_unit(mut self, unit: FrequencyUnit) -> Self {
        self.frequency_unit = unit;
        self
    }

    pub fn with_unknown_policy(mut self, policy: UnknownComponentPolicy) -> Self {
        self.unknown_policy = policy;
        self
    }
}
