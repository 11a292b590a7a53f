//! Frequency sweep orchestration and post-processing helpers.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ynet_core::{C64, ComponentTable, NodeAdmittanceMatrix, NodeId};
use ynet_devices::ModelTable;
use ynet_parser::{AcSweep, AcSweepType};

use crate::assemble::NodeMatrixBuilder;
use crate::config::SolverConfig;
use crate::convert::{ParameterConverter, SParameterMatrix};
use crate::error::{Error, Result};
use crate::gain::GainImpedanceCalculator;
use crate::reduce::{TwoPortNetwork, TwoPortReducer};

/// Cooperative cancellation flag, checked between frequencies.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Called with `(completed, total)` after each frequency is built.
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync + 'static>;

/// One swept frequency and the matrix built for it.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub frequency: f64,
    pub matrix: NodeAdmittanceMatrix,
}

/// Builds one admittance matrix per frequency of a netlist.
///
/// The table and model table are owned and never modified. Components are
/// resolved once in [`new`](Self::new), so classification warnings and model
/// lookups happen before any frequency is visited.
pub struct FrequencySweep {
    table: ComponentTable,
    models: ModelTable,
    frequencies: Vec<f64>,
    config: SolverConfig,
    builder: NodeMatrixBuilder,
    cancel: Option<CancelToken>,
    progress: Option<ProgressFn>,
}

impl fmt::Debug for FrequencySweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencySweep")
            .field("table", &self.table)
            .field("models", &self.models)
            .field("frequencies", &self.frequencies)
            .field("config", &self.config)
            .field("cancel", &self.cancel)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl FrequencySweep {
    pub fn new(
        table: ComponentTable,
        models: ModelTable,
        frequencies: Vec<f64>,
        config: SolverConfig,
    ) -> Result<Self> {
        let builder = NodeMatrixBuilder::new(&table, &models, &config)?;
        Ok(Self {
            table,
            models,
            frequencies,
            config,
            builder,
            cancel: None,
            progress: None,
        })
    }

    /// Check `token` before each frequency.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Report each completed frequency to `progress`.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn table(&self) -> &ComponentTable {
        &self.table
    }

    pub fn models(&self) -> &ModelTable {
        &self.models
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Build every matrix, in input order.
    pub fn run(&self) -> Result<SweepResult> {
        log::debug!(
            "sweeping {} frequencies, matrix order {}",
            self.frequencies.len(),
            self.builder.order()
        );
        let points = self.build_points()?;
        Ok(SweepResult {
            points,
            config: self.config.clone(),
        })
    }

    fn check_cancelled(&self, completed: usize) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled {
                completed,
                total: self.frequencies.len(),
            }),
            _ => Ok(()),
        }
    }

    fn report(&self, completed: usize) {
        if let Some(progress) = &self.progress {
            progress(completed, self.frequencies.len());
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn build_points(&self) -> Result<Vec<SweepPoint>> {
        let mut points = Vec::with_capacity(self.frequencies.len());
        for (completed, &frequency) in self.frequencies.iter().enumerate() {
            self.check_cancelled(completed)?;
            let matrix = self.builder.build(frequency)?;
            points.push(SweepPoint { frequency, matrix });
            self.report(completed + 1);
        }
        Ok(points)
    }

    #[cfg(feature = "parallel")]
    fn build_points(&self) -> Result<Vec<SweepPoint>> {
        use rayon::prelude::*;
        use std::sync::atomic::AtomicUsize;

        let completed = AtomicUsize::new(0);
        self.frequencies
            .par_iter()
            .map(|&frequency| {
                self.check_cancelled(completed.load(Ordering::Relaxed))?;
                let matrix = self.builder.build(frequency)?;
                self.report(completed.fetch_add(1, Ordering::Relaxed) + 1);
                Ok(SweepPoint { frequency, matrix })
            })
            .collect()
    }
}

/// Matrices of a completed sweep, in input order with duplicates kept.
///
/// The per-frequency accessors return vectors aligned with
/// [`points`](Self::points); the first failing frequency aborts the call.
#[derive(Debug, Clone)]
pub struct SweepResult {
    points: Vec<SweepPoint>,
    config: SolverConfig,
}

impl SweepResult {
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The matrix built for exactly `frequency`, first match if swept twice.
    pub fn matrix_at(&self, frequency: f64) -> Option<&NodeAdmittanceMatrix> {
        self.points
            .iter()
            .find(|p| p.frequency == frequency)
            .map(|p| &p.matrix)
    }

    pub fn two_ports(&self, n1: NodeId, n2: NodeId) -> Result<Vec<TwoPortNetwork>> {
        let reducer = TwoPortReducer::from_config(&self.config);
        self.points
            .iter()
            .map(|p| reducer.reduce(&p.matrix, n1, n2))
            .collect()
    }

    pub fn s_parameters(&self, n1: NodeId, n2: NodeId, z0: C64) -> Result<Vec<SParameterMatrix>> {
        let converter = ParameterConverter::from_config(&self.config);
        self.two_ports(n1, n2)?
            .iter()
            .map(|tp| converter.y_to_s(tp, z0))
            .collect()
    }

    pub fn voltage_gain(&self, n1: NodeId, n2: NodeId) -> Result<Vec<C64>> {
        let calc = self.calculator();
        self.points
            .iter()
            .map(|p| calc.voltage_gain(&p.matrix, n1, n2))
            .collect()
    }

    pub fn network_transfer(&self, n1: NodeId, n2: NodeId, zs: C64, zl: C64) -> Result<Vec<C64>> {
        let calc = self.calculator();
        self.points
            .iter()
            .map(|p| calc.network_transfer(&p.matrix, n1, n2, zs, zl))
            .collect()
    }

    pub fn network_gain(&self, n1: NodeId, n2: NodeId, zs: C64, zl: C64) -> Result<Vec<f64>> {
        Ok(magnitude(self.network_transfer(n1, n2, zs, zl)?))
    }

    pub fn input_impedance(&self, n1: NodeId, n2: NodeId, zl: C64) -> Result<Vec<C64>> {
        let calc = self.calculator();
        self.points
            .iter()
            .map(|p| calc.input_impedance(&p.matrix, n1, n2, zl))
            .collect()
    }

    pub fn output_impedance(&self, n1: NodeId, n2: NodeId, zs: C64) -> Result<Vec<C64>> {
        let calc = self.calculator();
        self.points
            .iter()
            .map(|p| calc.output_impedance(&p.matrix, n1, n2, zs))
            .collect()
    }

    fn calculator(&self) -> GainImpedanceCalculator {
        GainImpedanceCalculator::from_config(&self.config)
    }
}

// ────────────────────────── Post-processing ──────────────────────────

pub fn magnitude(values: impl IntoIterator<Item = C64>) -> Vec<f64> {
    values.into_iter().map(|v| v.norm()).collect()
}

/// `20·log10|x|`, clamped away from `-inf` for exact zeros.
pub fn magnitude_db(values: impl IntoIterator<Item = C64>) -> Vec<f64> {
    const FLOOR: f64 = 1e-300;
    values
        .into_iter()
        .map(|v| 20.0 * v.norm().max(FLOOR).log10())
        .collect()
}

/// Phase in radians.
pub fn phase(values: impl IntoIterator<Item = C64>) -> Vec<f64> {
    values.into_iter().map(|v| v.arg()).collect()
}

pub fn phase_deg(values: impl IntoIterator<Item = C64>) -> Vec<f64> {
    values.into_iter().map(|v| v.arg().to_degrees()).collect()
}

// ────────────────────────── Frequency grids ──────────────────────────

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `n` logarithmically spaced values from `start` to `stop`, both included.
///
/// Returns an empty grid unless both ends are positive.
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if !(start > 0.0 && stop > 0.0) {
        return Vec::new();
    }
    let (lo, hi) = (start.log10(), stop.log10());
    linspace(lo, hi, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Largest grid [`ac_frequencies`] will build.
pub const MAX_SWEEP_POINTS: usize = 10_000_000;

/// Frequencies for a `.AC` line.
///
/// `Lin` gives `num_points` values from fstart to fstop. `Dec` and `Oct` step
/// by `1/num_points` of a decade or octave from fstart and stop at fstop.
/// Grids beyond [`MAX_SWEEP_POINTS`] are rejected.
pub fn ac_frequencies(ac: &AcSweep) -> Result<Vec<f64>> {
    let AcSweep {
        sweep_type,
        num_points,
        fstart,
        fstop,
    } = *ac;
    let too_large = |requested: f64| Error::SweepTooLarge {
        requested,
        limit: MAX_SWEEP_POINTS,
    };
    let base = match sweep_type {
        AcSweepType::Lin => {
            if num_points > MAX_SWEEP_POINTS {
                return Err(too_large(num_points as f64));
            }
            return Ok(linspace(fstart, fstop, num_points));
        }
        AcSweepType::Dec => 10.0_f64,
        AcSweepType::Oct => 2.0_f64,
    };
    if num_points == 0 || !(fstart > 0.0) || fstop < fstart {
        return Ok(Vec::new());
    }
    let requested = ((fstop / fstart).log(base) * num_points as f64 + 1e-9).floor() + 1.0;
    if !(requested <= MAX_SWEEP_POINTS as f64) {
        return Err(too_large(requested));
    }
    let count = requested as usize;
    Ok((0..count)
        .map(|i| fstart * base.powf(i as f64 / num_points as f64))
        .collect())
}
