//! End-to-end checks of parsed netlists against analytical solutions.
//!
//! Test naming convention:
//! - `test_gain_*` - voltage and terminated network gain
//! - `test_sparam_*` - S-parameter extraction
//! - `test_impedance_*` - terminated input/output impedance
//! - `test_sweep_*` - orchestration behavior

use std::f64::consts::{PI, SQRT_2};

use num_complex::Complex;
use ynet_core::NodeId;
use ynet_parser::parse;
use ynet_solver::{
    Error, FrequencySweep, SolverConfig, SweepResult, TwoPortReducer, UnknownComponentPolicy,
    ac_frequencies, magnitude_db, phase_deg,
};

/// Tolerance for magnitudes in dB
const DB_TOL: f64 = 1e-6;

/// Tolerance for phases in degrees
const PHASE_TOL: f64 = 1e-6;

fn c(re: f64, im: f64) -> Complex<f64> {
    Complex::new(re, im)
}

fn n(i: u32) -> NodeId {
    NodeId::new(i)
}

fn run(netlist: &str, frequencies: Vec<f64>) -> SweepResult {
    let parsed = parse(netlist).expect("parse failed");
    FrequencySweep::new(parsed.table, parsed.models, frequencies, SolverConfig::default())
        .expect("sweep setup failed")
        .run()
        .expect("sweep failed")
}

// ============================================================================
// Gain
// ============================================================================

/// RC low-pass: V2/V1 = 1/(1 + jωRC), -3 dB and -45° at fc = 1/(2πRC).
#[test]
fn test_gain_rc_lowpass_corner() {
    let netlist = r#"
* RC low-pass
R1 1 2 1k
C1 2 0 1u
.end
"#;
    let fc = 1.0 / (2.0 * PI * 1e3 * 1e-6);
    let result = run(netlist, vec![fc / 100.0, fc, fc * 100.0]);
    let gain = result.voltage_gain(n(1), n(2)).unwrap();

    let db = magnitude_db(gain.iter().copied());
    let deg = phase_deg(gain.iter().copied());

    assert!(db[0].abs() < 1e-3, "passband: {} dB", db[0]);
    assert!((db[1] + 20.0 * SQRT_2.log10()).abs() < DB_TOL, "corner: {} dB", db[1]);
    assert!((deg[1] + 45.0).abs() < PHASE_TOL, "corner: {}°", deg[1]);
    // -20 dB/decade well above the corner
    assert!((db[2] + 40.0).abs() < 0.01, "stopband: {} dB", db[2]);
}

/// Common-emitter stage, ideal hybrid-π: Av = -gm·RL.
#[test]
fn test_gain_common_emitter() {
    let netlist = r#"
* base 1, collector 2, emitter grounded
Q1 1 2 0 ce
RL 2 0 1k
.model ce npn(gm=40m rpi=2.5k)
"#;
    let result = run(netlist, vec![1e3]);

    let av = result.voltage_gain(n(1), n(2)).unwrap();
    assert!((av[0] - c(-40.0, 0.0)).norm() < 1e-9);

    // Ideal source, 1 kΩ external load in parallel with RL
    let h = result
        .network_transfer(n(1), n(2), c(0.0, 0.0), c(1e3, 0.0))
        .unwrap();
    assert!((h[0] - c(-20.0, 0.0)).norm() < 1e-9);
    let g = result
        .network_gain(n(1), n(2), c(0.0, 0.0), c(1e3, 0.0))
        .unwrap();
    assert!((g[0] - 20.0).abs() < 1e-9);
}

/// A VCCS behaves like the transistor's gm term.
#[test]
fn test_gain_vccs_amplifier() {
    let netlist = r#"
RIN 1 0 1k
G1 2 0 1 0 10m
RL 2 0 2k
"#;
    let result = run(netlist, vec![1e6]);
    let av = result.voltage_gain(n(1), n(2)).unwrap();
    // Current leaves node 2 through the source: Av = -gm·RL
    assert!((av[0] - c(-20.0, 0.0)).norm() < 1e-9);
}

// ============================================================================
// S-parameters
// ============================================================================

/// Series 50 Ω between 50 Ω ports: S11 = 1/3, S21 = 2/3.
#[test]
fn test_sparam_series_resistor() {
    let result = run("R1 1 2 50\n", vec![1e9]);
    let s = result.s_parameters(n(1), n(2), c(50.0, 0.0)).unwrap();
    assert!((s[0].s11() - c(1.0 / 3.0, 0.0)).norm() < 1e-12);
    assert!((s[0].s21() - c(2.0 / 3.0, 0.0)).norm() < 1e-12);
    assert!((s[0].s22() - c(1.0 / 3.0, 0.0)).norm() < 1e-12);
}

/// A lossless LC tee is reciprocal and conserves power.
#[test]
fn test_sparam_lossless_tee() {
    let netlist = r#"
L1 1 3 10n
C1 3 0 4p
L2 3 2 10n
"#;
    let freqs = ynet_solver::logspace(1e7, 5e8, 9);
    let result = run(netlist, freqs);
    for s in result.s_parameters(n(1), n(2), c(50.0, 0.0)).unwrap() {
        let power = s.s11().norm_sqr() + s.s21().norm_sqr();
        assert!((power - 1.0).abs() < 1e-9, "f = {}: {power}", s.frequency);
        assert!((s.s12() - s.s21()).norm() < 1e-12);
    }
}

// ============================================================================
// Impedance
// ============================================================================

/// No coupling between ports: Zin = 1/Y11 whatever the load.
#[test]
fn test_impedance_decoupled_ports() {
    let result = run("R1 1 0 75\nC1 2 0 1p\n", vec![1e8]);
    for zl in [c(0.0, 0.0), c(50.0, 0.0), c(1e9, 0.0), c(20.0, 35.0)] {
        let zin = result.input_impedance(n(1), n(2), zl).unwrap();
        assert!((zin[0] - c(75.0, 0.0)).norm() < 1e-9, "zl = {zl}");
    }
}

/// Series 100 Ω with 100 Ω shunt at port 2.
#[test]
fn test_impedance_l_pad() {
    let netlist = "R1 1 2 100\nR2 2 0 100\n";
    let result = run(netlist, vec![1.0]);

    // Port 2 open (huge load): 200 Ω; shorted: 100 Ω.
    let zin_open = result.input_impedance(n(1), n(2), c(1e15, 0.0)).unwrap();
    assert!((zin_open[0] - c(200.0, 0.0)).norm() < 1e-6);
    let zin_short = result.input_impedance(n(1), n(2), c(0.0, 0.0)).unwrap();
    assert!((zin_short[0] - c(100.0, 0.0)).norm() < 1e-9);

    // From port 2 with a 100 Ω source: 100 || 200
    let zout = result.output_impedance(n(1), n(2), c(100.0, 0.0)).unwrap();
    assert!((zout[0] - c(200.0 / 3.0, 0.0)).norm() < 1e-9);
}

// ============================================================================
// Sweep orchestration
// ============================================================================

#[test]
fn test_sweep_resistor_frequency_independent() {
    let result = run("R1 1 0 100\n", vec![1.0, 10.0, 100.0]);
    for f in [1.0, 10.0, 100.0] {
        let y = result.matrix_at(f).unwrap();
        assert_eq!(y.order(), 1);
        assert!((y.as_matrix()[(0, 0)] - c(0.01, 0.0)).norm() < 1e-15);
    }
    assert!(result.matrix_at(1000.0).is_none());
}

#[test]
fn test_sweep_follows_ac_directive() {
    let netlist = "R1 1 2 1k\nC1 2 0 1n\n.ac dec 5 1k 1meg\n";
    let parsed = parse(netlist).unwrap();
    let freqs = ac_frequencies(&parsed.ac.unwrap()).unwrap();
    assert_eq!(freqs.len(), 16);

    let result = FrequencySweep::new(parsed.table, parsed.models, freqs.clone(), SolverConfig::default())
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(result.frequencies(), freqs);
    for p in result.points() {
        assert!(p.matrix.is_symmetric(1e-12));
    }
}

#[test]
fn test_sweep_elimination_order_invariance() {
    let netlist = r#"
R1 1 3 50
C1 3 0 2p
L1 3 4 5n
R2 4 5 20
C2 5 0 1p
L2 5 2 5n
"#;
    let result = run(netlist, vec![1e9]);
    let y = result.matrix_at(1e9).unwrap();
    let reducer = TwoPortReducer::default();

    let a = reducer.reduce(y, n(1), n(2)).unwrap();
    let b = reducer
        .reduce_with_order(y, n(1), n(2), &[n(5), n(3), n(4)])
        .unwrap();
    for (x, z) in a.y.iter().zip(b.y.iter()) {
        assert!((x - z).norm() <= 1e-9 * x.norm().max(z.norm()));
    }
}

#[test]
fn test_sweep_missing_model_names_component() {
    let parsed = parse("Q7 1 2 0 nosuch\nR1 2 0 1k\n").unwrap();
    let err = FrequencySweep::new(parsed.table, parsed.models, vec![1e6], SolverConfig::default())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Q7"), "{message}");
    assert!(message.contains("NOSUCH") || message.contains("nosuch"), "{message}");
}

#[test]
fn test_sweep_strict_unknown_policy() {
    let netlist = "R1 1 0 50\nX1 1 2 sub\n";
    let lenient = parse(netlist).unwrap();
    assert!(
        FrequencySweep::new(lenient.table, lenient.models, vec![1.0], SolverConfig::default())
            .is_ok()
    );

    let strict = parse(netlist).unwrap();
    let config = SolverConfig::default().with_unknown_policy(UnknownComponentPolicy::Error);
    let err = FrequencySweep::new(strict.table, strict.models, vec![1.0], config).unwrap_err();
    assert!(matches!(err, Error::Unclassified(name) if name == "X1"));
}

#[test]
fn test_sweep_singular_reduction_reports_frequency() {
    // Node 3 floats: its pivot is exactly zero
    let netlist = "R1 1 2 50\nR9 3 3 1\n";
    let result = run(netlist, vec![2.5e6]);
    let err = result.s_parameters(n(1), n(2), c(50.0, 0.0)).unwrap_err();
    assert!(err.is_numeric());
    assert!(matches!(err, Error::SingularPivot { node: 3, frequency } if frequency == 2.5e6));
}
