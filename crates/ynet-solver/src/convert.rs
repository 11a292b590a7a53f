//! Two-port parameter conversions.

use nalgebra::Matrix2;
use num_complex::Complex;
use ynet_core::{C64, NodeId};

use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::reduce::TwoPortNetwork;

/// Scattering parameters of a two-port, equal reference impedance on both ports.
#[derive(Debug, Clone, PartialEq)]
pub struct SParameterMatrix {
    pub n1: NodeId,
    pub n2: NodeId,
    pub frequency: f64,
    /// Reference impedance.
    pub z0: C64,
    /// `[[s11, s12], [s21, s22]]`.
    pub s: Matrix2<C64>,
}

impl SParameterMatrix {
    pub fn s11(&self) -> C64 {
        self.s[(0, 0)]
    }

    pub fn s12(&self) -> C64 {
        self.s[(0, 1)]
    }

    pub fn s21(&self) -> C64 {
        self.s[(1, 0)]
    }

    pub fn s22(&self) -> C64 {
        self.s[(1, 1)]
    }
}

/// Converts between Y, Z and S descriptions of a two-port.
#[derive(Debug, Clone, Copy)]
pub struct ParameterConverter {
    singular_tolerance: f64,
}

impl Default for ParameterConverter {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl ParameterConverter {
    pub fn new(singular_tolerance: f64) -> Self {
        Self { singular_tolerance }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.singular_tolerance)
    }

    /// `S = (I − z0·Y)(I + z0·Y)⁻¹`.
    pub fn y_to_s(&self, network: &TwoPortNetwork, z0: C64) -> Result<SParameterMatrix> {
        let zy = network.y * z0;
        let identity = Matrix2::identity();
        let site = Site::of(network, "Y to S conversion");
        let inv = inverse(&(identity + zy), self.singular_tolerance, site)?;
        Ok(SParameterMatrix {
            n1: network.n1,
            n2: network.n2,
            frequency: network.frequency,
            z0,
            s: (identity - zy) * inv,
        })
    }

    /// `Y = (1/z0)·(I − S)(I + S)⁻¹`.
    pub fn s_to_y(&self, s: &SParameterMatrix) -> Result<TwoPortNetwork> {
        let site = Site::new("S to Y conversion", s.n1, s.n2, s.frequency);
        if s.z0.norm() == 0.0 {
            return Err(Site {
                operation: "S to Y conversion (zero reference impedance)",
                ..site
            }
            .singular());
        }
        let identity = Matrix2::identity();
        let inv = inverse(&(identity + s.s), self.singular_tolerance, site)?;
        let y = (identity - s.s) * inv / s.z0;
        Ok(TwoPortNetwork::new(s.n1, s.n2, s.frequency, y))
    }

    /// `Z = Y⁻¹`.
    pub fn y_to_z(&self, network: &TwoPortNetwork) -> Result<Matrix2<C64>> {
        inverse(
            &network.y,
            self.singular_tolerance,
            Site::of(network, "Y to Z conversion"),
        )
    }
}

/// The formula and port pair a denominator check belongs to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site {
    pub operation: &'static str,
    pub n1: NodeId,
    pub n2: NodeId,
    pub frequency: f64,
}

impl Site {
    pub fn new(operation: &'static str, n1: NodeId, n2: NodeId, frequency: f64) -> Self {
        Self {
            operation,
            n1,
            n2,
            frequency,
        }
    }

    pub fn of(network: &TwoPortNetwork, operation: &'static str) -> Self {
        Self::new(operation, network.n1, network.n2, network.frequency)
    }

    pub fn singular(&self) -> Error {
        Error::Singular {
            operation: self.operation,
            n1: self.n1.as_u32(),
            n2: self.n2.as_u32(),
            frequency: self.frequency,
        }
    }
}

/// Fail unless `den` is clearly non-zero relative to `scale`, the magnitude of
/// the terms it was computed from.
pub(crate) fn check_denominator(den: C64, scale: f64, tolerance: f64, site: Site) -> Result<()> {
    let magnitude = den.norm();
    if magnitude > tolerance * scale && magnitude > 0.0 && magnitude.is_finite() {
        Ok(())
    } else {
        Err(site.singular())
    }
}

/// Inverse of a 2×2 complex matrix via its adjugate.
pub(crate) fn inverse(m: &Matrix2<C64>, tolerance: f64, site: Site) -> Result<Matrix2<C64>> {
    let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
    let det = a * d - b * c;
    check_denominator(det, (a * d).norm() + (b * c).norm(), tolerance, site)?;
    let inv_det = Complex::new(1.0, 0.0) / det;
    Ok(Matrix2::new(d, -b, -c, a) * inv_det)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> C64 {
        C64::new(re, im)
    }

    fn network(y11: C64, y12: C64, y21: C64, y22: C64) -> TwoPortNetwork {
        TwoPortNetwork::new(NodeId::new(1), NodeId::new(2), 1e9, Matrix2::new(y11, y12, y21, y22))
    }

    const Z0: C64 = C64::new(50.0, 0.0);

    #[test]
    fn test_matched_shunt_load() {
        // 50 Ω to ground at each port, no coupling: both ports matched.
        let g = c(1.0 / 50.0, 0.0);
        let s = ParameterConverter::default()
            .y_to_s(&network(g, c(0.0, 0.0), c(0.0, 0.0), g), Z0)
            .unwrap();
        assert!(s.s11().norm() < 1e-15);
        assert!(s.s22().norm() < 1e-15);
        assert!(s.s21().norm() < 1e-15);
    }

    #[test]
    fn test_open_ports_reflect_fully() {
        let zero = c(0.0, 0.0);
        let s = ParameterConverter::default()
            .y_to_s(&network(zero, zero, zero, zero), Z0)
            .unwrap();
        assert!((s.s11() - c(1.0, 0.0)).norm() < 1e-15);
        assert!((s.s22() - c(1.0, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn test_series_through_line() {
        // Series 50 Ω between the ports: S11 = 1/3, S21 = 2/3
        let g = c(1.0 / 50.0, 0.0);
        let s = ParameterConverter::default()
            .y_to_s(&network(g, -g, -g, g), Z0)
            .unwrap();
        assert!((s.s11() - c(1.0 / 3.0, 0.0)).norm() < 1e-12);
        assert!((s.s21() - c(2.0 / 3.0, 0.0)).norm() < 1e-12);
        assert!((s.s12() - s.s21()).norm() < 1e-15);
    }

    #[test]
    fn test_round_trip_passive() {
        let conv = ParameterConverter::default();
        let tp = network(c(0.03, 0.01), c(-0.01, 0.002), c(-0.01, 0.002), c(0.02, -0.005));
        let s = conv.y_to_s(&tp, Z0).unwrap();
        let back = conv.s_to_y(&s).unwrap();
        for (a, b) in tp.y.iter().zip(back.y.iter()) {
            assert!((a - b).norm() < 1e-10 * a.norm().max(1e-3));
        }
        assert_eq!(back.frequency, tp.frequency);
    }

    #[test]
    fn test_singular_conversion() {
        // z0·Y = -I makes (I + z0·Y) singular
        let y = c(-1.0 / 50.0, 0.0);
        let zero = c(0.0, 0.0);
        let err = ParameterConverter::default()
            .y_to_s(&network(y, zero, zero, y), Z0)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Singular { n1: 1, n2: 2, frequency, .. } if frequency == 1e9
        ));
        assert!(err.to_string().contains("ports (1, 2)"), "{err}");
    }

    #[test]
    fn test_s_to_y_zero_reference_names_ports() {
        let tp = TwoPortNetwork::new(NodeId::new(4), NodeId::new(7), 2e6, Matrix2::identity());
        let mut s = ParameterConverter::default().y_to_s(&tp, Z0).unwrap();
        s.z0 = c(0.0, 0.0);
        let err = ParameterConverter::default().s_to_y(&s).unwrap_err();
        assert!(matches!(err, Error::Singular { n1: 4, n2: 7, frequency, .. } if frequency == 2e6));
    }

    #[test]
    fn test_y_to_z() {
        let tp = network(c(2.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(4.0, 0.0));
        let z = ParameterConverter::default().y_to_z(&tp).unwrap();
        assert!((z[(0, 0)] - c(0.5, 0.0)).norm() < 1e-15);
        assert!((z[(1, 1)] - c(0.25, 0.0)).norm() < 1e-15);
    }
}
