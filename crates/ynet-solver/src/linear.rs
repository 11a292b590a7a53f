//! Dense complex linear solves.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use crate::error::{Error, Result};

/// Solve a complex linear system Ax = b using LU decomposition.
pub fn solve_complex(
    a: &DMatrix<Complex<f64>>,
    b: &DVector<Complex<f64>>,
) -> Result<DVector<Complex<f64>>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }

    let x = a.clone().lu().solve(b).ok_or(Error::SingularMatrix)?;
    if x.iter().all(|v| v.re.is_finite() && v.im.is_finite()) {
        Ok(x)
    } else {
        Err(Error::SingularMatrix)
    }
}

/// Solve Ax = e_k, the response to a unit excitation in row `k`.
pub fn solve_unit(a: &DMatrix<Complex<f64>>, k: usize) -> Result<DVector<Complex<f64>>> {
    if k >= a.nrows() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: k + 1,
        });
    }
    let mut rhs = DVector::zeros(a.nrows());
    rhs[k] = Complex::new(1.0, 0.0);
    solve_complex(a, &rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn test_solve_complex_simple() {
        // (2+i)x + y = 5+i
        // x + (3-i)y = 6
        let a = DMatrix::from_row_slice(2, 2, &[c(2.0, 1.0), c(1.0, 0.0), c(1.0, 0.0), c(3.0, -1.0)]);
        let b = dvector![c(5.0, 1.0), c(6.0, 0.0)];

        let x = solve_complex(&a, &b).unwrap();

        // Verify by computing Ax and comparing to b
        let ax = &a * &x;
        assert!((ax[0] - b[0]).norm() < 1e-10, "Ax[0] mismatch");
        assert!((ax[1] - b[1]).norm() < 1e-10, "Ax[1] mismatch");
    }

    #[test]
    fn test_singular_matrix() {
        // Row 2 = 2 * row 1
        let a = DMatrix::from_row_slice(2, 2, &[c(1.0, 1.0), c(2.0, 0.0), c(2.0, 2.0), c(4.0, 0.0)]);
        let b = dvector![c(1.0, 0.0), c(2.0, 0.0)];

        let result = solve_complex(&a, &b);
        assert!(matches!(result, Err(Error::SingularMatrix)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = DMatrix::from_element(2, 2, c(1.0, 0.0));
        let b = dvector![c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)];

        let result = solve_complex(&a, &b);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_solve_unit() {
        // Diagonal system: x = [1/2, 0]
        let a = DMatrix::from_row_slice(2, 2, &[c(2.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(4.0, 0.0)]);
        let x = solve_unit(&a, 0).unwrap();
        assert!((x[0] - c(0.5, 0.0)).norm() < 1e-15);
        assert!(x[1].norm() < 1e-15);
    }
}
