//! Small dense complex matrices used for gate unitaries.

use ndarray::Array2;

use crate::complex::Complex;

/// A row-major `2^k × 2^k` gate matrix.
pub type Matrix = Array2<Complex>;

/// Identity of dimension `dim`.
pub fn identity(dim: usize) -> Matrix {
    Array2::eye(dim)
}

/// Conjugate transpose `U†`.
pub fn dagger(m: &Matrix) -> Matrix {
    m.t().mapv(|c| c.conj())
}

/// Matrix product `a · b`.
pub fn matmul(a: &Matrix, b: &Matrix) -> Matrix {
    a.dot(b)
}

/// Entry-wise comparison within `tol`.
pub fn approx_eq(a: &Matrix, b: &Matrix, tol: f64) -> bool {
    a.dim() == b.dim()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x.re - y.re).abs() < tol && (x.im - y.im).abs() < tol)
}

/// `U†U = I` within `tol` per entry.
pub fn is_unitary(m: &Matrix, tol: f64) -> bool {
    let (rows, cols) = m.dim();
    rows == cols && approx_eq(&matmul(&dagger(m), m), &identity(rows), tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::{I, ONE, ZERO, complex};
    use ndarray::arr2;

    #[test]
    fn test_dagger() {
        let m = arr2(&[[ONE, I], [complex(2.0, 0.0), ZERO]]);
        let d = dagger(&m);
        assert_eq!(d[[0, 1]], complex(2.0, 0.0));
        assert_eq!(d[[1, 0]], complex(0.0, -1.0));
    }

    #[test]
    fn test_is_unitary() {
        assert!(is_unitary(&identity(4), 1e-12));

        let not_unitary = arr2(&[[ONE, ONE], [ZERO, ONE]]);
        assert!(!is_unitary(&not_unitary, 1e-9));

        let rect = Array2::<Complex>::zeros((2, 4));
        assert!(!is_unitary(&rect, 1e-9));
    }
}
