//! Square linear system solver.
//!
//! Every stage of the pipeline reduces to a small square system: the 6×6
//! moment-matching system and the 4×4 partial-fraction systems. They are solved
//! exactly (LU with partial pivoting); there is no least-squares fallback,
//! because a singular system means the decomposition does not exist and the
//! caller must hear about it.

use nalgebra::{DMatrix, DVector};

/// Solve `a x = b` for square `a` via LU decomposition.
///
/// Returns `None` if `a` is not square, is (numerically) singular, or the
/// solution is not finite. A pivot smaller than `n · eps` times the largest
/// pivot counts as singular.
pub fn solve_square(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if !a.is_square() || a.nrows() != b.len() {
        return None;
    }
    let lu = a.clone().lu();

    let pivots = lu.u().diagonal();
    let largest = pivots.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let smallest = pivots.iter().fold(f64::INFINITY, |m, v| m.min(v.abs()));
    if largest == 0.0 || smallest <= f64::EPSILON * a.nrows() as f64 * largest {
        return None;
    }

    let x = lu.solve(b)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Convenience wrapper for row-major fixed-size systems.
pub fn solve_rows<const N: usize>(rows: [[f64; N]; N], rhs: [f64; N]) -> Option<[f64; N]> {
    let a = DMatrix::from_fn(N, N, |i, j| rows[i][j]);
    let b = DVector::from_row_slice(&rhs);
    let x = solve_square(&a, &b)?;
    let mut out = [0.0; N];
    for (o, v) in out.iter_mut().zip(x.iter()) {
        *o = *v;
    }
    Some(out)
}
