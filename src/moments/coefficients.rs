//! From raw moments to ODE coefficients (and back).
//!
//! Multiplying the ODE `D(x) p'(x) = -(x + a) p(x)` by `x^k` and integrating by
//! parts (boundary terms vanish) gives, for every `k >= 0`,
//!
//! ```text
//! m_{k+1} + a m_k - k c0 m_{k-1} - (k+1) c1 m_k - (k+2) c2 m_{k+1}
//!         - (k+3) c3 m_{k+2} - (k+4) c4 m_{k+3} = 0
//! ```
//!
//! with `m_0 = 1`. The rows `k = 0..5` involve `m_1..m_8` and form a 6×6 linear
//! system in `(a, c0, c1, c2, c3, c4)`.

use nalgebra::{DMatrix, DVector};

use crate::domain::Coefficients;
use crate::error::{PearsonError, Result};
use crate::math::solve_square;

/// Number of raw moments consumed by the solver.
pub const MOMENT_COUNT: usize = 8;

/// Solve the moment-matching system for the ODE coefficients.
///
/// Uses the first eight entries of `moments` (`m_1..m_8`); extra entries are ignored.
pub fn coefficients_from_moments(moments: &[f64]) -> Result<Coefficients> {
    if moments.len() < MOMENT_COUNT {
        return Err(PearsonError::TooFewMoments {
            expected: MOMENT_COUNT,
            found: moments.len(),
        });
    }
    if moments[..MOMENT_COUNT].iter().any(|v| !v.is_finite()) {
        return Err(PearsonError::NonFinite {
            input: "raw moments",
        });
    }

    // m[i] = m_i, with m_0 = 1.
    let mut m = [1.0; MOMENT_COUNT + 1];
    m[1..].copy_from_slice(&moments[..MOMENT_COUNT]);

    let a = DMatrix::from_fn(6, 6, |k, j| {
        let kf = k as f64;
        match j {
            0 => m[k],
            1 => {
                if k == 0 {
                    0.0
                } else {
                    -kf * m[k - 1]
                }
            }
            // c_{j-1} multiplies m_{k+j-2} with weight (k + j - 1).
            _ => -(kf + (j - 1) as f64) * m[k + j - 2],
        }
    });
    let b = DVector::from_fn(6, |k, _| -m[k + 1]);

    let x = solve_square(&a, &b).ok_or(PearsonError::SingularSystem {
        stage: "ODE coefficients from moments",
    })?;
    Coefficients::from_slice(x.as_slice())
}

/// Raw moments `m_1..m_8` consistent with `coef` and the free moments `m1`, `m2`.
///
/// This runs the recursion above forward and is the exact inverse of
/// [`coefficients_from_moments`] whenever that system is non-singular.
pub fn implied_moments(coef: &Coefficients, m1: f64, m2: f64) -> Result<[f64; MOMENT_COUNT]> {
    if coef.c4 == 0.0 {
        return Err(PearsonError::DegenerateQuartic { c4: coef.c4 });
    }
    let Coefficients {
        a,
        c0,
        c1,
        c2,
        c3,
        c4,
    } = *coef;

    let mut m = [0.0; MOMENT_COUNT + 1];
    m[0] = 1.0;
    m[1] = m1;
    m[2] = m2;
    for k in 0..6 {
        let kf = k as f64;
        let m_prev = if k == 0 { 0.0 } else { m[k - 1] };
        let lhs = m[k + 1] + a * m[k]
            - kf * c0 * m_prev
            - (kf + 1.0) * c1 * m[k]
            - (kf + 2.0) * c2 * m[k + 1]
            - (kf + 3.0) * c3 * m[k + 2];
        m[k + 3] = lhs / ((kf + 4.0) * c4);
    }

    let mut out = [0.0; MOMENT_COUNT];
    out.copy_from_slice(&m[1..]);
    Ok(out)
}
