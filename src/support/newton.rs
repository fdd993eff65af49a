//! Bracketed Newton iteration.
//!
//! The caller supplies the Newton step `f(x) / f'(x)` directly; the densities
//! here have cheap closed forms for those ratios, so the derivatives never need
//! to be formed separately.

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{PearsonError, Result};

/// Why the iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NewtonOutcome {
    /// The last step was shorter than the tolerance.
    Converged,
    /// An iterate left the bracket and was pinned to its edge.
    Clamped,
    /// The iteration cap was reached.
    MaxIterations,
    /// The step evaluated to NaN or infinity; the previous iterate is kept.
    NonFinite,
}

/// Result of [`newton`]: the final estimate plus every iterate visited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewtonTrace {
    pub root: f64,
    pub iterates: Vec<f64>,
    pub outcome: NewtonOutcome,
}

impl NewtonTrace {
    pub fn iterations(&self) -> usize {
        self.iterates.len().saturating_sub(1)
    }
}

/// Iterate `x <- x - step(x)` from `x0`, staying inside `[lo, hi]`.
///
/// Stops when a step is shorter than `tol`, after `max_iter` steps, or as soon
/// as an iterate leaves the bracket (it is then clamped to the violated edge).
/// The returned root always lies in `[lo, hi]`; a bracket with `lo > hi` or a
/// NaN edge is rejected.
pub fn newton<F>(
    step: F,
    x0: f64,
    lo: f64,
    hi: f64,
    tol: f64,
    max_iter: usize,
) -> Result<NewtonTrace>
where
    F: Fn(f64) -> f64,
{
    if lo.is_nan() || hi.is_nan() || lo > hi {
        return Err(PearsonError::InvalidBracket { lower: lo, upper: hi });
    }
    let mut x = x0;
    let mut iterates = vec![x0];
    let mut outcome = NewtonOutcome::MaxIterations;

    for i in 0..max_iter {
        let next = x - step(x);
        if !next.is_finite() {
            outcome = NewtonOutcome::NonFinite;
            break;
        }
        trace!(iteration = i + 1, x = next, "newton step");
        if (next - x).abs() < tol {
            x = next;
            iterates.push(x);
            outcome = NewtonOutcome::Converged;
            break;
        }
        x = next;
        if x > hi {
            x = hi;
            iterates.push(x);
            outcome = NewtonOutcome::Clamped;
            break;
        }
        if x < lo {
            x = lo;
            iterates.push(x);
            outcome = NewtonOutcome::Clamped;
            break;
        }
        iterates.push(x);
    }

    let root = x.clamp(lo, hi);
    debug!(x0, lo, hi, root, ?outcome, steps = iterates.len() - 1, "newton finished");
    Ok(NewtonTrace {
        root,
        iterates,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_a_square_root() {
        // f = x^2 - 2, f/f' = (x^2 - 2) / 2x
        let t = newton(|x| (x * x - 2.0) / (2.0 * x), 1.0, 0.0, 3.0, 1e-12, 50).unwrap();
        assert_eq!(t.outcome, NewtonOutcome::Converged);
        assert!((t.root - 2f64.sqrt()).abs() < 1e-12);
        assert!(t.iterations() < 10);
    }

    #[test]
    fn overshoot_is_clamped_to_the_bracket() {
        // constant step of -1 marches right until it leaves [0, 2.5]
        let t = newton(|_| -1.0, 0.0, 0.0, 2.5, 1e-5, 10).unwrap();
        assert_eq!(t.outcome, NewtonOutcome::Clamped);
        assert_eq!(t.root, 2.5);
        assert_eq!(t.iterates, vec![0.0, 1.0, 2.0, 2.5]);
    }

    #[test]
    fn iteration_cap_is_respected() {
        let t = newton(|_| 0.1, 0.0, -100.0, 100.0, 1e-5, 10).unwrap();
        assert_eq!(t.outcome, NewtonOutcome::MaxIterations);
        assert_eq!(t.iterations(), 10);
        assert!((t.root + 1.0).abs() < 1e-12);
    }

    #[test]
    fn seed_outside_the_bracket_still_returns_a_point_inside() {
        let t = newton(|_| 0.0, 5.0, -1.0, 1.0, 1e-5, 10).unwrap();
        assert_eq!(t.outcome, NewtonOutcome::Converged);
        assert_eq!(t.root, 1.0);
    }

    #[test]
    fn non_finite_step_stops_the_iteration() {
        let t = newton(|x| if x >= 0.5 { f64::NAN } else { -0.5 }, 0.0, -1.0, 2.0, 1e-5, 10).unwrap();
        assert_eq!(t.outcome, NewtonOutcome::NonFinite);
        assert_eq!(t.root, 0.5);
    }

    #[test]
    fn reversed_or_nan_brackets_are_errors() {
        for (lo, hi) in [(1.0, -1.0), (f64::NAN, 1.0), (-1.0, f64::NAN)] {
            let err = newton(|_| 0.0, 0.0, lo, hi, 1e-5, 10).unwrap_err();
            assert!(matches!(err, PearsonError::InvalidBracket { .. }), "{err}");
        }
        let t = newton(|_| 0.0, 3.0, 2.0, 2.0, 1e-5, 10).unwrap();
        assert_eq!(t.root, 2.0);
    }
}
