//! Effective support of a density.
//!
//! Two strategies:
//!
//! - bell-shaped densities (peak at `-a`, not four distinct real poles): walk
//!   outward from each inflection point with Newton on `p(x) = 0`
//! - everything else: the interval between the nearest real poles around 0

use tracing::{debug, warn};

use crate::density::DensityModel;
use crate::domain::{RootKind, SupportInterval, Tolerances};
use crate::error::{PearsonError, Result};
use crate::support::newton::{NewtonTrace, newton};

/// Computes the support of one density under a fixed set of tolerances.
#[derive(Debug, Clone, Copy)]
pub struct SupportSolver<'a> {
    model: &'a DensityModel,
    tol: Tolerances,
}

impl<'a> SupportSolver<'a> {
    pub fn new(model: &'a DensityModel, tol: Tolerances) -> Self {
        Self { model, tol }
    }

    /// Raw support bounds, checked by [`effective_check`](Self::effective_check).
    pub fn solve(&self) -> Result<SupportInterval> {
        let kind = self.model.partial_fractions().kind();
        let support = if self.model.is_peak() && kind != RootKind::FourDistinctReal {
            self.newton_bounds()?
        } else {
            self.pole_bounds()?
        };
        debug!(kind = kind.code(), lower = support.lower, upper = support.upper, "raw support");
        self.effective_check(support)?;
        Ok(support)
    }

    /// Newton on `p(x) = 0` seeded beyond each inflection point.
    ///
    /// With inflection point `r` at distance `d` from the mode, the seed is `r`
    /// reflected once more (`r ∓ d`) and the bracket runs from `r` to
    /// `bracket_extrapolation · d` past the seed. A side without an inflection
    /// point stays unbounded.
    pub fn newton_bounds(&self) -> Result<SupportInterval> {
        let mode = self.model.coefficients().mode();
        let (left, right) = self.model.inflection_bracket(self.tol.root_eps)?;
        let step = |x: f64| self.model.pdf_over_dpdf(x);
        let ext = self.tol.bracket_extrapolation;

        let lower = match left {
            Some(r) => {
                let d = mode - r;
                let x0 = r - d;
                let t = newton(
                    step,
                    x0,
                    x0 - ext * d,
                    r,
                    self.tol.newton_tol,
                    self.tol.newton_max_iter,
                )?;
                t.root
            }
            None => {
                warn!(mode, "no inflection point below the mode; lower bound left open");
                f64::NEG_INFINITY
            }
        };
        let upper = match right {
            Some(r) => {
                let d = r - mode;
                let x0 = r + d;
                let t = newton(
                    step,
                    x0,
                    r,
                    x0 + ext * d,
                    self.tol.newton_tol,
                    self.tol.newton_max_iter,
                )?;
                t.root
            }
            None => {
                warn!(mode, "no inflection point above the mode; upper bound left open");
                f64::INFINITY
            }
        };
        Ok(SupportInterval::new(lower, upper))
    }

    /// Interval between the nearest real poles around 0, each nudged inward by
    /// `pole_offset`. Sides without a pole are unbounded.
    pub fn pole_bounds(&self) -> Result<SupportInterval> {
        let pfd = self.model.partial_fractions();
        let kind = pfd.kind();
        let poles = pfd.real_poles();
        if poles.is_empty() {
            return Err(PearsonError::UnsupportedKind {
                operation: "pole bracketing",
                kind,
            });
        }
        if poles.contains(&0.0) {
            return Err(PearsonError::Unsupported {
                operation: "pole bracketing",
                reason: format!("root type {kind} has a real pole at x = 0"),
            });
        }

        let off = self.tol.pole_offset;
        let lower = poles
            .iter()
            .copied()
            .filter(|p| *p < 0.0)
            .last()
            .map_or(f64::NEG_INFINITY, |p| p + off);
        let upper = poles
            .iter()
            .copied()
            .find(|p| *p > 0.0)
            .map_or(f64::INFINITY, |p| p - off);
        Ok(SupportInterval::new(lower, upper))
    }

    /// Warn when the mode falls outside `support`; fail unless `lower < 0 < upper`.
    pub fn effective_check(&self, support: SupportInterval) -> Result<()> {
        let mode = self.model.coefficients().mode();
        if !support.contains(mode) {
            warn!(
                mode,
                lower = support.lower,
                upper = support.upper,
                "-a lies outside the support"
            );
        }
        if !support.contains_zero() {
            return Err(PearsonError::ZeroOutsideSupport {
                lower: support.lower,
                upper: support.upper,
            });
        }
        Ok(())
    }

    /// Newton on `p'(x) = 0` inside `[lo, hi]`. The only stationary point of
    /// these densities is `-a`; the search converges there when seeded between
    /// the inflection points.
    pub fn stationary_point(&self, x0: f64, lo: f64, hi: f64) -> Result<NewtonTrace> {
        newton(
            |x| self.model.dpdf_over_ddpdf(x),
            x0,
            lo,
            hi,
            self.tol.newton_tol,
            self.tol.newton_max_iter,
        )
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Complex;

    use super::*;
    use crate::domain::Coefficients;
    use crate::math::from_roots;
    use crate::support::newton::NewtonOutcome;
    use crate::pfd::decompose;
    use crate::roots::RootConfiguration;

    fn model(values: &[f64]) -> DensityModel {
        let coef = Coefficients::from_slice(values).unwrap();
        let config = RootConfiguration::from_coefficients(&coef, 1e-10).unwrap();
        let pfd = decompose(&coef, &config).unwrap();
        DensityModel::new(coef, pfd).unwrap()
    }

    #[test]
    fn four_distinct_poles_bracket_the_origin() {
        let m = model(&[0.1, 0.36, 0.0, -0.13, 0.0, 0.01]);
        assert!(m.is_peak());
        let s = SupportSolver::new(&m, Tolerances::default()).solve().unwrap();
        assert!((s.lower - (-2.0 + 1e-7)).abs() < 1e-9);
        assert!((s.upper - (2.0 - 1e-7)).abs() < 1e-9);
    }

    #[test]
    fn trough_uses_the_real_poles() {
        let m = model(&[0.0, -0.2, -0.1, -0.1, -0.1, 0.1]);
        assert!(!m.is_peak());
        let s = SupportSolver::new(&m, Tolerances::default()).solve().unwrap();
        assert!((s.lower - (-1.0 + 1e-7)).abs() < 1e-9);
        assert!((s.upper - (2.0 - 1e-7)).abs() < 1e-9);
    }

    #[test]
    fn all_complex_trough_cannot_be_bracketed() {
        // D = -0.01 (x^4 + 10 x^2 + 100): no real roots, positive curvature at 0
        let m = model(&[0.0, -1.0, 0.0, -0.1, 0.0, -0.01]);
        assert!(!m.is_peak());
        let err = SupportSolver::new(&m, Tolerances::default()).solve().unwrap_err();
        assert!(matches!(err, PearsonError::UnsupportedKind { .. }));
    }

    #[test]
    fn newton_bounds_are_symmetric_for_a_symmetric_density() {
        let m = model(&[0.0, 1.03425, 0.0, -0.0223256, 0.0, 0.00218166]);
        assert!(m.is_peak());
        let s = SupportSolver::new(&m, Tolerances::default()).solve().unwrap();
        assert!(s.is_finite());
        assert!((s.lower + s.upper).abs() < 1e-8);
        assert!(s.upper > 4.0 && s.upper < 7.0, "upper = {}", s.upper);
    }

    #[test]
    fn effective_check_rejects_intervals_missing_the_origin() {
        let m = model(&[0.1, 0.36, 0.0, -0.13, 0.0, 0.01]);
        let solver = SupportSolver::new(&m, Tolerances::default());
        assert!(solver.effective_check(SupportInterval::new(-1.0, 1.0)).is_ok());
        for (lo, hi) in [(0.0, 1.0), (-1.0, 0.0), (0.5, 2.0)] {
            assert!(matches!(
                solver.effective_check(SupportInterval::new(lo, hi)),
                Err(PearsonError::ZeroOutsideSupport { .. })
            ));
        }
    }

    #[test]
    fn stationary_search_finds_the_mode() {
        let m = model(&[0.1, 0.36, 0.0, -0.13, 0.0, 0.01]);
        let solver = SupportSolver::new(&m, Tolerances::default());
        // inflection points at -0.703 and 0.507
        for x0 in [0.3, -0.5] {
            let t = solver.stationary_point(x0, -0.6, 0.45).unwrap();
            assert_eq!(t.outcome, NewtonOutcome::Converged);
            assert!((t.root + 0.1).abs() < 1e-9, "root = {}", t.root);
            assert!(m.derivative(t.root).abs() < 1e-9);
        }
        assert!(matches!(
            solver.stationary_point(0.0, 0.45, -0.6),
            Err(PearsonError::InvalidBracket { .. })
        ));
    }

    fn model_from_roots(a: f64, c4: f64, roots: [Complex<f64>; 4]) -> DensityModel {
        let v = from_roots(c4, &roots);
        model(&[a, v[4], v[3], v[2], v[1], v[0]])
    }

    fn re(x: f64) -> Complex<f64> {
        Complex::new(x, 0.0)
    }

    fn pole_bounds(m: &DensityModel) -> Result<SupportInterval> {
        SupportSolver::new(m, Tolerances::default()).pole_bounds()
    }

    #[test]
    fn single_pole_bounds_one_side() {
        // 43: double pole at -1.5, pair -1 ± 2i
        let m = model_from_roots(
            0.3,
            0.1,
            [re(-1.5), re(-1.5), Complex::new(-1.0, 2.0), Complex::new(-1.0, -2.0)],
        );
        assert_eq!(m.partial_fractions().kind(), RootKind::DoubleRealWithPair);
        let s = pole_bounds(&m).unwrap();
        assert!((s.lower - (-1.5 + 1e-7)).abs() < 1e-9, "{s:?}");
        assert_eq!(s.upper, f64::INFINITY);

        // 45: quadruple pole at 2
        let m = model_from_roots(0.3, 0.1, [re(2.0); 4]);
        assert_eq!(m.partial_fractions().kind(), RootKind::QuadrupleReal);
        let s = pole_bounds(&m).unwrap();
        assert_eq!(s.lower, f64::NEG_INFINITY);
        assert!((s.upper - (2.0 - 1e-7)).abs() < 1e-9, "{s:?}");
    }

    #[test]
    fn three_poles_use_the_nearest_on_each_side() {
        // 48: double pole at 1, simple poles at -2 and 3
        let m = model_from_roots(0.3, 0.1, [re(1.0), re(1.0), re(-2.0), re(3.0)]);
        assert_eq!(m.partial_fractions().kind(), RootKind::DoubleRealTwoSimple);
        let s = pole_bounds(&m).unwrap();
        assert!((s.lower - (-2.0 + 1e-7)).abs() < 1e-9, "{s:?}");
        assert!((s.upper - (1.0 - 1e-7)).abs() < 1e-9, "{s:?}");

        // 46: triple pole at -1, simple pole at 4
        let m = model_from_roots(0.3, 0.1, [re(-1.0), re(-1.0), re(-1.0), re(4.0)]);
        assert_eq!(m.partial_fractions().kind(), RootKind::TripleReal);
        let s = pole_bounds(&m).unwrap();
        assert!((s.lower - (-1.0 + 1e-7)).abs() < 1e-9, "{s:?}");
        assert!((s.upper - (4.0 - 1e-7)).abs() < 1e-9, "{s:?}");
    }

    #[test]
    fn poles_on_one_side_leave_the_other_open() {
        let m = model_from_roots(0.3, 0.1, [re(1.0), re(2.0), re(3.0), re(4.0)]);
        let s = pole_bounds(&m).unwrap();
        assert_eq!(s.lower, f64::NEG_INFINITY);
        assert!((s.upper - (1.0 - 1e-7)).abs() < 1e-9, "{s:?}");

        let m = model_from_roots(0.3, 0.1, [re(-4.0), re(-3.0), re(-2.0), re(-1.0)]);
        let s = pole_bounds(&m).unwrap();
        assert!((s.lower - (-1.0 + 1e-7)).abs() < 1e-9, "{s:?}");
        assert_eq!(s.upper, f64::INFINITY);
        assert!(s.contains_zero());
    }
}
