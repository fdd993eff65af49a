//! Classification of the quartic denominator's roots.
//!
//! The partial-fraction formulas downstream assume the roots arrive in a fixed
//! canonical order for each configuration, so classification and ordering are
//! one step:
//!
//! | kind | canonical order |
//! | - | - |
//! | 41, 42 | `[u1, conj(u1), u2, conj(u2)]`, upper roots sorted by (re, im) |
//! | 43, 44 | `[r1, r2, u, conj(u)]`, `r1 <= r2` |
//! | 45, 47, 49 | ascending |
//! | 46 | triple root first, then the simple root |
//! | 48 | double root first, then the two simple roots ascending |

use nalgebra::Complex;
use tracing::debug;

use crate::domain::{Coefficients, ConjugatePair, RootKind};
use crate::error::{PearsonError, Result};
use crate::math::roots;

/// A root kind plus the canonically ordered roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfiguration {
    pub kind: RootKind,
    pub roots: [Complex<f64>; 4],
}

impl RootConfiguration {
    /// Find and classify the roots of the quartic denominator of `coef`.
    pub fn from_coefficients(coef: &Coefficients, eps: f64) -> Result<Self> {
        let z = quartic_roots(coef)?;
        let config = classify(z, eps)?;
        debug!(kind = config.kind.code(), roots = ?config.roots, "classified quartic roots");
        Ok(config)
    }

    /// Real part of the `i`-th canonical root.
    pub fn real(&self, i: usize) -> f64 {
        self.roots[i].re
    }

    /// The `i`-th canonical root as a conjugate pair (`im` made positive).
    pub fn pair(&self, i: usize) -> ConjugatePair {
        ConjugatePair {
            re: self.roots[i].re,
            im: self.roots[i].im.abs(),
        }
    }
}

/// The four roots of `c4 z^4 + c3 z^3 + c2 z^2 + c1 z + c0`.
pub fn quartic_roots(coef: &Coefficients) -> Result<[Complex<f64>; 4]> {
    if coef.c4 == 0.0 || !coef.c4.is_finite() {
        return Err(PearsonError::DegenerateQuartic { c4: coef.c4 });
    }
    let z = roots(&coef.quartic()).ok_or(PearsonError::RootsNotConverged {
        polynomial: "quartic denominator",
    })?;
    <[Complex<f64>; 4]>::try_from(z).map_err(|_| PearsonError::DegenerateQuartic { c4: coef.c4 })
}

fn is_equal(z1: Complex<f64>, z2: Complex<f64>, eps: f64) -> bool {
    (z1.re - z2.re).abs() <= eps && (z1.im - z2.im).abs() <= eps
}

fn is_conjugate(z1: Complex<f64>, z2: Complex<f64>, eps: f64) -> bool {
    is_equal(z1, z2.conj(), eps)
}

fn by_re_im(a: &Complex<f64>, b: &Complex<f64>) -> std::cmp::Ordering {
    a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im))
}

/// Split complex roots into upper-half-plane representatives, checking that every
/// one of them has a conjugate partner.
fn conjugate_uppers(complex: &[Complex<f64>], eps: f64) -> Result<Vec<Complex<f64>>> {
    let mut uppers: Vec<Complex<f64>> = complex.iter().copied().filter(|z| z.im > 0.0).collect();
    let lowers: Vec<Complex<f64>> = complex.iter().copied().filter(|z| z.im < 0.0).collect();
    if uppers.len() != lowers.len() {
        return Err(PearsonError::UnpairedRoots {
            detail: format!("{} roots above the real axis, {} below", uppers.len(), lowers.len()),
        });
    }

    let mut used = vec![false; lowers.len()];
    for u in &uppers {
        let partner = lowers
            .iter()
            .enumerate()
            .find(|(j, l)| !used[*j] && is_conjugate(*u, **l, eps))
            .map(|(j, _)| j);
        match partner {
            Some(j) => used[j] = true,
            None => {
                return Err(PearsonError::UnpairedRoots {
                    detail: format!("no conjugate for {u}"),
                });
            }
        }
    }

    uppers.sort_by(by_re_im);
    Ok(uppers)
}

/// Classify four roots and return them in canonical order.
///
/// A root is real when `|im| < eps`; equality and conjugacy are tested
/// component-wise with the same `eps`. The result does not depend on the order
/// in which the roots are supplied.
pub fn classify(z: [Complex<f64>; 4], eps: f64) -> Result<RootConfiguration> {
    let (real, complex): (Vec<Complex<f64>>, Vec<Complex<f64>>) =
        z.iter().copied().partition(|v| v.im.abs() < eps);

    let mut rt: Vec<f64> = real.iter().map(|v| v.re).collect();
    rt.sort_by(|a, b| a.total_cmp(b));
    let r = |x: f64| Complex::new(x, 0.0);

    let config = match complex.len() {
        4 => {
            let u = conjugate_uppers(&complex, eps)?;
            let kind = if is_equal(u[0], u[1], eps) {
                RootKind::RepeatedConjugatePair
            } else {
                RootKind::TwoConjugatePairs
            };
            RootConfiguration {
                kind,
                roots: [u[0], u[0].conj(), u[1], u[1].conj()],
            }
        }
        2 => {
            let u = conjugate_uppers(&complex, eps)?;
            let kind = if (rt[1] - rt[0]).abs() < eps {
                RootKind::DoubleRealWithPair
            } else {
                RootKind::TwoRealWithPair
            };
            RootConfiguration {
                kind,
                roots: [r(rt[0]), r(rt[1]), u[0], u[0].conj()],
            }
        }
        0 => {
            let eq01 = (rt[0] - rt[1]).abs() < eps;
            let eq12 = (rt[1] - rt[2]).abs() < eps;
            let eq23 = (rt[2] - rt[3]).abs() < eps;
            let (kind, order) = match (eq01, eq12, eq23) {
                (true, true, true) => (RootKind::QuadrupleReal, [0, 1, 2, 3]),
                (true, true, false) => (RootKind::TripleReal, [0, 1, 2, 3]),
                (false, true, true) => (RootKind::TripleReal, [1, 2, 3, 0]),
                (true, false, true) => (RootKind::TwoDoubleReal, [0, 1, 2, 3]),
                (true, false, false) => (RootKind::DoubleRealTwoSimple, [0, 1, 2, 3]),
                (false, true, false) => (RootKind::DoubleRealTwoSimple, [1, 2, 0, 3]),
                (false, false, true) => (RootKind::DoubleRealTwoSimple, [2, 3, 0, 1]),
                (false, false, false) => (RootKind::FourDistinctReal, [0, 1, 2, 3]),
            };
            RootConfiguration {
                kind,
                roots: order.map(|i| r(rt[i])),
            }
        }
        n => {
            return Err(PearsonError::UnpairedRoots {
                detail: format!("{n} non-real roots"),
            });
        }
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    fn re(x: f64) -> Complex<f64> {
        Complex::new(x, 0.0)
    }

    fn classify_kind(z: [Complex<f64>; 4]) -> RootKind {
        classify(z, 1e-10).unwrap().kind
    }

    #[test]
    fn complex_configurations() {
        let z = [c(1.0, 2.0), c(1.0, -2.0), c(1.0, -2.0), c(1.0, 2.0)];
        assert_eq!(classify_kind(z), RootKind::RepeatedConjugatePair);

        let z = [c(1.0, -2.0), c(-3.0, 0.5), c(1.0, 2.0), c(-3.0, -0.5)];
        let config = classify(z, 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::TwoConjugatePairs);
        assert_eq!(config.roots, [c(-3.0, 0.5), c(-3.0, -0.5), c(1.0, 2.0), c(1.0, -2.0)]);
    }

    #[test]
    fn mixed_configurations_sort_the_real_pair() {
        let z = [c(0.0, 1.0), re(2.0), c(0.0, -1.0), re(-1.0)];
        let config = classify(z, 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::TwoRealWithPair);
        assert_eq!(config.real(0), -1.0);
        assert_eq!(config.real(1), 2.0);
        assert_eq!(config.pair(2), ConjugatePair { re: 0.0, im: 1.0 });

        let z = [re(0.5), c(3.0, -1.0), re(0.5), c(3.0, 1.0)];
        assert_eq!(classify_kind(z), RootKind::DoubleRealWithPair);
    }

    #[test]
    fn all_real_configurations_and_their_orderings() {
        assert_eq!(classify_kind([re(2.0); 4]), RootKind::QuadrupleReal);

        let config = classify([re(5.0), re(-1.0), re(5.0), re(5.0)], 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::TripleReal);
        assert_eq!(config.roots, [re(5.0), re(5.0), re(5.0), re(-1.0)]);

        let config = classify([re(-1.0), re(5.0), re(-1.0), re(-1.0)], 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::TripleReal);
        assert_eq!(config.roots, [re(-1.0), re(-1.0), re(-1.0), re(5.0)]);

        let config = classify([re(3.0), re(-2.0), re(3.0), re(-2.0)], 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::TwoDoubleReal);
        assert_eq!(config.roots, [re(-2.0), re(-2.0), re(3.0), re(3.0)]);

        let config = classify([re(4.0), re(1.0), re(-2.0), re(1.0)], 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::DoubleRealTwoSimple);
        assert_eq!(config.roots, [re(1.0), re(1.0), re(-2.0), re(4.0)]);

        let config = classify([re(4.0), re(-3.0), re(1.0), re(-2.0)], 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::FourDistinctReal);
        assert_eq!(config.roots, [re(-3.0), re(-2.0), re(1.0), re(4.0)]);
    }

    #[test]
    fn tiny_imaginary_parts_count_as_real() {
        let z = [c(1.0, 1e-12), re(2.0), c(3.0, -1e-13), re(4.0)];
        assert_eq!(classify_kind(z), RootKind::FourDistinctReal);
    }

    #[test]
    fn unpaired_complex_roots_are_rejected() {
        let z = [c(1.0, 1.0), c(2.0, -1.0), re(0.0), re(1.0)];
        assert!(matches!(
            classify(z, 1e-10),
            Err(PearsonError::UnpairedRoots { .. })
        ));
        let z = [c(1.0, 1.0), re(3.0), re(0.0), re(1.0)];
        assert!(matches!(
            classify(z, 1e-10),
            Err(PearsonError::UnpairedRoots { .. })
        ));
    }

    #[test]
    fn classification_from_coefficients() {
        // 0.01 (x^2 - 4)(x^2 - 9)
        let coef = Coefficients::from_slice(&[0.1, 0.36, 0.0, -0.13, 0.0, 0.01]).unwrap();
        let config = RootConfiguration::from_coefficients(&coef, 1e-10).unwrap();
        assert_eq!(config.kind, RootKind::FourDistinctReal);
        for (i, want) in [-3.0, -2.0, 2.0, 3.0].into_iter().enumerate() {
            assert!((config.real(i) - want).abs() < 1e-10);
        }
    }

    fn from_analytic_roots(lead: f64, roots: [Complex<f64>; 4]) -> Result<RootConfiguration> {
        let v = crate::math::from_roots(lead, &roots);
        let coef = Coefficients {
            a: 0.0,
            c0: v[4],
            c1: v[3],
            c2: v[2],
            c3: v[1],
            c4: v[0],
        };
        RootConfiguration::from_coefficients(&coef, 1e-10)
    }

    #[test]
    fn every_kind_is_reachable_from_exact_coefficients() {
        let cases = [
            (RootKind::RepeatedConjugatePair, [c(0.0, 1.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, -1.0)]),
            (RootKind::RepeatedConjugatePair, [c(0.5, 1.5), c(0.5, -1.5), c(0.5, 1.5), c(0.5, -1.5)]),
            (RootKind::TwoConjugatePairs, [c(-1.0, 2.0), c(-1.0, -2.0), c(0.5, 0.5), c(0.5, -0.5)]),
            (RootKind::DoubleRealWithPair, [re(1.0), re(1.0), c(-1.0, 2.0), c(-1.0, -2.0)]),
            (RootKind::TwoRealWithPair, [re(-1.0), re(2.0), c(0.0, 1.0), c(0.0, -1.0)]),
            (RootKind::QuadrupleReal, [re(1.5); 4]),
            (RootKind::TripleReal, [re(-1.0), re(-1.0), re(-1.0), re(2.0)]),
            (RootKind::TwoDoubleReal, [re(-1.0), re(-1.0), re(3.0), re(3.0)]),
            (RootKind::DoubleRealTwoSimple, [re(0.5), re(0.5), re(-2.0), re(3.0)]),
            (RootKind::FourDistinctReal, [re(-3.0), re(-2.0), re(2.0), re(3.0)]),
        ];
        for lead in [1.0, 0.01, -0.2] {
            for (kind, roots) in cases {
                let config = from_analytic_roots(lead, roots)
                    .unwrap_or_else(|e| panic!("{kind:?} with c4 = {lead}: {e}"));
                assert_eq!(config.kind, kind, "c4 = {lead}, roots {:?}", config.roots);
                let want = classify(roots, 1e-10).unwrap();
                for (got, want) in config.roots.iter().zip(want.roots) {
                    assert!((got - want).norm() < 1e-8, "{kind:?}: {got} vs {want}");
                }
            }
        }
    }

    #[test]
    fn vanishing_quartic_term_is_degenerate() {
        let coef = Coefficients::from_slice(&[0.0, 1.0, 0.0, 0.5, 0.0, 0.0]).unwrap();
        assert_eq!(
            quartic_roots(&coef).unwrap_err(),
            PearsonError::DegenerateQuartic { c4: 0.0 }
        );
    }
}
