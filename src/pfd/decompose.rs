//! Partial-fraction decomposition of `(x + a) / denominator(x)`.
//!
//! Term forms: `A/(x - x_i)` for a simple real root, extra `A/(x - x_i)^k` up to
//! the multiplicity for repeated roots, and `(A x + B)/((x - re)^2 + im^2)` for a
//! conjugate pair. Each configuration matches polynomial coefficients of the
//! numerator against `[0, 0, 1/c4, a/c4]` (highest power first) and solves the
//! resulting 4×4 system; 41 and 45 have closed forms.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Coefficients, ConjugatePair, RootKind};
use crate::error::{PearsonError, Result};
use crate::math::solve_rows;
use crate::roots::RootConfiguration;

/// Decomposed form of `(x + a) / denominator(x)`, one variant per root kind.
///
/// Amplitude names follow the term they multiply: `a1` belongs to the first
/// pole or pair, `a2` to the second power (or second pole), and so on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartialFractions {
    /// `(a1 x + b1) / Q(x)^2`.
    RepeatedConjugatePair { pair: ConjugatePair, a1: f64, b1: f64 },
    /// `(a1 x + b1)/Q1 + (a2 x + b2)/Q2`.
    TwoConjugatePairs {
        pair1: ConjugatePair,
        a1: f64,
        b1: f64,
        pair2: ConjugatePair,
        a2: f64,
        b2: f64,
    },
    /// `a1/(x-x1) + a2/(x-x1)^2 + (a3 x + b3)/Q`.
    DoubleRealWithPair {
        x1: f64,
        a1: f64,
        a2: f64,
        pair: ConjugatePair,
        a3: f64,
        b3: f64,
    },
    /// `a1/(x-x1) + a2/(x-x2) + (a3 x + b3)/Q`.
    TwoRealWithPair {
        x1: f64,
        a1: f64,
        x2: f64,
        a2: f64,
        pair: ConjugatePair,
        a3: f64,
        b3: f64,
    },
    /// `a3/(x-x1)^3 + a4/(x-x1)^4`.
    QuadrupleReal { x1: f64, a3: f64, a4: f64 },
    /// `a1/(x-x1) + a2/(x-x1)^2 + a3/(x-x1)^3 + a4/(x-x4)`.
    TripleReal {
        x1: f64,
        a1: f64,
        a2: f64,
        a3: f64,
        x4: f64,
        a4: f64,
    },
    /// `a1/(x-x1) + a2/(x-x1)^2 + a3/(x-x3) + a4/(x-x3)^2`.
    TwoDoubleReal {
        x1: f64,
        a1: f64,
        a2: f64,
        x3: f64,
        a3: f64,
        a4: f64,
    },
    /// `a1/(x-x1) + a2/(x-x1)^2 + a3/(x-x3) + a4/(x-x4)`.
    DoubleRealTwoSimple {
        x1: f64,
        a1: f64,
        a2: f64,
        x3: f64,
        a3: f64,
        x4: f64,
        a4: f64,
    },
    /// `Σ a[i]/(x - x[i])`, poles ascending.
    FourDistinctReal { x: [f64; 4], a: [f64; 4] },
}

/// Decompose `(x + a) / denominator(x)` for an already classified root set.
pub fn decompose(coef: &Coefficients, config: &RootConfiguration) -> Result<PartialFractions> {
    if coef.c4 == 0.0 {
        return Err(PearsonError::DegenerateQuartic { c4: coef.c4 });
    }
    let rhs = [0.0, 0.0, 1.0 / coef.c4, coef.a / coef.c4];
    let solve = |rows: [[f64; 4]; 4]| {
        solve_rows(rows, rhs).ok_or(PearsonError::SingularSystem {
            stage: "partial fractions",
        })
    };

    let pfd = match config.kind {
        RootKind::RepeatedConjugatePair => PartialFractions::RepeatedConjugatePair {
            pair: config.pair(0),
            a1: 1.0 / coef.c4,
            b1: coef.a / coef.c4,
        },
        RootKind::TwoConjugatePairs => {
            let (pair1, pair2) = (config.pair(0), config.pair(2));
            let (p1, q1, p2, q2) = (pair1.p(), pair1.q(), pair2.p(), pair2.q());
            let [a1, b1, a2, b2] = solve([
                [1.0, 0.0, 1.0, 0.0],
                [p2, 1.0, p1, 1.0],
                [q2, p2, q1, p1],
                [0.0, q2, 0.0, q1],
            ])?;
            PartialFractions::TwoConjugatePairs {
                pair1,
                a1,
                b1,
                pair2,
                a2,
                b2,
            }
        }
        RootKind::DoubleRealWithPair => {
            let (x1, pair) = (config.real(0), config.pair(2));
            let (p, q) = (pair.p(), pair.q());
            let [a1, a2, a3, b3] = solve([
                [1.0, 0.0, 1.0, 0.0],
                [p - x1, 1.0, -2.0 * x1, 1.0],
                [q - x1 * p, p, x1 * x1, -2.0 * x1],
                [-x1 * q, q, 0.0, x1 * x1],
            ])?;
            PartialFractions::DoubleRealWithPair {
                x1,
                a1,
                a2,
                pair,
                a3,
                b3,
            }
        }
        RootKind::TwoRealWithPair => {
            let (x1, x2, pair) = (config.real(0), config.real(1), config.pair(2));
            let (p, q) = (pair.p(), pair.q());
            let [a1, a2, a3, b3] = solve([
                [1.0, 1.0, 1.0, 0.0],
                [p - x2, p - x1, -(x1 + x2), 1.0],
                [q - x2 * p, q - x1 * p, x1 * x2, -(x1 + x2)],
                [-x2 * q, -x1 * q, 0.0, x1 * x2],
            ])?;
            PartialFractions::TwoRealWithPair {
                x1,
                a1,
                x2,
                a2,
                pair,
                a3,
                b3,
            }
        }
        RootKind::QuadrupleReal => {
            let x1 = config.real(0);
            PartialFractions::QuadrupleReal {
                x1,
                a3: 1.0 / coef.c4,
                a4: (coef.a + x1) / coef.c4,
            }
        }
        RootKind::TripleReal => {
            let (x1, x4) = (config.real(0), config.real(3));
            let [a1, a2, a3, a4] = solve([
                [1.0, 0.0, 0.0, 1.0],
                [-(2.0 * x1 + x4), 1.0, 0.0, -3.0 * x1],
                [x1 * x1 + 2.0 * x1 * x4, -(x1 + x4), 1.0, 3.0 * x1 * x1],
                [-x1 * x1 * x4, x1 * x4, -x4, -x1 * x1 * x1],
            ])?;
            PartialFractions::TripleReal {
                x1,
                a1,
                a2,
                a3,
                x4,
                a4,
            }
        }
        RootKind::TwoDoubleReal => {
            let (x1, x3) = (config.real(0), config.real(2));
            let [a1, a2, a3, a4] = solve([
                [1.0, 0.0, 1.0, 0.0],
                [-(x1 + 2.0 * x3), 1.0, -(x3 + 2.0 * x1), 1.0],
                [2.0 * x1 * x3 + x3 * x3, -2.0 * x3, 2.0 * x1 * x3 + x1 * x1, -2.0 * x1],
                [-x1 * x3 * x3, x3 * x3, -x3 * x1 * x1, x1 * x1],
            ])?;
            PartialFractions::TwoDoubleReal {
                x1,
                a1,
                a2,
                x3,
                a3,
                a4,
            }
        }
        RootKind::DoubleRealTwoSimple => {
            let (x1, x3, x4) = (config.real(0), config.real(2), config.real(3));
            let [a1, a2, a3, a4] = solve([
                [1.0, 0.0, 1.0, 1.0],
                [-(x1 + x3 + x4), 1.0, -(2.0 * x1 + x4), -(2.0 * x1 + x3)],
                [
                    x3 * x4 + x1 * (x3 + x4),
                    -(x3 + x4),
                    x1 * x1 + 2.0 * x1 * x4,
                    x1 * x1 + 2.0 * x1 * x3,
                ],
                [-x1 * x3 * x4, x3 * x4, -x1 * x1 * x4, -x1 * x1 * x3],
            ])?;
            PartialFractions::DoubleRealTwoSimple {
                x1,
                a1,
                a2,
                x3,
                a3,
                x4,
                a4,
            }
        }
        RootKind::FourDistinctReal => {
            let x = [config.real(0), config.real(1), config.real(2), config.real(3)];
            let [x1, x2, x3, x4] = x;
            let a = solve([
                [1.0, 1.0, 1.0, 1.0],
                [
                    -(x2 + x3 + x4),
                    -(x1 + x3 + x4),
                    -(x1 + x2 + x4),
                    -(x1 + x2 + x3),
                ],
                [
                    x3 * x4 + x2 * (x3 + x4),
                    x3 * x4 + x1 * (x3 + x4),
                    x1 * x2 + x4 * (x1 + x2),
                    x1 * x2 + x3 * (x1 + x2),
                ],
                [-x2 * x3 * x4, -x1 * x3 * x4, -x1 * x2 * x4, -x1 * x2 * x3],
            ])?;
            PartialFractions::FourDistinctReal { x, a }
        }
    };
    debug!(kind = config.kind.code(), ?pfd, "partial fractions");
    Ok(pfd)
}

fn pair_term(pair: &ConjugatePair, a: f64, b: f64, x: f64) -> f64 {
    (a * x + b) / pair.quadratic(x)
}

impl PartialFractions {
    pub fn kind(&self) -> RootKind {
        match self {
            PartialFractions::RepeatedConjugatePair { .. } => RootKind::RepeatedConjugatePair,
            PartialFractions::TwoConjugatePairs { .. } => RootKind::TwoConjugatePairs,
            PartialFractions::DoubleRealWithPair { .. } => RootKind::DoubleRealWithPair,
            PartialFractions::TwoRealWithPair { .. } => RootKind::TwoRealWithPair,
            PartialFractions::QuadrupleReal { .. } => RootKind::QuadrupleReal,
            PartialFractions::TripleReal { .. } => RootKind::TripleReal,
            PartialFractions::TwoDoubleReal { .. } => RootKind::TwoDoubleReal,
            PartialFractions::DoubleRealTwoSimple { .. } => RootKind::DoubleRealTwoSimple,
            PartialFractions::FourDistinctReal { .. } => RootKind::FourDistinctReal,
        }
    }

    /// Evaluate the decomposed sum at `x`; equals `(x + a) / denominator(x)`
    /// away from the poles.
    pub fn ratio(&self, x: f64) -> f64 {
        match *self {
            PartialFractions::RepeatedConjugatePair { pair, a1, b1 } => {
                let q = pair.quadratic(x);
                (a1 * x + b1) / (q * q)
            }
            PartialFractions::TwoConjugatePairs {
                pair1,
                a1,
                b1,
                pair2,
                a2,
                b2,
            } => pair_term(&pair1, a1, b1, x) + pair_term(&pair2, a2, b2, x),
            PartialFractions::DoubleRealWithPair {
                x1,
                a1,
                a2,
                pair,
                a3,
                b3,
            } => {
                let d = x - x1;
                a1 / d + a2 / (d * d) + pair_term(&pair, a3, b3, x)
            }
            PartialFractions::TwoRealWithPair {
                x1,
                a1,
                x2,
                a2,
                pair,
                a3,
                b3,
            } => a1 / (x - x1) + a2 / (x - x2) + pair_term(&pair, a3, b3, x),
            PartialFractions::QuadrupleReal { x1, a3, a4 } => {
                let d = x - x1;
                a3 / d.powi(3) + a4 / d.powi(4)
            }
            PartialFractions::TripleReal {
                x1,
                a1,
                a2,
                a3,
                x4,
                a4,
            } => {
                let d = x - x1;
                a1 / d + a2 / (d * d) + a3 / d.powi(3) + a4 / (x - x4)
            }
            PartialFractions::TwoDoubleReal {
                x1,
                a1,
                a2,
                x3,
                a3,
                a4,
            } => {
                let (d1, d3) = (x - x1, x - x3);
                a1 / d1 + a2 / (d1 * d1) + a3 / d3 + a4 / (d3 * d3)
            }
            PartialFractions::DoubleRealTwoSimple {
                x1,
                a1,
                a2,
                x3,
                a3,
                x4,
                a4,
            } => {
                let d = x - x1;
                a1 / d + a2 / (d * d) + a3 / (x - x3) + a4 / (x - x4)
            }
            PartialFractions::FourDistinctReal { x: poles, a } => poles
                .iter()
                .zip(a.iter())
                .map(|(xi, ai)| ai / (x - xi))
                .sum(),
        }
    }

    /// Distinct real poles, ascending. Empty when every root is complex.
    pub fn real_poles(&self) -> Vec<f64> {
        let mut poles = match *self {
            PartialFractions::RepeatedConjugatePair { .. }
            | PartialFractions::TwoConjugatePairs { .. } => Vec::new(),
            PartialFractions::DoubleRealWithPair { x1, .. }
            | PartialFractions::QuadrupleReal { x1, .. } => vec![x1],
            PartialFractions::TwoRealWithPair { x1, x2, .. } => vec![x1, x2],
            PartialFractions::TripleReal { x1, x4, .. } => vec![x1, x4],
            PartialFractions::TwoDoubleReal { x1, x3, .. } => vec![x1, x3],
            PartialFractions::DoubleRealTwoSimple { x1, x3, x4, .. } => vec![x1, x3, x4],
            PartialFractions::FourDistinctReal { x, .. } => x.to_vec(),
        };
        poles.sort_by(|a, b| a.total_cmp(b));
        poles
    }
}
