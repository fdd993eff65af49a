//! Peak-normalized density built from a partial-fraction decomposition.
//!
//! Integrating `d(log p)/dx = -ratio(x)` term by term gives one closed form per
//! root configuration. The density is scaled so that `p(-a) = 1`; it is not
//! normalized to unit mass.

use serde::Serialize;
use tracing::warn;

use crate::domain::{Coefficients, ConjugatePair, Extremum};
use crate::error::{PearsonError, Result};
use crate::math::{horner, real_roots};
use crate::pfd::PartialFractions;

/// `-∫ (a x + b) / ((x - re)^2 + im^2) dx`.
fn pair_log(pair: &ConjugatePair, a: f64, b: f64, x: f64) -> f64 {
    let (t, m) = (x - pair.re, pair.im);
    let b = b + a * pair.re;
    -a * (t * t + m * m).ln() / 2.0 - (b / m) * (t / m).atan()
}

/// Unscaled log-density: the antiderivative of `-pfd.ratio(x)`.
pub fn log_kernel(pfd: &PartialFractions, x: f64) -> f64 {
    match *pfd {
        PartialFractions::RepeatedConjugatePair { pair, a1, b1 } => {
            let (t, m) = (x - pair.re, pair.im);
            let b = b1 + a1 * pair.re;
            let q = t * t + m * m;
            a1 / (2.0 * q) - (b / (2.0 * m * m)) * (t / q) - (b / (2.0 * m.powi(3))) * (t / m).atan()
        }
        PartialFractions::TwoConjugatePairs {
            pair1,
            a1,
            b1,
            pair2,
            a2,
            b2,
        } => pair_log(&pair1, a1, b1, x) + pair_log(&pair2, a2, b2, x),
        PartialFractions::DoubleRealWithPair {
            x1,
            a1,
            a2,
            pair,
            a3,
            b3,
        } => -a1 * (x - x1).abs().ln() + a2 / (x - x1) + pair_log(&pair, a3, b3, x),
        PartialFractions::TwoRealWithPair {
            x1,
            a1,
            x2,
            a2,
            pair,
            a3,
            b3,
        } => {
            -a1 * (x - x1).abs().ln() - a2 * (x - x2).abs().ln() + pair_log(&pair, a3, b3, x)
        }
        PartialFractions::QuadrupleReal { x1, a3, a4 } => {
            let d = x - x1;
            a3 / (2.0 * d * d) + a4 / (3.0 * d.powi(3))
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
            -a1 * d.abs().ln() + a2 / d + a3 / (2.0 * d * d) - a4 * (x - x4).abs().ln()
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
            -a1 * d1.abs().ln() + a2 / d1 - a3 * d3.abs().ln() + a4 / d3
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
            -a1 * d.abs().ln() + a2 / d - a3 * (x - x3).abs().ln() - a4 * (x - x4).abs().ln()
        }
        PartialFractions::FourDistinctReal { x: poles, a } => poles
            .iter()
            .zip(a.iter())
            .map(|(xi, ai)| -ai * (x - xi).abs().ln())
            .sum(),
    }
}

/// The density `p(x)` together with the data needed to evaluate it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityModel {
    coef: Coefficients,
    pfd: PartialFractions,
    scale: f64,
    extremum: Extremum,
}

impl DensityModel {
    pub fn new(coef: Coefficients, pfd: PartialFractions) -> Result<Self> {
        let mode = coef.mode();
        let scale = log_kernel(&pfd, mode);
        if !scale.is_finite() {
            return Err(PearsonError::NonFinite {
                input: "log-density at x = -a",
            });
        }

        let curvature = horner(&coef.second_derivative_numerator(), mode);
        let extremum = if curvature < 0.0 {
            Extremum::Peak
        } else if curvature > 0.0 {
            Extremum::Trough
        } else {
            warn!(mode, "second-derivative test at x = -a is inconclusive");
            Extremum::Undetermined
        };

        Ok(Self {
            coef,
            pfd,
            scale,
            extremum,
        })
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coef
    }

    pub fn partial_fractions(&self) -> &PartialFractions {
        &self.pfd
    }

    /// `log p(-a)` before scaling.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn extremum(&self) -> Extremum {
        self.extremum
    }

    pub fn is_peak(&self) -> bool {
        self.extremum.is_peak()
    }

    /// `log p(x)`, with `log p(-a) = 0`.
    pub fn log_density(&self, x: f64) -> f64 {
        log_kernel(&self.pfd, x) - self.scale
    }

    pub fn density(&self, x: f64) -> f64 {
        self.log_density(x).exp()
    }

    /// `p'(x) = -((x + a) / denominator(x)) p(x)`.
    pub fn derivative(&self, x: f64) -> f64 {
        -self.coef.ratio(x) * self.density(x)
    }

    /// `p(x) / p'(x) = -denominator(x) / (a + x)`.
    pub fn pdf_over_dpdf(&self, x: f64) -> f64 {
        -self.coef.denominator(x) / (self.coef.a + x)
    }

    /// `p'(x) / p''(x) = -(a + x) denominator(x) / P(x)`.
    pub fn dpdf_over_ddpdf(&self, x: f64) -> f64 {
        let numerator = horner(&self.coef.second_derivative_numerator(), x);
        -(self.coef.a + x) * self.coef.denominator(x) / numerator
    }

    /// Real roots of the second-derivative numerator `P(x)`, ascending.
    pub fn second_derivative_roots(&self, eps: f64) -> Result<Vec<f64>> {
        real_roots(&self.coef.second_derivative_numerator(), eps).ok_or(
            PearsonError::RootsNotConverged {
                polynomial: "second-derivative numerator",
            },
        )
    }

    /// Nearest inflection point on each side of the mode.
    ///
    /// Only defined at a peak. A side without an inflection root is `None`.
    pub fn inflection_bracket(&self, eps: f64) -> Result<(Option<f64>, Option<f64>)> {
        if !self.is_peak() {
            return Err(PearsonError::Unsupported {
                operation: "inflection bracket",
                reason: format!("x = -a is a {}", self.extremum.display_name()),
            });
        }
        let mode = self.coef.mode();
        let roots = self.second_derivative_roots(eps)?;
        let left = roots.iter().copied().filter(|r| *r < mode).last();
        let right = roots.iter().copied().find(|r| *r > mode);
        Ok((left, right))
    }
}
