//! Tabulated density on an equally spaced grid, plus a trapezoid CDF.

use serde::Serialize;

use crate::density::DensityModel;
use crate::error::{PearsonError, Result};

/// Density and derivative sampled on `[lower, upper]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityGrid {
    pub xs: Vec<f64>,
    pub pdf: Vec<f64>,
    pub dpdf: Vec<f64>,
}

impl DensityGrid {
    /// Sample `n >= 2` equally spaced points including both end points.
    pub fn evaluate(model: &DensityModel, lower: f64, upper: f64, n: usize) -> Result<Self> {
        if n < 2 || !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(PearsonError::InvalidGrid {
                lower,
                upper,
                points: n,
            });
        }
        let step = (upper - lower) / (n - 1) as f64;
        let xs: Vec<f64> = (0..n)
            .map(|i| if i == n - 1 { upper } else { lower + step * i as f64 })
            .collect();
        let pdf = xs.iter().map(|&x| model.density(x)).collect();
        let dpdf = xs.iter().map(|&x| model.derivative(x)).collect();
        Ok(Self { xs, pdf, dpdf })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Running trapezoid integral of the density, starting at 0.
    pub fn cumulative(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len());
        let mut acc = 0.0;
        out.push(acc);
        for i in 1..self.len() {
            acc += 0.5 * (self.pdf[i] + self.pdf[i - 1]) * (self.xs[i] - self.xs[i - 1]);
            out.push(acc);
        }
        out
    }

    /// [`cumulative`](Self::cumulative) divided by its last value, so it ends at 1.
    ///
    /// Returns the raw cumulative values if the total mass is zero or not finite.
    pub fn normalized_cdf(&self) -> Vec<f64> {
        let cdf = self.cumulative();
        let total = cdf.last().copied().unwrap_or(0.0);
        if total > 0.0 && total.is_finite() {
            cdf.into_iter().map(|v| v / total).collect()
        } else {
            cdf
        }
    }
}
