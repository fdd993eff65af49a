//! Standardized moments (mean, variance, skewness, kurtosis) from raw moments.
//!
//! Besides being reported, these are the gatekeeper of the pipeline: any real
//! distribution satisfies `kurtosis >= skewness^2 + 1`, so a raw moment vector
//! that violates it cannot be fitted.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Tolerances;
use crate::error::{PearsonError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardizedMoments {
    pub mean: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl StandardizedMoments {
    /// Compute from the first four raw moments using default tolerances.
    pub fn from_raw(raw: &[f64]) -> Result<Self> {
        Self::from_raw_with(raw, &Tolerances::default())
    }

    /// Compute from the first four raw moments.
    ///
    /// Fails if fewer than four moments are given, if the variance is not
    /// positive, or if the kurtosis is below `skewness^2 + 1`.
    pub fn from_raw_with(raw: &[f64], tol: &Tolerances) -> Result<Self> {
        let [m1, m2, m3, m4, ..] = raw else {
            return Err(PearsonError::TooFewMoments {
                expected: 4,
                found: raw.len(),
            });
        };
        let (m1, m2, m3, m4) = (*m1, *m2, *m3, *m4);
        if ![m1, m2, m3, m4].iter().all(|v| v.is_finite()) {
            return Err(PearsonError::NonFinite {
                input: "raw moments",
            });
        }

        let variance = m2 - m1 * m1;
        if variance <= 0.0 {
            return Err(PearsonError::NonPositiveVariance { variance });
        }
        let std = variance.sqrt();
        if std < tol.min_std {
            warn!(std, "standard deviation is tiny; skewness and kurtosis may not be reliable");
        }

        let skewness = (m3 - 3.0 * m1 * m2 + 2.0 * m1.powi(3)) / std.powi(3);
        let kurtosis =
            (m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1.powi(4)) / std.powi(4);
        if kurtosis < skewness * skewness + 1.0 {
            return Err(PearsonError::KurtosisBelowFloor { kurtosis, skewness });
        }

        Ok(Self {
            mean: m1,
            variance,
            skewness,
            kurtosis,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Excess kurtosis (`kurtosis - 3`).
    pub fn excess_kurtosis(&self) -> f64 {
        self.kurtosis - 3.0
    }
}
