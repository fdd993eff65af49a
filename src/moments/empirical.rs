//! Raw sample moments, the simplest moment source.

use crate::error::{PearsonError, Result};

/// First `order` raw moments `(1/n) Σ x_i^k`, `k = 1..=order`.
pub fn raw_moments(samples: &[f64], order: usize) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Err(PearsonError::EmptySample);
    }
    if samples.iter().any(|v| !v.is_finite()) {
        return Err(PearsonError::NonFinite { input: "samples" });
    }

    let mut sums = vec![0.0; order];
    for &x in samples {
        let mut power = 1.0;
        for s in sums.iter_mut() {
            power *= x;
            *s += power;
        }
    }
    let n = samples.len() as f64;
    Ok(sums.into_iter().map(|s| s / n).collect())
}
