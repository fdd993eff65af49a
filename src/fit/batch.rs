//! Parallel fitting of independent moment vectors.

use rayon::prelude::*;

use crate::domain::Tolerances;
use crate::error::Result;
use crate::fit::PearsonFit;

/// Fit every moment vector in parallel. Results keep the input order; one
/// failing vector does not affect the others.
pub fn fit_many(moment_sets: &[Vec<f64>], tol: &Tolerances) -> Vec<Result<PearsonFit>> {
    moment_sets
        .par_iter()
        .map(|raw| PearsonFit::from_moments_with(raw, tol))
        .collect()
}
