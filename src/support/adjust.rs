//! Final tightening of a support interval against the real poles.
//!
//! Newton bounds may overshoot a pole the density cannot cross; pulling each
//! bound back to just inside the nearest pole on its side of 0 fixes that.

use crate::domain::SupportInterval;
use crate::error::{PearsonError, Result};
use crate::pfd::PartialFractions;

/// Pull `support` inside the nearest real pole on each side of 0.
///
/// The nearest pole below 0 replaces the lower bound (`pole + offset`) when it
/// lies at or above it; the nearest pole at or above 0 replaces the upper bound
/// (`pole - offset`) when it lies at or below it. Densities without real poles
/// are returned unchanged.
pub fn adjust_bounds(
    support: SupportInterval,
    pfd: &PartialFractions,
    offset: f64,
) -> Result<SupportInterval> {
    if !support.contains_zero() {
        return Err(PearsonError::BoundsNotStraddlingZero {
            lower: support.lower,
            upper: support.upper,
        });
    }

    let poles = pfd.real_poles();
    let mut out = support;
    if let Some(p) = poles.iter().copied().filter(|p| *p < 0.0).last() {
        if p >= support.lower {
            out.lower = p + offset;
        }
    }
    if let Some(p) = poles.iter().copied().find(|p| *p >= 0.0) {
        if p <= support.upper {
            out.upper = p - offset;
        }
    }
    Ok(out)
}
