//! Crate-wide error type.
//!
//! Every failure in the moment → density → support pipeline is deterministic, so
//! nothing here is retried. Callers that only care about the broad class of a
//! failure can use [`PearsonError::category`].

use crate::domain::RootKind;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PearsonError>;

/// Broad failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Wrong number of inputs.
    InputShape,
    /// Inputs that cannot describe a real distribution or a valid request.
    Domain,
    /// A linear solve or polynomial step has no well-defined answer.
    NumericSingularity,
    /// The operation is not defined for this density configuration.
    UnsupportedConfiguration,
    /// The computed support does not contain the origin.
    InvariantViolation,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PearsonError {
    #[error("expected at least {expected} raw moments, got {found}")]
    TooFewMoments { expected: usize, found: usize },

    #[error("expected 6 coefficients (a, c0, c1, c2, c3, c4), got {found}")]
    CoefficientShape { found: usize },

    #[error("non-finite value in {input}")]
    NonFinite { input: &'static str },

    #[error("variance = {variance:.7} <= 0")]
    NonPositiveVariance { variance: f64 },

    #[error("kurtosis ({kurtosis:.7}) < skewness^2 + 1 (skewness = {skewness:.7})")]
    KurtosisBelowFloor { kurtosis: f64, skewness: f64 },

    #[error("bounds must satisfy lb < 0 < ub, got ({lower:.7}, {upper:.7})")]
    BoundsNotStraddlingZero { lower: f64, upper: f64 },

    #[error("tolerance `{name}` must be finite and positive, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("empty sample")]
    EmptySample,

    #[error("Newton bracket must satisfy lo <= hi, got [{lower}, {upper}]")]
    InvalidBracket { lower: f64, upper: f64 },

    #[error("grid needs a finite interval lower < upper and at least 2 points, got [{lower}, {upper}] with {points}")]
    InvalidGrid { lower: f64, upper: f64, points: usize },

    #[error("singular linear system while solving {stage}")]
    SingularSystem { stage: &'static str },

    #[error("leading coefficient of the quartic denominator vanishes (c4 = {c4})")]
    DegenerateQuartic { c4: f64 },

    #[error("eigenvalue iteration for the roots of the {polynomial} did not converge")]
    RootsNotConverged { polynomial: &'static str },

    #[error("roots cannot be grouped into conjugate pairs: {detail}")]
    UnpairedRoots { detail: String },

    #[error("{operation} is not supported: {reason}")]
    Unsupported {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} is not supported for root type {kind}")]
    UnsupportedKind {
        operation: &'static str,
        kind: RootKind,
    },

    #[error("(lb, ub) = ({lower}, {upper}) is not valid, 0 is not included")]
    ZeroOutsideSupport { lower: f64, upper: f64 },
}

impl PearsonError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PearsonError::TooFewMoments { .. } | PearsonError::CoefficientShape { .. } => {
                ErrorCategory::InputShape
            }
            PearsonError::NonFinite { .. }
            | PearsonError::NonPositiveVariance { .. }
            | PearsonError::KurtosisBelowFloor { .. }
            | PearsonError::BoundsNotStraddlingZero { .. }
            | PearsonError::InvalidTolerance { .. }
            | PearsonError::EmptySample
            | PearsonError::InvalidGrid { .. }
            | PearsonError::InvalidBracket { .. } => ErrorCategory::Domain,
            PearsonError::SingularSystem { .. }
            | PearsonError::DegenerateQuartic { .. }
            | PearsonError::RootsNotConverged { .. }
            | PearsonError::UnpairedRoots { .. } => ErrorCategory::NumericSingularity,
            PearsonError::Unsupported { .. } | PearsonError::UnsupportedKind { .. } => {
                ErrorCategory::UnsupportedConfiguration
            }
            PearsonError::ZeroOutsideSupport { .. } => ErrorCategory::InvariantViolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_offending_values() {
        let e = PearsonError::TooFewMoments {
            expected: 8,
            found: 5,
        };
        assert_eq!(e.to_string(), "expected at least 8 raw moments, got 5");

        let e = PearsonError::NonPositiveVariance { variance: -0.25 };
        assert_eq!(e.to_string(), "variance = -0.2500000 <= 0");

        let e = PearsonError::UnsupportedKind {
            operation: "pole bracketing",
            kind: RootKind::TwoConjugatePairs,
        };
        assert_eq!(
            e.to_string(),
            "pole bracketing is not supported for root type 42"
        );
    }

    #[test]
    fn categories_follow_the_taxonomy() {
        assert_eq!(
            PearsonError::CoefficientShape { found: 4 }.category(),
            ErrorCategory::InputShape
        );
        assert_eq!(
            PearsonError::KurtosisBelowFloor {
                kurtosis: 0.5,
                skewness: 0.0
            }
            .category(),
            ErrorCategory::Domain
        );
        assert_eq!(
            PearsonError::SingularSystem { stage: "ODE coefficients" }.category(),
            ErrorCategory::NumericSingularity
        );
        assert_eq!(
            PearsonError::ZeroOutsideSupport {
                lower: 0.5,
                upper: 2.0
            }
            .category(),
            ErrorCategory::InvariantViolation
        );
    }
}
