//! End-to-end fit: raw moments (or explicit coefficients) to a density with a
//! computable support.
//!
//! Pipeline:
//!
//! 1. validity check on the standardized moments
//! 2. 6×6 moment system → ODE coefficients
//! 3. quartic roots → canonical root configuration
//! 4. partial fractions → closed-form log-density
//! 5. on demand: raw support bounds → pole tightening → final check

use tracing::debug;

use crate::density::{DensityGrid, DensityModel};
use crate::domain::{Coefficients, Extremum, RootKind, SupportInterval, Tolerances};
use crate::error::{PearsonError, Result};
use crate::moments::{MOMENT_COUNT, StandardizedMoments, coefficients_from_moments, implied_moments};
use crate::pfd::{PartialFractions, decompose};
use crate::roots::RootConfiguration;
use crate::support::{NewtonTrace, SupportSolver, adjust_bounds};

/// A fitted Pearson-type density.
#[derive(Debug, Clone)]
pub struct PearsonFit {
    moments: Option<StandardizedMoments>,
    roots: RootConfiguration,
    model: DensityModel,
    tol: Tolerances,
}

impl PearsonFit {
    /// Fit from at least eight raw moments with default tolerances.
    pub fn from_moments(raw: &[f64]) -> Result<Self> {
        Self::from_moments_with(raw, &Tolerances::default())
    }

    /// Fit from at least eight raw moments. Extra moments are ignored.
    pub fn from_moments_with(raw: &[f64], tol: &Tolerances) -> Result<Self> {
        tol.validate()?;
        if raw.len() < MOMENT_COUNT {
            return Err(PearsonError::TooFewMoments {
                expected: MOMENT_COUNT,
                found: raw.len(),
            });
        }
        let moments = StandardizedMoments::from_raw_with(raw, tol)?;
        let coef = coefficients_from_moments(raw)?;
        debug!(?moments, ?coef, "moment system solved");
        Self::build(coef, Some(moments), tol)
    }

    /// Build directly from `[a, c0, c1, c2, c3, c4]` with default tolerances.
    pub fn from_coefficients(values: &[f64]) -> Result<Self> {
        Self::from_coefficients_with(values, &Tolerances::default())
    }

    /// Build directly from `[a, c0, c1, c2, c3, c4]`, skipping the moment stages.
    pub fn from_coefficients_with(values: &[f64], tol: &Tolerances) -> Result<Self> {
        tol.validate()?;
        let coef = Coefficients::from_slice(values)?;
        Self::build(coef, None, tol)
    }

    fn build(coef: Coefficients, moments: Option<StandardizedMoments>, tol: &Tolerances) -> Result<Self> {
        let roots = RootConfiguration::from_coefficients(&coef, tol.root_eps)?;
        let pfd = decompose(&coef, &roots)?;
        let model = DensityModel::new(coef, pfd)?;
        debug!(
            kind = roots.kind.code(),
            extremum = model.extremum().display_name(),
            "density built"
        );
        Ok(Self {
            moments,
            roots,
            model,
            tol: *tol,
        })
    }

    /// Standardized moments of the input; `None` for coefficient-built fits.
    pub fn moments(&self) -> Option<&StandardizedMoments> {
        self.moments.as_ref()
    }

    pub fn coefficients(&self) -> &Coefficients {
        self.model.coefficients()
    }

    pub fn roots(&self) -> &RootConfiguration {
        &self.roots
    }

    pub fn root_kind(&self) -> RootKind {
        self.roots.kind
    }

    pub fn partial_fractions(&self) -> &PartialFractions {
        self.model.partial_fractions()
    }

    pub fn model(&self) -> &DensityModel {
        &self.model
    }

    pub fn extremum(&self) -> Extremum {
        self.model.extremum()
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    /// Peak-normalized density, `density(-a) == 1`.
    pub fn density(&self, x: f64) -> f64 {
        self.model.density(x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        self.model.derivative(x)
    }

    pub fn log_density(&self, x: f64) -> f64 {
        self.model.log_density(x)
    }

    /// Effective support; either side may be infinite.
    ///
    /// Raw bounds come from Newton (bell shapes) or the real poles, are
    /// tightened against the poles, and must end up with `lower < 0 < upper`.
    pub fn support(&self) -> Result<SupportInterval> {
        let raw = SupportSolver::new(&self.model, self.tol).solve()?;
        let support = adjust_bounds(raw, self.model.partial_fractions(), self.tol.adjust_offset)?;
        if !support.contains_zero() {
            return Err(PearsonError::ZeroOutsideSupport {
                lower: support.lower,
                upper: support.upper,
            });
        }
        debug!(lower = support.lower, upper = support.upper, "support");
        Ok(support)
    }

    /// Newton search for a stationary point of the density in `[lo, hi]`.
    pub fn stationary_point(&self, x0: f64, lo: f64, hi: f64) -> Result<NewtonTrace> {
        SupportSolver::new(&self.model, self.tol).stationary_point(x0, lo, hi)
    }

    /// Raw moments `m_1..m_8` reproduced by this fit's coefficients given `m1`, `m2`.
    pub fn implied_moments(&self, m1: f64, m2: f64) -> Result<[f64; MOMENT_COUNT]> {
        implied_moments(self.coefficients(), m1, m2)
    }

    /// Tabulate density and derivative on `n` points of `[lower, upper]`.
    pub fn grid(&self, lower: f64, upper: f64, n: usize) -> Result<DensityGrid> {
        DensityGrid::evaluate(&self.model, lower, upper, n)
    }
}
