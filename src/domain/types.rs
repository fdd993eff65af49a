//! Value types shared by every pipeline stage.
//!
//! Coefficients, root kinds, extrema and support intervals are all `Copy` and
//! derive serde, so a fit can be dumped with its tolerances and compared against
//! a later run. `Tolerances` is the one configuration object of the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PearsonError, Result};

/// Numeric tolerances used throughout the pipeline.
///
/// The defaults reproduce the reference behavior; tests override individual
/// fields to make edge cases reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Threshold for "imaginary part is zero", root equality and conjugacy.
    pub root_eps: f64,
    /// Offset from a pole used when the support is bracketed by poles.
    pub pole_offset: f64,
    /// Offset from a pole used by the final bound tightening pass.
    pub adjust_offset: f64,
    /// Newton step size below which the iteration is considered converged.
    pub newton_tol: f64,
    /// Hard cap on Newton iterations.
    pub newton_max_iter: usize,
    /// How far (in multiples of the inflection distance) the Newton bracket
    /// extends beyond the starting point.
    pub bracket_extrapolation: f64,
    /// Standard deviations below this trigger a reliability warning.
    pub min_std: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            root_eps: 1e-10,
            pole_offset: 1e-7,
            adjust_offset: 1e-5,
            newton_tol: 1e-5,
            newton_max_iter: 10,
            bracket_extrapolation: 10.0,
            min_std: 1e-5,
        }
    }
}

impl Tolerances {
    /// Reject non-finite or non-positive settings.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("root_eps", self.root_eps),
            ("pole_offset", self.pole_offset),
            ("adjust_offset", self.adjust_offset),
            ("newton_tol", self.newton_tol),
            ("bracket_extrapolation", self.bracket_extrapolation),
            ("min_std", self.min_std),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(PearsonError::InvalidTolerance { name, value });
            }
        }
        if self.newton_max_iter == 0 {
            return Err(PearsonError::InvalidTolerance {
                name: "newton_max_iter",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Coefficients of the governing ODE
///
/// ```text
/// d(log p)/dx = -(x + a) / (c0 + c1 x + c2 x^2 + c3 x^3 + c4 x^4)
/// ```
///
/// `x = -a` is the mode (or anti-mode) of the density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f64,
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
}

impl Coefficients {
    /// Build from `[a, c0, c1, c2, c3, c4]`.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let [a, c0, c1, c2, c3, c4] = values else {
            return Err(PearsonError::CoefficientShape {
                found: values.len(),
            });
        };
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PearsonError::NonFinite {
                input: "coefficients",
            });
        }
        Ok(Self {
            a: *a,
            c0: *c0,
            c1: *c1,
            c2: *c2,
            c3: *c3,
            c4: *c4,
        })
    }

    pub fn to_array(self) -> [f64; 6] {
        [self.a, self.c0, self.c1, self.c2, self.c3, self.c4]
    }

    /// Location of the mode/anti-mode.
    pub fn mode(&self) -> f64 {
        -self.a
    }

    /// Quartic denominator coefficients, highest power first.
    pub fn quartic(&self) -> [f64; 5] {
        [self.c4, self.c3, self.c2, self.c1, self.c0]
    }

    /// `c0 + c1 x + c2 x^2 + c3 x^3 + c4 x^4`.
    pub fn denominator(&self, x: f64) -> f64 {
        (((self.c4 * x + self.c3) * x + self.c2) * x + self.c1) * x + self.c0
    }

    /// `(x + a) / denominator(x)`, i.e. minus the log-density slope.
    pub fn ratio(&self, x: f64) -> f64 {
        (x + self.a) / self.denominator(x)
    }

    /// Numerator of `p''(x) / p(x)` (up to the positive factor `denominator(x)^2`),
    /// highest power first:
    ///
    /// ```text
    /// P(x) = 3c4 x^4 + (2c3 + 4c4 a) x^3 + (c2 + 3c3 a + 1) x^2 + 2a(c2 + 1) x + (a^2 + c1 a - c0)
    /// ```
    pub fn second_derivative_numerator(&self) -> [f64; 5] {
        let Self {
            a,
            c0,
            c1,
            c2,
            c3,
            c4,
        } = *self;
        [
            3.0 * c4,
            2.0 * c3 + 4.0 * c4 * a,
            c2 + 3.0 * c3 * a + 1.0,
            2.0 * a * (c2 + 1.0),
            a * a + c1 * a - c0,
        ]
    }
}

/// Canonical configuration of the four roots of the quartic denominator.
///
/// The numeric codes (41..49) are the historical type tags and are kept for
/// reporting and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    /// (x1, x2) = (x3, x4): one complex-conjugate pair with multiplicity two.
    RepeatedConjugatePair,
    /// Two distinct complex-conjugate pairs.
    TwoConjugatePairs,
    /// x1 = x2 real, plus one conjugate pair.
    DoubleRealWithPair,
    /// x1 < x2 real, plus one conjugate pair.
    TwoRealWithPair,
    /// x1 = x2 = x3 = x4.
    QuadrupleReal,
    /// x1 = x2 = x3 != x4.
    TripleReal,
    /// x1 = x2 != x3 = x4.
    TwoDoubleReal,
    /// x1 = x2, with x3 and x4 simple and all three values distinct.
    DoubleRealTwoSimple,
    /// x1 < x2 < x3 < x4.
    FourDistinctReal,
}

impl RootKind {
    pub const ALL: [RootKind; 9] = [
        RootKind::RepeatedConjugatePair,
        RootKind::TwoConjugatePairs,
        RootKind::DoubleRealWithPair,
        RootKind::TwoRealWithPair,
        RootKind::QuadrupleReal,
        RootKind::TripleReal,
        RootKind::TwoDoubleReal,
        RootKind::DoubleRealTwoSimple,
        RootKind::FourDistinctReal,
    ];

    /// Historical type tag.
    pub fn code(self) -> u8 {
        match self {
            RootKind::RepeatedConjugatePair => 41,
            RootKind::TwoConjugatePairs => 42,
            RootKind::DoubleRealWithPair => 43,
            RootKind::TwoRealWithPair => 44,
            RootKind::QuadrupleReal => 45,
            RootKind::TripleReal => 46,
            RootKind::TwoDoubleReal => 47,
            RootKind::DoubleRealTwoSimple => 48,
            RootKind::FourDistinctReal => 49,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        RootKind::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RootKind::RepeatedConjugatePair => "repeated conjugate pair",
            RootKind::TwoConjugatePairs => "two conjugate pairs",
            RootKind::DoubleRealWithPair => "double real + conjugate pair",
            RootKind::TwoRealWithPair => "two real + conjugate pair",
            RootKind::QuadrupleReal => "quadruple real",
            RootKind::TripleReal => "triple real + simple real",
            RootKind::TwoDoubleReal => "two double real",
            RootKind::DoubleRealTwoSimple => "double real + two simple real",
            RootKind::FourDistinctReal => "four distinct real",
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A complex-conjugate root pair `re ± i·im`, stored with `im > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConjugatePair {
    pub re: f64,
    pub im: f64,
}

impl ConjugatePair {
    /// `-2 re`: linear coefficient of the quadratic factor `x^2 + p x + q`.
    pub fn p(&self) -> f64 {
        -2.0 * self.re
    }

    /// `re^2 + im^2`: constant coefficient of the quadratic factor.
    pub fn q(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `(x - re)^2 + im^2`.
    pub fn quadratic(&self, x: f64) -> f64 {
        let t = x - self.re;
        t * t + self.im * self.im
    }
}

/// Whether `x = -a` is a maximum or a minimum of the density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremum {
    /// Local maximum (bell-shaped around `-a`).
    Peak,
    /// Local minimum (U-shaped around `-a`).
    Trough,
    /// The second-derivative test is inconclusive.
    Undetermined,
}

impl Extremum {
    pub fn is_peak(self) -> bool {
        self == Extremum::Peak
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Extremum::Peak => "peak",
            Extremum::Trough => "trough",
            Extremum::Undetermined => "undetermined",
        }
    }
}

/// Effective support `(lower, upper)`; either side may be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportInterval {
    pub lower: f64,
    pub upper: f64,
}

impl SupportInterval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `lower < 0 < upper`.
    pub fn contains_zero(&self) -> bool {
        self.lower < 0.0 && 0.0 < self.upper
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}
