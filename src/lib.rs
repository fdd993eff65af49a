//! `pearson8` library crate.
//!
//! Fits a generalized Pearson-type density to the first eight raw moments of a
//! distribution. The density solves
//!
//! ```text
//! d(log p)/dx = -(x + a) / (c0 + c1 x + c2 x^2 + c3 x^3 + c4 x^4)
//! ```
//!
//! and is evaluated in closed form through a partial-fraction decomposition of
//! the right-hand side. [`fit::PearsonFit`] is the entry point:
//!
//! - `density(x)` / `derivative(x)`, peak-normalized so `density(-a) == 1`
//! - `support()`, the interval around 0 on which the density is usable
//!
//! Modules follow the pipeline order:
//!
//! - `moments` → `roots` → `pfd` → `density` → `support`
//! - `fit` ties them together, `report` formats the result

pub mod density;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod moments;
pub mod pfd;
pub mod report;
pub mod roots;
pub mod support;

pub use domain::{Coefficients, Extremum, RootKind, SupportInterval, Tolerances};
pub use error::{ErrorCategory, PearsonError, Result};
pub use fit::{PearsonFit, fit_many};
