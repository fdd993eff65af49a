//! Moment handling: validity checks, the moment → coefficient solve, and a
//! sample-based moment source.

pub mod coefficients;
pub mod empirical;
pub mod standardized;

pub use coefficients::*;
pub use empirical::*;
pub use standardized::*;
