//! Density evaluation.
//!
//! - closed-form log-density per root configuration
//! - peak/trough classification and inflection points
//! - tabulation on a grid for plotting collaborators

pub mod grid;
pub mod pdf;

pub use grid::*;
pub use pdf::*;
