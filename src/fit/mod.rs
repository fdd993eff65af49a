//! Fitting orchestration.
//!
//! Responsibilities:
//!
//! - run the moment → coefficient → roots → density pipeline for one input
//! - compute the support on demand
//! - fit many independent inputs in parallel

pub mod batch;
pub mod pearson;

pub use batch::*;
pub use pearson::*;
