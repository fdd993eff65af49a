//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - numeric configuration (`Tolerances`)
//! - ODE coefficients (`Coefficients`)
//! - root configuration tags (`RootKind`, `ConjugatePair`)
//! - fit outputs (`Extremum`, `SupportInterval`)

pub mod types;

pub use types::*;
