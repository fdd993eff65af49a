//! Support determination.
//!
//! - bracketed Newton iteration with a returned trace
//! - raw bounds from inflection points or real poles
//! - final tightening against the poles

pub mod adjust;
pub mod bounds;
pub mod newton;

pub use adjust::*;
pub use bounds::*;
pub use newton::*;
