//! Partial-fraction decomposition of the log-density slope.

pub mod decompose;

pub use decompose::*;
