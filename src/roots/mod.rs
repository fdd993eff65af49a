//! Root finding and canonical classification for the quartic denominator.

pub mod catalog;

pub use catalog::*;
