//! Mathematical utilities: square linear solves and polynomial roots.

pub mod linear;
pub mod poly;

pub use linear::*;
pub use poly::*;
