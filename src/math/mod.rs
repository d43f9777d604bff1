//! Mathematical utilities: hinge basis and least squares line fitting.

pub mod hinge;
pub mod ols;

pub use hinge::*;
pub use ols::*;
