//! Segment fitting.
//!
//! Responsibilities:
//!
//! - build zones from cutpoints and the data range
//! - validate observations and cutpoints
//! - fit an independent least squares line per zone

pub mod fitter;
pub mod zones;

pub use fitter::*;
pub use zones::*;
