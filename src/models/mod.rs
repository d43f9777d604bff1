//! Continuous piecewise-linear regression model.
//!
//! `SplineRegression` owns the fitted state; `FittedSpline` is the plain,
//! serializable parameter set that prediction reads.

pub mod model;

pub use model::*;
