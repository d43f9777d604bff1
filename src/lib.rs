//! `pwl-curves` library crate.
//!
//! Continuous piecewise-linear regression: one least squares line per zone
//! between user-supplied cutpoints, re-expressed in hinge form so the fitted
//! function is continuous and can be evaluated anywhere.
//!
//! The binary (`pwl`) is a thin wrapper around this library so that core logic
//! is testable without spawning processes.
//!
//! ```
//! use pwl_curves::models::SplineRegression;
//!
//! let xs: Vec<f64> = (0..=10).map(f64::from).collect();
//! let ys: Vec<f64> = xs.iter().map(|&x| if x <= 5.0 { x } else { 10.0 - x }).collect();
//!
//! let mut model = SplineRegression::new();
//! let (betas, _intercepts) = model.fit(&xs, &ys, &[5.0]).unwrap();
//! assert!((betas[0] - 1.0).abs() < 1e-9 && (betas[1] + 1.0).abs() < 1e-9);
//!
//! let y = model.predict(&[2.5, 7.5]).unwrap();
//! assert!((y[0] - 2.5).abs() < 1e-9 && (y[1] - 2.5).abs() < 1e-9);
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

pub use error::{AppError, SplineError};
pub use models::{FittedSpline, SplineRegression};
