//! Error types.
//!
//! - `SplineError`: library-level failures from fitting/prediction. Each case is a
//!   distinct variant so callers can match on it.
//! - `AppError`: what the `pwl` binary reports (message + process exit code).

use thiserror::Error;

/// Errors raised by the piecewise-linear fitter and predictor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    /// `xs` and `ys` do not pair up.
    #[error("Shape mismatch: xs has {x_len} values but ys has {y_len}")]
    ShapeMismatch { x_len: usize, y_len: usize },

    /// A cutpoint is not a finite number.
    #[error("Invalid cutpoint '{0}': cutpoints must be finite numbers")]
    InvalidCutpoint(String),

    /// `predict` was called before any successful `fit`.
    #[error("Cannot predict before a model is fitted")]
    NotFitted,

    /// An input sequence was empty.
    #[error("Input cannot be empty")]
    EmptyInput,

    /// An input sequence contained a non-finite value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No observation falls inside a zone's closed interval.
    #[error("Zone {zone} [{lower}, {upper}] contains no observations")]
    EmptyZone { zone: usize, lower: f64, upper: f64 },

    /// The least squares solver could not produce a finite line.
    #[error("Least squares solve failed: {0}")]
    Solver(String),

    /// Reloaded model parameters are inconsistent.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SplineError> for AppError {
    fn from(err: SplineError) -> Self {
        // Bad user input is a usage error (2); everything else is a fit failure (4).
        let exit_code = match err {
            SplineError::ShapeMismatch { .. }
            | SplineError::InvalidCutpoint(_)
            | SplineError::EmptyInput
            | SplineError::InvalidInput(_)
            | SplineError::InvalidModel(_) => 2,
            SplineError::NotFitted | SplineError::EmptyZone { .. } | SplineError::Solver(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
