//! Least squares line fitting.
//!
//! Each zone of the piecewise model is an independent simple regression:
//!
//! ```text
//! minimize Σ (y_i - (a + b x_i))^2
//! ```
//!
//! The fitter only needs "give me a slope and an intercept", so the solver sits
//! behind the `LineSolver` trait. The default implementation builds the `[1, x]`
//! design matrix and solves it with SVD.
//!
//! Degenerate input:
//! - empty input is rejected (`SplineError::EmptyInput`)
//! - zero x-variance (one distinct x, including a single point) yields slope `0`
//!   and intercept `mean(y)`, the centered least squares solution

use nalgebra::{DMatrix, DVector};

use crate::error::SplineError;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// A fitted straight line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares for a single predictor.
pub trait LineSolver {
    /// Fit a line to paired `xs`/`ys`. Callers guarantee equal lengths.
    fn fit_line(&self, xs: &[f64], ys: &[f64]) -> Result<LineFit, SplineError>;
}

/// Default solver: SVD least squares on the `[1, x]` design matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvdLineSolver;

impl LineSolver for SvdLineSolver {
    fn fit_line(&self, xs: &[f64], ys: &[f64]) -> Result<LineFit, SplineError> {
        let n = xs.len();
        if n == 0 {
            return Err(SplineError::EmptyInput);
        }

        let y_mean = ys.iter().sum::<f64>() / n as f64;
        if !has_spread(xs) {
            log::warn!("zero x-variance over {n} point(s); using flat line at mean(y)={y_mean}");
            return Ok(LineFit {
                slope: 0.0,
                intercept: y_mean,
            });
        }

        let mut design = DMatrix::<f64>::zeros(n, 2);
        for (i, &x) in xs.iter().enumerate() {
            design[(i, 0)] = 1.0;
            design[(i, 1)] = x;
        }
        let y = DVector::from_column_slice(ys);

        let beta = solve_least_squares(&design, &y)
            .ok_or_else(|| SplineError::Solver(format!("no finite solution for {n} points")))?;

        Ok(LineFit {
            intercept: beta[0],
            slope: beta[1],
        })
    }
}

fn has_spread(xs: &[f64]) -> bool {
    let (min, max) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let scale = min.abs().max(max.abs()).max(1.0);
    max - min > f64::EPSILON * scale
}
