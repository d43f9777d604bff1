//! Piecewise-linear regression model.
//!
//! The model relies on two primitive operations:
//! - fit one least squares line per zone (see `crate::fit`)
//! - evaluate the hinge representation of those lines (see `crate::math::hinge`)
//!
//! `SplineRegression` has two states: unfitted (`state == None`) and fitted.
//! A fit builds the complete `FittedSpline` locally and only then replaces the
//! previous state, so a failed fit never leaves a half-updated model behind.

use serde::{Deserialize, Serialize};

use crate::error::SplineError;
use crate::fit::fit_zones;
use crate::math::{LineSolver, SvdLineSolver, hinge_eval, slope_deltas};

/// Parameters of a fitted continuous piecewise-linear function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedSpline {
    pub cutpoints: Vec<f64>,
    /// Raw per-zone slopes.
    pub betas: Vec<f64>,
    /// Raw per-zone intercepts.
    pub intercepts: Vec<f64>,
    /// Hinge coefficients: `deltas[0] = betas[0]`, `deltas[i] = betas[i] - betas[i-1]`.
    pub deltas: Vec<f64>,
}

impl FittedSpline {
    /// Build from per-zone slopes/intercepts, deriving the hinge deltas.
    pub fn from_zone_lines(
        cutpoints: Vec<f64>,
        betas: Vec<f64>,
        intercepts: Vec<f64>,
    ) -> Result<Self, SplineError> {
        let deltas = slope_deltas(&betas);
        let spline = Self {
            cutpoints,
            betas,
            intercepts,
            deltas,
        };
        spline.validate()?;
        Ok(spline)
    }

    /// Check internal consistency (used for models loaded from disk).
    pub fn validate(&self) -> Result<(), SplineError> {
        let k = self.cutpoints.len() + 1;
        if self.betas.len() != k || self.intercepts.len() != k || self.deltas.len() != k {
            return Err(SplineError::InvalidModel(format!(
                "expected {k} zones for {} cutpoints, got betas={} intercepts={} deltas={}",
                self.cutpoints.len(),
                self.betas.len(),
                self.intercepts.len(),
                self.deltas.len()
            )));
        }

        let mut all = self
            .cutpoints
            .iter()
            .chain(&self.betas)
            .chain(&self.intercepts)
            .chain(&self.deltas);
        if all.any(|v| !v.is_finite()) {
            return Err(SplineError::InvalidModel("non-finite parameter".to_string()));
        }

        for (i, (&d, &expected)) in self.deltas.iter().zip(slope_deltas(&self.betas).iter()).enumerate() {
            let tol = 1e-9 * expected.abs().max(1.0);
            if (d - expected).abs() > tol {
                return Err(SplineError::InvalidModel(format!(
                    "deltas[{i}] = {d} does not match betas (expected {expected})"
                )));
            }
        }
        Ok(())
    }

    pub fn zone_count(&self) -> usize {
        self.betas.len()
    }

    /// Evaluate the continuous function at `x`.
    ///
    /// Anchored on the first zone's intercept; later zones enter only through
    /// their slope changes. Values outside the fitted range extend linearly.
    pub fn evaluate(&self, x: f64) -> f64 {
        let intercept = self.intercepts.first().copied().unwrap_or(0.0);
        hinge_eval(x, intercept, &self.deltas, &self.cutpoints)
    }
}

/// Continuous piecewise-linear regression over user-supplied cutpoints.
#[derive(Debug, Clone, Default)]
pub struct SplineRegression<S = SvdLineSolver> {
    solver: S,
    state: Option<FittedSpline>,
}

impl SplineRegression<SvdLineSolver> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already fitted (e.g. reloaded) spline.
    pub fn from_fitted(spline: FittedSpline) -> Result<Self, SplineError> {
        spline.validate()?;
        Ok(Self {
            solver: SvdLineSolver,
            state: Some(spline),
        })
    }
}

impl<S: LineSolver> SplineRegression<S> {
    /// Use a custom least squares solver.
    pub fn with_solver(solver: S) -> Self {
        Self { solver, state: None }
    }

    /// Fit one line per zone and store the continuous reparameterization.
    ///
    /// Returns the raw per-zone `(betas, intercepts)`. With no cutpoints this is
    /// a single ordinary regression over all observations.
    pub fn fit(&mut self, xs: &[f64], ys: &[f64], cutpoints: &[f64]) -> Result<(Vec<f64>, Vec<f64>), SplineError> {
        let fits = fit_zones(&self.solver, xs, ys, cutpoints)?;

        let betas: Vec<f64> = fits.iter().map(|f| f.line.slope).collect();
        let intercepts: Vec<f64> = fits.iter().map(|f| f.line.intercept).collect();
        let spline = FittedSpline::from_zone_lines(cutpoints.to_vec(), betas, intercepts)?;

        log::info!(
            "fitted {} zone(s) over {} observations; betas={:?}",
            spline.zone_count(),
            xs.len(),
            spline.betas
        );

        let out = (spline.betas.clone(), spline.intercepts.clone());
        self.state = Some(spline);
        Ok(out)
    }

    /// Predict `y` for each query point, preserving order.
    pub fn predict(&self, xs: &[f64]) -> Result<Vec<f64>, SplineError> {
        let spline = self.state.as_ref().ok_or(SplineError::NotFitted)?;
        if xs.is_empty() {
            return Err(SplineError::EmptyInput);
        }
        if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
            return Err(SplineError::InvalidInput(format!("xs[{i}] = {} is not finite", xs[i])));
        }

        Ok(xs.iter().map(|&x| spline.evaluate(x)).collect())
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    pub fn fitted(&self) -> Option<&FittedSpline> {
        self.state.as_ref()
    }

    pub fn betas(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.betas.as_slice())
    }

    pub fn intercepts(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.intercepts.as_slice())
    }

    pub fn deltas(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.deltas.as_slice())
    }

    pub fn cutpoints(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.cutpoints.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::LineFit;

    fn v_shape() -> (Vec<f64>, Vec<f64>) {
        let xs: Vec<f64> = (0..=10).map(f64::from).collect();
        let ys = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0];
        (xs, ys)
    }

    #[test]
    fn v_shape_scenario() {
        let (xs, ys) = v_shape();
        let mut model = SplineRegression::new();
        let (betas, intercepts) = model.fit(&xs, &ys, &[5.0]).unwrap();

        assert_eq!(betas.len(), 2);
        assert_eq!(intercepts.len(), 2);
        assert!((betas[0] - 1.0).abs() < 0.1);
        assert!((betas[1] + 1.0).abs() < 0.1);

        let preds = model.predict(&[0.0, 5.0, 10.0]).unwrap();
        assert!((preds[0] - 0.0).abs() < 0.1);
        assert!((preds[1] - 5.0).abs() < 0.1);
        assert!((preds[2] - 0.0).abs() < 0.1);
    }

    #[test]
    fn deltas_follow_betas() {
        let (xs, ys) = v_shape();
        let mut model = SplineRegression::new();
        model.fit(&xs, &ys, &[5.0]).unwrap();

        let betas = model.betas().unwrap();
        let deltas = model.deltas().unwrap();
        assert_eq!(deltas[0], betas[0]);
        assert!((deltas[1] - (betas[1] - betas[0])).abs() < 1e-12);
        assert_eq!(model.cutpoints().unwrap(), &[5.0]);
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = SplineRegression::new();
        assert!(!model.is_fitted());
        assert_eq!(model.predict(&[1.0]), Err(SplineError::NotFitted));
        assert!(model.betas().is_none());
    }

    #[test]
    fn predict_rejects_empty_and_non_finite_queries() {
        let (xs, ys) = v_shape();
        let mut model = SplineRegression::new();
        model.fit(&xs, &ys, &[]).unwrap();

        assert_eq!(model.predict(&[]), Err(SplineError::EmptyInput));
        assert!(matches!(model.predict(&[1.0, f64::NAN]), Err(SplineError::InvalidInput(_))));
    }

    #[test]
    fn failed_refit_keeps_previous_state() {
        let (xs, ys) = v_shape();
        let mut model = SplineRegression::new();
        model.fit(&xs, &ys, &[5.0]).unwrap();
        let before = model.fitted().cloned();

        assert!(model.fit(&xs, &ys[..3], &[]).is_err());
        assert!(model.fit(&xs, &ys, &[f64::NAN]).is_err());
        assert!(model.fit(&xs, &ys, &[5.0, 20.0]).is_err());

        assert_eq!(model.fitted().cloned(), before);
    }

    #[test]
    fn refit_overwrites_state() {
        let (xs, ys) = v_shape();
        let mut model = SplineRegression::new();
        model.fit(&xs, &ys, &[5.0]).unwrap();
        model.fit(&xs, &ys, &[]).unwrap();

        assert_eq!(model.fitted().unwrap().zone_count(), 1);
        assert!(model.cutpoints().unwrap().is_empty());
    }

    #[test]
    fn out_of_order_cutpoints_leave_an_empty_middle_zone() {
        let xs: Vec<f64> = (0..=10).map(f64::from).collect();
        let mut model = SplineRegression::new();

        let err = model.fit(&xs, &xs, &[7.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            SplineError::EmptyZone {
                zone: 1,
                lower: 7.0,
                upper: 3.0
            }
        );
        assert!(!model.is_fitted());
    }

    #[test]
    fn cutpoint_at_data_minimum_gives_flat_single_point_zone() {
        let xs: Vec<f64> = (0..=10).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 + 2.0 * x).collect();
        let mut model = SplineRegression::new();
        let (betas, intercepts) = model.fit(&xs, &ys, &[0.0]).unwrap();

        // Zone 0 is [0, 0]: a single point, so a flat line through its y.
        assert_eq!(betas[0], 0.0);
        assert!((intercepts[0] - 3.0).abs() < 1e-12);
        assert!((betas[1] - 2.0).abs() < 1e-9);
        assert!((intercepts[1] - 3.0).abs() < 1e-9);

        let preds = model.predict(&[0.0, 4.0, 10.0]).unwrap();
        for (p, want) in preds.iter().zip([3.0, 11.0, 23.0]) {
            assert!((p - want).abs() < 1e-9);
        }
    }

    struct FixedSolver;

    impl LineSolver for FixedSolver {
        fn fit_line(&self, _xs: &[f64], _ys: &[f64]) -> Result<LineFit, SplineError> {
            Ok(LineFit {
                slope: 2.0,
                intercept: 1.0,
            })
        }
    }

    #[test]
    fn custom_solver_is_used_for_every_zone() {
        let mut model = SplineRegression::with_solver(FixedSolver);
        let (betas, intercepts) = model.fit(&[0.0, 1.0, 2.0, 3.0], &[0.0; 4], &[1.5]).unwrap();
        assert_eq!(betas, vec![2.0, 2.0]);
        assert_eq!(intercepts, vec![1.0, 1.0]);
        assert_eq!(model.deltas().unwrap(), &[2.0, 0.0]);
    }

    #[test]
    fn from_fitted_validates_parameters() {
        let good = FittedSpline::from_zone_lines(vec![1.0], vec![1.0, 3.0], vec![0.0, -2.0]).unwrap();
        let model = SplineRegression::from_fitted(good.clone()).unwrap();
        assert_eq!(model.predict(&[2.0]).unwrap(), vec![4.0]);

        let mut short = good.clone();
        short.intercepts.pop();
        assert!(matches!(SplineRegression::from_fitted(short), Err(SplineError::InvalidModel(_))));

        let mut skewed = good;
        skewed.deltas[1] = 5.0;
        assert!(matches!(SplineRegression::from_fitted(skewed), Err(SplineError::InvalidModel(_))));
    }
}
