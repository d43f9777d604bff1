//! Synthetic sample generation from a known continuous piecewise-linear function.
//!
//! The true function is built in hinge form from the configured slopes, so the
//! generated data is continuous at every cutpoint. Gaussian noise is added to `y`.
//! Output is reproducible for a given seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Observation, SampleConfig};
use crate::error::AppError;
use crate::math::{hinge_eval, slope_deltas};

/// Generate `config.count` noisy observations, sorted by `x`.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Observation>, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if config.slopes.len() != config.cutpoints.len() + 1 {
        return Err(AppError::new(
            2,
            format!(
                "Expected {} slopes for {} cutpoints, got {}.",
                config.cutpoints.len() + 1,
                config.cutpoints.len(),
                config.slopes.len()
            ),
        ));
    }
    if config.cutpoints.iter().chain(&config.slopes).any(|v| !v.is_finite()) || !config.intercept.is_finite() {
        return Err(AppError::new(2, "Sample parameters must be finite."));
    }

    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, format!("Noise level must be >= 0, got {}.", config.noise)));
    }

    let normal = Normal::new(0.0, 1.0).map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let deltas = slope_deltas(&config.slopes);
    let mut points: Vec<Observation> = (0..config.count)
        .map(|_| {
            let x = rng.gen_range(config.x_min..=config.x_max);
            let y = hinge_eval(x, config.intercept, &deltas, &config.cutpoints)
                + config.noise * normal.sample(&mut rng);
            Observation { x, y }
        })
        .collect();

    points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    log::debug!("generated {} sample points (seed={})", points.len(), config.seed);
    Ok(points)
}
