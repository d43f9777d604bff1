//! Reporting utilities: residuals, fit quality, zone summaries, and formatted output.

pub mod format;

pub use format::*;

use crate::domain::{FitQuality, Observation, Residual, ZoneSummary};
use crate::error::AppError;
use crate::fit::{select_zone, zone_boundaries, zone_index, zones_from_boundaries};
use crate::models::FittedSpline;

/// Compute fitted values and residuals for each observation.
pub fn compute_residuals(points: &[Observation], spline: &FittedSpline) -> Result<Vec<Residual>, AppError> {
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        let y_fit = spline.evaluate(p.x);
        if !y_fit.is_finite() {
            return Err(AppError::new(4, "Non-finite model prediction during residual computation."));
        }
        out.push(Residual {
            x: p.x,
            y_obs: p.y,
            y_fit,
            residual: p.y - y_fit,
            zone: zone_index(p.x, &spline.cutpoints),
        });
    }
    Ok(out)
}

/// SSE / RMSE / R² over the residuals.
pub fn fit_quality(residuals: &[Residual]) -> FitQuality {
    let n = residuals.len();
    if n == 0 {
        return FitQuality {
            sse: 0.0,
            rmse: 0.0,
            r_squared: f64::NAN,
            n,
        };
    }

    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    let y_mean = residuals.iter().map(|r| r.y_obs).sum::<f64>() / n as f64;
    let sst: f64 = residuals.iter().map(|r| (r.y_obs - y_mean).powi(2)).sum();
    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { f64::NAN };

    FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        r_squared,
        n,
    }
}

/// Per-zone bounds, point counts and the zone's own fitted line.
pub fn zone_summaries(points: &[Observation], spline: &FittedSpline) -> Vec<ZoneSummary> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let Some(boundaries) = zone_boundaries(&xs, &spline.cutpoints) else {
        return Vec::new();
    };

    zones_from_boundaries(&boundaries)
        .into_iter()
        .zip(spline.betas.iter().zip(spline.intercepts.iter()))
        .map(|(zone, (&slope, &intercept))| ZoneSummary {
            index: zone.index,
            lower: zone.lower,
            upper: zone.upper,
            n_points: select_zone(&zone, &xs, &ys).0.len(),
            slope,
            intercept,
        })
        .collect()
}

/// The `top_n` observations with the largest absolute residual.
pub fn largest_residuals(residuals: &[Residual], top_n: usize) -> Vec<Residual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}
