//! Shared domain types.
//!
//! Plain serializable data that is:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for prediction or plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::FittedSpline;

/// A single `(x, y)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

/// Split observations into parallel `xs` / `ys` vectors.
pub fn split_xy(points: &[Observation]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.x, p.y)).unzip()
}

/// Summary stats about the points actually used for fitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DatasetStats {
    /// Returns `None` when there are no points.
    pub fn from_points(points: &[Observation]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut stats = Self {
            n_points: points.len(),
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for p in points {
            stats.x_min = stats.x_min.min(p.x);
            stats.x_max = stats.x_max.max(p.x);
            stats.y_min = stats.y_min.min(p.y);
            stats.y_max = stats.y_max.max(p.y);
        }
        Some(stats)
    }
}

/// A per-observation fitted result (used for reports and exports).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Residual {
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
    /// Zone whose line governs `x` (points on a cutpoint report the lower zone).
    pub zone: usize,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    /// `1 - SSE/SST`; `NaN` when the observed `y` has no variance.
    pub r_squared: f64,
    pub n: usize,
}

/// Per-zone view of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    /// Observations inside the closed interval (boundary points count twice overall).
    pub n_points: usize,
    pub slope: f64,
    pub intercept: f64,
}

/// Fitted function sampled on an even grid (for quick plotting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A saved model file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub created_at: DateTime<Utc>,
    pub x_column: String,
    pub y_column: String,
    pub spline: FittedSpline,
    pub quality: FitQuality,
    pub zones: Vec<ZoneSummary>,
    pub grid: CurveGrid,
}

/// A full `pwl fit` configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub x_column: String,
    pub y_column: String,
    pub cutpoints: Vec<f64>,

    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_model: Option<PathBuf>,
    pub export_results: Option<PathBuf>,
}

/// Settings for synthetic sample generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub cutpoints: Vec<f64>,
    /// One slope per zone (`cutpoints.len() + 1`).
    pub slopes: Vec<f64>,
    /// Value of the true function at `x = 0`.
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub count: usize,
    /// Standard deviation of the Gaussian noise added to `y`.
    pub noise: f64,
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_cover_both_axes() {
        let points = [
            Observation { x: 2.0, y: -1.0 },
            Observation { x: -3.0, y: 4.0 },
            Observation { x: 0.5, y: 0.0 },
        ];
        let stats = DatasetStats::from_points(&points).unwrap();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (-3.0, 2.0));
        assert_eq!((stats.y_min, stats.y_max), (-1.0, 4.0));
        assert!(DatasetStats::from_points(&[]).is_none());
    }

    #[test]
    fn split_preserves_order() {
        let points = [Observation { x: 1.0, y: 10.0 }, Observation { x: 0.0, y: 20.0 }];
        let (xs, ys) = split_xy(&points);
        assert_eq!(xs, vec![1.0, 0.0]);
        assert_eq!(ys, vec![10.0, 20.0]);
    }
}
