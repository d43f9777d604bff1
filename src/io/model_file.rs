//! Read/write model JSON files.
//!
//! Model JSON is the portable representation of a fitted spline:
//! - hinge parameters (cutpoints, betas, intercepts, deltas)
//! - run metadata (timestamp, column names)
//! - fit diagnostics and per-zone summaries
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::ModelFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveGrid, DatasetStats, FitQuality, ModelFile, ZoneSummary};
use crate::error::AppError;
use crate::models::FittedSpline;

/// Points in the saved plotting grid.
const GRID_POINTS: usize = 101;

/// Assemble a `ModelFile` for a fitted spline.
pub fn build_model_file(
    spline: &FittedSpline,
    quality: FitQuality,
    zones: Vec<ZoneSummary>,
    stats: &DatasetStats,
    x_column: &str,
    y_column: &str,
) -> ModelFile {
    ModelFile {
        tool: "pwl".to_string(),
        created_at: Utc::now(),
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
        spline: spline.clone(),
        quality,
        zones,
        grid: build_grid(spline, stats.x_min, stats.x_max, GRID_POINTS),
    }
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model JSON file and check its parameters are consistent.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: ModelFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid model JSON: {e}")))?;
    model.spline.validate()?;
    Ok(model)
}

/// Sample the fitted function on `n` evenly spaced points over `[x_min, x_max]`.
pub fn build_grid(spline: &FittedSpline, x_min: f64, x_max: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let mut x0 = x_min;
    let mut x1 = x_max;
    if !(x0.is_finite() && x1.is_finite()) || x1 < x0 {
        x0 = 0.0;
        x1 = 1.0;
    }
    if (x1 - x0).abs() < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x0 + u * (x1 - x0);
        xs.push(x);
        ys.push(spline.evaluate(x));
    }

    CurveGrid { x: xs, y: ys }
}
