//! CSV exports: per-observation fit results, predictions, and raw observations.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Observation, Residual};
use crate::error::AppError;

/// Write per-observation results (`x,y_obs,y_fit,residual,zone`) to a CSV file.
pub fn write_results_csv(path: &Path, residuals: &[Residual]) -> Result<(), AppError> {
    let file = create(path)?;
    write_rows(file, residuals)
}

/// Write predictions (`x,y_pred`) to a CSV file.
pub fn write_predictions_csv(path: &Path, xs: &[f64], preds: &[f64]) -> Result<(), AppError> {
    let file = create(path)?;
    write_predictions(file, xs, preds)
}

/// Write predictions (`x,y_pred`) to any writer.
pub fn write_predictions<W: Write>(sink: W, xs: &[f64], preds: &[f64]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer
        .write_record(["x", "y_pred"])
        .map_err(|e| AppError::new(2, format!("Failed to write predictions CSV header: {e}")))?;
    for (x, y) in xs.iter().zip(preds.iter()) {
        writer
            .write_record([x.to_string(), y.to_string()])
            .map_err(|e| AppError::new(2, format!("Failed to write predictions CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush predictions CSV: {e}")))
}

/// Write observations (`x,y`) to any writer.
pub fn write_observations<W: Write>(sink: W, points: &[Observation]) -> Result<(), AppError> {
    write_rows(sink, points)
}

/// Write observations (`x,y`) to a CSV file.
pub fn write_observations_csv(path: &Path, points: &[Observation]) -> Result<(), AppError> {
    let file = create(path)?;
    write_rows(file, points)
}

fn create(path: &Path) -> Result<File, AppError> {
    File::create(path).map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))
}

fn write_rows<W: Write, T: serde::Serialize>(sink: W, rows: &[T]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV: {e}")))
}
