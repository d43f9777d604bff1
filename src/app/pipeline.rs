//! Shared "fit pipeline" logic.
//!
//! CSV ingest -> split into xs/ys -> fit -> residuals -> diagnostics
//!
//! The CLI focuses on presentation (printing/exports); the workflow lives here.

use crate::domain::{FitConfig, FitQuality, Residual, ZoneSummary, split_xy};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::models::{FittedSpline, SplineRegression};

/// All computed outputs of a single `pwl fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub spline: FittedSpline,
    pub zones: Vec<ZoneSummary>,
    pub residuals: Vec<Residual>,
    pub quality: FitQuality,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = crate::io::load_observations(&config.input, &config.x_column, &config.y_column)?;
    run_fit_with_data(config, ingest)
}

/// Execute the fitting pipeline on already ingested data.
pub fn run_fit_with_data(config: &FitConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let (xs, ys) = split_xy(&ingest.points);

    let mut model = SplineRegression::new();
    model.fit(&xs, &ys, &config.cutpoints)?;
    let spline = model
        .fitted()
        .cloned()
        .ok_or_else(|| AppError::new(4, "Fit completed without producing a model."))?;

    let residuals = crate::report::compute_residuals(&ingest.points, &spline)?;
    let quality = crate::report::fit_quality(&residuals);
    let zones = crate::report::zone_summaries(&ingest.points, &spline);

    log::info!(
        "fit {} points: sse={:.6} rmse={:.6}",
        quality.n,
        quality.sse,
        quality.rmse
    );

    Ok(RunOutput {
        ingest,
        spline,
        zones,
        residuals,
        quality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn config(input: PathBuf, cutpoints: Vec<f64>) -> FitConfig {
        FitConfig {
            input,
            x_column: "x".to_string(),
            y_column: "y".to_string(),
            cutpoints,
            top_n: 5,
            plot: false,
            plot_width: 40,
            plot_height: 10,
            export_model: None,
            export_results: None,
        }
    }

    #[test]
    fn run_fit_from_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,y").unwrap();
        for i in 0..=10 {
            let x = i as f64;
            let y = if x <= 5.0 { x } else { 10.0 - x };
            writeln!(file, "{x},{y}").unwrap();
        }
        writeln!(file, "oops,1").unwrap();

        let run = run_fit(&config(file.path().to_path_buf(), vec![5.0])).unwrap();
        assert_eq!(run.ingest.rows_used, 11);
        assert_eq!(run.ingest.row_errors.len(), 1);
        assert_eq!(run.zones.len(), 2);
        assert_eq!(run.zones[0].n_points, 6);
        assert_eq!(run.zones[1].n_points, 6);
        assert!(run.quality.sse < 1e-12);
        assert!((run.spline.betas[0] - 1.0).abs() < 1e-9);
        assert!((run.spline.betas[1] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_zone_surfaces_as_fit_failure() {
        let ingest = crate::io::read_observations("x,y\n0,0\n1,1\n2,2\n".as_bytes(), "x", "y").unwrap();
        let err = run_fit_with_data(&config(PathBuf::from("unused.csv"), vec![10.0]), ingest).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn missing_file_is_a_usage_error() {
        let err = run_fit(&config(PathBuf::from("/definitely/not/here.csv"), vec![])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
