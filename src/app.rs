//! Top-level application orchestration.
//!
//! `src/main.rs` only sets up the environment; this module:
//! - parses CLI arguments
//! - runs fitting / prediction / sampling / plotting
//! - prints reports and writes optional exports

use std::path::Path;

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, PredictArgs, SampleArgs};
use crate::domain::{FitConfig, SampleConfig};
use crate::error::AppError;
use crate::fit::parse_cutpoints;
use crate::models::SplineRegression;

pub mod pipeline;

/// Entry point for the `pwl` binary.
///
/// Expects `.env` loading and logger setup to have happened already (see `main.rs`).
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Predict(args) => handle_predict(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.spline, &run.zones, &run.quality)
    );

    if config.top_n > 0 {
        let top = crate::report::largest_residuals(&run.residuals, config.top_n);
        println!("{}", crate::report::format_residuals(&top));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.residuals, &run.spline, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &run.residuals)?;
        log::info!("wrote results to {}", path.display());
    }
    if let Some(path) = &config.export_model {
        let model = crate::io::build_model_file(
            &run.spline,
            run.quality,
            run.zones.clone(),
            &run.ingest.stats,
            &run.ingest.x_column,
            &run.ingest.y_column,
        );
        crate::io::write_model_json(path, &model)?;
        log::info!("wrote model to {}", path.display());
    }

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let model_file = crate::io::read_model_json(&args.model)?;
    let model = SplineRegression::from_fitted(model_file.spline)?;

    let xs = match &args.input {
        Some(path) => crate::io::load_column(path, &args.x_col)?,
        None => args.xs.clone(),
    };
    let preds = model.predict(&xs)?;

    match &args.output {
        Some(path) => crate::io::write_predictions_csv(path, &xs, &preds)?,
        None => print!("{}", crate::report::format_predictions(&xs, &preds)),
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args)?;
    let points = crate::data::generate_sample(&config)?;

    match &args.output {
        Some(path) => write_sample_file(path, &points),
        None => crate::io::write_observations(std::io::stdout().lock(), &points),
    }
}

fn write_sample_file(path: &Path, points: &[crate::domain::Observation]) -> Result<(), AppError> {
    crate::io::write_observations_csv(path, points)?;
    log::info!("wrote {} sample points to {}", points.len(), path.display());
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let model = crate::io::read_model_json(&args.model)?;
    let plot = crate::plot::render_ascii_plot_from_model(&model, args.width, args.height);

    println!("{plot}");
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    Ok(FitConfig {
        input: args.input.clone(),
        x_column: args.columns.x_col.clone(),
        y_column: args.columns.y_col.clone(),
        cutpoints: parse_cutpoints(&args.cutpoints)?,
        top_n: args.top,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_model: args.export_model.clone(),
        export_results: args.export_results.clone(),
    })
}

pub fn sample_config_from_args(args: &SampleArgs) -> Result<SampleConfig, AppError> {
    Ok(SampleConfig {
        cutpoints: parse_cutpoints(&args.cutpoints)?,
        slopes: args.slopes.clone(),
        intercept: args.intercept,
        x_min: args.x_min,
        x_max: args.x_max,
        count: args.count,
        noise: args.noise,
        seed: args.seed,
    })
}
