//! Command-line parsing for the piecewise-linear curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pwl", version, about = "Continuous piecewise-linear (hinge) regression")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a piecewise-linear curve to a CSV, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Predict with a previously exported model JSON.
    Predict(PredictArgs),
    /// Generate a synthetic noisy piecewise-linear dataset as CSV.
    Sample(SampleArgs),
    /// Plot a previously exported model JSON.
    Plot(PlotArgs),
}

/// Column-name options shared by commands that read CSV.
#[derive(Debug, Args, Clone)]
pub struct ColumnArgs {
    /// Name of the x (predictor) column.
    #[arg(long = "x-col", env = "PWL_X_COL", default_value = "x")]
    pub x_col: String,

    /// Name of the y (response) column.
    #[arg(long = "y-col", env = "PWL_Y_COL", default_value = "y")]
    pub y_col: String,
}

/// Options for fitting.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Observations CSV (must contain the x and y columns).
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Cutpoints separating the linear segments, e.g. `2.5,5,10`. Empty = one line.
    #[arg(short = 'c', long, default_value = "", allow_hyphen_values = true)]
    pub cutpoints: String,

    /// Show the N observations with the largest absolute residuals.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the fitted model (parameters + diagnostics + grid) to JSON.
    #[arg(long = "export-model")]
    pub export_model: Option<PathBuf>,

    /// Export per-observation results to CSV.
    #[arg(long = "export-results")]
    pub export_results: Option<PathBuf>,
}

/// Options for prediction.
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Model JSON produced by `pwl fit --export-model`.
    #[arg(long, value_name = "JSON")]
    pub model: PathBuf,

    /// Query points, e.g. `--x 0,2.5,10`.
    #[arg(
        long = "x",
        value_delimiter = ',',
        allow_hyphen_values = true,
        conflicts_with = "input",
        required_unless_present = "input"
    )]
    pub xs: Vec<f64>,

    /// CSV with query points (read from the x column).
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Name of the x column in `--input`.
    #[arg(long = "x-col", env = "PWL_X_COL", default_value = "x")]
    pub x_col: String,

    /// Write predictions to CSV instead of printing them.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Cutpoints of the true function, e.g. `5` or `2,6`.
    #[arg(short = 'c', long, default_value = "", allow_hyphen_values = true)]
    pub cutpoints: String,

    /// One slope per segment (cutpoints + 1), e.g. `1,-1`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "1")]
    pub slopes: Vec<f64>,

    /// Value of the true function at x = 0.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub intercept: f64,

    /// Lower end of the sampled x range.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Upper end of the sampled x range.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Number of observations.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub count: usize,

    /// Standard deviation of Gaussian noise on y.
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write the sample to CSV instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Options for plotting a saved model.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Model JSON produced by `pwl fit --export-model`.
    #[arg(long, value_name = "JSON")]
    pub model: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
