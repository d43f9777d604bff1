//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations and dataset stats (`Observation`, `DatasetStats`)
//! - fit outputs (`Residual`, `FitQuality`, `ZoneSummary`)
//! - the saved model schema (`ModelFile`)
//! - run configuration (`FitConfig`, `SampleConfig`)

pub mod types;

pub use types::*;
