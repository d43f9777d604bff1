//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - result/prediction/sample exports (CSV) (`export`)
//! - model JSON read/write (`model_file`)

pub mod export;
pub mod ingest;
pub mod model_file;

pub use export::*;
pub use ingest::*;
pub use model_file::*;
