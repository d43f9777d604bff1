//! CSV ingest and normalization.
//!
//! This module turns a CSV with (at least) an x column and a y column into a
//! clean list of finite `Observation`s that are safe to fit.
//!
//! - Column names are matched case-insensitively (and tolerate a UTF-8 BOM).
//! - Bad rows are skipped and reported with their line numbers.
//! - Zero usable rows is an error (exit code 3).

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{DatasetStats, Observation};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: normalized points + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub points: Vec<Observation>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
    pub x_column: String,
    pub y_column: String,
}

/// Load `(x, y)` observations from a CSV file.
pub fn load_observations(path: &Path, x_column: &str, y_column: &str) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_observations(file, x_column, y_column)
}

/// Load `(x, y)` observations from any CSV reader.
pub fn read_observations<R: Read>(source: R, x_column: &str, y_column: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv_reader(source);
    let header_map = read_header_map(&mut reader)?;
    let x_idx = require_column(&header_map, x_column)?;
    let y_idx = require_column(&header_map, y_column)?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let parsed = parse_cell(&record, x_idx, x_column)
            .and_then(|x| parse_cell(&record, y_idx, y_column).map(|y| Observation { x, y }));
        match parsed {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        log::warn!("skipping line {}: {}", err.line, err.message);
    }

    let rows_used = points.len();
    let stats = DatasetStats::from_points(&points)
        .ok_or_else(|| AppError::new(3, "No valid rows remain after parsing."))?;

    Ok(IngestedData {
        points,
        stats,
        row_errors,
        rows_read,
        rows_used,
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
    })
}

/// Load a single numeric column (e.g. query points for prediction).
///
/// Unlike observation ingest, any unparseable row is an error: predictions must
/// line up one-to-one with the input rows.
pub fn load_column(path: &Path, column: &str) -> Result<Vec<f64>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_column(file, column)
}

/// Reader-based variant of `load_column`.
pub fn read_column<R: Read>(source: R, column: &str) -> Result<Vec<f64>, AppError> {
    let mut reader = csv_reader(source);
    let header_map = read_header_map(&mut reader)?;
    let idx = require_column(&header_map, column)?;

    let mut out = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error on line {line}: {e}")))?;
        let v = parse_cell(&record, idx, column).map_err(|msg| AppError::new(2, format!("Line {line}: {msg}")))?;
        out.push(v);
    }

    if out.is_empty() {
        return Err(AppError::new(3, format!("No rows found for column `{column}`.")));
    }
    Ok(out)
}

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}

fn read_header_map<R: Read>(reader: &mut csv::Reader<R>) -> Result<HashMap<String, usize>, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?;
    Ok(build_header_map(headers))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn require_column(header_map: &HashMap<String, usize>, column: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(column))
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{column}`")))
}

fn parse_cell(record: &StringRecord, idx: usize, column: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing `{column}` value."))?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("Non-finite `{column}` value: {raw}")),
        Err(_) => Err(format!("Invalid `{column}` value: {raw}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_columns_in_any_case() {
        let csv = "\u{feff}ID,X,Y\na,0,1\nb,2,5\n";
        let data = read_observations(csv.as_bytes(), "x", "y").unwrap();
        assert_eq!(
            data.points,
            vec![Observation { x: 0.0, y: 1.0 }, Observation { x: 2.0, y: 5.0 }]
        );
        assert_eq!(data.rows_read, 2);
        assert_eq!(data.rows_used, 2);
        assert_eq!(data.stats.x_max, 2.0);
    }

    #[test]
    fn bad_rows_are_skipped_with_line_numbers() {
        let csv = "x,y\n1,2\nfoo,3\n4,\n5,nan\n6,7\n";
        let data = read_observations(csv.as_bytes(), "x", "y").unwrap();
        assert_eq!(data.rows_read, 5);
        assert_eq!(data.rows_used, 2);
        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
    }

    #[test]
    fn missing_column_is_a_usage_error() {
        let err = read_observations("a,b\n1,2\n".as_bytes(), "x", "y").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`x`"));
    }

    #[test]
    fn no_usable_rows_is_an_error() {
        let err = read_observations("x,y\nfoo,bar\n".as_bytes(), "x", "y").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn column_reader_is_strict() {
        assert_eq!(read_column("x\n1\n-2.5\n".as_bytes(), "x").unwrap(), vec![1.0, -2.5]);
        let err = read_column("x\n1\nbad\n".as_bytes(), "x").unwrap_err();
        assert!(err.to_string().contains("Line 3"));
    }
}
