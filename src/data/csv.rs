//! CSV feature matrix reader
//!
//! Supports files where:
//! - Every non-comment line is one row of comma-separated features
//! - First row can be headers (automatically detected)
//! - Lines starting with `#` and blank lines are skipped

use crate::core::{KernelError, Result};
use crate::utils::conversion::matrix_from_rows;
use log::debug;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a dense feature matrix from a CSV file
pub fn read_csv_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let file = File::open(path).map_err(KernelError::IoError)?;
    read_csv_matrix_from_reader(BufReader::new(file))
}

/// Load a dense feature matrix from a reader
pub fn read_csv_matrix_from_reader<R: BufRead>(reader: R) -> Result<Array2<f64>> {
    let mut rows = Vec::new();
    let mut header_checked = false;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(KernelError::IoError)?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Only the first data line may be a header
        if !header_checked {
            header_checked = true;
            if is_header_line(line) {
                debug!("Treating line {} as header: {line}", line_no + 1);
                continue;
            }
        }

        rows.push(parse_data_line(line, line_no + 1)?);
    }

    if rows.is_empty() {
        return Err(KernelError::EmptyMatrix(
            "CSV input contains no rows".to_string(),
        ));
    }

    matrix_from_rows(&rows)
}

/// Check if a line appears to be a header
///
/// Only a line with no numeric field at all counts, so a malformed first
/// data row is reported as a parse error instead of being skipped.
fn is_header_line(line: &str) -> bool {
    line.split(',').all(|field| field.trim().parse::<f64>().is_err())
}

/// Parse a CSV data line into a feature row
fn parse_data_line(line: &str, line_no: usize) -> Result<Vec<f64>> {
    line.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(col, field)| {
            field.parse::<f64>().map_err(|_| {
                KernelError::ParseError(format!(
                    "Invalid feature value at line {line_no}, column {}: {field}",
                    col + 1
                ))
            })
        })
        .collect()
}
