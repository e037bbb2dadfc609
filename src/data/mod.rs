//! Feature matrix readers
//!
//! Dense matrices for the command-line driver, read from CSV or JSON.

pub mod csv;
pub mod json;

pub use self::csv::*;
pub use self::json::*;

use crate::core::Result;
use log::warn;
use ndarray::Array2;
use std::path::Path;

/// On-disk layout of a feature matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    Csv,
    Json,
}

impl MatrixFormat {
    /// Detect the format from the file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("csv") | Some("txt") => Self::Csv,
            Some(other) => {
                warn!("Unknown file extension '{other}', assuming CSV format");
                Self::Csv
            }
            None => {
                warn!("No file extension, assuming CSV format");
                Self::Csv
            }
        }
    }
}

/// Read a feature matrix, picking the reader from the file extension
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let path = path.as_ref();
    match MatrixFormat::from_path(path) {
        MatrixFormat::Csv => read_csv_matrix(path),
        MatrixFormat::Json => read_json_matrix(path),
    }
}
