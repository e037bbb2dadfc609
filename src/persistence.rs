//! Kernel matrix serialization and persistence
//!
//! This module saves computed kernel matrices together with the kernel that
//! produced them, so the CLI output can be reloaded by later tooling.

use crate::api::KernelSpec;
use crate::core::{KernelError, Result};
use crate::utils::conversion::{matrix_from_rows, matrix_to_rows};
use ndarray::{Array2, ArrayBase, Data, Ix2};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable representation of a computed kernel matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelMatrixRecord {
    /// Kernel and parameters used
    pub kernel: KernelSpec,
    /// Number of rows (rows of X)
    pub rows: usize,
    /// Number of columns (rows of Y)
    pub cols: usize,
    /// Matrix values, row by row
    pub values: Vec<Vec<f64>>,
    /// Record metadata
    pub metadata: RecordMetadata,
}

/// Metadata for tracking and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Library version used to compute the matrix
    pub library_version: String,
    /// Creation timestamp
    pub created_at: String,
}

impl KernelMatrixRecord {
    /// Create a record from a computed matrix
    pub fn new<S>(kernel: KernelSpec, matrix: &ArrayBase<S, Ix2>) -> Self
    where
        S: Data<Elem = f64>,
    {
        let (rows, cols) = matrix.dim();
        Self {
            kernel,
            rows,
            cols,
            values: matrix_to_rows(matrix),
            metadata: RecordMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Rebuild the dense matrix, checking it against the recorded shape
    pub fn to_matrix(&self) -> Result<Array2<f64>> {
        if self.values.len() != self.rows {
            return Err(KernelError::DimensionMismatch {
                expected: self.rows,
                actual: self.values.len(),
            });
        }

        let matrix = matrix_from_rows(&self.values)?;
        if self.rows > 0 && matrix.ncols() != self.cols {
            return Err(KernelError::DimensionMismatch {
                expected: self.cols,
                actual: matrix.ncols(),
            });
        }

        Ok(matrix)
    }

    /// Save record to file
    ///
    /// JSON has no encoding for `inf` or `NaN`, so a matrix holding either is
    /// rejected before the file is created.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some((i, j, value)) = self.first_non_finite() {
            return Err(KernelError::SerializationError(format!(
                "Kernel matrix value at ({i}, {j}) is not finite: {value}"
            )));
        }

        let file = File::create(path).map_err(KernelError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| KernelError::SerializationError(e.to_string()))?;
        Ok(())
    }

    fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        self.values.iter().enumerate().find_map(|(i, row)| {
            row.iter()
                .position(|v| !v.is_finite())
                .map(|j| (i, j, row[j]))
        })
    }

    /// Load record from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        let reader = BufReader::new(file);
        let record = serde_json::from_reader(reader)
            .map_err(|e| KernelError::SerializationError(e.to_string()))?;
        Ok(record)
    }

    /// Print record summary
    pub fn print_summary(&self) {
        println!("=== Kernel Matrix Summary ===");
        println!("Kernel: {}", self.kernel);
        println!("Shape: {} x {}", self.rows, self.cols);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}
