//! JSON feature matrix reader
//!
//! The expected document is an array of rows, each an array of numbers:
//! `[[1.0, 0.0], [0.0, 1.0]]`.

use crate::core::{KernelError, Result};
use crate::utils::conversion::matrix_from_rows;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a dense feature matrix from a JSON file
pub fn read_json_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let file = File::open(path).map_err(KernelError::IoError)?;
    read_json_matrix_from_reader(BufReader::new(file))
}

/// Load a dense feature matrix from a reader
pub fn read_json_matrix_from_reader<R: Read>(reader: R) -> Result<Array2<f64>> {
    let rows: Vec<Vec<f64>> = serde_json::from_reader(reader)
        .map_err(|e| KernelError::ParseError(format!("Invalid JSON matrix: {e}")))?;

    if rows.is_empty() {
        return Err(KernelError::EmptyMatrix(
            "JSON input contains no rows".to_string(),
        ));
    }

    matrix_from_rows(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_read_json_matrix() {
        let m = read_json_matrix_from_reader("[[1, 0.5], [-2, 3]]".as_bytes()).unwrap();
        assert_eq!(m, array![[1.0, 0.5], [-2.0, 3.0]]);
    }

    #[test]
    fn test_read_json_ragged() {
        let result = read_json_matrix_from_reader("[[1, 2], [3, 4, 5]]".as_bytes());
        assert!(matches!(
            result,
            Err(KernelError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_read_json_invalid() {
        let result = read_json_matrix_from_reader("{\"rows\": 1}".as_bytes());
        assert!(matches!(result, Err(KernelError::ParseError(_))));

        let result = read_json_matrix_from_reader("[]".as_bytes());
        assert!(matches!(result, Err(KernelError::EmptyMatrix(_))));
    }
}
