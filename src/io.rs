//! Text input and output.
//!
//! Points are read as CSV: one point per line, comma-separated `f64`
//! coordinates, every line with the same number of fields. Blank lines are
//! skipped. Matrices are written one row per line with entries formatted to
//! four decimal places.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Parse CSV text into an n×d dataset.
///
/// # Errors
///
/// - [`Error::InputFormat`] for non-numeric fields or ragged rows.
/// - [`Error::EmptyInput`] if there are no non-blank lines.
pub fn parse_points(text: &str) -> Result<Matrix> {
    let mut data: Vec<f64> = Vec::new();
    let mut rows = 0usize;
    let mut cols: Option<usize> = None;

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let before = data.len();
        for (col, field) in line.split(',').enumerate() {
            let field = field.trim();
            let value: f64 = field.parse().map_err(|_| Error::InputFormat {
                line: line_no,
                message: format!("field {} is not a number: {:?}", col + 1, field),
            })?;
            data.push(value);
        }
        let width = data.len() - before;

        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(Error::InputFormat {
                    line: line_no,
                    message: format!("expected {} fields, found {}", expected, width),
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    match cols {
        Some(cols) => Matrix::from_vec(rows, cols, data),
        None => Err(Error::EmptyInput),
    }
}

/// Read and parse a CSV points file.
pub fn read_points(path: impl AsRef<Path>) -> Result<Matrix> {
    let text = fs::read_to_string(path)?;
    parse_points(&text)
}

/// Render a matrix as comma-separated rows with four decimals.
pub fn format_matrix(m: &Matrix) -> String {
    let mut out = String::with_capacity(m.rows() * (m.cols() * 8 + 1));
    for row in m.row_iter() {
        let line: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let m = parse_points("1.0,2.5\n-3,4e-1\n\n  5.5 , 6\n").unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.row(1), &[-3.0, 0.4]);
        assert_eq!(m.row(2), &[5.5, 6.0]);
    }

    #[test]
    fn test_parse_ragged() {
        let err = parse_points("1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 2, .. }));
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = parse_points("1,2\n3,abc\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 2, .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::InputFormat);

        // Trailing comma leaves an empty field.
        assert!(parse_points("1,2,\n").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_points(""), Err(Error::EmptyInput)));
        assert!(matches!(parse_points("\n  \n"), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_format_matrix() {
        let m = Matrix::from_rows(&[vec![1.0, 0.123456], vec![-0.5, 2.0]]).unwrap();
        assert_eq!(format_matrix(&m), "1.0000,0.1235\n-0.5000,2.0000\n");
    }

    #[test]
    fn test_read_points_missing_file() {
        let err = read_points("/nonexistent/points.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
