use crate::error::{Error, Result};
use crate::matrix::Matrix;

#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Reject empty, zero-width, or non-finite datasets.
pub(crate) fn validate_points(points: &Matrix) -> Result<()> {
    if points.rows() == 0 {
        return Err(Error::EmptyInput);
    }
    if points.cols() == 0 {
        return Err(Error::InvalidParameter {
            name: "dimension",
            message: "must be at least 1",
        });
    }
    for (row, point) in points.row_iter().enumerate() {
        if let Some(col) = point.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFiniteInput { row, col });
        }
    }
    Ok(())
}

/// Index of the largest entry; ties go to the lowest index.
pub(crate) fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (j, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = j;
        }
    }
    best
}
