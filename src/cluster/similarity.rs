//! Graph construction: affinity, degree, and normalized similarity.
//!
//! # Pipeline
//!
//! ```text
//! X (n×d) ──affinity──▶ A (n×n) ──degree──▶ D (n×n, diagonal)
//!                        │                    │
//!                        └──────normalize─────┴──▶ W = D^{-1/2} A D^{-1/2}
//! ```
//!
//! ## Affinity
//!
//! Gaussian kernel with unit bandwidth, self-similarity excluded:
//!
//! ```text
//! A_ij = exp(-||x_i - x_j||² / 2)   (i ≠ j)
//! A_ii = 0
//! ```
//!
//! Excluding the diagonal keeps the factorization from explaining each point by
//! itself. Entries lie in (0, 1], so two identical points get `A_ij = 1`.
//!
//! ## Degree
//!
//! `D_ii = Σ_j A_ij`. A point whose degree is zero (every other point so far
//! away that the kernel underflows) cannot be normalized and is rejected.
//!
//! ## Normalization
//!
//! The symmetric normalization familiar from spectral clustering (Ng, Jordan,
//! Weiss 2001). `W` stays symmetric, keeps the zero diagonal, and is a pure
//! function of `A` and `D`.
//!
//! ## Complexity
//!
//! Affinity is O(n²·d) time and O(n²) space; it is computed row-parallel with
//! `rayon`. Degree and normalization are O(n²).

use log::debug;
use rayon::prelude::*;

use super::util::{self, squared_euclidean};
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Gaussian-kernel affinity matrix `A` of a dataset.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `points` has no rows.
/// - [`Error::InvalidParameter`] if `points` has zero columns.
/// - [`Error::NonFiniteInput`] for NaN or infinite coordinates.
pub fn affinity(points: &Matrix) -> Result<Matrix> {
    util::validate_points(points)?;

    let n = points.rows();
    debug!("Building {}x{} affinity matrix (d={})", n, n, points.cols());

    let mut a = Matrix::zeros(n, n);

    // Upper triangle, one row per task.
    a.as_mut_slice()
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(i, row)| {
            let xi = points.row(i);
            for (j, cell) in row.iter_mut().enumerate().skip(i + 1) {
                *cell = (-squared_euclidean(xi, points.row(j)) / 2.0).exp();
            }
        });

    // Mirror.
    for i in 0..n {
        for j in 0..i {
            a[(i, j)] = a[(j, i)];
        }
    }

    Ok(a)
}

/// Row sums of `A`, validated strictly positive and finite.
pub fn degree_vector(a: &Matrix) -> Result<Vec<f64>> {
    if !a.is_square() {
        return Err(Error::DimensionMismatch {
            expected: a.rows(),
            found: a.cols(),
        });
    }

    let degrees: Vec<f64> = a.row_iter().map(|row| row.iter().sum()).collect();

    if let Some(index) = degrees.iter().position(|&d| !(d.is_finite() && d > 0.0)) {
        return Err(Error::DegenerateInput { index });
    }
    Ok(degrees)
}

/// Diagonal degree matrix `D` with `D_ii = Σ_j A_ij`.
///
/// # Errors
///
/// [`Error::DegenerateInput`] if any degree is zero or non-finite.
pub fn degree(a: &Matrix) -> Result<Matrix> {
    let degrees = degree_vector(a)?;
    debug!("Built {}x{} degree matrix", degrees.len(), degrees.len());
    Ok(Matrix::from_diagonal(&degrees))
}

/// Normalized similarity `W_ij = A_ij / sqrt(D_ii · D_jj)`, zero diagonal.
///
/// Only the diagonal of `d` is read.
pub fn normalize(a: &Matrix, d: &Matrix) -> Result<Matrix> {
    if !a.is_square() {
        return Err(Error::DimensionMismatch {
            expected: a.rows(),
            found: a.cols(),
        });
    }
    if d.shape() != a.shape() {
        return Err(Error::DimensionMismatch {
            expected: a.rows(),
            found: d.rows(),
        });
    }

    let degrees = d.diagonal();
    if let Some(index) = degrees.iter().position(|&v| !(v.is_finite() && v > 0.0)) {
        return Err(Error::DegenerateInput { index });
    }

    let n = a.rows();
    let mut w = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            if i != j {
                w[(i, j)] = a[(i, j)] / (degrees[i] * degrees[j]).sqrt();
            }
        }
    }
    debug!("Built {}x{} normalized similarity matrix", n, n);
    Ok(w)
}

/// `X → A → D → W` in one call.
pub fn normalized_similarity(points: &Matrix) -> Result<Matrix> {
    let a = affinity(points)?;
    let d = degree(&a)?;
    normalize(&a, &d)
}
