//! Graph clustering by symmetric non-negative matrix factorization.
//!
//! ## From points to labels
//!
//! 1. **Affinity**: Gaussian kernel between every pair of points, zero diagonal.
//! 2. **Degree**: row sums of the affinity matrix.
//! 3. **Normalization**: `W = D^{-1/2} A D^{-1/2}`.
//! 4. **Factorization**: find `H ≥ 0` (n×k) with `H·Hᵀ ≈ W`.
//! 5. **Labels**: each point goes to the column where its row of `H` peaks.
//!
//! ## Why factor the graph instead of the points?
//!
//! K-means works on coordinates and assumes roughly spherical clusters. SymNMF
//! works on pairwise similarity, so any structure the kernel captures
//! (elongated or curved groups) is visible to it. Compared to spectral
//! clustering, the non-negativity of `H` makes each column directly readable as
//! a cluster indicator, so no second k-means pass over eigenvectors is needed.
//!
//! **Assumptions**:
//! - You know k in advance
//! - Every point has non-negligible similarity to at least one other point
//!   (the kernel bandwidth is fixed at 1, so scale your data accordingly)
//!
//! ## Usage
//!
//! ```rust
//! use symnmf::cluster::{Clustering, SymNmf};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 10.0],
//!     vec![10.0, 11.0],
//! ];
//!
//! let labels = SymNmf::new(2)
//!     .with_seed(42)
//!     .with_tol(1e-12)
//!     .with_max_iter(2000)
//!     .fit_predict(&data)
//!     .unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//! ```

pub mod similarity;
mod symnmf;
mod traits;
mod util;

pub use symnmf::{
    labels, reconstruction_error, IterationReport, SymNmf, SymNmfFit, DEFAULT_DAMPING,
    DEFAULT_EPSILON, DEFAULT_MAX_ITER, DEFAULT_TOL,
};
pub use traits::Clustering;
