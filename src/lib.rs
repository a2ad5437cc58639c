//! Symmetric non-negative matrix factorization (SymNMF) clustering.
//!
//! `symnmf` clusters dense points by factoring their normalized similarity graph
//! into `H·Hᵀ` with `H ≥ 0`, then labelling each point by its dominant column.
//!
//! The public API:
//! - [`cluster::similarity`]: affinity, degree, and normalized similarity matrices
//! - [`SymNmf`]: seeded initialization and the multiplicative-update engine
//! - [`Goal`]: the four output modes (`sym`, `ddg`, `norm`, `symnmf`)
//! - [`io`]: CSV point parsing and matrix formatting

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod goal;
pub mod io;
pub mod matrix;

pub use cluster::{Clustering, IterationReport, SymNmf, SymNmfFit};
pub use error::{Error, ErrorKind, Result};
pub use goal::Goal;
pub use matrix::Matrix;
