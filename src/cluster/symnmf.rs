//! SymNMF: Symmetric Non-negative Matrix Factorization clustering.
//!
//! # The Algorithm (Kuang, Ding, Park 2012)
//!
//! Given a symmetric non-negative similarity matrix `W` (n×n), find a
//! non-negative factor `H` (n×k) minimizing
//!
//! ```text
//! ||W - H·Hᵀ||²_F    subject to H ≥ 0
//! ```
//!
//! Row `i` of `H` is a soft membership of point `i` over `k` clusters; the hard
//! label is the row-wise argmax.
//!
//! ## Update Rule
//!
//! Each iteration rescales every entry by a ratio of non-negative terms:
//!
//! ```text
//! H_ij ← H_ij · (1 - β + β · (W·H)_ij / ((H·Hᵀ·H)_ij + ε))
//! ```
//!
//! - `β = 1` is the plain multiplicative update. On nearly block-diagonal `W`
//!   it can oscillate between two states and never settle.
//! - `β = 0.5` (default) damps the step; the objective then decreases
//!   monotonically in practice.
//! - `ε` keeps the ratio finite when a denominator underflows.
//!
//! `H·Hᵀ·H` is evaluated as `H·(HᵀH)`, which costs O(n·k²) instead of O(n²·k).
//! The new `H` is computed entirely from the previous one.
//!
//! ## Convergence
//!
//! Stop when `δ = ||H_new - H||²_F` drops below `tol`, or after `max_iter`
//! updates. Running out of iterations is not an error: the last `H` is returned
//! with [`SymNmfFit::converged`] set to `false` and a warning is logged.
//!
//! `tol` is absolute, not relative to the size of `H`. When the entries of `H0`
//! are small (small `mean(W)`, large `k`), the first few steps can already move
//! less than `tol` and the run stops before the clusters have separated.
//!
//! ## Initialization
//!
//! `H0_ij ~ Uniform[0, 2·sqrt(mean(W)/k))`, drawn from an explicitly seeded
//! [`StdRng`]. Reproducibility comes from the seed alone.
//!
//! ## Failure Modes
//!
//! - [`Error::NumericalInstability`]: an entry became NaN or infinite.
//! - [`Error::DegenerateFactorization`]: a whole row of `H` became zero, so
//!   that point no longer belongs to any cluster.
//!
//! ## References
//!
//! Kuang, D., Ding, C., Park, H. (2012). "Symmetric Nonnegative Matrix
//! Factorization for Graph Clustering." SDM 2012.

use std::ops::ControlFlow;

use log::{info, trace, warn};
use rand::prelude::*;

use super::similarity;
use super::traits::Clustering;
use super::util;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 300;
/// Default convergence threshold on `||H_new - H||²_F`.
pub const DEFAULT_TOL: f64 = 1e-4;
/// Default damping factor `β`.
pub const DEFAULT_DAMPING: f64 = 0.5;
/// Default denominator guard `ε`.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// SymNMF clustering.
#[derive(Debug, Clone)]
pub struct SymNmf {
    /// Number of clusters (columns of `H`).
    k: usize,
    /// Maximum number of updates.
    max_iter: usize,
    /// Absolute convergence threshold on the squared change of `H`. Small `H0`
    /// entries can fall under it early; lower it for tiny similarity graphs.
    tol: f64,
    /// Damping factor `β` in `(0, 1]`.
    damping: f64,
    /// Denominator guard.
    epsilon: f64,
    /// Optional RNG seed for reproducibility.
    seed: Option<u64>,
}

/// Result of a factorization run.
#[derive(Debug, Clone)]
pub struct SymNmfFit {
    /// Final factor matrix `H` (n×k).
    pub factor: Matrix,
    /// Number of updates performed.
    pub iterations: usize,
    /// `||H_new - H||²_F` of the last update.
    pub delta: f64,
    /// Whether `delta` fell below the tolerance.
    pub converged: bool,
    /// Whether the observer ended the run before convergence.
    pub cancelled: bool,
    /// `||W - H·Hᵀ||²_F` for the final `H`.
    pub reconstruction_error: f64,
}

impl SymNmfFit {
    /// Hard labels: row-wise argmax of the factor.
    pub fn labels(&self) -> Vec<usize> {
        labels(&self.factor)
    }
}

/// Snapshot handed to an observer after each update.
#[derive(Debug)]
pub struct IterationReport<'a> {
    /// 1-based iteration number.
    pub iteration: usize,
    /// `||H_new - H||²_F` for this update.
    pub delta: f64,
    /// The freshly updated factor.
    pub factor: &'a Matrix,
}

impl SymNmf {
    /// Create a new SymNMF clusterer with `k` clusters and default parameters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            damping: DEFAULT_DAMPING,
            epsilon: DEFAULT_EPSILON,
            seed: None,
        }
    }

    /// Set the iteration budget.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence threshold.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the damping factor `β` (`1.0` disables damping).
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the denominator guard `ε`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the RNG seed used by [`Clustering::fit_predict`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate_params(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be positive and finite",
            });
        }
        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "damping",
                message: "must be in (0, 1]",
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be non-negative and finite",
            });
        }
        Ok(())
    }

    fn validate_similarity(&self, w: &Matrix) -> Result<usize> {
        if !w.is_square() {
            return Err(Error::DimensionMismatch {
                expected: w.rows(),
                found: w.cols(),
            });
        }
        let n = w.rows();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if w.as_slice().iter().any(|&v| !(v.is_finite() && v >= 0.0)) {
            return Err(Error::InvalidParameter {
                name: "w",
                message: "entries must be non-negative and finite",
            });
        }
        Ok(n)
    }

    /// Draw a seed factor `H0` (n×k) with entries in `[0, 2·sqrt(mean(W)/k))`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if a parameter is out of range (including
    ///   `k == 0`) or `W` has no positive entry.
    /// - [`Error::InvalidClusterCount`] if `k` exceeds `n`.
    pub fn init_factor<R: Rng + ?Sized>(&self, w: &Matrix, rng: &mut R) -> Result<Matrix> {
        self.validate_params()?;
        let n = self.validate_similarity(w)?;

        let mean = w.mean();
        if mean <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "w",
                message: "mean must be positive",
            });
        }
        let upper = 2.0 * (mean / self.k as f64).sqrt();

        let data = (0..n * self.k).map(|_| rng.random::<f64>() * upper).collect();
        Matrix::from_vec(n, self.k, data)
    }

    /// Refine `h0` against `w` until convergence or budget exhaustion.
    pub fn fit(&self, w: &Matrix, h0: Matrix) -> Result<SymNmfFit> {
        self.fit_with_observer(w, h0, |_| ControlFlow::Continue(()))
    }

    /// Like [`SymNmf::fit`], calling `observer` after every update.
    ///
    /// Returning [`ControlFlow::Break`] stops the run at that iteration; the
    /// latest factor is returned with `converged == false`.
    pub fn fit_with_observer<F>(&self, w: &Matrix, h0: Matrix, mut observer: F) -> Result<SymNmfFit>
    where
        F: FnMut(&IterationReport<'_>) -> ControlFlow<()>,
    {
        self.validate_params()?;
        let n = self.validate_similarity(w)?;

        if h0.rows() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: h0.rows(),
            });
        }
        if h0.cols() != self.k {
            return Err(Error::DimensionMismatch {
                expected: self.k,
                found: h0.cols(),
            });
        }
        if h0.as_slice().iter().any(|&v| !(v.is_finite() && v >= 0.0)) {
            return Err(Error::InvalidParameter {
                name: "h0",
                message: "entries must be non-negative and finite",
            });
        }

        let mut h = h0;
        let mut delta = f64::INFINITY;
        let mut iterations = 0;
        let mut converged = false;
        let mut cancelled = false;

        while iterations < self.max_iter {
            let h_new = update(w, &h, self.damping, self.epsilon)?;
            iterations += 1;
            check_factor(&h_new, iterations)?;

            delta = h_new.frobenius_sq_diff(&h)?;
            h = h_new;
            trace!("symnmf iteration {}: delta={:e}", iterations, delta);

            let report = IterationReport {
                iteration: iterations,
                delta,
                factor: &h,
            };
            let stop = observer(&report).is_break();

            if delta < self.tol {
                converged = true;
                break;
            }
            if stop {
                cancelled = true;
                break;
            }
        }

        let reconstruction_error = reconstruction_error(w, &h)?;
        if converged {
            info!(
                "symnmf converged after {} iterations (delta={:e}, error={:e})",
                iterations, delta, reconstruction_error
            );
        } else if cancelled {
            info!(
                "symnmf stopped by observer after {} iterations (delta={:e})",
                iterations, delta
            );
        } else {
            warn!(
                "symnmf did not converge after {} iterations (delta={:e} >= tol={:e})",
                iterations, delta, self.tol
            );
        }

        Ok(SymNmfFit {
            factor: h,
            iterations,
            delta,
            converged,
            cancelled,
            reconstruction_error,
        })
    }

    /// Full pipeline on a dataset: `X → W → H0 → H`.
    pub fn fit_points(&self, points: &Matrix) -> Result<SymNmfFit> {
        self.validate_params()?;
        if self.k > points.rows() {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: points.rows(),
            });
        }

        let w = similarity::normalized_similarity(points)?;
        let h0 = match self.seed {
            Some(s) => self.init_factor(&w, &mut StdRng::seed_from_u64(s))?,
            None => self.init_factor(&w, &mut rand::rng())?,
        };
        self.fit(&w, h0)
    }
}

impl Default for SymNmf {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for SymNmf {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        let points = Matrix::from_rows(data)?;
        Ok(self.fit_points(&points)?.labels())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// One damped multiplicative update. `h` is left untouched.
fn update(w: &Matrix, h: &Matrix, damping: f64, epsilon: f64) -> Result<Matrix> {
    let numer = w.matmul(h)?;
    let denom = h.matmul(&h.gram())?;

    let mut out = Matrix::zeros(h.rows(), h.cols());
    for (idx, cell) in out.as_mut_slice().iter_mut().enumerate() {
        let ratio = numer.as_slice()[idx] / (denom.as_slice()[idx] + epsilon);
        let v = h.as_slice()[idx] * (1.0 - damping + damping * ratio);
        // Underflow guard: -0.0 and tiny negatives become 0.
        *cell = if v > 0.0 || v.is_nan() { v } else { 0.0 };
    }
    Ok(out)
}

fn check_factor(h: &Matrix, iteration: usize) -> Result<()> {
    if !h.is_finite() {
        return Err(Error::NumericalInstability { iteration });
    }
    if let Some(row) = h.row_iter().position(|r| r.iter().all(|&v| v == 0.0)) {
        return Err(Error::DegenerateFactorization { row, iteration });
    }
    Ok(())
}

/// `||W - H·Hᵀ||²_F`.
pub fn reconstruction_error(w: &Matrix, h: &Matrix) -> Result<f64> {
    let approx = h.matmul(&h.transpose())?;
    w.frobenius_sq_diff(&approx)
}

/// Row-wise argmax of a factor matrix; ties go to the lowest column.
pub fn labels(h: &Matrix) -> Vec<usize> {
    h.row_iter().map(util::argmax).collect()
}
