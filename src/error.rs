use thiserror::Error;

/// Errors returned by the SymNMF pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Input dataset has no points.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Goal name not in the dispatch table.
    #[error("invalid goal {0:?}: expected one of sym, ddg, norm, symnmf")]
    UnknownGoal(String),

    /// Rows (or matrix shapes) have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at point {row}, dimension {col}")]
    NonFiniteInput {
        /// Point index.
        row: usize,
        /// Coordinate index.
        col: usize,
    },

    /// Malformed CSV input.
    #[error("malformed input at line {line}: {message}")]
    InputFormat {
        /// 1-based line number in the source text.
        line: usize,
        /// Human-readable explanation.
        message: String,
    },

    /// A point has zero (or non-finite) total similarity and cannot be normalized.
    #[error("degenerate input: point {index} has zero total similarity")]
    DegenerateInput {
        /// Index of the offending point.
        index: usize,
    },

    /// NaN or infinity appeared in the factor matrix.
    #[error("numerical instability: non-finite factor entry after iteration {iteration}")]
    NumericalInstability {
        /// 1-based iteration that produced the entry.
        iteration: usize,
    },

    /// A factor row collapsed to all zeros.
    #[error("degenerate factorization: row {row} collapsed to zero after iteration {iteration}")]
    DegenerateFactorization {
        /// Row of H that collapsed.
        row: usize,
        /// 1-based iteration that produced the collapse.
        iteration: usize,
    },

    /// Reading input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse error taxonomy, one class per failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad arity, unknown goal, or out-of-range parameter. Raised before any computation.
    InvalidArgument,
    /// Ragged, empty, or non-numeric input.
    InputFormat,
    /// Zero-degree point.
    DegenerateInput,
    /// NaN/Inf produced mid-computation.
    NumericalInstability,
    /// A factor row collapsed to zero.
    DegenerateFactorization,
}

impl Error {
    /// The taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidParameter { .. }
            | Error::InvalidClusterCount { .. }
            | Error::UnknownGoal(_) => ErrorKind::InvalidArgument,
            Error::EmptyInput
            | Error::DimensionMismatch { .. }
            | Error::NonFiniteInput { .. }
            | Error::InputFormat { .. }
            | Error::Io(_) => ErrorKind::InputFormat,
            Error::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            Error::NumericalInstability { .. } => ErrorKind::NumericalInstability,
            Error::DegenerateFactorization { .. } => ErrorKind::DegenerateFactorization,
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
