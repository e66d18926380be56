use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned while loading points or running a clustering.
///
/// Every variant is terminal for the run it was produced by; nothing in this crate retries.
#[derive(Debug, Error)]
pub enum Error {
    /// No points were supplied, or the points have no coordinates.
    #[error("empty input")]
    EmptyInput,

    /// A point has a different coordinate count than the first one.
    #[error("dimension mismatch at point {index}: expected {expected} coordinates, found {found}")]
    DimensionMismatch {
        /// Index of the offending point.
        index: usize,
        /// Dimensionality of the first point.
        expected: usize,
        /// Coordinate count of the offending point.
        found: usize,
    },

    /// The requested cluster count is not in `(1, num_points)`.
    #[error("invalid cluster count: requested {k}, but dataset has {num_points} points")]
    InvalidClusterCount {
        /// Requested number of clusters.
        k: usize,
        /// Number of points in the dataset.
        num_points: usize,
    },

    /// The cluster count is not a plain decimal number that fits a `usize`.
    #[error("invalid cluster count: {raw:?} is not a positive decimal number")]
    MalformedClusterCount {
        /// The rejected value, as given.
        raw: String,
    },

    /// The iteration bound can not be used.
    #[error("invalid maximum iteration: {max_iter}")]
    InvalidIterationBound {
        /// The rejected bound, as given.
        max_iter: String,
    },

    /// The convergence threshold is not a finite positive number.
    #[error("invalid epsilon: {0}")]
    InvalidEpsilon(String),

    /// Any other rejected configuration value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: &'static str,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at point {index}, dimension {dimension}")]
    NonFiniteCoordinate {
        index: usize,
        dimension: usize,
    },

    /// A buffer could not be allocated.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    /// Points or centroids with the wrong shape reached the engine. This is a bug.
    #[error("internal consistency violated: {0}")]
    InternalConsistency(String),

    /// A token of the input stream is not a number.
    #[error("line {line}: can not parse {token:?} as a number")]
    Parse {
        /// 1-based input line.
        line: usize,
        token: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
