//! Error types of the clustering algorithms and of the distance oracle.

use thiserror::Error;

use crate::types::{CurveIdx, Distance};

/// Errors a distance oracle can report for a single pair of curves.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OracleError {
    /// The two curves live in spaces of different dimension.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// A curve without vertices has no distance to anything.
    #[error("curve has no vertices")]
    EmptyCurve,

    /// The bounds handed to the continuous solver never converged.
    #[error("no convergence between lower bound {lower} and upper bound {upper}")]
    NoConvergence { lower: Distance, upper: Distance },
}

/// Errors that abort a clustering call. No partial result is returned alongside them.
#[derive(Debug, Error)]
pub enum ClusteringError {
    /// The randomized 1-median solver needs a finite, strictly positive epsilon whose witness
    /// count stays bounded.
    #[error("epsilon must be finite, > 0 and not so small that the witness count overflows, got {epsilon}")]
    InvalidEpsilon { epsilon: f64 },

    /// The distance between curves i and j could not be computed.
    #[error("distance oracle failed for curves {i} and {j}: {source}")]
    Oracle {
        i: CurveIdx,
        j: CurveIdx,
        #[source]
        source: OracleError,
    },

    /// An explicit distance matrix is not a valid (semi)metric table.
    #[error("invalid distance matrix: {message}")]
    InvalidDistanceMatrix { message: String },
}

impl ClusteringError {
    pub fn oracle(i: CurveIdx, j: CurveIdx, source: OracleError) -> Self {
        Self::Oracle { i, j, source }
    }

    pub fn invalid_distance_matrix(message: impl Into<String>) -> Self {
        Self::InvalidDistanceMatrix {
            message: message.into(),
        }
    }
}
