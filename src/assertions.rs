use crate::error::ClusteringError;
use crate::median::{witness_count, MAX_WITNESS_COUNT};
use crate::types::Distance;

/// Asserts the parameter of the randomized 1-median solver.
/// The number of witnesses is ceil(ln(60) / epsilon<sup>2</sup>), so epsilon must be finite,
/// strictly positive and large enough that this count stays below [MAX_WITNESS_COUNT].
pub fn assert_epsilon(epsilon: f64) -> Result<(), ClusteringError> {
    if !epsilon.is_finite() || epsilon <= 0.0 || witness_count(epsilon).is_none() {
        return Err(ClusteringError::InvalidEpsilon { epsilon });
    }
    Ok(())
}

/// Asserts an explicit distance matrix.
///
/// # Errors
/// Returns an error if one of the following checks fails:
/// * the matrix must be quadratic.
/// * every entry must be finite and non-negative.
/// * the diagonal must be zero.
/// * the matrix must be symmetric.
pub fn assert_distance_matrix(distances: &[Vec<Distance>]) -> Result<(), ClusteringError> {
    let n = distances.len();
    for (i, row) in distances.iter().enumerate() {
        if row.len() != n {
            return Err(ClusteringError::invalid_distance_matrix(format!(
                "matrix is not quadratic. row {} has {} entries; number of rows: {}",
                i,
                row.len(),
                n
            )));
        }
    }
    for i in 0..n {
        if distances[i][i] != 0.0 {
            return Err(ClusteringError::invalid_distance_matrix(format!(
                "dist({},{}) = {} but the diagonal must be zero",
                i, i, distances[i][i]
            )));
        }
        for j in 0..n {
            let d = distances[i][j];
            if !d.is_finite() || d < 0.0 {
                return Err(ClusteringError::invalid_distance_matrix(format!(
                    "dist({},{}) = {} is not a finite non-negative number",
                    i, j, d
                )));
            }
            if d != distances[j][i] {
                return Err(ClusteringError::invalid_distance_matrix(format!(
                    "symmetry is violated: dist({},{}) = {}, dist({},{}) = {}",
                    i, j, d, j, i, distances[j][i]
                )));
            }
        }
    }
    Ok(())
}
