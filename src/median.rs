use tracing::debug;

use crate::cache::DistanceCache;
use crate::error::ClusteringError;
use crate::sampler::{scale_to_index, UniformSampler};
use crate::space::CurveMetric;
use crate::types::{CurveIdx, Distance};

/// Number of candidate centers drawn by the randomized solver.
pub const CANDIDATE_COUNT: usize = 60;

/// Largest number of witnesses the randomized solver draws; smaller epsilons are rejected.
pub const MAX_WITNESS_COUNT: usize = 1 << 28;

/// Number of witnesses for a given epsilon: ceil(ln(60) / epsilon^2).
/// None if the count is not finite or exceeds [MAX_WITNESS_COUNT].
pub fn witness_count(epsilon: f64) -> Option<usize> {
    let count = ((CANDIDATE_COUNT as f64).ln() / (epsilon * epsilon)).ceil();
    if count.is_finite() && count <= MAX_WITNESS_COUNT as f64 {
        Some(count as usize)
    } else {
        None
    }
}

/// Sampling based 1-median approximation. Draws candidates and witnesses uniformly and returns
/// the candidate with minimal summed distance to the witnesses together with that sum.
/// The cache must hold at least one curve.
///
/// # Errors
/// [ClusteringError::InvalidEpsilon] if epsilon gives no valid [witness_count].
pub fn sampled_median<M: CurveMetric + ?Sized, S: UniformSampler + ?Sized>(
    cache: &mut DistanceCache<M>,
    epsilon: f64,
    sampler: &mut S,
) -> Result<(CurveIdx, Distance), ClusteringError> {
    let n = cache.n();
    let num_witnesses =
        witness_count(epsilon).ok_or(ClusteringError::InvalidEpsilon { epsilon })?;
    let candidates = sampler.sample_uniform(CANDIDATE_COUNT);
    let witnesses = sampler.sample_uniform(num_witnesses);
    debug!(candidates = candidates.len(), witnesses = witnesses.len(), "drew samples");

    let mut best_candidate: CurveIdx = 0;
    let mut best_objective_value = Distance::INFINITY;

    for &u in candidates.iter() {
        let candidate = scale_to_index(u, n);
        let mut objective = 0.0;
        for &w in witnesses.iter() {
            objective += cache.dist(candidate, scale_to_index(w, n))?;
        }
        if objective < best_objective_value {
            best_candidate = candidate;
            best_objective_value = objective;
        }
    }
    Ok((best_candidate, best_objective_value))
}

/// Exact 1-median: the curve with minimal summed distance to all curves, and that sum.
/// All n^2 distances are evaluated. The cache must hold at least one curve.
pub fn exhaustive_median<M: CurveMetric + ?Sized>(
    cache: &mut DistanceCache<M>,
) -> Result<(CurveIdx, Distance), ClusteringError> {
    let n = cache.n();
    let mut best_candidate: CurveIdx = 0;
    let mut best_objective_value = Distance::INFINITY;

    for i in 0..n {
        let mut objective = 0.0;
        for j in 0..n {
            objective += cache.dist(i, j)?;
        }
        if objective < best_objective_value {
            best_candidate = i;
            best_objective_value = objective;
        }
    }
    Ok((best_candidate, best_objective_value))
}
