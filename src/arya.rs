use tracing::debug;

use crate::cache::DistanceCache;
use crate::clustering::Centers;
use crate::cost::center_cost_sum;
use crate::error::ClusteringError;
use crate::space::CurveMetric;
use crate::types::Distance;

/// Output of the local search.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub centers: Centers,
    /// summed distance of all curves to their nearest center
    pub cost: Distance,
    /// the summed cost of the initial centers
    pub initial_cost: Distance,
    pub swaps: usize,
    pub passes: usize,
}

/// Single-swap local search (Arya et al.) on the summed assignment cost.
///
/// A swap of the center at position i with a non-center curve j is accepted immediately if it
/// lowers the cost by more than gamma * approxcost, where gamma = 1 / (3 k n) and approxcost is
/// the cost of the initial centers. Every accepted swap lowers the cost by at least that
/// threshold, so the number of swaps is bounded by approxcost / threshold = 3 k n.
pub fn local_search<M: CurveMetric + ?Sized>(
    cache: &mut DistanceCache<M>,
    initial: Centers,
) -> Result<Refinement, ClusteringError> {
    let n = cache.n();
    let k = initial.m();
    let mut centers = initial;

    let mut cost = center_cost_sum(&centers, cache)?;
    let approxcost = cost;
    let gamma = 1.0 / (3 * k * n) as Distance;
    let threshold = gamma * approxcost;

    let mut swaps = 0;
    let mut passes = 0;
    loop {
        passes += 1;
        let mut found = false;

        for i in 0..k {
            for j in 0..n {
                if centers.contains(j) {
                    continue;
                }
                let mut candidate = centers.clone();
                candidate.set(i, j);
                let candidate_cost = center_cost_sum(&candidate, cache)?;
                if cost - threshold > candidate_cost {
                    debug!(position = i, old = centers.get(i), new = j, cost = candidate_cost, "accepted swap");
                    centers = candidate;
                    cost = candidate_cost;
                    swaps += 1;
                    found = true;
                }
            }
        }
        debug!(pass = passes, cost, "local search pass finished");
        if !found {
            break;
        }
    }

    Ok(Refinement {
        centers,
        cost,
        initial_cost: approxcost,
        swaps,
        passes,
    })
}
