//! Cost of a set of centers: per curve (distance to the nearest center) and aggregated.

use crate::cache::DistanceCache;
use crate::clustering::Centers;
use crate::error::ClusteringError;
use crate::space::CurveMetric;
use crate::types::{CenterIdx, CurveIdx, Distance};

/// Returns the position (within centers) of the center nearest to curve i.
/// Ties are broken by the order of the center set, not by curve index. For an empty center set
/// the result is 0.
pub fn nearest_center<M: CurveMetric + ?Sized>(
    i: CurveIdx,
    centers: &Centers,
    cache: &mut DistanceCache<M>,
) -> Result<CenterIdx, ClusteringError> {
    let mut min_cost = Distance::INFINITY;
    let mut nearest: CenterIdx = 0;
    for (pos, &c) in centers.iter().enumerate() {
        let d = cache.dist(i, c)?;
        if d < min_cost {
            min_cost = d;
            nearest = pos;
        }
    }
    Ok(nearest)
}

/// Distance of curve i to its nearest center; infinity if there are no centers.
pub fn curve_cost<M: CurveMetric + ?Sized>(
    i: CurveIdx,
    centers: &Centers,
    cache: &mut DistanceCache<M>,
) -> Result<Distance, ClusteringError> {
    let mut min_cost = Distance::INFINITY;
    for &c in centers.iter() {
        let d = cache.dist(i, c)?;
        if d < min_cost {
            min_cost = d;
        }
    }
    Ok(min_cost)
}

/// Sum of [curve_cost] over all curves (the median objective).
pub fn center_cost_sum<M: CurveMetric + ?Sized>(
    centers: &Centers,
    cache: &mut DistanceCache<M>,
) -> Result<Distance, ClusteringError> {
    let mut cost = 0.0;
    for i in 0..cache.n() {
        cost += curve_cost(i, centers, cache)?;
    }
    Ok(cost)
}

/// Maximum of [curve_cost] over all curves (the k-center radius); 0 for an empty collection.
pub fn max_curve_cost<M: CurveMetric + ?Sized>(
    centers: &Centers,
    cache: &mut DistanceCache<M>,
) -> Result<Distance, ClusteringError> {
    let mut radius: Distance = 0.0;
    for i in 0..cache.n() {
        let d = curve_cost(i, centers, cache)?;
        if d > radius {
            radius = d;
        }
    }
    Ok(radius)
}
