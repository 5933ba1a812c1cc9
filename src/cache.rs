use tracing::trace;

use crate::error::ClusteringError;
use crate::space::CurveMetric;
use crate::types::{CurveCount, CurveIdx, Distance};

/// Lazily filled, symmetric nxn table of curve distances.
///
/// A cell is None until the distance has been demanded once; from then on the value is served
/// from the table. One cache lives for exactly one top-level algorithm call.
pub struct DistanceCache<'a, M: CurveMetric + ?Sized> {
    space: &'a M,
    distances: Vec<Vec<Option<Distance>>>,
    computed: usize, // number of unordered off-diagonal pairs that have been resolved
}

impl<'a, M: CurveMetric + ?Sized> DistanceCache<'a, M> {
    /// Creates an empty cache for space; only the diagonal is known (0).
    pub fn new(space: &'a M) -> DistanceCache<'a, M> {
        let n = space.n();
        let mut distances = vec![vec![None; n]; n];
        for (i, row) in distances.iter_mut().enumerate() {
            row[i] = Some(0.0);
        }
        DistanceCache {
            space,
            distances,
            computed: 0,
        }
    }

    /// Return the number of curves.
    pub fn n(&self) -> CurveCount {
        self.distances.len()
    }

    /// Returns the distance between curve i and curve j, computing and storing it (in both
    /// directions) on the first request.
    pub fn dist(&mut self, i: CurveIdx, j: CurveIdx) -> Result<Distance, ClusteringError> {
        if let Some(d) = self.distances[i][j] {
            return Ok(d);
        }
        let d = self.space.dist(i, j)?;
        trace!(i, j, d, "distance computed");
        self.distances[i][j] = Some(d);
        self.distances[j][i] = Some(d);
        self.computed += 1;
        Ok(d)
    }

    /// Returns the cached distance without computing it.
    pub fn get(&self, i: CurveIdx, j: CurveIdx) -> Option<Distance> {
        self.distances[i][j]
    }

    /// Number of distinct pairs for which the oracle has been invoked.
    pub fn computed(&self) -> usize {
        self.computed
    }
}
