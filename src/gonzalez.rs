use tracing::debug;

use crate::cache::DistanceCache;
use crate::clustering::Centers;
use crate::error::ClusteringError;
use crate::space::CurveMetric;
use crate::types::{CurveCount, CurveIdx, Distance};

/// Output of the farthest-point traversal.
#[derive(Debug, Clone)]
pub struct Seeding {
    pub centers: Centers,
    /// radii[m] is the largest distance of a curve to the first m+1 centers. It is recorded for
    /// every prefix a selection round measured, so the radius of the complete set is only known
    /// if seeding stopped early.
    pub radii: Vec<Distance>,
    /// the maximum cost found in the last selection round, i.e. the distance of the last chosen
    /// center to the centers before it. 0 if no round ran (k = 1).
    pub value: Distance,
}

/// Gonzalez heuristic (farthest-first traversal); a 2-approximation of the optimal k-center
/// radius. The cache must hold at least one curve and k must be at least 1.
///
/// Only distances to the first k-1 centers are requested, i.e. at most (k-1)*n oracle calls.
/// Seeding stops early if all curves already have distance 0 to the chosen centers, so the
/// centers stay distinct.
pub fn gonzalez_heuristic<M: CurveMetric + ?Sized>(
    cache: &mut DistanceCache<M>,
    k: CurveCount,
) -> Result<Seeding, ClusteringError> {
    let n = cache.n();
    let mut gonzalez = Centers::with_capacity(k.min(n));
    let mut radii: Vec<Distance> = Vec::with_capacity(k.min(n).saturating_sub(1));
    let mut value: Distance = 0.0;

    // we can add any curve as first center, so lets take 0
    gonzalez.push(0);

    // current distance of curve x to the set of already determined centers
    let mut dist_x_center: Vec<Distance> = vec![Distance::INFINITY; n];

    for i in 1..k {
        // as the distance of x to centers 0..i-2 is known, we only need to measure the distance
        // to the newest center i-1.
        let newest = gonzalez.get(i - 1);
        for (x, d) in dist_x_center.iter_mut().enumerate() {
            let dist_to_newest_center = cache.dist(x, newest)?;
            if dist_to_newest_center < *d {
                *d = dist_to_newest_center;
            }
        }

        let (farthest, current_distance) = max_of(&dist_x_center);
        radii.push(current_distance);
        value = current_distance;
        if current_distance <= 0.0 {
            debug!(centers = i, "every curve coincides with a center; stop seeding");
            break;
        }
        debug!(center = farthest, number = i + 1, distance = current_distance, "found center");
        gonzalez.push(farthest);
    }

    Ok(Seeding {
        centers: gonzalez,
        radii,
        value,
    })
}

/// First index with strictly maximal value (and the value); (0, 0.0) for an empty slice.
fn max_of(values: &[Distance]) -> (CurveIdx, Distance) {
    let mut current_distance: Distance = 0.0;
    let mut current_point: CurveIdx = 0;
    for (x, &d) in values.iter().enumerate() {
        if d > current_distance {
            current_distance = d;
            current_point = x;
        }
    }
    (current_point, current_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::max_curve_cost;
    use crate::space::SpaceMatrix;
    use rand::Rng;

    fn random_plane(n: usize) -> SpaceMatrix {
        let mut rng = rand::thread_rng();
        let pos: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
            .collect();
        SpaceMatrix::new(
            pos.iter()
                .map(|a| {
                    pos.iter()
                        .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn example_table() {
        let space = SpaceMatrix::new_by_array([
            [0.0, 1.0, 5.0, 5.0],
            [1.0, 0.0, 5.0, 5.0],
            [5.0, 5.0, 0.0, 2.0],
            [5.0, 5.0, 2.0, 0.0],
        ])
        .unwrap();
        let mut cache = DistanceCache::new(&space);
        let seeding = gonzalez_heuristic(&mut cache, 2).unwrap();
        assert_eq!(seeding.centers.as_slice(), &[0, 2]);
        assert_eq!(seeding.value, 5.0);
        assert_eq!(seeding.radii, vec![5.0]);
        // distances to curve 0 only; the diagonal is free
        assert_eq!(cache.computed(), 3);
    }

    #[test]
    fn radii_are_non_increasing_and_exact() {
        let n = 80;
        let k = 12;
        let space = random_plane(n);
        let mut cache = DistanceCache::new(&space);
        let seeding = gonzalez_heuristic(&mut cache, k).unwrap();

        assert_eq!(seeding.centers.m(), k);
        assert_eq!(seeding.radii.len(), k - 1);
        for w in seeding.radii.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(seeding.value, seeding.radii[k - 2]);
        // each recorded radius is the radius of the corresponding prefix
        for m in 1..k {
            let prefix = Centers::new(seeding.centers.as_slice()[..m].to_vec());
            assert_eq!(max_curve_cost(&prefix, &mut cache).unwrap(), seeding.radii[m - 1]);
        }
        // distinct centers
        for (a, &c) in seeding.centers.iter().enumerate() {
            assert!(!seeding.centers.as_slice()[a + 1..].contains(&c));
        }
    }

    #[test]
    fn new_center_is_farthest_from_previous_ones() {
        let n = 40;
        let space = random_plane(n);
        let mut cache = DistanceCache::new(&space);
        let seeding = gonzalez_heuristic(&mut cache, 5).unwrap();
        for m in 1..5 {
            let c = seeding.centers.get(m);
            assert_eq!(
                (0..m)
                    .map(|p| space.dist(c, seeding.centers.get(p)).unwrap())
                    .fold(f64::INFINITY, f64::min),
                seeding.radii[m - 1]
            );
        }
    }

    #[test]
    fn single_center() {
        let space = SpaceMatrix::new_by_array([[0.0, 3.0], [3.0, 0.0]]).unwrap();
        let mut cache = DistanceCache::new(&space);
        let seeding = gonzalez_heuristic(&mut cache, 1).unwrap();
        assert_eq!(seeding.centers.as_slice(), &[0]);
        assert!(seeding.radii.is_empty());
        assert_eq!(seeding.value, 0.0);
        assert_eq!(cache.computed(), 0);
    }

    #[test]
    fn distances_only_to_all_but_the_last_center() {
        let n = 50;
        let space = random_plane(n);
        for k in 1..8 {
            let mut cache = DistanceCache::new(&space);
            let seeding = gonzalez_heuristic(&mut cache, k).unwrap();
            assert_eq!(seeding.centers.m(), k);
            assert!(cache.computed() <= (k - 1) * n);
            let last = seeding.centers.get(k - 1);
            for x in 0..n {
                if x != last && !seeding.centers.as_slice()[..k - 1].contains(&x) {
                    assert_eq!(cache.get(x, last), None);
                }
            }
        }
    }

    #[test]
    fn stops_when_all_curves_are_covered() {
        let space = SpaceMatrix::new_by_array([
            [0.0, 4.0, 0.0],
            [4.0, 0.0, 4.0],
            [0.0, 4.0, 0.0],
        ])
        .unwrap();
        let mut cache = DistanceCache::new(&space);
        let seeding = gonzalez_heuristic(&mut cache, 3).unwrap();
        assert_eq!(seeding.centers.as_slice(), &[0, 1]);
        assert_eq!(seeding.radii, vec![4.0, 0.0]);
        assert_eq!(seeding.value, 0.0);
    }
}
