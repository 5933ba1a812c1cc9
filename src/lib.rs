//! Clustering of curves under an expensive distance oracle.
//!
//! * [gonzalez]: k-center by the farthest-point heuristic (2-approximation), optionally refined
//!   by local search and with the assignment of curves to centers;
//! * [arya]: gonzalez followed by single-swap local search;
//! * [one_median_approx]: sampling based 1-median;
//! * [one_median_exhaustive]: exact 1-median by evaluating all pairwise distances.
//!
//! All algorithms work on a [CurveMetric]. [CurveSpace] turns a slice of curves and a
//! [FrechetOracle] into one; distances are requested lazily and memoized for the duration of a
//! single call.
//!
//! # Example
//! ```rust
//! use curve_clustering::{gonzalez, one_median_exhaustive, CurveSpace, Frechet, Polyline};
//!
//! let curves = vec![
//!     Polyline::by_points(vec![(0.0, 0.0), (1.0, 0.0)]).unwrap(),
//!     Polyline::by_points(vec![(0.0, 0.1), (1.0, 0.1)]).unwrap(),
//!     Polyline::by_points(vec![(5.0, 5.0), (6.0, 5.0)]).unwrap(),
//! ];
//! let space = CurveSpace::new(&curves, Frechet);
//! let result = gonzalez(2, &space, false, true).unwrap();
//! assert_eq!(result.centers.as_slice(), &[0, 2]);
//! assert_eq!(result.assignment.unwrap().cluster(0), &[0, 1]);
//!
//! let median = one_median_exhaustive(&space).unwrap();
//! assert_eq!(median.size(), 1);
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub mod arya;
pub mod cache;
pub mod clustering;
pub mod cost;
pub mod error;
pub mod frechet;
pub mod gonzalez;
pub mod median;
pub mod sampler;
pub mod space;
pub mod types;

mod assertions;

pub use cache::DistanceCache;
pub use clustering::{cluster_assignment, Centers, ClusterAssignment, ClusteringResult};
pub use error::{ClusteringError, OracleError};
pub use frechet::{Frechet, Polyline, Position};
pub use sampler::UniformSampler;
pub use space::{BoundaryPoint, Curve, CurveMetric, CurveSpace, FrechetOracle, SpaceMatrix, DEFAULT_TOLERANCE};
pub use types::{CenterIdx, CurveCount, CurveIdx, Distance, DurationInSec};

use assertions::assert_epsilon;
use cost::{center_cost_sum, max_curve_cost};
use gonzalez::gonzalez_heuristic;

/// Optional parameters of the randomized algorithms. Every field left as None falls back to
/// its default.
#[derive(Debug, Clone, Default)]
pub struct OptionalParameters {
    /// seed of the sampler used by one_median_approx; None seeds from the operating system
    pub seed: Option<u64>,
    /// tolerance of the continuous oracle, applied by [CurveSpace::with_options];
    /// None means [DEFAULT_TOLERANCE]
    pub tolerance: Option<Distance>,
}

/// k-center clustering by the Gonzalez heuristic.
///
/// Curve 0 is the first center; every further center is the curve farthest from the centers
/// chosen so far. value is the largest such distance found in the last round, an upper bound on
/// the radius of the returned centers and at most twice the optimal radius. Only distances to
/// the first num_centers - 1 centers are evaluated.
///
/// If arya is set, the centers are refined by [arya::local_search] on the summed cost; value is
/// then the radius of the refined centers and total_cost their summed cost.
/// If with_assignment is set, the result contains the assignment of every curve to its nearest
/// center.
///
/// An empty collection or num_centers = 0 yields an empty result without evaluating any
/// distance. For num_centers = 1 the center is curve 0 and no selection round runs: unless
/// arya or with_assignment asks for distances, none is evaluated and value is 0.
pub fn gonzalez<M: CurveMetric + ?Sized>(
    num_centers: CurveCount,
    space: &M,
    arya: bool,
    with_assignment: bool,
) -> Result<ClusteringResult, ClusteringError> {
    let start = Instant::now();
    if space.n() == 0 || num_centers == 0 {
        return Ok(ClusteringResult::default());
    }

    let mut cache = DistanceCache::new(space);

    /////////////////////////////////////////////////////
    // phase 1: farthest-point traversal (gonzalez)    //
    /////////////////////////////////////////////////////

    let seeding = gonzalez_heuristic(&mut cache, num_centers)?;
    let mut centers = seeding.centers;
    let mut value = seeding.value;
    let mut total_cost = None;

    /////////////////////////////////////////////////////
    // phase 2: local search on the summed cost (arya) //
    /////////////////////////////////////////////////////

    if arya {
        let refinement = arya::local_search(&mut cache, centers)?;
        info!(
            swaps = refinement.swaps,
            passes = refinement.passes,
            initial_cost = refinement.initial_cost,
            cost = refinement.cost,
            "local search finished"
        );
        centers = refinement.centers;
        value = max_curve_cost(&centers, &mut cache)?;
        total_cost = Some(refinement.cost);
    }

    let assignment = if with_assignment {
        Some(cluster_assignment(&centers, &mut cache)?)
    } else {
        None
    };

    let running_time = start.elapsed().as_secs_f64();
    info!(
        k = centers.m(),
        centers = %centers,
        value,
        distances = cache.computed(),
        running_time,
        "gonzalez finished"
    );
    Ok(ClusteringResult {
        centers,
        value,
        running_time,
        assignment,
        total_cost,
    })
}

/// [gonzalez] followed by local search; equals gonzalez(num_centers, space, true, false).
pub fn arya<M: CurveMetric + ?Sized>(
    num_centers: CurveCount,
    space: &M,
) -> Result<ClusteringResult, ClusteringError> {
    gonzalez(num_centers, space, true, false)
}

/// Randomized 1-median using the thread local random generator. See
/// [one_median_approx_with_sampler].
pub fn one_median_approx<M: CurveMetric + ?Sized>(
    epsilon: f64,
    space: &M,
) -> Result<ClusteringResult, ClusteringError> {
    one_median_approx_with_sampler(epsilon, space, &mut rand::thread_rng())
}

/// Randomized 1-median with a generator configured by optional (a fixed seed makes the result
/// reproducible).
pub fn one_median_approx_with_options<M: CurveMetric + ?Sized>(
    epsilon: f64,
    space: &M,
    optional: &OptionalParameters,
) -> Result<ClusteringResult, ClusteringError> {
    let mut rng = match optional.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    one_median_approx_with_sampler(epsilon, space, &mut rng)
}

/// Randomized 1-median.
///
/// Draws 60 candidate curves and ceil(ln(60) / epsilon<sup>2</sup>) witness curves uniformly
/// and picks the candidate with the least summed distance to the witnesses. value is the summed
/// distance of all curves to that center.
///
/// # Errors
/// Epsilon must be finite and strictly positive. This is checked before anything else, also for
/// an empty collection.
pub fn one_median_approx_with_sampler<M: CurveMetric + ?Sized, S: UniformSampler + ?Sized>(
    epsilon: f64,
    space: &M,
    sampler: &mut S,
) -> Result<ClusteringResult, ClusteringError> {
    assert_epsilon(epsilon)?;
    let start = Instant::now();
    if space.n() == 0 {
        return Ok(ClusteringResult::default());
    }

    let mut cache = DistanceCache::new(space);
    let (median, witness_cost) = median::sampled_median(&mut cache, epsilon, sampler)?;
    let centers = Centers::new(vec![median]);
    let value = center_cost_sum(&centers, &mut cache)?;

    let running_time = start.elapsed().as_secs_f64();
    info!(
        median,
        witness_cost,
        value,
        distances = cache.computed(),
        running_time,
        "one_median_approx finished"
    );
    Ok(ClusteringResult {
        centers,
        value,
        running_time,
        assignment: None,
        total_cost: None,
    })
}

/// Exact 1-median: the curve minimizing the summed distance to all curves. Evaluates all
/// n<sup>2</sup> distances. value is the minimal sum.
pub fn one_median_exhaustive<M: CurveMetric + ?Sized>(
    space: &M,
) -> Result<ClusteringResult, ClusteringError> {
    let start = Instant::now();
    if space.n() == 0 {
        return Ok(ClusteringResult::default());
    }

    let mut cache = DistanceCache::new(space);
    let (median, value) = median::exhaustive_median(&mut cache)?;

    let running_time = start.elapsed().as_secs_f64();
    info!(
        median,
        value,
        distances = cache.computed(),
        running_time,
        "one_median_exhaustive finished"
    );
    Ok(ClusteringResult {
        centers: Centers::new(vec![median]),
        value,
        running_time,
        assignment: None,
        total_cost: None,
    })
}
