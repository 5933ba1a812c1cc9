///////////////////////////////////////////////////////////////
///////////////////// module: space ///////////////////////////
///////////////////////////////////////////////////////////////

/// Module space connects the clustering algorithms to a collection of curves.
///
/// The algorithms only see the index-level trait [CurveMetric]:
/// - The number of curves can be obtained by n() -> CurveCount
/// - Distances can be obtained by dist(i : CurveIdx, j : CurveIdx) -> Result<Distance, ClusteringError>
///
/// The most general implementation is [CurveSpace], which pairs a slice of curves with a
/// [FrechetOracle] and evaluates distances with cheap bounds first.
/// [SpaceMatrix] is a finite table of distances; it is used when all distances are known in
/// advance (and in tests to bypass the oracle).
///

use crate::assertions::assert_distance_matrix;
use crate::error::{ClusteringError, OracleError};
use crate::types::{CurveCount, CurveIdx, Distance};
use crate::OptionalParameters;

/// Tolerance handed to the continuous oracle if nothing else is configured.
pub const DEFAULT_TOLERANCE: Distance = 0.001;

/// Index-level view on a collection of curves.
pub trait CurveMetric {
    /// Return the number of curves.
    fn n(&self) -> CurveCount;

    /// Computes the distance between curve i and curve j. This is the expensive call that
    /// [DistanceCache](crate::cache::DistanceCache) memoizes.
    fn dist(&self, i: CurveIdx, j: CurveIdx) -> Result<Distance, ClusteringError>;
}

/// A boundary point of a curve; only used for the cheap lower bound.
pub trait BoundaryPoint {
    /// Squared euclidean distance to another point.
    fn dist_sqr(&self, other: &Self) -> Distance;
}

/// A curve is opaque to the algorithms except for its first and last point.
pub trait Curve {
    type Point: BoundaryPoint;

    fn front(&self) -> &Self::Point;
    fn back(&self) -> &Self::Point;
}

/// The external distance oracle between two curves.
pub trait FrechetOracle<C: Curve> {
    /// Cheap but exact discrete distance; serves as upper bound for the continuous one.
    fn discrete(&self, a: &C, b: &C) -> Result<Distance, OracleError>;

    /// Expensive continuous distance. upper and lower are pruning hints, the result must be
    /// within tolerance of the true value unless exact is set.
    fn continuous(
        &self,
        a: &C,
        b: &C,
        upper: Distance,
        lower: Distance,
        tolerance: Distance,
        exact: bool,
    ) -> Result<Distance, OracleError>;
}

/// Lower bound on any Fréchet-type distance: matching boundary points must be paired.
pub fn boundary_lower_bound<C: Curve>(a: &C, b: &C) -> Distance {
    let front = a.front().dist_sqr(b.front());
    let back = a.back().dist_sqr(b.back());
    front.max(back).sqrt()
}

//////////////////// CurveSpace /////////////////////////

/// A slice of curves together with the oracle measuring them. Implements [CurveMetric].
pub struct CurveSpace<'a, C, O> {
    curves: &'a [C],
    oracle: O,
    tolerance: Distance,
}

impl<'a, C: Curve, O: FrechetOracle<C>> CurveSpace<'a, C, O> {
    /// Creates a new [CurveSpace] using [DEFAULT_TOLERANCE].
    pub fn new(curves: &'a [C], oracle: O) -> Self {
        CurveSpace {
            curves,
            oracle,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Replaces the tolerance passed to the continuous oracle.
    pub fn with_tolerance(mut self, tolerance: Distance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Creates a new [CurveSpace] with the tolerance of optional, or [DEFAULT_TOLERANCE] if it
    /// is not set.
    pub fn with_options(curves: &'a [C], oracle: O, optional: &OptionalParameters) -> Self {
        CurveSpace::new(curves, oracle)
            .with_tolerance(optional.tolerance.unwrap_or(DEFAULT_TOLERANCE))
    }
}

impl<'a, C: Curve, O: FrechetOracle<C>> CurveMetric for CurveSpace<'a, C, O> {
    fn n(&self) -> CurveCount {
        self.curves.len()
    }

    fn dist(&self, i: CurveIdx, j: CurveIdx) -> Result<Distance, ClusteringError> {
        let (a, b) = (&self.curves[i], &self.curves[j]);
        let lower = boundary_lower_bound(a, b);
        let upper = self
            .oracle
            .discrete(a, b)
            .map_err(|e| ClusteringError::oracle(i, j, e))?;
        self.oracle
            .continuous(a, b, upper, lower, self.tolerance, false)
            .map_err(|e| ClusteringError::oracle(i, j, e))
    }
}

//////////////////// SpaceMatrix /////////////////////////

/// A finite collection whose pairwise distances are given by a symmetric nxn matrix.
/// Implements the [CurveMetric] trait.
#[derive(Debug, Clone)]
pub struct SpaceMatrix {
    distances: Vec<Vec<Distance>>,
}

impl SpaceMatrix {
    /// Creates a new [SpaceMatrix];
    /// distances has to be a quadratic matrix that is symmetric, non-negative and zero on the
    /// diagonal. The triangle inequality is not required.
    pub fn new(distances: Vec<Vec<Distance>>) -> Result<SpaceMatrix, ClusteringError> {
        assert_distance_matrix(&distances)?;
        Ok(SpaceMatrix { distances })
    }

    /// Creates a new [SpaceMatrix] as in new but the distances are received by an array.
    ///
    /// # Example
    /// ```rust
    /// use curve_clustering::{CurveMetric, SpaceMatrix};
    /// let space = SpaceMatrix::new_by_array(
    ///                 [[0.0, 2.0, 1.5],
    ///                  [2.0, 0.0, 0.6],
    ///                  [1.5, 0.6, 0.0]]).unwrap();
    /// assert_eq!(space.dist(1, 2).unwrap(), 0.6);
    /// assert_eq!(space.n(), 3);
    /// ```
    pub fn new_by_array<const N: usize>(
        distances: [[Distance; N]; N],
    ) -> Result<SpaceMatrix, ClusteringError> {
        SpaceMatrix::new(distances.iter().map(|row| row.to_vec()).collect())
    }
}

impl CurveMetric for SpaceMatrix {
    fn n(&self) -> CurveCount {
        self.distances.len()
    }

    fn dist(&self, i: CurveIdx, j: CurveIdx) -> Result<Distance, ClusteringError> {
        Ok(self.distances[i][j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    struct Pt(f64, f64);

    impl BoundaryPoint for Pt {
        fn dist_sqr(&self, other: &Self) -> Distance {
            (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
        }
    }

    struct Seg(Pt, Pt);

    impl Curve for Seg {
        type Point = Pt;
        fn front(&self) -> &Pt {
            &self.0
        }
        fn back(&self) -> &Pt {
            &self.1
        }
    }

    // records the hints it receives
    struct Recorder {
        calls: RefCell<Vec<(Distance, Distance, Distance, bool)>>,
    }

    impl FrechetOracle<Seg> for Recorder {
        fn discrete(&self, _a: &Seg, _b: &Seg) -> Result<Distance, OracleError> {
            Ok(7.0)
        }
        fn continuous(
            &self,
            _a: &Seg,
            _b: &Seg,
            upper: Distance,
            lower: Distance,
            tolerance: Distance,
            exact: bool,
        ) -> Result<Distance, OracleError> {
            self.calls.borrow_mut().push((upper, lower, tolerance, exact));
            Ok(upper - 1.0)
        }
    }

    #[test]
    fn curve_space_passes_bounds_to_continuous_oracle() {
        let curves = vec![
            Seg(Pt(0.0, 0.0), Pt(1.0, 0.0)),
            Seg(Pt(0.0, 3.0), Pt(1.0, 4.0)),
        ];
        let oracle = Recorder {
            calls: RefCell::new(Vec::new()),
        };
        let space = CurveSpace::new(&curves, oracle);
        assert_eq!(space.n(), 2);
        assert_eq!(space.dist(0, 1).unwrap(), 6.0);

        let calls = space.oracle.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (upper, lower, tolerance, exact) = calls[0];
        assert_eq!(upper, 7.0);
        assert_eq!(lower, 4.0); // max(3, 4)
        assert_eq!(tolerance, DEFAULT_TOLERANCE);
        assert!(!exact);
    }

    #[test]
    fn tolerance_can_be_configured() {
        let curves = vec![Seg(Pt(0.0, 0.0), Pt(1.0, 0.0))];
        let oracle = Recorder {
            calls: RefCell::new(Vec::new()),
        };
        let space = CurveSpace::new(&curves, oracle).with_tolerance(0.25);
        space.dist(0, 0).unwrap();
        assert_eq!(space.oracle.calls.borrow()[0].2, 0.25);
    }

    #[test]
    fn tolerance_from_optional_parameters() {
        let curves = vec![Seg(Pt(0.0, 0.0), Pt(1.0, 0.0))];
        let optional = OptionalParameters {
            tolerance: Some(0.125),
            ..Default::default()
        };
        let space = CurveSpace::with_options(&curves, Recorder { calls: RefCell::new(Vec::new()) }, &optional);
        space.dist(0, 0).unwrap();
        assert_eq!(space.oracle.calls.borrow()[0].2, 0.125);

        let space = CurveSpace::with_options(
            &curves,
            Recorder { calls: RefCell::new(Vec::new()) },
            &OptionalParameters::default(),
        );
        assert_eq!(space.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn space_matrix_rejects_asymmetric_input() {
        let res = SpaceMatrix::new(vec![vec![0.0, 1.0], vec![2.0, 0.0]]);
        assert!(matches!(res, Err(ClusteringError::InvalidDistanceMatrix { .. })));
    }

    #[test]
    fn space_matrix_by_array() {
        let space = SpaceMatrix::new_by_array([[0.0, 3.0], [3.0, 0.0]]).unwrap();
        assert_eq!(space.n(), 2);
        assert_eq!(space.dist(0, 1).unwrap(), 3.0);
        assert_eq!(space.dist(1, 1).unwrap(), 0.0);
    }
}
