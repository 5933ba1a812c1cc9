///////////////////////////////////////////////////////////////
///////////////////// module: frechet /////////////////////////
///////////////////////////////////////////////////////////////

/// Polygonal curves and the Fréchet distance between them.
///
/// [Polyline] is a curve given by its vertices in d-dimensional euclidean space.
/// [Frechet] implements the [FrechetOracle] trait:
/// - discrete: the discrete Fréchet distance, computed by dynamic programming over all vertex
///   pairs in O(|a| |b|) time.
/// - continuous: the Fréchet distance, computed by bisection on the free-space decision
///   procedure (Alt and Godau) between the given lower and upper bound.
///
use crate::error::OracleError;
use crate::space::{BoundaryPoint, Curve, FrechetOracle};
use crate::types::Distance;

/// A vertex of a curve.
pub type Position = Vec<Distance>;

impl BoundaryPoint for Position {
    fn dist_sqr(&self, other: &Self) -> Distance {
        self.iter().zip(other.iter()).map(|(a, b)| (a - b) * (a - b)).sum()
    }
}

fn dist(a: &Position, b: &Position) -> Distance {
    a.dist_sqr(b).sqrt()
}

/// A polygonal curve with at least one vertex; all vertices have the same dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<Position>,
}

impl Polyline {
    /// Creates a new [Polyline].
    ///
    /// # Errors
    /// Returns an error if there are no vertices or if the vertices differ in dimension.
    pub fn new(vertices: Vec<Position>) -> Result<Polyline, OracleError> {
        let first = vertices.first().ok_or(OracleError::EmptyCurve)?;
        let dim = first.len();
        if let Some(v) = vertices.iter().find(|v| v.len() != dim) {
            return Err(OracleError::DimensionMismatch {
                left: dim,
                right: v.len(),
            });
        }
        Ok(Polyline { vertices })
    }

    /// Creates a curve in the plane.
    ///
    /// # Example
    /// ```rust
    /// use curve_clustering::Polyline;
    /// let curve = Polyline::by_points(vec!((0.0, 0.0), (1.5, 1.1), (1.0, 0.5))).unwrap();
    /// assert_eq!(curve.len(), 3);
    /// assert_eq!(curve.dimension(), 2);
    /// ```
    pub fn by_points(points: Vec<(Distance, Distance)>) -> Result<Polyline, OracleError> {
        Polyline::new(points.into_iter().map(|(x, y)| vec![x, y]).collect())
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn dimension(&self) -> usize {
        self.vertices[0].len()
    }

    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }
}

impl Curve for Polyline {
    type Point = Position;

    fn front(&self) -> &Position {
        &self.vertices[0]
    }

    fn back(&self) -> &Position {
        &self.vertices[self.vertices.len() - 1]
    }
}

// bisection steps before giving up; f64 bisection on any finite interval ends far earlier
const MAX_BISECTION_STEPS: usize = 2048;

/// The Fréchet oracle for [Polyline]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frechet;

impl Frechet {
    fn check_dimension(a: &Polyline, b: &Polyline) -> Result<(), OracleError> {
        if a.dimension() != b.dimension() {
            return Err(OracleError::DimensionMismatch {
                left: a.dimension(),
                right: b.dimension(),
            });
        }
        Ok(())
    }
}

impl FrechetOracle<Polyline> for Frechet {
    fn discrete(&self, a: &Polyline, b: &Polyline) -> Result<Distance, OracleError> {
        Frechet::check_dimension(a, b)?;
        let (p, q) = (a.vertices(), b.vertices());

        // coupling[i][j]: discrete Fréchet distance of the prefixes a[..=i] and b[..=j]
        let mut coupling: Vec<Vec<Distance>> = vec![vec![0.0; q.len()]; p.len()];
        for i in 0..p.len() {
            for j in 0..q.len() {
                let d = dist(&p[i], &q[j]);
                let previous = match (i, j) {
                    (0, 0) => 0.0,
                    (0, _) => coupling[0][j - 1],
                    (_, 0) => coupling[i - 1][0],
                    _ => coupling[i - 1][j]
                        .min(coupling[i][j - 1])
                        .min(coupling[i - 1][j - 1]),
                };
                coupling[i][j] = d.max(previous);
            }
        }
        Ok(coupling[p.len() - 1][q.len() - 1])
    }

    fn continuous(
        &self,
        a: &Polyline,
        b: &Polyline,
        upper: Distance,
        lower: Distance,
        tolerance: Distance,
        exact: bool,
    ) -> Result<Distance, OracleError> {
        Frechet::check_dimension(a, b)?;

        // a single vertex is matched to the whole other curve
        if a.len() == 1 || b.len() == 1 {
            let (point, curve) = if a.len() == 1 { (a, b) } else { (b, a) };
            return Ok(curve
                .vertices()
                .iter()
                .map(|v| dist(&point.vertices()[0], v))
                .fold(0.0, Distance::max));
        }

        if !(lower <= upper) {
            return Err(OracleError::NoConvergence { lower, upper });
        }

        let mut lo = lower;
        let mut hi = upper;
        for _ in 0..MAX_BISECTION_STEPS {
            if !exact && hi - lo <= tolerance {
                return Ok(hi);
            }
            let mid = lo + (hi - lo) / 2.0;
            if mid <= lo || mid >= hi {
                // interval cannot be split any further
                return Ok(hi);
            }
            if less_than_or_equal(a.vertices(), b.vertices(), mid) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        Err(OracleError::NoConvergence {
            lower: lo,
            upper: hi,
        })
    }
}

type Interval = Option<(Distance, Distance)>;

/// Parameters t in [0,1] of the segment (start, end) with distance at most eps to point.
fn free_interval(start: &Position, end: &Position, point: &Position, eps: Distance) -> Interval {
    let direction: Position = end.iter().zip(start.iter()).map(|(e, s)| e - s).collect();
    let offset: Position = start.iter().zip(point.iter()).map(|(s, c)| s - c).collect();
    let a: Distance = direction.iter().map(|x| x * x).sum();
    let b: Distance = 2.0 * direction.iter().zip(offset.iter()).map(|(d, f)| d * f).sum::<Distance>();
    let c: Distance = offset.iter().map(|x| x * x).sum::<Distance>() - eps * eps;

    if a == 0.0 {
        // degenerate segment
        return if c <= 0.0 { Some((0.0, 1.0)) } else { None };
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let t1 = ((-b - root) / (2.0 * a)).max(0.0);
    let t2 = ((-b + root) / (2.0 * a)).min(1.0);
    if t1 > t2 {
        None
    } else {
        Some((t1, t2))
    }
}

/// Part of interval with parameter at least from.
fn cut_below(interval: Interval, from: Distance) -> Interval {
    interval.and_then(|(lo, hi)| {
        let lo = lo.max(from);
        if lo <= hi {
            Some((lo, hi))
        } else {
            None
        }
    })
}

/// Decision procedure: is the Fréchet distance of p and q at most eps?
/// Both curves need at least two vertices.
fn less_than_or_equal(p: &[Position], q: &[Position], eps: Distance) -> bool {
    let (m, n) = (p.len() - 1, q.len() - 1); // number of segments
    if dist(&p[0], &q[0]) > eps || dist(&p[m], &q[n]) > eps {
        return false;
    }

    // reach_left[i][j]: reachable part of the edge s = i (vertex p[i]) against segment q[j]q[j+1]
    // reach_bottom[i][j]: reachable part of the edge t = j (vertex q[j]) against segment p[i]p[i+1]
    let mut reach_left: Vec<Vec<Interval>> = vec![vec![None; n]; m + 1];
    let mut reach_bottom: Vec<Vec<Interval>> = vec![vec![None; n + 1]; m];

    // the boundary s = 0 is reachable as long as it is free from the start on
    let mut open = true;
    for j in 0..n {
        let free = free_interval(&q[j], &q[j + 1], &p[0], eps);
        reach_left[0][j] = match free {
            Some((lo, hi)) if open && lo <= 0.0 => Some((lo, hi)),
            _ => None,
        };
        open = matches!(reach_left[0][j], Some((_, hi)) if hi >= 1.0);
    }
    let mut open = true;
    for i in 0..m {
        let free = free_interval(&p[i], &p[i + 1], &q[0], eps);
        reach_bottom[i][0] = match free {
            Some((lo, hi)) if open && lo <= 0.0 => Some((lo, hi)),
            _ => None,
        };
        open = matches!(reach_bottom[i][0], Some((_, hi)) if hi >= 1.0);
    }

    for i in 0..m {
        for j in 0..n {
            let left = reach_left[i][j];
            let bottom = reach_bottom[i][j];

            let right_free = free_interval(&q[j], &q[j + 1], &p[i + 1], eps);
            reach_left[i + 1][j] = match (bottom, left) {
                (Some(_), _) => right_free,
                (None, Some((lo, _))) => cut_below(right_free, lo),
                (None, None) => None,
            };

            let top_free = free_interval(&p[i], &p[i + 1], &q[j + 1], eps);
            reach_bottom[i][j + 1] = match (left, bottom) {
                (Some(_), _) => top_free,
                (None, Some((lo, _))) => cut_below(top_free, lo),
                (None, None) => None,
            };
        }
    }

    matches!(reach_left[m][n - 1], Some((_, hi)) if hi >= 1.0)
        || matches!(reach_bottom[m - 1][n], Some((_, hi)) if hi >= 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::boundary_lower_bound;
    use rand::Rng;

    fn curve(points: Vec<(f64, f64)>) -> Polyline {
        Polyline::by_points(points).unwrap()
    }

    fn frechet(a: &Polyline, b: &Polyline) -> Distance {
        let upper = Frechet.discrete(a, b).unwrap();
        let lower = boundary_lower_bound(a, b);
        Frechet.continuous(a, b, upper, lower, 0.001, false).unwrap()
    }

    #[test]
    fn construction_checks() {
        assert_eq!(Polyline::new(vec![]), Err(OracleError::EmptyCurve));
        assert!(matches!(
            Polyline::new(vec![vec![0.0, 0.0], vec![1.0]]),
            Err(OracleError::DimensionMismatch { left: 2, right: 1 })
        ));
        let c = curve(vec![(0.0, 0.0), (3.0, 4.0)]);
        assert_eq!(c.front(), &vec![0.0, 0.0]);
        assert_eq!(c.back(), &vec![3.0, 4.0]);
        assert_eq!(c.front().dist_sqr(c.back()), 25.0);
    }

    #[test]
    fn identical_curves_have_distance_zero() {
        let a = curve(vec![(0.0, 0.0), (1.0, 2.0), (3.0, -1.0)]);
        assert_eq!(Frechet.discrete(&a, &a).unwrap(), 0.0);
        assert_eq!(frechet(&a, &a), 0.0);
    }

    #[test]
    fn parallel_segments() {
        let a = curve(vec![(0.0, 0.0), (1.0, 0.0)]);
        let b = curve(vec![(0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(Frechet.discrete(&a, &b).unwrap(), 1.0);
        assert_eq!(frechet(&a, &b), 1.0);
    }

    #[test]
    fn continuous_beats_discrete() {
        // the middle vertex of b has no partner vertex on a at distance 1
        let a = curve(vec![(0.0, 0.0), (2.0, 0.0)]);
        let b = curve(vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        let discrete = Frechet.discrete(&a, &b).unwrap();
        assert!((discrete - 2.0f64.sqrt()).abs() < 1e-12);

        let d = frechet(&a, &b);
        assert!(d >= 1.0 && d <= 1.0 + 0.001, "got {}", d);

        let exact = Frechet.continuous(&a, &b, discrete, 1.0, 0.001, true).unwrap();
        assert!((exact - 1.0).abs() < 1e-9, "got {}", exact);
    }

    #[test]
    fn backtracking_is_expensive() {
        // b walks to x = 3, back to x = 1 and on to x = 4; a is the straight segment. The
        // continuous distance is half of the backtracking length (1.0).
        let a = curve(vec![(0.0, 0.0), (4.0, 0.0)]);
        let b = curve(vec![(0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (4.0, 0.0)]);
        let upper = Frechet.discrete(&a, &b).unwrap();
        let d = Frechet.continuous(&a, &b, upper, 0.0, 0.001, true).unwrap();
        assert!((d - 1.0).abs() < 1e-9, "got {}", d);
    }

    #[test]
    fn single_vertex_curve() {
        let a = curve(vec![(0.0, 0.0)]);
        let b = curve(vec![(3.0, 4.0), (0.0, 1.0), (-6.0, 8.0)]);
        assert_eq!(Frechet.discrete(&a, &b).unwrap(), 10.0);
        assert_eq!(frechet(&a, &b), 10.0);
        assert_eq!(frechet(&b, &a), 10.0);
    }

    #[test]
    fn dimension_mismatch() {
        let a = curve(vec![(0.0, 0.0), (1.0, 0.0)]);
        let b = Polyline::new(vec![vec![0.0, 0.0, 0.0]]).unwrap();
        assert!(Frechet.discrete(&a, &b).is_err());
        assert!(Frechet.continuous(&a, &b, 1.0, 0.0, 0.001, false).is_err());
    }

    #[test]
    fn inconsistent_bounds_are_reported() {
        let a = curve(vec![(0.0, 0.0), (1.0, 0.0)]);
        let b = curve(vec![(0.0, 1.0), (1.0, 1.0)]);
        assert!(matches!(
            Frechet.continuous(&a, &b, 1.0, 2.0, 0.001, false),
            Err(OracleError::NoConvergence { .. })
        ));
    }

    #[test]
    fn continuous_lies_between_bounds_and_is_symmetric() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let a = curve((0..6).map(|_| (rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0))).collect());
            let b = curve((0..4).map(|_| (rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0))).collect());
            let upper = Frechet.discrete(&a, &b).unwrap();
            let lower = boundary_lower_bound(&a, &b);
            let ab = Frechet.continuous(&a, &b, upper, lower, 0.001, false).unwrap();
            let ba = Frechet.continuous(&b, &a, upper, lower, 0.001, false).unwrap();
            assert!(lower <= ab && ab <= upper);
            assert!((ab - ba).abs() <= 0.001 + 1e-9);
        }
    }
}
