//////////////////////////////////////////////////////////////
//////////////////// module: clustering //////////////////////
//////////////////////////////////////////////////////////////


/// Contains the result types (all of them are only valid together with the curve collection
/// they were computed on)
///
/// centers: an ordered list of curve indices
/// assignment: for each center the curves that are closest to it
/// result: centers, objective value, running time and optionally the assignment
///
use std::fmt;

use crate::cache::DistanceCache;
use crate::cost::nearest_center;
use crate::error::ClusteringError;
use crate::space::CurveMetric;
use crate::types::{CenterIdx, CurveCount, CurveIdx, Distance, DurationInSec};

/// A list of centers, given as curve indices, in the order they were chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Centers {
    centers: Vec<CurveIdx>,
}

impl Centers {
    pub fn new(centers: Vec<CurveIdx>) -> Centers {
        Centers { centers }
    }

    /// Creates a new empty list of centers. The capacity is used to allocate enough storage on the
    /// heap.
    pub fn with_capacity(capacity: CurveCount) -> Centers {
        Centers {
            centers: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of centers m.
    pub fn m(&self) -> CurveCount {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Return the center of index i (from 0 to m-1)
    pub fn get(&self, i: CenterIdx) -> CurveIdx {
        self.centers[i]
    }

    /// Adds a new center to the list.
    pub fn push(&mut self, c: CurveIdx) {
        self.centers.push(c);
    }

    /// Replaces the center at position i by curve c.
    pub fn set(&mut self, i: CenterIdx, c: CurveIdx) {
        self.centers[i] = c;
    }

    pub fn contains(&self, c: CurveIdx) -> bool {
        self.centers.contains(&c)
    }

    /// Provides an iterator of the centers.
    pub fn iter(&self) -> std::slice::Iter<'_, CurveIdx> {
        self.centers.iter()
    }

    pub fn as_slice(&self) -> &[CurveIdx] {
        &self.centers
    }
}

impl fmt::Display for Centers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        let mut iter = self.centers.iter();
        if let Some(c) = iter.next() {
            write!(f, "{}", c)?;
        }
        for c in iter {
            write!(f, ", {}", c)?;
        }
        write!(f, ")")
    }
}

/// The curves served by each center: clusters[i] lists the curves whose nearest center is the
/// one at position i of the center set. Every curve appears in exactly one cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterAssignment {
    clusters: Vec<Vec<CurveIdx>>,
}

impl ClusterAssignment {
    /// Number of clusters (equals the number of centers).
    pub fn k(&self) -> CenterIdx {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of curves assigned to the center at position i.
    pub fn count(&self, i: CenterIdx) -> CurveCount {
        self.clusters[i].len()
    }

    /// The j-th curve assigned to the center at position i.
    pub fn get(&self, i: CenterIdx, j: usize) -> CurveIdx {
        self.clusters[i][j]
    }

    pub fn cluster(&self, i: CenterIdx) -> &[CurveIdx] {
        &self.clusters[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<CurveIdx>> {
        self.clusters.iter()
    }

    /// Returns for each curve the position of its center; n must be the number of curves.
    pub fn label_of(&self, n: CurveCount) -> Vec<Option<CenterIdx>> {
        let mut labels = vec![None; n];
        for (c, cluster) in self.clusters.iter().enumerate() {
            for &x in cluster {
                labels[x] = Some(c);
            }
        }
        labels
    }
}

impl fmt::Display for ClusterAssignment {
    /// One line per center position: `i:x_1,x_2,...`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (c, cluster) in self.clusters.iter().enumerate() {
            if c > 0 {
                writeln!(f)?;
            }
            write!(f, "{}:", c)?;
            let mut iter = cluster.iter();
            if let Some(x) = iter.next() {
                write!(f, "{}", x)?;
            }
            for x in iter {
                write!(f, ",{}", x)?;
            }
        }
        Ok(())
    }
}

/// Assigns every curve to its nearest center (ties go to the earlier center in the set).
/// An empty center set yields an empty assignment.
pub fn cluster_assignment<M: CurveMetric + ?Sized>(
    centers: &Centers,
    cache: &mut DistanceCache<M>,
) -> Result<ClusterAssignment, ClusteringError> {
    if centers.is_empty() {
        return Ok(ClusterAssignment::default());
    }
    let mut clusters: Vec<Vec<CurveIdx>> = vec![Vec::new(); centers.m()];
    for i in 0..cache.n() {
        clusters[nearest_center(i, centers, cache)?].push(i);
    }
    Ok(ClusterAssignment { clusters })
}

/// Outcome of one clustering call.
#[derive(Debug, Clone, Default)]
pub struct ClusteringResult {
    /// the chosen centers
    pub centers: Centers,
    /// the objective: k-center radius for gonzalez/arya, summed distance for the 1-median solvers
    pub value: Distance,
    /// wall time of the whole call
    pub running_time: DurationInSec,
    /// only present if requested
    pub assignment: Option<ClusterAssignment>,
    /// summed distance of all curves to their nearest center, present after local search
    pub total_cost: Option<Distance>,
}

impl ClusteringResult {
    /// Return the i-th center.
    pub fn get(&self, i: CenterIdx) -> CurveIdx {
        self.centers.get(i)
    }

    /// Number of centers.
    pub fn size(&self) -> CurveCount {
        self.centers.m()
    }
}
