/// Type of the number of curves in a collection.
pub type CurveCount = usize;
/// Index of a curve in the input collection (0..n).
pub type CurveIdx = usize;
/// Position of a center within a center set (0..k).
pub type CenterIdx = usize;
/// Type of curve-to-curve distances and of all objective values.
pub type Distance = f64;
/// Running time of an algorithm call in seconds.
pub type DurationInSec = f64;
