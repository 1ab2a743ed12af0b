use super::{Point2, TOLERANCE};

/// Computes the signed area of a vertex loop (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A repeated closing
/// vertex contributes nothing.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Euclidean length of the segment from `a` to `b`.
#[must_use]
pub fn segment_length(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Returns true if `a` and `b` are within [`TOLERANCE`] of each other.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    segment_length(a, b) < TOLERANCE
}

/// Axis-aligned bounds of a point set as `(min, max)`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn bounds_2d(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}
