use crate::error::DegenerateInputError;
use crate::math::polygon_2d::{points_coincide, segment_length, signed_area_2d};
use crate::math::Point2;

/// A closed vertex loop.
///
/// The first and last points coincide. Convexity and simplicity are not
/// required; rings built from degenerate input may self-touch.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point2>,
}

impl Ring {
    /// Creates a ring from an already closed point sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence has fewer than four points (three
    /// vertices plus the closing one), contains a non-finite coordinate, or
    /// does not end where it starts.
    pub fn new(points: Vec<Point2>) -> Result<Self, DegenerateInputError> {
        if points.len() < 4 {
            return Err(DegenerateInputError::TooFewVertices {
                expected: 4,
                actual: points.len(),
            });
        }
        if let Some(bad) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(DegenerateInputError::NonFinite { x: bad.x, y: bad.y });
        }
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if points_coincide(first, last) => Ok(Self { points }),
            _ => Err(DegenerateInputError::OpenRing),
        }
    }

    /// Creates a ring from a vertex list, appending the closing vertex when
    /// the list does not already end at its start.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three vertices remain or a coordinate
    /// is non-finite.
    pub fn from_open(mut points: Vec<Point2>) -> Result<Self, DegenerateInputError> {
        if let (Some(&first), Some(last)) = (points.first(), points.last()) {
            if points.len() == 1 || !points_coincide(&first, last) {
                points.push(first);
            }
        }
        Self::new(points)
    }

    /// All points, including the closing one.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Vertices without the closing duplicate.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.points[..self.points.len() - 1]
    }

    /// Number of stored points, including the closing one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a ring holds at least four points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive edges in traversal order, ending at the first point.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Signed area, positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Total boundary length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| segment_length(&a, &b)).sum()
    }

    /// Applies `f` to every point. The closing point maps exactly onto the
    /// image of the first, so closure is preserved bit for bit.
    #[must_use]
    pub fn map(&self, f: impl Fn(&Point2) -> Point2) -> Self {
        Self {
            points: self.points.iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square() -> Ring {
        Ring::from_open(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap()
    }

    #[test]
    fn from_open_appends_closing_point() {
        let ring = unit_square();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.points()[0], ring.points()[4]);
        assert_eq!(ring.vertices().len(), 4);
    }

    #[test]
    fn from_open_keeps_closed_input() {
        let ring = Ring::from_open(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.0, 1.0),
            p(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn new_rejects_open_ring() {
        let err = Ring::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]);
        assert!(matches!(err, Err(DegenerateInputError::OpenRing)));
    }

    #[test]
    fn new_rejects_short_and_non_finite() {
        assert!(matches!(
            Ring::from_open(vec![p(0.0, 0.0), p(1.0, 0.0)]),
            Err(DegenerateInputError::TooFewVertices { .. })
        ));
        assert!(matches!(
            Ring::from_open(vec![p(0.0, 0.0), p(f64::NAN, 0.0), p(1.0, 1.0)]),
            Err(DegenerateInputError::NonFinite { .. })
        ));
    }

    #[test]
    fn edges_wrap_to_start() {
        let ring = unit_square();
        let edges: Vec<_> = ring.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (p(0.0, 1.0), p(0.0, 0.0)));
    }

    #[test]
    fn area_and_perimeter() {
        let ring = unit_square();
        assert!((ring.signed_area() - 1.0).abs() < TOLERANCE);
        assert!((ring.perimeter() - 4.0).abs() < TOLERANCE);
    }
}
