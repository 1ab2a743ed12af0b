//! Narrow seam over the polygon-boolean kernel.
//!
//! Everything that needs area, clipping, or union of planar regions goes
//! through these functions so the backing kernel (`geo`) stays swappable.

use geo::{Area, BooleanOps, BoundingRect, Contains, Coord, Intersects, LineString, MultiPolygon};

use crate::geometry::{Polygon, Ring};
use crate::math::Point2;

/// A planar region: zero or more disjoint polygons with holes.
pub type Region = MultiPolygon<f64>;

/// Kernel polygon type.
pub type KernelPolygon = geo::Polygon<f64>;

fn to_line_string(points: &[Point2]) -> LineString<f64> {
    LineString::new(points.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

fn ring_to_line_string(ring: &Ring) -> LineString<f64> {
    to_line_string(ring.points())
}

/// Converts a polygon into the kernel's representation.
#[must_use]
pub fn to_kernel(polygon: &Polygon) -> KernelPolygon {
    KernelPolygon::new(
        ring_to_line_string(polygon.outer()),
        polygon.holes().iter().map(ring_to_line_string).collect(),
    )
}

/// Converts a simple vertex loop (open or closed) into a kernel polygon.
#[must_use]
pub fn loop_to_kernel(points: &[Point2]) -> KernelPolygon {
    KernelPolygon::new(to_line_string(points), Vec::new())
}

/// Wraps a single polygon as a region.
#[must_use]
pub fn region_of(polygon: KernelPolygon) -> Region {
    MultiPolygon::new(vec![polygon])
}

/// The empty region.
#[must_use]
pub fn empty_region() -> Region {
    MultiPolygon::new(Vec::new())
}

/// Unsigned area of a region.
#[must_use]
pub fn area(region: &Region) -> f64 {
    region.unsigned_area()
}

/// Intersection of `region` with a clip window.
#[must_use]
pub fn clip(region: &Region, window: &KernelPolygon) -> Region {
    region.intersection(window)
}

/// Union of all parts, reduced pairwise so every intermediate union stays
/// balanced in size.
#[must_use]
pub fn union_all(mut parts: Vec<Region>) -> Region {
    parts.retain(|p| !p.0.is_empty());
    while parts.len() > 1 {
        let mut next = Vec::with_capacity(parts.len().div_ceil(2));
        let mut iter = parts.into_iter();
        while let Some(a) = iter.next() {
            match iter.next() {
                Some(b) => next.push(a.union(&b)),
                None => next.push(a),
            }
        }
        parts = next;
    }
    parts.pop().unwrap_or_else(empty_region)
}

/// Area of `subject` not covered by `cover`.
#[must_use]
pub fn uncovered_area(subject: &Region, cover: &Region) -> f64 {
    subject.difference(cover).unsigned_area()
}

/// Area shared by two polygons.
#[must_use]
pub fn overlap_area(a: &KernelPolygon, b: &KernelPolygon) -> f64 {
    a.intersection(b).unsigned_area()
}

/// Returns true if the outer boundaries of two polygons share a point.
#[must_use]
pub fn boundaries_touch(a: &KernelPolygon, b: &KernelPolygon) -> bool {
    a.exterior().intersects(b.exterior())
}

/// Returns true if `point` lies in the interior of `region`.
#[must_use]
pub fn region_contains(region: &Region, point: &Point2) -> bool {
    region.contains(&geo::Point::new(point.x, point.y))
}

/// Axis-aligned bounds of a region as `(min, max)`, `None` when empty.
#[must_use]
pub fn region_bounds(region: &Region) -> Option<(Point2, Point2)> {
    region.bounding_rect().map(|rect| {
        let (min, max) = (rect.min(), rect.max());
        (Point2::new(min.x, min.y), Point2::new(max.x, max.y))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> KernelPolygon {
        loop_to_kernel(&[
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
        ])
    }

    #[test]
    fn union_of_adjacent_squares() {
        let parts = (0..5)
            .map(|i| region_of(square(f64::from(i), 0.0, 1.0)))
            .collect();
        let merged = union_all(parts);
        assert_abs_diff_eq!(area(&merged), 5.0, epsilon = 1e-9);
        assert_eq!(merged.0.len(), 1);
    }

    #[test]
    fn union_of_nothing_is_empty() {
        assert!(union_all(Vec::new()).0.is_empty());
    }

    #[test]
    fn clip_to_window() {
        let region = region_of(square(-1.0, -1.0, 2.0));
        let clipped = clip(&region, &square(0.0, 0.0, 5.0));
        assert_abs_diff_eq!(area(&clipped), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn uncovered_and_overlap() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 0.0, 2.0);
        assert_abs_diff_eq!(overlap_area(&a, &b), 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            uncovered_area(&region_of(a), &region_of(b)),
            2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn partial_edge_contact_touches() {
        let a = square(0.0, 0.0, 1.0);
        let shifted = square(1.0, 0.3, 1.0);
        let apart = square(1.5, 0.0, 1.0);
        assert!(boundaries_touch(&a, &shifted));
        assert!(boundaries_touch(&shifted, &a));
        assert!(!boundaries_touch(&a, &apart));
    }

    #[test]
    fn containment_and_bounds() {
        let region = region_of(square(1.0, 2.0, 3.0));
        assert!(region_contains(&region, &Point2::new(2.0, 3.0)));
        assert!(!region_contains(&region, &Point2::new(0.0, 0.0)));

        let (min, max) = region_bounds(&region).unwrap();
        assert_abs_diff_eq!(min.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(max.y, 5.0, epsilon = 1e-12);
        assert!(region_bounds(&empty_region()).is_none());
    }

    #[test]
    fn polygon_with_hole_converts() {
        let outer = Ring::from_open(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ])
        .unwrap();
        let hole = Ring::from_open(vec![
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(1.0, 2.0),
        ])
        .unwrap();
        let polygon = Polygon::new(outer, vec![hole]).unwrap();
        assert_abs_diff_eq!(area(&region_of(to_kernel(&polygon))), 15.0, epsilon = 1e-9);
    }
}
