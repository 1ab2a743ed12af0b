use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation};
use thiserror::Error;
use tracing::trace;

use crate::geometry::Polygon;
use crate::kernel::{clip, empty_region, loop_to_kernel, region_of, to_kernel, Region};
use crate::math::polygon_2d::{bounds_2d, points_coincide, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

/// Failure inside a point-Voronoi backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("site {index} could not be inserted: {reason}")]
    Insertion { index: usize, reason: String },

    #[error("frame corner could not be inserted: {0}")]
    Frame(String),

    #[error("cell of site {index} is unbounded")]
    UnboundedCell { index: usize },
}

/// Point-based Voronoi construction.
///
/// Implementations return exactly one cell per site, in site order, each
/// clipped to `clip`. Sites at identical positions receive the same cell.
pub trait PointVoronoi {
    /// Computes the clipped Voronoi cells of `sites`.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagram cannot be built for these sites.
    fn cells(&self, sites: &[Point2], clip: &Polygon) -> Result<Vec<Region>, BackendError>;
}

/// Voronoi cells read off a `spade` Delaunay triangulation.
///
/// Four frame corners far outside the sites and the clip window are inserted
/// first, which keeps every real site off the convex hull and therefore every
/// real cell bounded. Cells are the circumcenters of the faces around a site.
#[derive(Debug, Clone, Copy)]
pub struct SpadeVoronoi {
    frame_margin: f64,
}

impl Default for SpadeVoronoi {
    fn default() -> Self {
        Self { frame_margin: 10.0 }
    }
}

impl SpadeVoronoi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame distance as a multiple of the input span.
    ///
    /// Values below 3 let frame corners steal area from real cells inside
    /// the clip window.
    #[must_use]
    pub fn with_frame_margin(mut self, frame_margin: f64) -> Self {
        self.frame_margin = frame_margin;
        self
    }

    fn frame_corners(&self, sites: &[Point2], clip: &Polygon) -> Vec<Point2> {
        let mut extent: Vec<Point2> = clip.outer().points().to_vec();
        extent.extend_from_slice(sites);
        let Some((min, max)) = bounds_2d(&extent) else {
            return Vec::new();
        };
        let span = (max.x - min.x).max(max.y - min.y).max(TOLERANCE);
        let margin = span * self.frame_margin;
        vec![
            Point2::new(min.x - margin, min.y - margin),
            Point2::new(max.x + margin, min.y - margin),
            Point2::new(max.x + margin, max.y + margin),
            Point2::new(min.x - margin, max.y + margin),
        ]
    }
}

impl PointVoronoi for SpadeVoronoi {
    fn cells(&self, sites: &[Point2], clip_window: &Polygon) -> Result<Vec<Region>, BackendError> {
        if sites.is_empty() {
            return Ok(Vec::new());
        }

        let mut triangulation: DelaunayTriangulation<SpadePoint2<f64>> =
            DelaunayTriangulation::new();
        for corner in self.frame_corners(sites, clip_window) {
            triangulation
                .insert(SpadePoint2::new(corner.x, corner.y))
                .map_err(|err| BackendError::Frame(format!("{err:?}")))?;
        }

        let mut handles = Vec::with_capacity(sites.len());
        for (index, site) in sites.iter().enumerate() {
            let handle = triangulation
                .insert(SpadePoint2::new(site.x, site.y))
                .map_err(|err| BackendError::Insertion {
                    index,
                    reason: format!("{err:?}"),
                })?;
            handles.push(handle);
        }
        trace!(
            sites = sites.len(),
            vertices = triangulation.num_vertices(),
            faces = triangulation.num_inner_faces(),
            "triangulated sites"
        );

        let window = to_kernel(clip_window);
        let mut cells = Vec::with_capacity(handles.len());
        for (index, &handle) in handles.iter().enumerate() {
            let mut ring = Vec::new();
            for edge in triangulation.vertex(handle).out_edges() {
                let face = edge
                    .face()
                    .as_inner()
                    .ok_or(BackendError::UnboundedCell { index })?;
                let center = face.circumcenter();
                ring.push(Point2::new(center.x, center.y));
            }
            ring.dedup_by(|a, b| points_coincide(a, b));
            // Cocircular sites give adjacent faces with near-equal
            // circumcenters, which may sit at both ends of the loop.
            while ring.len() > 1
                && ring
                    .last()
                    .is_some_and(|last| points_coincide(last, &ring[0]))
            {
                ring.pop();
            }

            if ring.len() < 3 {
                cells.push(empty_region());
                continue;
            }
            if signed_area_2d(&ring) < 0.0 {
                ring.reverse();
            }
            cells.push(clip(&region_of(loop_to_kernel(&ring)), &window));
        }

        Ok(cells)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::kernel::{area, region_contains};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(half: f64) -> Polygon {
        Polygon::rectangle(p(-half, -half), p(half, half)).unwrap()
    }

    #[test]
    fn one_cell_per_site_covering_the_window() {
        let sites = vec![p(-1.0, -1.0), p(1.0, -1.0), p(1.0, 1.0), p(-1.0, 1.0), p(0.2, 0.1)];
        let cells = SpadeVoronoi::new().cells(&sites, &square(4.0)).unwrap();

        assert_eq!(cells.len(), sites.len());
        let total: f64 = cells.iter().map(area).sum();
        assert_abs_diff_eq!(total, 64.0, epsilon = 1e-6);
        for (site, cell) in sites.iter().zip(&cells) {
            assert!(region_contains(cell, site));
        }
    }

    #[test]
    fn two_sites_split_along_bisector() {
        let sites = vec![p(-1.0, 0.0), p(1.0, 0.0)];
        let cells = SpadeVoronoi::new().cells(&sites, &square(2.0)).unwrap();

        assert_abs_diff_eq!(area(&cells[0]), 8.0, epsilon = 1e-6);
        assert_abs_diff_eq!(area(&cells[1]), 8.0, epsilon = 1e-6);
        assert!(region_contains(&cells[0], &p(-0.1, 1.9)));
        assert!(region_contains(&cells[1], &p(0.1, -1.9)));
    }

    #[test]
    fn single_site_owns_the_window() {
        let cells = SpadeVoronoi::new().cells(&[p(0.5, 0.5)], &square(1.0)).unwrap();
        assert_abs_diff_eq!(area(&cells[0]), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn cocircular_sites_keep_their_full_cells() {
        let sites = vec![p(1.0, 1.0), p(-1.0, 1.0), p(-1.0, -1.0), p(1.0, -1.0)];
        let cells = SpadeVoronoi::new().cells(&sites, &square(4.0)).unwrap();
        for cell in &cells {
            assert_abs_diff_eq!(area(cell), 16.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn near_cocircular_diamond_vertices_tile_the_window() {
        let sites = vec![
            p(1.23, 1.38),
            p(0.93, 1.08),
            p(0.63, 1.38),
            p(0.93, 1.68),
            p(1.0, 0.79),
            p(0.7, 0.49),
            p(0.40, 0.79),
            p(0.70, 1.09),
        ];
        let cells = SpadeVoronoi::new().cells(&sites, &square(3.0)).unwrap();

        let total: f64 = cells.iter().map(area).sum();
        assert_abs_diff_eq!(total, 36.0, epsilon = 1e-6);
        assert_abs_diff_eq!(area(&cells[6]), 10.297, epsilon = 1e-3);
    }

    #[test]
    fn duplicate_sites_share_a_cell() {
        let sites = vec![p(-1.0, 0.0), p(1.0, 0.0), p(-1.0, 0.0)];
        let cells = SpadeVoronoi::new().cells(&sites, &square(2.0)).unwrap();
        assert_eq!(cells.len(), 3);
        assert_abs_diff_eq!(area(&cells[0]), area(&cells[2]), epsilon = 1e-12);
    }

    #[test]
    fn non_finite_site_is_rejected() {
        let err = SpadeVoronoi::new().cells(&[p(0.0, 0.0), p(f64::NAN, 0.0)], &square(1.0));
        assert!(matches!(err, Err(BackendError::Insertion { index: 1, .. })));
    }

    #[test]
    fn no_sites_no_cells() {
        assert!(SpadeVoronoi::new().cells(&[], &square(1.0)).unwrap().is_empty());
    }
}
