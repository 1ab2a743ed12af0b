use crate::error::{Result, ShapeVoronoiError};
use crate::geometry::Ring;
use crate::math::polygon_2d::segment_length;
use crate::math::Point2;

/// Samples along one edge at roughly `density` points per unit length.
///
/// Emits `p1`, then `floor(L * density)` evenly spaced interior points, then
/// `p2`. The endpoints are returned exactly as given.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn densify_edge(p1: Point2, p2: Point2, density: f64) -> Vec<Point2> {
    let length = segment_length(&p1, &p2);
    let interior = (length * density).floor().max(0.0) as usize;
    let delta = (p2 - p1) / (interior + 1) as f64;

    let mut points = Vec::with_capacity(interior + 2);
    points.push(p1);
    points.extend((1..=interior).map(|j| p1 + delta * j as f64));
    points.push(p2);
    points
}

/// Densifies a closed ring by inserting evenly spaced samples on each edge.
///
/// Edges are sampled independently, so every original vertex appears twice
/// in a row: once as the end of one edge and once as the start of the next.
/// [`DensifyRing::dedup`] collapses these exact repeats.
pub struct DensifyRing<'a> {
    ring: &'a Ring,
    density: f64,
    dedup: bool,
}

impl<'a> DensifyRing<'a> {
    /// Creates a new `DensifyRing` operation.
    ///
    /// * `density` - Samples per unit length, must be positive.
    #[must_use]
    pub fn new(ring: &'a Ring, density: f64) -> Self {
        Self {
            ring,
            density,
            dedup: false,
        }
    }

    /// Drops samples that repeat their predecessor exactly.
    #[must_use]
    pub fn dedup(mut self) -> Self {
        self.dedup = true;
        self
    }

    /// Executes the densification, returning the sampled ring.
    ///
    /// # Errors
    ///
    /// Returns an error if the density is not a positive finite number.
    pub fn execute(&self) -> Result<Ring> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ShapeVoronoiError::InvalidParameters(format!(
                "density must be positive, got {}",
                self.density
            )));
        }

        let mut points = Vec::new();
        for (p1, p2) in self.ring.edges() {
            points.extend(densify_edge(p1, p2, self.density));
        }
        if self.dedup {
            points.dedup();
        }

        Ok(Ring::new(points)?)
    }
}
