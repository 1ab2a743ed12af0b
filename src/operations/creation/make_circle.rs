use std::f64::consts::TAU;

use crate::error::{DegenerateInputError, Result, ShapeVoronoiError};
use crate::geometry::Ring;
use crate::math::{Point2, TOLERANCE};

/// Default number of segments per quarter circle.
pub const DEFAULT_QUAD_SEGS: usize = 16;

/// Creates a regular polygon approximating a circle.
///
/// The polygon has `4 * quad_segs` vertices, the first at angle zero, in
/// counter-clockwise order.
pub struct MakeCircle {
    center: Point2,
    radius: f64,
    quad_segs: usize,
}

impl MakeCircle {
    /// Creates a new `MakeCircle` operation with [`DEFAULT_QUAD_SEGS`].
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self {
            center,
            radius,
            quad_segs: DEFAULT_QUAD_SEGS,
        }
    }

    /// Sets the number of segments per quarter circle.
    #[must_use]
    pub fn with_quad_segs(mut self, quad_segs: usize) -> Self {
        self.quad_segs = quad_segs;
        self
    }

    /// Executes the operation, returning the closed ring.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or `quad_segs` is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<Ring> {
        if self.radius.is_nan() || self.radius < TOLERANCE {
            return Err(DegenerateInputError::NonPositiveRadius(self.radius).into());
        }
        if self.quad_segs == 0 {
            return Err(ShapeVoronoiError::InvalidParameters(
                "quad_segs must be at least 1".into(),
            ));
        }

        let n = 4 * self.quad_segs;
        let step = TAU / n as f64;
        let mut points: Vec<Point2> = (0..n)
            .map(|i| {
                let angle = step * i as f64;
                Point2::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect();
        points.push(points[0]);

        Ok(Ring::new(points)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn vertices_lie_on_circle() {
        let center = Point2::new(1.0, -2.0);
        let ring = MakeCircle::new(center, 0.5).with_quad_segs(3).execute().unwrap();

        assert_eq!(ring.len(), 13);
        for p in ring.points() {
            assert_abs_diff_eq!((p - center).norm(), 0.5, epsilon = 1e-12);
        }
        assert_eq!(ring.points()[0], ring.points()[12]);
    }

    #[test]
    fn area_approaches_disc() {
        let ring = MakeCircle::new(Point2::origin(), 1.0).execute().unwrap();
        assert!(ring.signed_area() > 0.0);
        assert_abs_diff_eq!(ring.signed_area(), PI, epsilon = 0.01);
    }

    #[test]
    fn single_quad_seg_is_a_diamond() {
        let ring = MakeCircle::new(Point2::origin(), 1.0).with_quad_segs(1).execute().unwrap();
        assert_eq!(ring.vertices().len(), 4);
        assert_abs_diff_eq!(ring.signed_area(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_inputs() {
        assert!(MakeCircle::new(Point2::origin(), 0.0).execute().is_err());
        assert!(MakeCircle::new(Point2::origin(), -1.0).execute().is_err());
        assert!(MakeCircle::new(Point2::origin(), 1.0)
            .with_quad_segs(0)
            .execute()
            .is_err());
    }
}
