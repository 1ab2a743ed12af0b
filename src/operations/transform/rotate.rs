use crate::geometry::Ring;
use crate::math::{Matrix3, Point2};

use super::GeneralTransform;

/// Rotates a ring around a pivot point.
pub struct Rotate {
    origin: Point2,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angle` - Rotation angle in radians, counter-clockwise positive.
    #[must_use]
    pub fn new(origin: Point2, angle: f64) -> Self {
        Self { origin, angle }
    }

    /// Builds the homogeneous matrix: translate to origin, rotate, translate back.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        let t_neg = Matrix3::new_translation(&(-self.origin.coords));
        let rot = Matrix3::new_rotation(self.angle);
        let t_pos = Matrix3::new_translation(&self.origin.coords);
        t_pos * rot * t_neg
    }

    /// Executes the rotation, returning the rotated ring.
    #[must_use]
    pub fn execute(&self, ring: &Ring) -> Ring {
        GeneralTransform::new(self.matrix()).execute(ring)
    }

    /// Rotates a single point.
    #[must_use]
    pub fn apply_to_point(&self, point: &Point2) -> Point2 {
        GeneralTransform::new(self.matrix()).transform_point(point)
    }
}
