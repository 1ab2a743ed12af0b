use crate::geometry::Ring;
use crate::math::{Matrix3, Point2};

/// Applies an arbitrary 3x3 homogeneous transformation to a ring.
pub struct GeneralTransform {
    matrix: Matrix3,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix3) -> Self {
        Self { matrix }
    }

    /// Returns the transformation matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Executes the transformation, returning the transformed ring.
    ///
    /// Every point, including the closing one, passes through the same
    /// matrix, so the result stays closed.
    #[must_use]
    pub fn execute(&self, ring: &Ring) -> Ring {
        ring.map(|p| self.transform_point(p))
    }

    /// Transforms a single point.
    #[must_use]
    pub fn transform_point(&self, point: &Point2) -> Point2 {
        self.matrix.transform_point(point)
    }
}
