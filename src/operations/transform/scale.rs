use crate::error::{DegenerateInputError, Result};
use crate::geometry::Ring;
use crate::math::{Matrix3, Point2, Vector2, TOLERANCE};

use super::GeneralTransform;

/// Scales a ring about a center point, independently per axis.
pub struct Scale {
    center: Point2,
    factor_x: f64,
    factor_y: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(center: Point2, factor_x: f64, factor_y: f64) -> Self {
        Self {
            center,
            factor_x,
            factor_y,
        }
    }

    /// Creates a uniform `Scale` operation.
    #[must_use]
    pub fn uniform(center: Point2, factor: f64) -> Self {
        Self::new(center, factor, factor)
    }

    /// Executes the scaling, returning the scaled ring.
    ///
    /// # Errors
    ///
    /// Returns an error if either factor is zero or non-finite, which would
    /// collapse the ring.
    pub fn execute(&self, ring: &Ring) -> Result<Ring> {
        for factor in [self.factor_x, self.factor_y] {
            if !factor.is_finite() || factor.abs() < TOLERANCE {
                return Err(DegenerateInputError::ZeroArea(format!(
                    "scale factor {factor} collapses the ring"
                ))
                .into());
            }
        }

        let t_neg = Matrix3::new_translation(&(-self.center.coords));
        let scale = Matrix3::new_nonuniform_scaling(&Vector2::new(self.factor_x, self.factor_y));
        let t_pos = Matrix3::new_translation(&self.center.coords);

        Ok(GeneralTransform::new(t_pos * scale * t_neg).execute(ring))
    }
}
