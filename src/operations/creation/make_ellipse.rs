use crate::error::{DegenerateInputError, Result};
use crate::geometry::Ring;
use crate::math::{Point2, TOLERANCE};
use crate::operations::transform::{Rotate, Scale};

use super::{MakeCircle, DEFAULT_QUAD_SEGS};

/// Creates a polygon approximating the ellipse spanned by two anchor points.
///
/// The major axis runs from `a` to `b` (half-length `|ab| / 2`) and the
/// minor half-length is `radius`. The shape is built by laying the baseline
/// flat at `a`, scaling a circle of diameter `|ab|` vertically, and rotating
/// the result back onto the baseline around `a`.
pub struct MakeEllipse {
    a: Point2,
    b: Point2,
    radius: f64,
    quad_segs: usize,
}

impl MakeEllipse {
    /// Creates a new `MakeEllipse` operation with [`DEFAULT_QUAD_SEGS`].
    #[must_use]
    pub fn new(a: Point2, b: Point2, radius: f64) -> Self {
        Self {
            a,
            b,
            radius,
            quad_segs: DEFAULT_QUAD_SEGS,
        }
    }

    /// Sets the number of segments per quarter of the underlying circle.
    #[must_use]
    pub fn with_quad_segs(mut self, quad_segs: usize) -> Self {
        self.quad_segs = quad_segs;
        self
    }

    /// Executes the construction, returning the closed ellipse ring.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` and `b` coincide, the radius is not positive,
    /// or `quad_segs` is zero.
    pub fn execute(&self) -> Result<Ring> {
        let d = (self.b - self.a).norm();
        if d.is_nan() || d < TOLERANCE {
            return Err(DegenerateInputError::ZeroBaseline {
                a: [self.a.x, self.a.y],
                b: [self.b.x, self.b.y],
            }
            .into());
        }
        if self.radius.is_nan() || self.radius < TOLERANCE {
            return Err(DegenerateInputError::NonPositiveRadius(self.radius).into());
        }

        let half = d / 2.0;
        let alpha = (self.b.y - self.a.y).atan2(self.b.x - self.a.x);

        // Midpoint of a and b rotated onto the horizontal through a.
        let s = Point2::new(self.a.x + half, self.a.y);

        let circle = MakeCircle::new(s, half)
            .with_quad_segs(self.quad_segs)
            .execute()?;
        let flattened = Scale::new(s, 1.0, self.radius / half).execute(&circle)?;

        Ok(Rotate::new(self.a, alpha).execute(&flattened))
    }
}
