use crate::error::{Result, ShapeVoronoiError};
use crate::operations::creation::DEFAULT_QUAD_SEGS;

/// Parameters controlling sampling density and validation tolerances.
#[derive(Debug, Clone, Copy)]
pub struct VoronoiParams {
    /// Boundary samples per unit length.
    pub density: f64,
    /// Segments per quarter circle for discs built from positions.
    pub quad_segs: usize,
    /// Distance below which samples of different objects count as
    /// coincident, relative to the bounding region's extent.
    pub coincidence_tolerance: f64,
    /// Largest accepted gap, overlap, or uncovered area, relative to the
    /// bounding region's area.
    ///
    /// Defaults to 1e-6 rather than 1e-9: the polygon boolean kernel snaps
    /// coordinates while unioning hundreds of cells, and the accumulated
    /// area drift exceeds 1e-9 of the bounds on ordinary inputs.
    pub tiling_tolerance: f64,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            density: 50.0,
            quad_segs: DEFAULT_QUAD_SEGS,
            coincidence_tolerance: 1e-9,
            tiling_tolerance: 1e-6,
        }
    }
}

impl VoronoiParams {
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    #[must_use]
    pub fn with_quad_segs(mut self, quad_segs: usize) -> Self {
        self.quad_segs = quad_segs;
        self
    }

    #[must_use]
    pub fn with_coincidence_tolerance(mut self, tolerance: f64) -> Self {
        self.coincidence_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_tiling_tolerance(mut self, tolerance: f64) -> Self {
        self.tiling_tolerance = tolerance;
        self
    }

    /// Checks that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ShapeVoronoiError::InvalidParameters(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        if self.quad_segs == 0 {
            return Err(ShapeVoronoiError::InvalidParameters(
                "quad_segs must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("coincidence_tolerance", self.coincidence_tolerance),
            ("tiling_tolerance", self.tiling_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ShapeVoronoiError::InvalidParameters(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = VoronoiParams::default();
        assert!(params.validate().is_ok());
        assert!((params.coincidence_tolerance - 1e-9).abs() < f64::EPSILON);
        assert!((params.tiling_tolerance - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = VoronoiParams::default();
        assert!(base.with_density(0.0).validate().is_err());
        assert!(base.with_density(f64::INFINITY).validate().is_err());
        assert!(base.with_quad_segs(0).validate().is_err());
        assert!(base.with_coincidence_tolerance(-1.0).validate().is_err());
        assert!(base.with_tiling_tolerance(f64::NAN).validate().is_err());
    }
}
