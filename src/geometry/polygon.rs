use crate::error::DegenerateInputError;
use crate::math::{Point2, TOLERANCE};

use super::Ring;

/// An outer ring with optional hole rings.
///
/// Holes are only used for cut-outs such as obstacles inside a bounding
/// region; sampled object boundaries never carry holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    outer: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    /// Creates a polygon from an outer ring and hole rings.
    ///
    /// # Errors
    ///
    /// Returns an error if the outer ring encloses no area.
    pub fn new(outer: Ring, holes: Vec<Ring>) -> Result<Self, DegenerateInputError> {
        if outer.signed_area().abs() < TOLERANCE {
            return Err(DegenerateInputError::ZeroArea(
                "outer ring encloses no area".into(),
            ));
        }
        Ok(Self { outer, holes })
    }

    /// Creates a hole-free polygon from a vertex list.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertices do not form a ring with positive area.
    pub fn from_vertices(vertices: Vec<Point2>) -> Result<Self, DegenerateInputError> {
        Self::new(Ring::from_open(vertices)?, Vec::new())
    }

    /// Creates the axis-aligned rectangle spanned by two corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle has zero width or height.
    pub fn rectangle(min: Point2, max: Point2) -> Result<Self, DegenerateInputError> {
        Self::from_vertices(vec![
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ])
    }

    /// Returns this polygon with `hole` cut out.
    #[must_use]
    pub fn with_hole(mut self, hole: Ring) -> Self {
        self.holes.push(hole);
        self
    }

    #[must_use]
    pub fn outer(&self) -> &Ring {
        &self.outer
    }

    #[must_use]
    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// Enclosed area: outer ring minus holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| h.signed_area().abs()).sum();
        self.outer.signed_area().abs() - holes
    }
}
