use std::fmt;

use thiserror::Error;

use crate::objects::ObjectId;

/// Top-level error type for shape Voronoi approximation.
#[derive(Debug, Error)]
pub enum ShapeVoronoiError {
    #[error(transparent)]
    Degenerate(#[from] DegenerateInputError),

    #[error(transparent)]
    Construction(#[from] VoronoiConstructionError),

    #[error(transparent)]
    Clip(#[from] ClipError),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl ShapeVoronoiError {
    /// Attaches a frame index to errors that carry frame context.
    #[must_use]
    pub fn in_frame(self, frame: u64) -> Self {
        match self {
            Self::Construction(err) => Self::Construction(err.in_frame(frame)),
            Self::Clip(err) => Self::Clip(err.in_frame(frame)),
            other => other,
        }
    }

    /// Returns the frame index attached to this error, if any.
    #[must_use]
    pub fn frame(&self) -> Option<u64> {
        match self {
            Self::Construction(err) => err.frame,
            Self::Clip(err) => err.frame(),
            _ => None,
        }
    }
}

/// Geometric input that breaks the algorithm's preconditions.
#[derive(Debug, Error)]
pub enum DegenerateInputError {
    #[error("zero-length baseline between ({}, {}) and ({}, {})", .a[0], .a[1], .b[0], .b[1])]
    ZeroBaseline { a: [f64; 2], b: [f64; 2] },

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("ring is not closed")]
    OpenRing,

    #[error("ring needs at least {expected} vertices including the closing one, got {actual}")]
    TooFewVertices { expected: usize, actual: usize },

    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    #[error("zero-area polygon: {0}")]
    ZeroArea(String),

    #[error("no objects to approximate")]
    NoObjects,
}

/// Why the sampled point-Voronoi construction could not produce regions.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionFailure {
    /// Samples of different objects coincide within the coincidence tolerance.
    CoincidentSamples { distance: f64 },
    /// Input polygons overlap by more than the tiling tolerance.
    OverlappingObjects { area: f64 },
    /// Input polygon boundaries touch without overlapping.
    TouchingObjects,
    /// The point-Voronoi backend reported an error.
    Backend(String),
    /// The backend returned a different number of cells than sites.
    CellCountMismatch { expected: usize, actual: usize },
    /// All cells of an object were clipped away.
    EmptyRegion,
    /// The union of an object's cells lost or gained area.
    UnionMismatch { cells_area: f64, union_area: f64 },
    /// The merge produced a different number of regions than objects.
    RegionCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ConstructionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoincidentSamples { distance } => {
                write!(f, "boundary samples of different objects coincide (distance {distance:e})")
            }
            Self::OverlappingObjects { area } => {
                write!(f, "objects overlap by area {area:e}")
            }
            Self::TouchingObjects => write!(f, "object boundaries touch"),
            Self::Backend(msg) => write!(f, "point Voronoi backend failed: {msg}"),
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, backend returned {actual}")
            }
            Self::EmptyRegion => write!(f, "merged region is empty"),
            Self::UnionMismatch {
                cells_area,
                union_area,
            } => write!(
                f,
                "union of cells has area {union_area} but cells sum to {cells_area}"
            ),
            Self::RegionCountMismatch { expected, actual } => {
                write!(f, "expected {expected} regions, merged {actual}")
            }
        }
    }
}

/// The point-Voronoi step or the merge by identity failed.
#[derive(Debug, Error)]
#[error("voronoi construction failed{}: {reason} (objects: {objects:?})", frame_suffix(*.frame))]
pub struct VoronoiConstructionError {
    pub reason: ConstructionFailure,
    pub objects: Vec<ObjectId>,
    pub frame: Option<u64>,
}

impl VoronoiConstructionError {
    #[must_use]
    pub fn new(reason: ConstructionFailure, objects: Vec<ObjectId>) -> Self {
        Self {
            reason,
            objects,
            frame: None,
        }
    }

    #[must_use]
    pub fn in_frame(mut self, frame: u64) -> Self {
        self.frame = Some(frame);
        self
    }
}

/// A post-merge invariant does not hold within tolerance.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error(
        "regions do not tile the bounding region{}: gap {gap:e}, overlap {overlap:e} (tolerance {tolerance:e})",
        frame_suffix(*.frame)
    )]
    TilingViolated {
        gap: f64,
        overlap: f64,
        tolerance: f64,
        frame: Option<u64>,
    },

    #[error(
        "region of {object:?} leaves {uncovered:e} of its object uncovered{} (tolerance {tolerance:e})",
        frame_suffix(*.frame)
    )]
    ContainmentViolated {
        object: ObjectId,
        uncovered: f64,
        tolerance: f64,
        frame: Option<u64>,
    },
}

impl ClipError {
    /// Residual area that exceeded the tolerance.
    #[must_use]
    pub fn residual(&self) -> f64 {
        match self {
            Self::TilingViolated { gap, overlap, .. } => gap.abs().max(*overlap),
            Self::ContainmentViolated { uncovered, .. } => *uncovered,
        }
    }

    #[must_use]
    pub fn frame(&self) -> Option<u64> {
        match self {
            Self::TilingViolated { frame, .. } | Self::ContainmentViolated { frame, .. } => *frame,
        }
    }

    #[must_use]
    pub fn in_frame(mut self, index: u64) -> Self {
        match &mut self {
            Self::TilingViolated { frame, .. } | Self::ContainmentViolated { frame, .. } => {
                *frame = Some(index);
            }
        }
        self
    }
}

fn frame_suffix(frame: Option<u64>) -> String {
    frame.map_or_else(String::new, |f| format!(" in frame {f}"))
}

/// Convenience type alias for results using [`ShapeVoronoiError`].
pub type Result<T> = std::result::Result<T, ShapeVoronoiError>;

#[cfg(test)]
mod tests {
    use slotmap::KeyData;

    use super::*;

    #[test]
    fn frame_context_is_attached() {
        let id = ObjectId::from(KeyData::from_ffi(1));
        let err: ShapeVoronoiError = VoronoiConstructionError::new(
            ConstructionFailure::CoincidentSamples { distance: 0.0 },
            vec![id],
        )
        .into();
        assert_eq!(err.frame(), None);

        let err = err.in_frame(7);
        assert_eq!(err.frame(), Some(7));
        assert!(err.to_string().contains("in frame 7"));
    }

    #[test]
    fn clip_residual_reports_larger_violation() {
        let err = ClipError::TilingViolated {
            gap: -0.5,
            overlap: 0.25,
            tolerance: 1e-6,
            frame: None,
        };
        assert!((err.residual() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_input_is_not_frame_scoped() {
        let err: ShapeVoronoiError = DegenerateInputError::NoObjects.into();
        assert_eq!(err.in_frame(3).frame(), None);
    }
}
