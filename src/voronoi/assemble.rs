use tracing::debug;

use crate::error::{ClipError, Result};
use crate::geometry::Polygon;
use crate::kernel::{area, clip, region_of, to_kernel, uncovered_area, union_all};
use crate::objects::ObjectStore;

use super::{RegionMap, VoronoiParams};

/// Clips merged regions to the bounding polygon and validates them.
///
/// Checks that the clipped regions tile the bounding polygon (no gap, no
/// interior overlap) and that each region covers the part of its object
/// inside the bounding polygon, all within the tiling tolerance.
pub struct AssembleRegions<'a> {
    store: &'a ObjectStore,
    bounds: &'a Polygon,
    params: VoronoiParams,
    frame: Option<u64>,
}

impl<'a> AssembleRegions<'a> {
    /// Creates a new `AssembleRegions` operation with default parameters.
    #[must_use]
    pub fn new(store: &'a ObjectStore, bounds: &'a Polygon) -> Self {
        Self {
            store,
            bounds,
            params: VoronoiParams::default(),
            frame: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: VoronoiParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn in_frame(mut self, frame: u64) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Executes the clipping and validation, returning the clipped regions.
    ///
    /// # Errors
    ///
    /// Returns `Clip` with the measured residual if the regions leave a gap,
    /// overlap, or fail to cover their object.
    pub fn execute(&self, merged: &RegionMap) -> Result<RegionMap> {
        let window = to_kernel(self.bounds);
        let bounds_area = self.bounds.area();
        let tolerance = self.params.tiling_tolerance * bounds_area;

        let mut clipped = RegionMap::new();
        for (id, region) in merged.iter() {
            clipped.insert(id, clip(region, &window));
        }

        let covered = union_all(clipped.iter().map(|(_, region)| region.clone()).collect());
        let covered_area = area(&covered);
        let overlap = clipped.total_area() - covered_area;
        let gap = bounds_area - covered_area;
        debug!(gap, overlap, tolerance, "measured tiling residual");
        if overlap > tolerance || gap.abs() > tolerance {
            return Err(self.with_frame(ClipError::TilingViolated {
                gap,
                overlap,
                tolerance,
                frame: None,
            }));
        }

        for (id, object) in self.store.iter() {
            let Some(region) = clipped.get(id) else {
                continue;
            };
            let inside = clip(&region_of(to_kernel(&object.polygon)), &window);
            let uncovered = uncovered_area(&inside, region);
            if uncovered > tolerance {
                return Err(self.with_frame(ClipError::ContainmentViolated {
                    object: id,
                    uncovered,
                    tolerance,
                    frame: None,
                }));
            }
        }

        Ok(clipped)
    }

    fn with_frame(&self, err: ClipError) -> crate::error::ShapeVoronoiError {
        match self.frame {
            Some(frame) => err.in_frame(frame).into(),
            None => err.into(),
        }
    }
}
