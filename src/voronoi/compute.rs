use crate::error::Result;
use crate::geometry::Polygon;
use crate::objects::ObjectStore;

use super::{
    ApproximateVoronoi, AssembleRegions, PointVoronoi, RegionMap, SpadeVoronoi, VoronoiParams,
};

/// Runs approximation and assembly in one call.
pub struct ComputeRegions<'a> {
    store: &'a ObjectStore,
    bounds: &'a Polygon,
    params: VoronoiParams,
    frame: Option<u64>,
}

impl<'a> ComputeRegions<'a> {
    /// Creates a new `ComputeRegions` operation with default parameters.
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

    /// Executes the pipeline with the default [`SpadeVoronoi`] backend.
    ///
    /// # Errors
    ///
    /// See [`ApproximateVoronoi::execute`] and [`AssembleRegions::execute`].
    pub fn execute(&self) -> Result<RegionMap> {
        self.execute_with(&SpadeVoronoi::default())
    }

    /// Executes the pipeline with a custom point-Voronoi backend.
    ///
    /// # Errors
    ///
    /// See [`ApproximateVoronoi::execute`] and [`AssembleRegions::execute`].
    pub fn execute_with(&self, backend: &impl PointVoronoi) -> Result<RegionMap> {
        let mut approximate =
            ApproximateVoronoi::new(self.store, self.bounds).with_params(self.params);
        let mut assemble = AssembleRegions::new(self.store, self.bounds).with_params(self.params);
        if let Some(frame) = self.frame {
            approximate = approximate.in_frame(frame);
            assemble = assemble.in_frame(frame);
        }

        let merged = approximate.execute(backend)?;
        assemble.execute(&merged)
    }
}
