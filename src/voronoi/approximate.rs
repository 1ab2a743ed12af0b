use std::collections::{HashMap, HashSet};

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::error::{
    ConstructionFailure, DegenerateInputError, Result, ShapeVoronoiError, VoronoiConstructionError,
};
use crate::geometry::Polygon;
use crate::kernel::{area, boundaries_touch, overlap_area, to_kernel, union_all, Region};
use crate::math::polygon_2d::{bounds_2d, segment_length};
use crate::math::{Point2, TOLERANCE};
use crate::objects::{ObjectId, ObjectStore};
use crate::operations::densify::DensifyRing;

use super::{PointVoronoi, RegionMap, VoronoiParams};

/// A boundary sample and the object it was taken from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaggedPoint {
    pub position: Point2,
    pub object: ObjectId,
}

/// Approximates the generalized Voronoi diagram of a set of polygons.
///
/// Each object's outer ring is densified, all samples are fed to a
/// point-Voronoi backend as one cloud, and the resulting cells are merged
/// back per object. The returned regions are unioned but not yet validated
/// against the tiling invariants; see [`super::AssembleRegions`].
pub struct ApproximateVoronoi<'a> {
    store: &'a ObjectStore,
    bounds: &'a Polygon,
    params: VoronoiParams,
    frame: Option<u64>,
}

impl<'a> ApproximateVoronoi<'a> {
    /// Creates a new `ApproximateVoronoi` operation with default parameters.
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

    /// Attaches a frame index to any error this run reports.
    #[must_use]
    pub fn in_frame(mut self, frame: u64) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Executes the approximation, returning one merged region per object.
    ///
    /// # Errors
    ///
    /// Returns `Degenerate` for an empty object set or a zero-area bounding
    /// region, `InvalidParameters` for out-of-range parameters, and
    /// `Construction` when objects overlap, samples of different objects
    /// coincide, the backend fails, or a merge loses its object.
    pub fn execute(&self, backend: &impl PointVoronoi) -> Result<RegionMap> {
        self.params.validate()?;
        if self.store.is_empty() {
            return Err(DegenerateInputError::NoObjects.into());
        }
        let bounds_area = self.bounds.area();
        if bounds_area < TOLERANCE {
            return Err(
                DegenerateInputError::ZeroArea("bounding region encloses no area".into()).into(),
            );
        }
        let area_tolerance = self.params.tiling_tolerance * bounds_area;

        self.check_overlaps(area_tolerance)?;

        let samples = self.sample()?;
        self.check_coincidence(&samples)?;
        debug!(
            objects = self.store.len(),
            samples = samples.len(),
            "sampled object boundaries"
        );

        let sites: Vec<Point2> = samples.iter().map(|s| s.position).collect();
        let cells = backend.cells(&sites, self.bounds).map_err(|err| {
            self.fail(
                ConstructionFailure::Backend(err.to_string()),
                self.store.ids().to_vec(),
            )
        })?;
        if cells.len() != sites.len() {
            return Err(self.fail(
                ConstructionFailure::CellCountMismatch {
                    expected: sites.len(),
                    actual: cells.len(),
                },
                self.store.ids().to_vec(),
            ));
        }

        let mut groups: SecondaryMap<ObjectId, Vec<Region>> = SecondaryMap::new();
        for (sample, cell) in samples.iter().zip(cells) {
            if let Some(group) = groups.entry(sample.object) {
                group.or_default().push(cell);
            }
        }

        let mut regions = RegionMap::new();
        for &id in self.store.ids() {
            let parts = groups.remove(id).unwrap_or_default();
            let cells_area: f64 = parts.iter().map(area).sum();
            let merged = union_all(parts);
            let union_area = area(&merged);

            if merged.0.is_empty() || union_area < area_tolerance {
                return Err(self.fail(ConstructionFailure::EmptyRegion, vec![id]));
            }
            if (union_area - cells_area).abs() > area_tolerance {
                return Err(self.fail(
                    ConstructionFailure::UnionMismatch {
                        cells_area,
                        union_area,
                    },
                    vec![id],
                ));
            }
            trace!(?id, area = union_area, "merged object cells");
            regions.insert(id, merged);
        }

        if regions.len() != self.store.len() {
            return Err(self.fail(
                ConstructionFailure::RegionCountMismatch {
                    expected: self.store.len(),
                    actual: regions.len(),
                },
                self.store.ids().to_vec(),
            ));
        }
        debug!(regions = regions.len(), "merged regions");
        Ok(regions)
    }

    fn fail(&self, reason: ConstructionFailure, objects: Vec<ObjectId>) -> ShapeVoronoiError {
        let err = VoronoiConstructionError::new(reason, objects);
        match self.frame {
            Some(frame) => err.in_frame(frame).into(),
            None => err.into(),
        }
    }

    /// Densifies every object in creation order and tags the samples.
    ///
    /// Exact repeats within one object (the doubled vertices of the
    /// per-edge sampling and the closing point) are dropped; they would map
    /// to the same Voronoi site anyway.
    fn sample(&self) -> Result<Vec<TaggedPoint>> {
        let mut samples = Vec::new();
        for (id, object) in self.store.iter() {
            let dense = DensifyRing::new(object.polygon.outer(), self.params.density).execute()?;
            let mut seen = HashSet::new();
            for p in dense.points() {
                if seen.insert((p.x.to_bits(), p.y.to_bits())) {
                    samples.push(TaggedPoint {
                        position: *p,
                        object: id,
                    });
                }
            }
        }
        Ok(samples)
    }

    /// Rejects object pairs whose interiors overlap or whose boundaries touch.
    fn check_overlaps(&self, area_tolerance: f64) -> Result<()> {
        let objects: Vec<_> = self
            .store
            .iter()
            .filter_map(|(id, object)| {
                bounds_2d(object.polygon.outer().points())
                    .map(|bbox| (id, bbox, to_kernel(&object.polygon)))
            })
            .collect();

        for (i, (id_a, (min_a, max_a), poly_a)) in objects.iter().enumerate() {
            for (id_b, (min_b, max_b), poly_b) in &objects[i + 1..] {
                let disjoint = max_a.x < min_b.x
                    || max_b.x < min_a.x
                    || max_a.y < min_b.y
                    || max_b.y < min_a.y;
                if disjoint {
                    continue;
                }
                let shared = overlap_area(poly_a, poly_b);
                let reason = if shared > area_tolerance {
                    ConstructionFailure::OverlappingObjects { area: shared }
                } else if boundaries_touch(poly_a, poly_b) {
                    ConstructionFailure::TouchingObjects
                } else {
                    continue;
                };
                return Err(self.fail(reason, vec![*id_a, *id_b]));
            }
        }
        Ok(())
    }

    /// Rejects samples of different objects closer than the coincidence
    /// tolerance, using a uniform grid with cells of that size.
    #[allow(clippy::cast_possible_truncation)]
    fn check_coincidence(&self, samples: &[TaggedPoint]) -> Result<()> {
        let extent = bounds_2d(self.bounds.outer().points())
            .map_or(0.0, |(min, max)| (max.x - min.x).max(max.y - min.y));
        let tolerance = self.params.coincidence_tolerance * extent;
        if tolerance <= 0.0 {
            return Ok(());
        }

        let cell_of = |p: &Point2| {
            (
                (p.x / tolerance).floor() as i64,
                (p.y / tolerance).floor() as i64,
            )
        };
        let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (index, sample) in samples.iter().enumerate() {
            let (cx, cy) = cell_of(&sample.position);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
                        continue;
                    };
                    for &other in bucket {
                        let other = &samples[other];
                        if other.object == sample.object {
                            continue;
                        }
                        let distance = segment_length(&other.position, &sample.position);
                        if distance <= tolerance {
                            return Err(self.fail(
                                ConstructionFailure::CoincidentSamples { distance },
                                vec![other.object, sample.object],
                            ));
                        }
                    }
                }
            }
            grid.entry((cx, cy)).or_default().push(index);
        }
        Ok(())
    }
}
