//! Per-frame driver for agent scenes.
//!
//! A scene is a static bounding polygon with obstacles. Each frame supplies
//! agent positions; every agent becomes a disc object, every obstacle an
//! object of its own, and the regions are computed frame by frame.

use tracing::{debug, info, warn};

use crate::error::{Result, ShapeVoronoiError};
use crate::geometry::Polygon;
use crate::kernel::Region;
use crate::math::Point2;
use crate::objects::{ObjectId, ObjectStore};
use crate::operations::creation::MakeCircle;
use crate::voronoi::{ComputeRegions, RegionMap, VoronoiParams};

/// Default disc radius for agents.
pub const DEFAULT_AGENT_RADIUS: f64 = 0.3;

/// Caller-supplied agent identity, stable across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

/// Agent positions at one time step.
#[derive(Debug, Clone)]
pub struct AgentFrame {
    pub index: u64,
    pub agents: Vec<(AgentId, Point2)>,
}

impl AgentFrame {
    #[must_use]
    pub fn new(index: u64, agents: Vec<(AgentId, Point2)>) -> Self {
        Self { index, agents }
    }
}

/// The static part of a scene.
#[derive(Debug, Clone)]
pub struct FrameScene {
    bounds: Polygon,
    obstacles: Vec<Polygon>,
    agent_radius: f64,
}

impl FrameScene {
    #[must_use]
    pub fn new(bounds: Polygon) -> Self {
        Self {
            bounds,
            obstacles: Vec::new(),
            agent_radius: DEFAULT_AGENT_RADIUS,
        }
    }

    /// Adds an obstacle. Its outer ring is also cut out of the bounds.
    #[must_use]
    pub fn with_obstacle(mut self, obstacle: Polygon) -> Self {
        self.bounds = self.bounds.with_hole(obstacle.outer().clone());
        self.obstacles.push(obstacle);
        self
    }

    #[must_use]
    pub fn with_agent_radius(mut self, agent_radius: f64) -> Self {
        self.agent_radius = agent_radius;
        self
    }

    /// Bounding polygon with every obstacle cut out.
    #[must_use]
    pub fn bounds(&self) -> &Polygon {
        &self.bounds
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    #[must_use]
    pub fn agent_radius(&self) -> f64 {
        self.agent_radius
    }
}

/// Objects built for one frame and how they map back to the scene.
#[derive(Debug)]
pub struct FrameObjects {
    pub store: ObjectStore,
    pub agents: Vec<(AgentId, ObjectId)>,
    pub obstacles: Vec<ObjectId>,
}

impl FrameObjects {
    #[must_use]
    pub fn agent_object(&self, agent: AgentId) -> Option<ObjectId> {
        self.agents
            .iter()
            .find_map(|&(id, object)| (id == agent).then_some(object))
    }
}

/// Builds the objects of one frame: obstacles first, then one disc per agent.
///
/// # Errors
///
/// Returns an error if the agent radius is not positive or `quad_segs` is zero.
pub fn build_frame_objects(
    scene: &FrameScene,
    frame: &AgentFrame,
    params: &VoronoiParams,
) -> Result<FrameObjects> {
    let mut store = ObjectStore::new();
    let obstacles = scene
        .obstacles
        .iter()
        .map(|obstacle| store.add(obstacle.clone()))
        .collect();

    let mut agents = Vec::with_capacity(frame.agents.len());
    for &(agent, position) in &frame.agents {
        let disc = MakeCircle::new(position, scene.agent_radius)
            .with_quad_segs(params.quad_segs)
            .execute()?;
        let object = store.add(Polygon::new(disc, Vec::new())?);
        agents.push((agent, object));
    }

    Ok(FrameObjects {
        store,
        agents,
        obstacles,
    })
}

/// Regions computed for one frame.
#[derive(Debug)]
pub struct FrameRegions {
    pub index: u64,
    pub objects: FrameObjects,
    pub regions: RegionMap,
}

impl FrameRegions {
    #[must_use]
    pub fn agent_region(&self, agent: AgentId) -> Option<&Region> {
        self.objects
            .agent_object(agent)
            .and_then(|object| self.regions.get(object))
    }
}

/// What to do when a frame fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop and return the first error.
    #[default]
    Abort,
    /// Record the error, log a warning, and continue with the next frame.
    Skip,
}

/// Outcome of processing a sequence of frames.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub computed: Vec<FrameRegions>,
    pub skipped: Vec<(u64, ShapeVoronoiError)>,
}

/// Runs the region pipeline over a sequence of frames.
pub struct ProcessFrames<'a> {
    scene: &'a FrameScene,
    params: VoronoiParams,
    policy: FailurePolicy,
}

impl<'a> ProcessFrames<'a> {
    #[must_use]
    pub fn new(scene: &'a FrameScene, params: VoronoiParams) -> Self {
        Self {
            scene,
            params,
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Processes frames in order.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::Abort`], returns the first frame error with the
    /// frame index attached. With [`FailurePolicy::Skip`], never fails.
    pub fn execute(&self, frames: impl IntoIterator<Item = AgentFrame>) -> Result<FrameReport> {
        let mut report = FrameReport::default();
        for frame in frames {
            let index = frame.index;
            match self.run_frame(&frame) {
                Ok(computed) => {
                    debug!(frame = index, regions = computed.regions.len(), "frame computed");
                    report.computed.push(computed);
                }
                Err(err) => match self.policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Skip => {
                        warn!(frame = index, error = %err, "skipping frame");
                        report.skipped.push((index, err));
                    }
                },
            }
        }
        info!(
            computed = report.computed.len(),
            skipped = report.skipped.len(),
            "processed frames"
        );
        Ok(report)
    }

    fn run_frame(&self, frame: &AgentFrame) -> Result<FrameRegions> {
        let objects = build_frame_objects(self.scene, frame, &self.params)
            .map_err(|err| err.in_frame(frame.index))?;
        let regions = ComputeRegions::new(&objects.store, &self.scene.bounds)
            .with_params(self.params)
            .in_frame(frame.index)
            .execute()?;
        Ok(FrameRegions {
            index: frame.index,
            objects,
            regions,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::DegenerateInputError;
    use crate::kernel::{area, region_contains};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn corridor() -> FrameScene {
        let bounds = Polygon::rectangle(p(0.0, 0.0), p(12.0, 4.0)).unwrap();
        let pillar = Polygon::rectangle(p(6.5, 1.5), p(7.5, 2.5)).unwrap();
        FrameScene::new(bounds).with_obstacle(pillar)
    }

    fn params() -> VoronoiParams {
        VoronoiParams::default().with_density(10.0).with_quad_segs(3)
    }

    fn spread_frame(index: u64) -> AgentFrame {
        AgentFrame::new(
            index,
            vec![
                (AgentId(1), p(2.0, 1.0)),
                (AgentId(2), p(2.0, 3.0)),
                (AgentId(3), p(10.0, 2.0)),
            ],
        )
    }

    fn crowded_frame(index: u64) -> AgentFrame {
        AgentFrame::new(
            index,
            vec![(AgentId(1), p(3.0, 2.0)), (AgentId(2), p(3.0, 2.0))],
        )
    }

    #[test]
    fn scene_cuts_obstacles_out_of_bounds() {
        let scene = corridor();
        assert_eq!(scene.obstacles().len(), 1);
        assert_eq!(scene.bounds().holes().len(), 1);
        assert_abs_diff_eq!(scene.bounds().area(), 47.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scene.agent_radius(), DEFAULT_AGENT_RADIUS);
    }

    #[test]
    fn builds_obstacles_then_agent_discs() {
        let scene = corridor();
        let objects = build_frame_objects(&scene, &spread_frame(0), &params()).unwrap();

        assert_eq!(objects.store.len(), 4);
        assert_eq!(objects.store.ids()[0], objects.obstacles[0]);
        let disc = objects.agent_object(AgentId(2)).unwrap();
        let ring = objects.store.get(disc).unwrap().polygon.outer();
        assert_eq!(ring.vertices().len(), 12);
        assert_abs_diff_eq!(ring.points()[0].x, 2.3, epsilon = 1e-12);
        assert!(objects.agent_object(AgentId(9)).is_none());
    }

    #[test]
    fn non_positive_agent_radius_is_rejected() {
        let scene = corridor().with_agent_radius(0.0);
        let err = build_frame_objects(&scene, &spread_frame(0), &params()).unwrap_err();
        assert!(matches!(
            err,
            ShapeVoronoiError::Degenerate(DegenerateInputError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn frame_regions_tile_the_corridor() {
        let scene = corridor();
        let report = ProcessFrames::new(&scene, params())
            .execute([spread_frame(0)])
            .unwrap();

        assert!(report.skipped.is_empty());
        let frame = &report.computed[0];
        assert_eq!(frame.regions.len(), 4);
        assert_abs_diff_eq!(frame.regions.total_area(), 47.0, epsilon = 1e-3);

        let left_low = frame.agent_region(AgentId(1)).unwrap();
        assert!(region_contains(left_low, &p(2.0, 1.0)));
        assert!(region_contains(left_low, &p(0.5, 0.5)));
        assert!(!region_contains(left_low, &p(0.5, 3.5)));

        let right = frame.agent_region(AgentId(3)).unwrap();
        assert!(region_contains(right, &p(11.5, 3.5)));

        let pillar = frame.regions.get(frame.objects.obstacles[0]).unwrap();
        assert!(area(pillar) > 0.0);
        assert!(!region_contains(pillar, &p(7.0, 2.0)));
    }

    #[test]
    fn skip_policy_records_failing_frames() {
        let scene = corridor();
        let report = ProcessFrames::new(&scene, params())
            .with_policy(FailurePolicy::Skip)
            .execute([spread_frame(0), crowded_frame(1), spread_frame(2)])
            .unwrap();

        let computed: Vec<_> = report.computed.iter().map(|f| f.index).collect();
        assert_eq!(computed, vec![0, 2]);
        assert_eq!(report.skipped.len(), 1);
        let (index, err) = &report.skipped[0];
        assert_eq!(*index, 1);
        assert_eq!(err.frame(), Some(1));
        assert!(matches!(err, ShapeVoronoiError::Construction(_)));
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let scene = corridor();
        let err = ProcessFrames::new(&scene, params())
            .execute([spread_frame(0), crowded_frame(5), spread_frame(6)])
            .unwrap_err();
        assert_eq!(err.frame(), Some(5));
    }

    #[test]
    fn agentless_frame_still_partitions_around_obstacles() {
        let scene = corridor();
        let report = ProcessFrames::new(&scene, params())
            .execute([AgentFrame::new(3, Vec::new())])
            .unwrap();
        let frame = &report.computed[0];
        assert_eq!(frame.regions.len(), 1);
        assert_abs_diff_eq!(frame.regions.total_area(), 47.0, epsilon = 1e-3);
    }
}
