mod approximate;
mod assemble;
mod backend;
mod compute;
mod params;
mod regions;

pub use approximate::{ApproximateVoronoi, TaggedPoint};
pub use assemble::AssembleRegions;
pub use backend::{BackendError, PointVoronoi, SpadeVoronoi};
pub use compute::ComputeRegions;
pub use params::VoronoiParams;
pub use regions::RegionMap;
