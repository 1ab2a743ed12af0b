pub mod error;
pub mod frames;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod objects;
pub mod operations;
pub mod output;
pub mod voronoi;

pub use error::{Result, ShapeVoronoiError};
