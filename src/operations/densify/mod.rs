mod densify_ring;

pub use densify_ring::{densify_edge, DensifyRing};
