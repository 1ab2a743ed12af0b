pub mod creation;
pub mod densify;
pub mod transform;
