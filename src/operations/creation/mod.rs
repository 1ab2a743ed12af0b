mod make_circle;
mod make_ellipse;

pub use make_circle::{MakeCircle, DEFAULT_QUAD_SEGS};
pub use make_ellipse::MakeEllipse;
