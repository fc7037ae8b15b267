pub mod canvas;
pub mod color;
pub mod error;
pub mod geometry;
pub mod outline;
pub mod red_light;
pub mod session;
pub mod shape;

pub use error::TracingError;
pub use geometry::Point;
pub use session::{PointerKind, PointerSample, Status, Step, TracingSession};
pub use shape::ShapeId;
