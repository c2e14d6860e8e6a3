pub mod geometry;
pub mod keys;

pub use geometry::{Axes, Direction, Edges, Modifiers, Point, Rect};
pub use keys::{OutputId, RegionId, ViewId};
