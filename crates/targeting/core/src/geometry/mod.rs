//! Geometry primitives shared by the predicate, the finder and movement math.
//!
//! All coordinates are world units in `f64`, matching the precision hosts
//! use for entity positions.
mod bounds;
mod distance;
mod vector;

pub use bounds::{BoundingBox, nearest_point};
pub use distance::{boxed_distance, interpolate_position, squared_boxed_distance, would_block_hit};
pub use vector::Vec3;
