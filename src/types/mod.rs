//! Core value types: shape type codes, coordinates, and extents

mod bounds;
mod point;
mod shape_type;

pub use bounds::{BoundingBox2D, BoundingBoxZM};
pub use point::Point;
pub use shape_type::{Dimensions, ShapeType};
