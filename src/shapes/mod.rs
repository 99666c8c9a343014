//! Decoded shapefile geometry.
//!
//! Every record type has its own value type. [`Shape`] is the closed sum of
//! all fourteen, so a `match` over it is checked for exhaustiveness.

pub mod multipatch;
pub mod multipoint;
pub mod point;
pub mod poly;

pub use multipatch::{MultiPatch, PatchType};
pub use multipoint::{MultiPoint, MultiPointM, MultiPointZ};
pub use point::{PointM, PointZ};
pub use poly::{PartRanges, PolyLine, PolyLineM, PolyLineZ, Polygon, PolygonM, PolygonZ};

use crate::types::{BoundingBox2D, Point, ShapeType};

/// Base trait for all decoded geometry values
pub trait ShapeRecord {
    /// The shape type code this value decodes from
    fn shape_type(&self) -> ShapeType;

    /// Planar extent; the stored box for multi-vertex shapes
    fn bounding_box(&self) -> BoundingBox2D;

    /// Number of vertices
    fn num_points(&self) -> usize;
}

/// A decoded record of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Null,
    Point(Point),
    PolyLine(PolyLine),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    PointZ(PointZ),
    PolyLineZ(PolyLineZ),
    PolygonZ(PolygonZ),
    MultiPointZ(MultiPointZ),
    PointM(PointM),
    PolyLineM(PolyLineM),
    PolygonM(PolygonM),
    MultiPointM(MultiPointM),
    MultiPatch(MultiPatch),
}

impl Shape {
    /// Get a reference to the shape trait object, `None` for [`Shape::Null`]
    pub fn as_record(&self) -> Option<&dyn ShapeRecord> {
        match self {
            Shape::Null => None,
            Shape::Point(s) => Some(s),
            Shape::PolyLine(s) => Some(s),
            Shape::Polygon(s) => Some(s),
            Shape::MultiPoint(s) => Some(s),
            Shape::PointZ(s) => Some(s),
            Shape::PolyLineZ(s) => Some(s),
            Shape::PolygonZ(s) => Some(s),
            Shape::MultiPointZ(s) => Some(s),
            Shape::PointM(s) => Some(s),
            Shape::PolyLineM(s) => Some(s),
            Shape::PolygonM(s) => Some(s),
            Shape::MultiPointM(s) => Some(s),
            Shape::MultiPatch(s) => Some(s),
        }
    }

    /// The shape type of this variant
    pub fn shape_type(&self) -> ShapeType {
        self.as_record()
            .map_or(ShapeType::Null, |record| record.shape_type())
    }

    /// Planar extent, `None` for a null shape
    pub fn bounding_box(&self) -> Option<BoundingBox2D> {
        self.as_record().map(|record| record.bounding_box())
    }

    /// Number of vertices, zero for a null shape
    pub fn num_points(&self) -> usize {
        self.as_record().map_or(0, |record| record.num_points())
    }

    /// Number of parts for multi-part shapes, zero otherwise
    pub fn num_parts(&self) -> usize {
        match self {
            Shape::PolyLine(s) => s.num_parts(),
            Shape::Polygon(s) => s.num_parts(),
            Shape::PolyLineZ(s) => s.num_parts(),
            Shape::PolygonZ(s) => s.num_parts(),
            Shape::PolyLineM(s) => s.num_parts(),
            Shape::PolygonM(s) => s.num_parts(),
            Shape::MultiPatch(s) => s.parts.len(),
            _ => 0,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Shape::Null)
    }
}
