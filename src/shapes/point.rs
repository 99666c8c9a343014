//! Single-vertex shapes: Point, PointM, PointZ

use super::ShapeRecord;
use crate::types::{BoundingBox2D, Point, ShapeType};

impl ShapeRecord for Point {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Point
    }

    fn bounding_box(&self) -> BoundingBox2D {
        BoundingBox2D::from_point(*self)
    }

    fn num_points(&self) -> usize {
        1
    }
}

/// A point with a measure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointM {
    pub x: f64,
    pub y: f64,
    pub m: f64,
}

impl PointM {
    pub fn new(x: f64, y: f64, m: f64) -> Self {
        PointM { x, y, m }
    }

    /// Planar part of the point
    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl ShapeRecord for PointM {
    fn shape_type(&self) -> ShapeType {
        ShapeType::PointM
    }

    fn bounding_box(&self) -> BoundingBox2D {
        BoundingBox2D::from_point(self.xy())
    }

    fn num_points(&self) -> usize {
        1
    }
}

/// A point with elevation and measure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointZ {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl PointZ {
    pub fn new(x: f64, y: f64, z: f64, m: f64) -> Self {
        PointZ { x, y, z, m }
    }

    /// Planar part of the point
    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl ShapeRecord for PointZ {
    fn shape_type(&self) -> ShapeType {
        ShapeType::PointZ
    }

    fn bounding_box(&self) -> BoundingBox2D {
        BoundingBox2D::from_point(self.xy())
    }

    fn num_points(&self) -> usize {
        1
    }
}
