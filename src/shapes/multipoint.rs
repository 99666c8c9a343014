//! Unordered point sets: MultiPoint, MultiPointM, MultiPointZ

use super::ShapeRecord;
use crate::types::{BoundingBox2D, Point, ShapeType};

/// A set of points sharing one record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint {
    pub bbox: BoundingBox2D,
    pub points: Vec<Point>,
}

/// A [`MultiPoint`] with one measure per point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPointM {
    pub bbox: BoundingBox2D,
    pub points: Vec<Point>,
    pub m_range: [f64; 2],
    pub m_array: Vec<f64>,
}

/// A [`MultiPoint`] with one elevation and one measure per point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPointZ {
    pub bbox: BoundingBox2D,
    pub points: Vec<Point>,
    pub z_range: [f64; 2],
    pub z_array: Vec<f64>,
    pub m_range: [f64; 2],
    pub m_array: Vec<f64>,
}

impl MultiPoint {
    /// Create a multipoint whose box is computed from `points`
    pub fn from_points(points: Vec<Point>) -> Self {
        MultiPoint {
            bbox: BoundingBox2D::from_points(&points).unwrap_or_default(),
            points,
        }
    }
}

macro_rules! impl_multi_point {
    ($ty:ident, $shape_type:expr) => {
        impl ShapeRecord for $ty {
            fn shape_type(&self) -> ShapeType {
                $shape_type
            }

            fn bounding_box(&self) -> BoundingBox2D {
                self.bbox
            }

            fn num_points(&self) -> usize {
                self.points.len()
            }
        }
    };
}

impl_multi_point!(MultiPoint, ShapeType::MultiPoint);
impl_multi_point!(MultiPointM, ShapeType::MultiPointM);
impl_multi_point!(MultiPointZ, ShapeType::MultiPointZ);
