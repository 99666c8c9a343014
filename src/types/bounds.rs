//! Bounding box types for shapes and whole files

use super::Point;
use std::fmt;

/// Axis-aligned planar extent, stored on disk as `[xmin, ymin, xmax, ymax]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox2D {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox2D {
    /// Create a new bounding box from its four extents
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        BoundingBox2D {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Build from the on-disk `[xmin, ymin, xmax, ymax]` order
    pub fn from_array(values: [f64; 4]) -> Self {
        BoundingBox2D::new(values[0], values[1], values[2], values[3])
    }

    /// Back to the on-disk `[xmin, ymin, xmax, ymax]` order
    pub fn to_array(&self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: Point) -> Self {
        BoundingBox2D::new(point.x, point.y, point.x, point.y)
    }

    /// Create a bounding box that contains all given points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox2D::from_point(*first);
        for point in rest {
            bbox.expand_to_include(*point);
        }
        Some(bbox)
    }

    /// Minimum corner
    pub fn min(&self) -> Point {
        Point::new(self.x_min, self.y_min)
    }

    /// Maximum corner
    pub fn max(&self) -> Point {
        Point::new(self.x_max, self.y_max)
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Point) {
        self.x_min = self.x_min.min(point.x);
        self.y_min = self.y_min.min(point.y);
        self.x_max = self.x_max.max(point.x);
        self.y_max = self.y_max.max(point.y);
    }

    /// Merge with another bounding box
    pub fn merge(&self, other: &BoundingBox2D) -> BoundingBox2D {
        BoundingBox2D::new(
            self.x_min.min(other.x_min),
            self.y_min.min(other.y_min),
            self.x_max.max(other.x_max),
            self.y_max.max(other.y_max),
        )
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2D[{} -> {}]", self.min(), self.max())
    }
}

/// File-level extent from the main header, including the Z and M ranges.
///
/// The Z and M members are `0.0` when the file's shape type carries no
/// elevation or measure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBoxZM {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub m_min: f64,
    pub m_max: f64,
}

impl BoundingBoxZM {
    /// Build from the header order `[xmin, ymin, xmax, ymax, zmin, zmax, mmin, mmax]`
    pub fn from_array(v: [f64; 8]) -> Self {
        BoundingBoxZM {
            x_min: v[0],
            y_min: v[1],
            x_max: v[2],
            y_max: v[3],
            z_min: v[4],
            z_max: v[5],
            m_min: v[6],
            m_max: v[7],
        }
    }

    /// Back to the header order
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.x_min, self.y_min, self.x_max, self.y_max, self.z_min, self.z_max, self.m_min,
            self.m_max,
        ]
    }

    /// The planar part of the extent
    pub fn xy(&self) -> BoundingBox2D {
        BoundingBox2D::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }

    /// `[zmin, zmax]`
    pub fn z_range(&self) -> [f64; 2] {
        [self.z_min, self.z_max]
    }

    /// `[mmin, mmax]`
    pub fn m_range(&self) -> [f64; 2] {
        [self.m_min, self.m_max]
    }
}

impl fmt::Display for BoundingBoxZM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BBoxZM[{} -> {}, z {}..{}, m {}..{}]",
            self.xy().min(),
            self.xy().max(),
            self.z_min,
            self.z_max,
            self.m_min,
            self.m_max
        )
    }
}
