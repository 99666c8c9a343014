//! Multi-part shapes: PolyLine and Polygon with their M and Z variants.
//!
//! The six types share one layout. `parts` holds the index into `points`
//! where each part (a line string, or a polygon ring) starts; a part runs
//! until the next part's start or the end of `points`. The per-vertex
//! `z_array` / `m_array` values line up with `points` index for index.

use std::ops::Range;

use super::ShapeRecord;
use crate::types::{BoundingBox2D, Point, ShapeType};

/// An ordered set of line strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyLine {
    pub bbox: BoundingBox2D,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
}

/// One or more rings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub bbox: BoundingBox2D,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
}

/// A [`PolyLine`] with per-vertex measures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyLineM {
    pub bbox: BoundingBox2D,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
    pub m_range: [f64; 2],
    pub m_array: Vec<f64>,
}

/// A [`Polygon`] with per-vertex measures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonM {
    pub bbox: BoundingBox2D,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
    pub m_range: [f64; 2],
    pub m_array: Vec<f64>,
}

/// A [`PolyLine`] with per-vertex elevations and measures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyLineZ {
    pub bbox: BoundingBox2D,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
    pub z_range: [f64; 2],
    pub z_array: Vec<f64>,
    pub m_range: [f64; 2],
    pub m_array: Vec<f64>,
}

/// A [`Polygon`] with per-vertex elevations and measures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonZ {
    pub bbox: BoundingBox2D,
    pub parts: Vec<i32>,
    pub points: Vec<Point>,
    pub z_range: [f64; 2],
    pub z_array: Vec<f64>,
    pub m_range: [f64; 2],
    pub m_array: Vec<f64>,
}

/// Index ranges into a point array described by part start offsets.
///
/// Out-of-range or decreasing offsets are clamped so that hand-built values
/// never cause a panic; decoded values are validated before they get here.
#[derive(Debug, Clone)]
pub struct PartRanges<'a> {
    parts: &'a [i32],
    num_points: usize,
    index: usize,
}

impl<'a> PartRanges<'a> {
    pub fn new(parts: &'a [i32], num_points: usize) -> Self {
        PartRanges {
            parts,
            num_points,
            index: 0,
        }
    }

    fn clamp(&self, offset: i32) -> usize {
        usize::try_from(offset).unwrap_or(0).min(self.num_points)
    }
}

impl Iterator for PartRanges<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let start = self.clamp(*self.parts.get(self.index)?);
        self.index += 1;
        let end = match self.parts.get(self.index) {
            Some(next) => self.clamp(*next).max(start),
            None => self.num_points,
        };
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.parts.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PartRanges<'_> {}

macro_rules! impl_multi_part {
    ($ty:ident, $shape_type:expr) => {
        impl $ty {
            /// Number of parts
            pub fn num_parts(&self) -> usize {
                self.parts.len()
            }

            /// Index range into `points` for each part
            pub fn part_ranges(&self) -> PartRanges<'_> {
                PartRanges::new(&self.parts, self.points.len())
            }

            /// The points of each part
            pub fn parts(&self) -> impl Iterator<Item = &[Point]> + '_ {
                self.part_ranges().map(move |range| &self.points[range])
            }
        }

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

impl_multi_part!(PolyLine, ShapeType::PolyLine);
impl_multi_part!(Polygon, ShapeType::Polygon);
impl_multi_part!(PolyLineM, ShapeType::PolyLineM);
impl_multi_part!(PolygonM, ShapeType::PolygonM);
impl_multi_part!(PolyLineZ, ShapeType::PolyLineZ);
impl_multi_part!(PolygonZ, ShapeType::PolygonZ);

impl Polygon {
    /// Create a polygon from a list of rings, computing `parts` and the box
    pub fn from_rings(rings: Vec<Vec<Point>>) -> Self {
        let mut parts = Vec::with_capacity(rings.len());
        let mut points = Vec::new();
        for ring in rings {
            parts.push(points.len() as i32);
            points.extend(ring);
        }
        Polygon {
            bbox: BoundingBox2D::from_points(&points).unwrap_or_default(),
            parts,
            points,
        }
    }
}
