//! MultiPatch: surface patches built from strips, fans and rings.
//!
//! Only the bounding box of a MultiPatch record is decoded; every other
//! field of a decoded value is left empty and must not be relied on.

use super::ShapeRecord;
use crate::types::{BoundingBox2D, Point, ShapeType};

/// How the points of one MultiPatch part are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PatchType {
    TriangleStrip = 0,
    TriangleFan = 1,
    OuterRing = 2,
    InnerRing = 3,
    FirstRing = 4,
    Ring = 5,
}

impl PatchType {
    /// Create from the raw part-type code
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::TriangleStrip),
            1 => Some(Self::TriangleFan),
            2 => Some(Self::OuterRing),
            3 => Some(Self::InnerRing),
            4 => Some(Self::FirstRing),
            5 => Some(Self::Ring),
            _ => None,
        }
    }
}

/// A MultiPatch record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPatch {
    pub bbox: BoundingBox2D,
    pub parts: Vec<i32>,
    pub part_types: Vec<i32>,
    pub points: Vec<Point>,
    pub z_range: [f64; 2],
    pub z_array: Vec<f64>,
    pub m_range: [f64; 2],
    pub m_array: Vec<f64>,
}

impl MultiPatch {
    /// A value carrying only its bounding box
    pub fn with_bbox(bbox: BoundingBox2D) -> Self {
        MultiPatch {
            bbox,
            ..Default::default()
        }
    }

    /// Part types that map onto a known [`PatchType`].
    ///
    /// Decoded records leave `part_types` empty, so this only yields items
    /// for values whose `part_types` were filled in by hand.
    pub fn patch_types(&self) -> impl Iterator<Item = Option<PatchType>> + '_ {
        self.part_types.iter().map(|code| PatchType::from_raw(*code))
    }
}

impl ShapeRecord for MultiPatch {
    fn shape_type(&self) -> ShapeType {
        ShapeType::MultiPatch
    }

    fn bounding_box(&self) -> BoundingBox2D {
        self.bbox
    }

    fn num_points(&self) -> usize {
        self.points.len()
    }
}
