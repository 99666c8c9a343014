//! Shape type codes.
//!
//! Every record, and the main file header, carries one of these codes as a
//! little-endian `i32`. Codes outside this table are kept as raw integers by
//! the indexer and rejected only when a record is decoded.

use std::fmt;

bitflags::bitflags! {
    /// Extra per-vertex dimensions carried by a shape type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Dimensions: u8 {
        /// Elevation (`z_range` / `z_array`)
        const Z = 1;
        /// Measure (`m_range` / `m_array`)
        const M = 2;
    }
}

/// Fixed shapefile shape type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ShapeType {
    Null = 0,
    Point = 1,
    PolyLine = 3,
    Polygon = 5,
    MultiPoint = 8,
    PointZ = 11,
    PolyLineZ = 13,
    PolygonZ = 15,
    MultiPointZ = 18,
    PointM = 21,
    PolyLineM = 23,
    PolygonM = 25,
    MultiPointM = 28,
    MultiPatch = 31,
}

impl ShapeType {
    /// All known shape types in code order.
    pub const ALL: [ShapeType; 14] = [
        ShapeType::Null,
        ShapeType::Point,
        ShapeType::PolyLine,
        ShapeType::Polygon,
        ShapeType::MultiPoint,
        ShapeType::PointZ,
        ShapeType::PolyLineZ,
        ShapeType::PolygonZ,
        ShapeType::MultiPointZ,
        ShapeType::PointM,
        ShapeType::PolyLineM,
        ShapeType::PolygonM,
        ShapeType::MultiPointM,
        ShapeType::MultiPatch,
    ];

    /// Create a `ShapeType` from a raw i32 code.
    ///
    /// Returns `None` for codes that are not part of the format.
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Null),
            1 => Some(Self::Point),
            3 => Some(Self::PolyLine),
            5 => Some(Self::Polygon),
            8 => Some(Self::MultiPoint),
            11 => Some(Self::PointZ),
            13 => Some(Self::PolyLineZ),
            15 => Some(Self::PolygonZ),
            18 => Some(Self::MultiPointZ),
            21 => Some(Self::PointM),
            23 => Some(Self::PolyLineM),
            25 => Some(Self::PolygonM),
            28 => Some(Self::MultiPointM),
            31 => Some(Self::MultiPatch),
            _ => None,
        }
    }

    /// Get the raw i32 value.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Name as used in the format documentation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Point => "Point",
            Self::PolyLine => "PolyLine",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::PointZ => "PointZ",
            Self::PolyLineZ => "PolyLineZ",
            Self::PolygonZ => "PolygonZ",
            Self::MultiPointZ => "MultiPointZ",
            Self::PointM => "PointM",
            Self::PolyLineM => "PolyLineM",
            Self::PolygonM => "PolygonM",
            Self::MultiPointM => "MultiPointM",
            Self::MultiPatch => "MultiPatch",
        }
    }

    /// Which of Z and M this type carries. Z types always carry M as well.
    pub fn dimensions(self) -> Dimensions {
        match self {
            Self::PointZ
            | Self::PolyLineZ
            | Self::PolygonZ
            | Self::MultiPointZ
            | Self::MultiPatch => Dimensions::Z | Dimensions::M,
            Self::PointM | Self::PolyLineM | Self::PolygonM | Self::MultiPointM => Dimensions::M,
            _ => Dimensions::empty(),
        }
    }

    /// Whether records of this type carry a `parts` array.
    pub fn is_multi_part(self) -> bool {
        matches!(
            self,
            Self::PolyLine
                | Self::Polygon
                | Self::PolyLineZ
                | Self::PolygonZ
                | Self::PolyLineM
                | Self::PolygonM
                | Self::MultiPatch
        )
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
