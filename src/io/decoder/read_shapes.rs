//! Payload layouts of every shape type.
//!
//! Each impl reads the fields after the type tag in file order:
//!
//! ```text
//! Point         x y
//! PointM        x y m
//! PointZ        x y z m
//! MultiPoint    box num_points points
//! PolyLine      box num_parts num_points parts points
//! Polygon       (as PolyLine)
//! *M            ... m_range m_array
//! *Z            ... z_range z_array m_range m_array
//! MultiPatch    box (rest not decoded)
//! ```

use super::payload_reader::PayloadReader;
use crate::error::DecodeError;
use crate::shapes::{
    MultiPatch, MultiPoint, MultiPointM, MultiPointZ, PointM, PointZ, PolyLine, PolyLineM,
    PolyLineZ, Polygon, PolygonM, PolygonZ,
};
use crate::types::{BoundingBox2D, Point, ShapeType};

/// A geometry value that can be read from a record payload.
pub trait DecodeShape: Sized {
    /// The record type this layout belongs to
    const SHAPE_TYPE: ShapeType;

    /// Read the payload fields; the type tag has already been consumed.
    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError>;
}

impl DecodeShape for Point {
    const SHAPE_TYPE: ShapeType = ShapeType::Point;

    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
        reader.read_point()
    }
}

impl DecodeShape for PointM {
    const SHAPE_TYPE: ShapeType = ShapeType::PointM;

    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
        let Point { x, y } = reader.read_point()?;
        let m = reader.read_f64()?;
        Ok(PointM { x, y, m })
    }
}

impl DecodeShape for PointZ {
    const SHAPE_TYPE: ShapeType = ShapeType::PointZ;

    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
        let Point { x, y } = reader.read_point()?;
        let z = reader.read_f64()?;
        let m = reader.read_f64()?;
        Ok(PointZ { x, y, z, m })
    }
}

/// Box and points shared by the multipoint layouts.
fn read_multi_point_head(
    reader: &mut PayloadReader<'_>,
) -> Result<(BoundingBox2D, Vec<Point>), DecodeError> {
    let bbox = reader.read_box()?;
    let num_points = reader.read_count("point")?;
    let points = reader.read_points(num_points)?;
    Ok((bbox, points))
}

/// Box, parts and points shared by the multi-part layouts.
fn read_multi_part_head(
    reader: &mut PayloadReader<'_>,
) -> Result<(BoundingBox2D, Vec<i32>, Vec<Point>), DecodeError> {
    let bbox = reader.read_box()?;
    let num_parts = reader.read_count("part")?;
    let num_points = reader.read_count("point")?;
    let parts = reader.read_parts(num_parts, num_points)?;
    let points = reader.read_points(num_points)?;
    Ok((bbox, parts, points))
}

/// A `[min, max]` range followed by one value per point.
fn read_dimension(
    reader: &mut PayloadReader<'_>,
    num_points: usize,
) -> Result<([f64; 2], Vec<f64>), DecodeError> {
    let range = reader.read_range()?;
    let values = reader.read_doubles(num_points)?;
    Ok((range, values))
}

impl DecodeShape for MultiPoint {
    const SHAPE_TYPE: ShapeType = ShapeType::MultiPoint;

    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
        let (bbox, points) = read_multi_point_head(reader)?;
        Ok(MultiPoint { bbox, points })
    }
}

impl DecodeShape for MultiPointM {
    const SHAPE_TYPE: ShapeType = ShapeType::MultiPointM;

    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
        let (bbox, points) = read_multi_point_head(reader)?;
        let (m_range, m_array) = read_dimension(reader, points.len())?;
        Ok(MultiPointM {
            bbox,
            points,
            m_range,
            m_array,
        })
    }
}

impl DecodeShape for MultiPointZ {
    const SHAPE_TYPE: ShapeType = ShapeType::MultiPointZ;

    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
        let (bbox, points) = read_multi_point_head(reader)?;
        let (z_range, z_array) = read_dimension(reader, points.len())?;
        let (m_range, m_array) = read_dimension(reader, points.len())?;
        Ok(MultiPointZ {
            bbox,
            points,
            z_range,
            z_array,
            m_range,
            m_array,
        })
    }
}

macro_rules! decode_multi_part {
    ($ty:ident, $shape_type:expr) => {
        impl DecodeShape for $ty {
            const SHAPE_TYPE: ShapeType = $shape_type;

            fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
                let (bbox, parts, points) = read_multi_part_head(reader)?;
                Ok($ty { bbox, parts, points })
            }
        }
    };
    ($ty:ident, $shape_type:expr, m) => {
        impl DecodeShape for $ty {
            const SHAPE_TYPE: ShapeType = $shape_type;

            fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
                let (bbox, parts, points) = read_multi_part_head(reader)?;
                let (m_range, m_array) = read_dimension(reader, points.len())?;
                Ok($ty {
                    bbox,
                    parts,
                    points,
                    m_range,
                    m_array,
                })
            }
        }
    };
    ($ty:ident, $shape_type:expr, zm) => {
        impl DecodeShape for $ty {
            const SHAPE_TYPE: ShapeType = $shape_type;

            fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
                let (bbox, parts, points) = read_multi_part_head(reader)?;
                let (z_range, z_array) = read_dimension(reader, points.len())?;
                let (m_range, m_array) = read_dimension(reader, points.len())?;
                Ok($ty {
                    bbox,
                    parts,
                    points,
                    z_range,
                    z_array,
                    m_range,
                    m_array,
                })
            }
        }
    };
}

decode_multi_part!(PolyLine, ShapeType::PolyLine);
decode_multi_part!(Polygon, ShapeType::Polygon);
decode_multi_part!(PolyLineM, ShapeType::PolyLineM, m);
decode_multi_part!(PolygonM, ShapeType::PolygonM, m);
decode_multi_part!(PolyLineZ, ShapeType::PolyLineZ, zm);
decode_multi_part!(PolygonZ, ShapeType::PolygonZ, zm);

impl DecodeShape for MultiPatch {
    const SHAPE_TYPE: ShapeType = ShapeType::MultiPatch;

    // Only the bounding box is decoded; the remaining fields stay empty.
    fn read_payload(reader: &mut PayloadReader<'_>) -> Result<Self, DecodeError> {
        Ok(MultiPatch::with_bbox(reader.read_box()?))
    }
}
