//! Per-type record decoders.
//!
//! Each `decode_*` function takes an open source and a [`RecordDescriptor`]
//! from the index. A call moves through these steps, and any failure ends it
//! without handing back a partially built value:
//!
//! 1. check the descriptor's type against the decoder (no I/O on mismatch);
//! 2. seek to `payload_offset` and read the `payload_size` bytes;
//! 3. read the fixed fields, then the variable arrays, from that buffer.
//!
//! [`decode`] dispatches on the record type and returns a [`Shape`].

mod payload_reader;
mod read_shapes;

pub use payload_reader::PayloadReader;
pub use read_shapes::DecodeShape;

use std::io::{Read, Seek, SeekFrom};

use crate::error::DecodeError;
use crate::io::index::RecordDescriptor;
use crate::shapes::{
    MultiPatch, MultiPoint, MultiPointM, MultiPointZ, PointM, PointZ, PolyLine, PolyLineM,
    PolyLineZ, Polygon, PolygonM, PolygonZ, Shape,
};
use crate::types::{Point, ShapeType};

/// Fail with [`DecodeError::TypeMismatch`] unless the record holds `expected`.
pub fn check_record_type(
    record: &RecordDescriptor,
    expected: ShapeType,
) -> Result<(), DecodeError> {
    if record.record_type != expected.as_raw() {
        return Err(DecodeError::TypeMismatch {
            expected,
            found: record.record_type,
        });
    }
    Ok(())
}

/// Read the raw payload bytes of a record.
pub fn read_payload<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<Vec<u8>, DecodeError> {
    let size = usize::try_from(record.payload_size)
        .map_err(|_| DecodeError::Corrupt(format!("payload of {} bytes", record.payload_size)))?;
    source.seek(SeekFrom::Start(record.payload_offset))?;
    let mut payload = vec![0u8; size];
    source
        .read_exact(&mut payload)
        .map_err(|e| DecodeError::from_io(e, record.payload_offset))?;
    Ok(payload)
}

/// Decode a payload buffer as `T`.
pub fn parse_payload<T: DecodeShape>(payload: &[u8], base_offset: u64) -> Result<T, DecodeError> {
    T::read_payload(&mut PayloadReader::new(payload, base_offset))
}

/// Decode a payload buffer as the given shape type.
pub fn parse_shape(
    shape_type: ShapeType,
    payload: &[u8],
    base_offset: u64,
) -> Result<Shape, DecodeError> {
    Ok(match shape_type {
        ShapeType::Null => Shape::Null,
        ShapeType::Point => Shape::Point(parse_payload(payload, base_offset)?),
        ShapeType::PolyLine => Shape::PolyLine(parse_payload(payload, base_offset)?),
        ShapeType::Polygon => Shape::Polygon(parse_payload(payload, base_offset)?),
        ShapeType::MultiPoint => Shape::MultiPoint(parse_payload(payload, base_offset)?),
        ShapeType::PointZ => Shape::PointZ(parse_payload(payload, base_offset)?),
        ShapeType::PolyLineZ => Shape::PolyLineZ(parse_payload(payload, base_offset)?),
        ShapeType::PolygonZ => Shape::PolygonZ(parse_payload(payload, base_offset)?),
        ShapeType::MultiPointZ => Shape::MultiPointZ(parse_payload(payload, base_offset)?),
        ShapeType::PointM => Shape::PointM(parse_payload(payload, base_offset)?),
        ShapeType::PolyLineM => Shape::PolyLineM(parse_payload(payload, base_offset)?),
        ShapeType::PolygonM => Shape::PolygonM(parse_payload(payload, base_offset)?),
        ShapeType::MultiPointM => Shape::MultiPointM(parse_payload(payload, base_offset)?),
        ShapeType::MultiPatch => Shape::MultiPatch(parse_payload(payload, base_offset)?),
    })
}

fn decode_as<T: DecodeShape, R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<T, DecodeError> {
    check_record_type(record, T::SHAPE_TYPE)?;
    let payload = read_payload(source, record)?;
    parse_payload(&payload, record.payload_offset)
}

/// Decode any record into the matching [`Shape`] variant.
///
/// Unknown type codes fail with [`DecodeError::UnsupportedShapeType`]
/// before any I/O.
pub fn decode<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<Shape, DecodeError> {
    let shape_type = record
        .shape_type()
        .ok_or(DecodeError::UnsupportedShapeType(record.record_type))?;
    if shape_type == ShapeType::Null {
        return Ok(Shape::Null);
    }
    let payload = read_payload(source, record)?;
    parse_shape(shape_type, &payload, record.payload_offset)
}

/// A null record has no payload; nothing is read.
pub fn decode_null<R: Read + Seek>(
    _source: &mut R,
    record: &RecordDescriptor,
) -> Result<Shape, DecodeError> {
    check_record_type(record, ShapeType::Null)?;
    Ok(Shape::Null)
}

pub fn decode_point<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<Point, DecodeError> {
    decode_as(source, record)
}

pub fn decode_multipoint<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<MultiPoint, DecodeError> {
    decode_as(source, record)
}

pub fn decode_polyline<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<PolyLine, DecodeError> {
    decode_as(source, record)
}

pub fn decode_polygon<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<Polygon, DecodeError> {
    decode_as(source, record)
}

pub fn decode_point_m<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<PointM, DecodeError> {
    decode_as(source, record)
}

pub fn decode_multipoint_m<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<MultiPointM, DecodeError> {
    decode_as(source, record)
}

pub fn decode_polyline_m<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<PolyLineM, DecodeError> {
    decode_as(source, record)
}

pub fn decode_polygon_m<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<PolygonM, DecodeError> {
    decode_as(source, record)
}

pub fn decode_point_z<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<PointZ, DecodeError> {
    decode_as(source, record)
}

pub fn decode_multipoint_z<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<MultiPointZ, DecodeError> {
    decode_as(source, record)
}

pub fn decode_polyline_z<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<PolyLineZ, DecodeError> {
    decode_as(source, record)
}

pub fn decode_polygon_z<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<PolygonZ, DecodeError> {
    decode_as(source, record)
}

/// Only the bounding box is decoded; see [`MultiPatch`].
pub fn decode_multipatch<R: Read + Seek>(
    source: &mut R,
    record: &RecordDescriptor,
) -> Result<MultiPatch, DecodeError> {
    decode_as(source, record)
}
