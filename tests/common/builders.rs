//! Test shapefile builders.
//!
//! `ShapefileBuilder` assembles a complete `.shp` image in memory: the
//! mixed-endian main header followed by big-endian record headers and
//! little-endian payloads. The `encode_*` functions produce payloads (without
//! the type tag) so tests can also corrupt them before adding.

#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use shptools::{Point, ShapeType};

/// Builder for an in-memory shapefile.
#[derive(Debug, Clone)]
pub struct ShapefileBuilder {
    shape_type: i32,
    bbox: [f64; 8],
    records: Vec<(i32, i32, Vec<u8>)>,
    file_length: Option<i32>,
    version: i32,
    file_code: i32,
}

impl ShapefileBuilder {
    pub fn new(shape_type: ShapeType) -> Self {
        Self::with_raw_type(shape_type.as_raw())
    }

    pub fn with_raw_type(shape_type: i32) -> Self {
        Self {
            shape_type,
            bbox: [0.0; 8],
            records: Vec::new(),
            file_length: None,
            version: 1000,
            file_code: 9994,
        }
    }

    pub fn bbox(mut self, bbox: [f64; 8]) -> Self {
        self.bbox = bbox;
        self
    }

    pub fn file_code(mut self, code: i32) -> Self {
        self.file_code = code;
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Override the header's file length (in 16-bit words).
    pub fn file_length_words(mut self, words: i32) -> Self {
        self.file_length = Some(words);
        self
    }

    /// Add a record with the next sequential record number.
    pub fn record(mut self, shape_type: i32, payload: Vec<u8>) -> Self {
        let number = self.records.len() as i32 + 1;
        self.records.push((number, shape_type, payload));
        self
    }

    /// Add a record with an explicit record number.
    pub fn numbered_record(mut self, number: i32, shape_type: i32, payload: Vec<u8>) -> Self {
        self.records.push((number, shape_type, payload));
        self
    }

    pub fn null(self) -> Self {
        self.record(ShapeType::Null.as_raw(), Vec::new())
    }

    pub fn point(self, x: f64, y: f64) -> Self {
        self.record(ShapeType::Point.as_raw(), encode_point(x, y))
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Byte offset of the first payload byte of record `i`.
    pub fn payload_offset(&self, i: usize) -> u64 {
        let before: usize = self.records[..i]
            .iter()
            .map(|(_, _, payload)| 12 + payload.len())
            .sum();
        (100 + before + 12) as u64
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for (number, shape_type, payload) in &self.records {
            body.write_i32::<BigEndian>(*number).unwrap();
            body.write_i32::<BigEndian>(((payload.len() + 4) / 2) as i32)
                .unwrap();
            body.write_i32::<LittleEndian>(*shape_type).unwrap();
            body.extend_from_slice(payload);
        }

        let total_words = ((100 + body.len()) / 2) as i32;
        let mut out = Vec::with_capacity(100 + body.len());
        out.write_i32::<BigEndian>(self.file_code).unwrap();
        for _ in 0..5 {
            out.write_i32::<BigEndian>(0).unwrap();
        }
        out.write_i32::<BigEndian>(self.file_length.unwrap_or(total_words))
            .unwrap();
        out.write_i32::<LittleEndian>(self.version).unwrap();
        out.write_i32::<LittleEndian>(self.shape_type).unwrap();
        for value in self.bbox {
            out.write_f64::<LittleEndian>(value).unwrap();
        }
        out.extend(body);
        out
    }
}

// ===========================================================================
// Payload encoders
// ===========================================================================

pub fn encode_point(x: f64, y: f64) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_f64::<LittleEndian>(x).unwrap();
    out.write_f64::<LittleEndian>(y).unwrap();
    out
}

pub fn encode_point_m(x: f64, y: f64, m: f64) -> Vec<u8> {
    let mut out = encode_point(x, y);
    out.write_f64::<LittleEndian>(m).unwrap();
    out
}

pub fn encode_point_z(x: f64, y: f64, z: f64, m: f64) -> Vec<u8> {
    let mut out = encode_point(x, y);
    out.write_f64::<LittleEndian>(z).unwrap();
    out.write_f64::<LittleEndian>(m).unwrap();
    out
}

/// MultiPoint payload, with optional Z and M blocks.
pub fn encode_multipoint(points: &[Point], z: Option<&[f64]>, m: Option<&[f64]>) -> Vec<u8> {
    let mut out = Vec::new();
    write_box(&mut out, points);
    out.write_i32::<LittleEndian>(points.len() as i32).unwrap();
    write_points(&mut out, points);
    write_dimensions(&mut out, z, m);
    out
}

/// PolyLine or Polygon payload, with optional Z and M blocks.
pub fn encode_multi_part(
    parts: &[i32],
    points: &[Point],
    z: Option<&[f64]>,
    m: Option<&[f64]>,
) -> Vec<u8> {
    let mut out = Vec::new();
    write_box(&mut out, points);
    out.write_i32::<LittleEndian>(parts.len() as i32).unwrap();
    out.write_i32::<LittleEndian>(points.len() as i32).unwrap();
    for part in parts {
        out.write_i32::<LittleEndian>(*part).unwrap();
    }
    write_points(&mut out, points);
    write_dimensions(&mut out, z, m);
    out
}

/// MultiPatch payload.
pub fn encode_multipatch(
    parts: &[i32],
    part_types: &[i32],
    points: &[Point],
    z: &[f64],
    m: &[f64],
) -> Vec<u8> {
    let mut out = Vec::new();
    write_box(&mut out, points);
    out.write_i32::<LittleEndian>(parts.len() as i32).unwrap();
    out.write_i32::<LittleEndian>(points.len() as i32).unwrap();
    for part in parts {
        out.write_i32::<LittleEndian>(*part).unwrap();
    }
    for part_type in part_types {
        out.write_i32::<LittleEndian>(*part_type).unwrap();
    }
    write_points(&mut out, points);
    write_dimensions(&mut out, Some(z), Some(m));
    out
}

/// Square ring with its lower-left corner at (x, y).
pub fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x, y + size),
        Point::new(x + size, y + size),
        Point::new(x + size, y),
        Point::new(x, y),
    ]
}

/// `[min, max]` of a value array, `[0, 0]` when empty.
pub fn range_of(values: &[f64]) -> [f64; 2] {
    if values.is_empty() {
        return [0.0, 0.0];
    }
    values.iter().fold([f64::INFINITY, f64::NEG_INFINITY], |[lo, hi], v| {
        [lo.min(*v), hi.max(*v)]
    })
}

fn write_box(out: &mut Vec<u8>, points: &[Point]) {
    let bbox = shptools::BoundingBox2D::from_points(points).unwrap_or_default();
    for value in bbox.to_array() {
        out.write_f64::<LittleEndian>(value).unwrap();
    }
}

fn write_points(out: &mut Vec<u8>, points: &[Point]) {
    for point in points {
        out.write_f64::<LittleEndian>(point.x).unwrap();
        out.write_f64::<LittleEndian>(point.y).unwrap();
    }
}

fn write_values(out: &mut Vec<u8>, values: &[f64]) {
    for value in range_of(values) {
        out.write_f64::<LittleEndian>(value).unwrap();
    }
    for value in values {
        out.write_f64::<LittleEndian>(*value).unwrap();
    }
}

fn write_dimensions(out: &mut Vec<u8>, z: Option<&[f64]>, m: Option<&[f64]>) {
    if let Some(z) = z {
        write_values(out, z);
    }
    if let Some(m) = m {
        write_values(out, m);
    }
}
