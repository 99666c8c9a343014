//! Positioned-read sources for decoding records concurrently.
//!
//! The decoders in [`super::decoder`] drive a stateful `Read + Seek` cursor,
//! which cannot be shared between threads. A [`PositionedRead`] source reads
//! at an explicit offset through `&self`, so independent records can be
//! decoded in parallel once the index has been built.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Mutex;

use rayon::prelude::*;

use super::decoder::parse_shape;
use super::index::RecordDescriptor;
use crate::error::DecodeError;
use crate::shapes::Shape;

/// A byte source that can fill a buffer from an absolute offset.
pub trait PositionedRead {
    /// Fill `buf` from `offset`, failing with `UnexpectedEof` on a short read.
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()>;
}

impl PositionedRead for [u8] {
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let start = usize::try_from(offset).map_err(|_| eof())?;
        let end = start.checked_add(buf.len()).ok_or_else(eof)?;
        let bytes = self.get(start..end).ok_or_else(eof)?;
        buf.copy_from_slice(bytes);
        Ok(())
    }
}

impl PositionedRead for Vec<u8> {
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.as_slice().read_exact_at(offset, buf)
    }
}

#[cfg(unix)]
impl PositionedRead for File {
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        std::os::unix::fs::FileExt::read_exact_at(self, buf, offset)
    }
}

#[cfg(windows)]
impl PositionedRead for File {
    fn read_exact_at(&self, mut offset: u64, mut buf: &mut [u8]) -> io::Result<()> {
        use std::os::windows::fs::FileExt;
        while !buf.is_empty() {
            match self.seek_read(buf, offset) {
                Ok(0) => return Err(eof()),
                Ok(n) => {
                    buf = &mut std::mem::take(&mut buf)[n..];
                    offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Serializes access to a shared cursor: each call holds the lock for the
/// whole seek-then-read.
impl<R: Read + Seek> PositionedRead for Mutex<R> {
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let mut reader = self
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "source lock poisoned"))?;
        reader.seek(SeekFrom::Start(offset))?;
        reader.read_exact(buf)
    }
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "read past end of source")
}

/// Decode one record from a positioned source.
pub fn decode_at<S: PositionedRead + ?Sized>(
    source: &S,
    record: &RecordDescriptor,
) -> Result<Shape, DecodeError> {
    let shape_type = record
        .shape_type()
        .ok_or(DecodeError::UnsupportedShapeType(record.record_type))?;
    let size = usize::try_from(record.payload_size)
        .map_err(|_| DecodeError::Corrupt(format!("payload of {} bytes", record.payload_size)))?;
    let mut payload = vec![0u8; size];
    source
        .read_exact_at(record.payload_offset, &mut payload)
        .map_err(|e| DecodeError::from_io(e, record.payload_offset))?;
    parse_shape(shape_type, &payload, record.payload_offset)
}

/// Decode every record in parallel. Results are in the order of `records`.
pub fn decode_all_parallel<S: PositionedRead + Sync + ?Sized>(
    source: &S,
    records: &[RecordDescriptor],
) -> Vec<Result<Shape, DecodeError>> {
    records
        .par_iter()
        .map(|record| decode_at(source, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, ShapeType};
    use std::io::Cursor;

    fn point_source() -> (Vec<u8>, Vec<RecordDescriptor>) {
        let mut data = Vec::new();
        let mut records = Vec::new();
        for i in 0..8 {
            let offset = data.len() as u64;
            data.extend_from_slice(&(i as f64).to_le_bytes());
            data.extend_from_slice(&(i as f64 * 2.0).to_le_bytes());
            records.push(RecordDescriptor {
                record_number: i + 1,
                record_type: ShapeType::Point.as_raw(),
                payload_size: 16,
                payload_offset: offset,
            });
        }
        (data, records)
    }

    #[test]
    fn test_slice_read_bounds() {
        let data = [1u8, 2, 3, 4];
        let mut buf = [0u8; 2];
        data[..].read_exact_at(2, &mut buf).unwrap();
        assert_eq!(buf, [3, 4]);
        let err = data[..].read_exact_at(3, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_parallel_matches_order() {
        let (data, records) = point_source();
        let shapes = decode_all_parallel(&data, &records);
        assert_eq!(shapes.len(), 8);
        for (i, shape) in shapes.into_iter().enumerate() {
            assert_eq!(
                shape.unwrap(),
                Shape::Point(Point::new(i as f64, i as f64 * 2.0))
            );
        }
    }

    #[test]
    fn test_mutex_source() {
        let (data, records) = point_source();
        let source = Mutex::new(Cursor::new(data));
        let shapes = decode_all_parallel(&source, &records);
        assert!(shapes.iter().all(|s| s.is_ok()));
        assert_eq!(
            decode_at(&source, &records[3]).unwrap(),
            Shape::Point(Point::new(3.0, 6.0))
        );
    }

    #[test]
    fn test_decode_at_past_end() {
        let (data, mut records) = point_source();
        records[0].payload_offset = data.len() as u64 - 4;
        assert!(matches!(
            decode_at(&data, &records[0]),
            Err(DecodeError::Truncated { .. })
        ));
    }
}
