//! Record index.
//!
//! One linear pass over the record stream reads each 8-byte record header
//! and the 4-byte shape type tag, then seeks over the payload without
//! reading it. The result is an ordered list of [`RecordDescriptor`]s that
//! later drive the per-type decoders.
//!
//! Unknown shape type codes do not stop the pass: the record is indexed so
//! that the records after it stay reachable.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::constants::{HEADER_SIZE, RECORD_HEADER_SIZE, SHAPE_TYPE_SIZE};
use super::header::RecordHeader;
use crate::error::FormatError;
use crate::types::ShapeType;

/// Location and size of one record's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// Record number as stored in the record header
    pub record_number: i32,
    /// Raw shape type tag read after the record header
    pub record_type: i32,
    /// Payload length in bytes, excluding the type tag
    pub payload_size: u64,
    /// Absolute offset of the first byte after the type tag
    pub payload_offset: u64,
}

impl RecordDescriptor {
    /// The record's shape type, `None` for an unknown code
    pub fn shape_type(&self) -> Option<ShapeType> {
        ShapeType::from_raw(self.record_type)
    }

    /// Absolute offset of the record header
    pub fn record_offset(&self) -> u64 {
        self.payload_offset - RECORD_HEADER_SIZE - SHAPE_TYPE_SIZE
    }

    /// Offset one past the last payload byte
    pub fn end_offset(&self) -> u64 {
        self.payload_offset + self.payload_size
    }
}

/// Descriptors of every record, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordIndex {
    records: Vec<RecordDescriptor>,
}

impl RecordIndex {
    pub fn new(records: Vec<RecordDescriptor>) -> Self {
        RecordIndex { records }
    }

    /// Bounds-checked lookup by 0-based position.
    pub fn get_shape_record(&self, index: usize) -> Option<&RecordDescriptor> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordDescriptor> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[RecordDescriptor] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<RecordDescriptor> {
        self.records
    }

    /// Offset just past the last indexed record, or the header size when empty
    pub fn end_offset(&self) -> u64 {
        self.records
            .last()
            .map_or(HEADER_SIZE, RecordDescriptor::end_offset)
    }
}

impl<'a> IntoIterator for &'a RecordIndex {
    type Item = &'a RecordDescriptor;
    type IntoIter = std::slice::Iter<'a, RecordDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RecordIndex {
    type Item = RecordDescriptor;
    type IntoIter = std::vec::IntoIter<RecordDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Index every record from the end of the main header to the end of the stream.
///
/// Stops cleanly when the stream ends exactly on a record boundary. Any
/// other early end, in a record header, type tag or payload, is reported as
/// [`FormatError::TruncatedFile`].
pub fn index_records<R: Read + Seek>(reader: &mut R) -> Result<RecordIndex, FormatError> {
    let stream_end = reader.seek(SeekFrom::End(0))?;
    let mut position = reader.seek(SeekFrom::Start(HEADER_SIZE))?;
    let mut records = Vec::new();

    loop {
        let mut header_buf = [0u8; RECORD_HEADER_SIZE as usize];
        let filled = read_fully(reader, &mut header_buf)?;
        if filled == 0 {
            break;
        }
        if filled < header_buf.len() {
            return Err(FormatError::TruncatedFile {
                offset: position + filled as u64,
            });
        }

        let header = RecordHeader::parse(&header_buf);
        let payload_size = header
            .payload_size()
            .ok_or(FormatError::InvalidContentLength {
                record_number: header.record_number,
                content_length: header.content_length,
            })?;

        let record_type = reader
            .read_i32::<LittleEndian>()
            .map_err(|e| FormatError::from_io(e, position + RECORD_HEADER_SIZE))?;

        let payload_offset = position + RECORD_HEADER_SIZE + SHAPE_TYPE_SIZE;
        let next = payload_offset + payload_size;
        if next > stream_end {
            return Err(FormatError::TruncatedFile { offset: stream_end });
        }
        position = reader.seek(SeekFrom::Start(next))?;

        records.push(RecordDescriptor {
            record_number: header.record_number,
            record_type,
            payload_size,
            payload_offset,
        });
    }

    Ok(RecordIndex::new(records))
}

/// Read until `buf` is full or the stream ends, returning the bytes read.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
