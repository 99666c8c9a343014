//! Main file header and record header.
//!
//! The 100-byte main header is mixed-endian: the first seven words (file
//! code, five reserved words, file length) are big-endian, everything from
//! the version at byte 28 onward is little-endian.
//!
//! ```text
//! Byte 0   File Code     9994         i32 BE
//! Byte 4   Unused (x5)   0            i32 BE
//! Byte 24  File Length   words        i32 BE
//! Byte 28  Version       1000         i32 LE
//! Byte 32  Shape Type                 i32 LE
//! Byte 36  Xmin Ymin Xmax Ymax        f64 LE
//! Byte 68  Zmin Zmax Mmin Mmax        f64 LE (0.0 unless Z/M type)
//! ```

use std::io::{Cursor, Read, Seek};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use super::constants::{
    FILE_CODE, HEADER_SIZE, RECORD_HEADER_SIZE, SHAPE_TYPE_SIZE, VERSION, WORD_SIZE,
};
use crate::error::FormatError;
use crate::types::{BoundingBoxZM, ShapeType};

/// The fixed 100-byte main file header.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    pub file_code: i32,
    /// Reserved words, 0 in well-formed files
    pub unused: [i32; 5],
    /// Total file length in 16-bit words, header included
    pub file_length: i32,
    pub version: i32,
    /// Raw shape type code of the file
    pub shape_type: i32,
    pub bbox: BoundingBoxZM,
}

impl FileHeader {
    /// Parse the raw header bytes without checking file code or version.
    pub fn parse(bytes: &[u8; HEADER_SIZE as usize]) -> Result<Self, FormatError> {
        let mut cursor = Cursor::new(&bytes[..]);

        let file_code = cursor.read_i32::<BigEndian>()?;
        let mut unused = [0i32; 5];
        for word in unused.iter_mut() {
            *word = cursor.read_i32::<BigEndian>()?;
        }
        let file_length = cursor.read_i32::<BigEndian>()?;

        let version = cursor.read_i32::<LittleEndian>()?;
        let shape_type = cursor.read_i32::<LittleEndian>()?;
        let mut extent = [0f64; 8];
        cursor.read_f64_into::<LittleEndian>(&mut extent)?;

        Ok(FileHeader {
            file_code,
            unused,
            file_length,
            version,
            shape_type,
            bbox: BoundingBoxZM::from_array(extent),
        })
    }

    /// Check the file code and version.
    pub fn check(&self) -> Result<(), FormatError> {
        if self.file_code != FILE_CODE {
            return Err(FormatError::BadMagic(self.file_code));
        }
        if self.version != VERSION {
            return Err(FormatError::UnsupportedVersion(self.version));
        }
        Ok(())
    }

    /// The file's shape type, `None` for an unknown code
    pub fn shape_type(&self) -> Option<ShapeType> {
        ShapeType::from_raw(self.shape_type)
    }

    /// Declared file length converted from words to bytes
    pub fn file_length_bytes(&self) -> u64 {
        u64::from(self.file_length.max(0) as u32) * WORD_SIZE
    }
}

/// Read and check the main header from the current position.
///
/// On success the stream is left at the end of the header, where the first
/// record header begins.
pub fn validate<R: Read + Seek>(reader: &mut R) -> Result<FileHeader, FormatError> {
    let start = reader.stream_position()?;
    let mut buf = [0u8; HEADER_SIZE as usize];
    reader
        .read_exact(&mut buf)
        .map_err(|e| FormatError::from_io(e, start))?;

    let header = FileHeader::parse(&buf)?;
    header.check()?;
    Ok(header)
}

/// The 8-byte big-endian header in front of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// 1-based record number as stored; informational only
    pub record_number: i32,
    /// Content length in 16-bit words, including the 4-byte shape type tag
    pub content_length: i32,
}

impl RecordHeader {
    pub fn parse(bytes: &[u8; RECORD_HEADER_SIZE as usize]) -> Self {
        RecordHeader {
            record_number: BigEndian::read_i32(&bytes[0..4]),
            content_length: BigEndian::read_i32(&bytes[4..8]),
        }
    }

    /// Byte length of the payload after the shape type tag.
    ///
    /// `None` when the content length is too small to hold the tag.
    pub fn payload_size(&self) -> Option<u64> {
        let content_bytes = i64::from(self.content_length) * WORD_SIZE as i64;
        let payload = content_bytes - SHAPE_TYPE_SIZE as i64;
        u64::try_from(payload).ok()
    }
}
