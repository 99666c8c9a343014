//! Error types for shptools

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::ShapeType;

/// Failure to open the byte source of a shapefile.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The path does not exist
    #[error("Shapefile not found: {0}")]
    NotFound(PathBuf),

    /// Any other I/O failure while opening
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Structural problems with the main file header or the record stream.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The big-endian file code at byte 0 is not 9994
    #[error("Bad file code: expected 9994, got {0}")]
    BadMagic(i32),

    /// The little-endian version at byte 28 is not 1000
    #[error("Unsupported shapefile version: {0}")]
    UnsupportedVersion(i32),

    /// The header or record stream ends in the middle of a structure
    #[error("Truncated file at offset {offset}")]
    TruncatedFile { offset: u64 },

    /// A record header whose content length cannot even hold the type tag
    #[error("Invalid content length {content_length} for record {record_number}")]
    InvalidContentLength {
        record_number: i32,
        content_length: i32,
    },

    /// IO error occurred while reading
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failures while decoding a single record payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The descriptor's record type does not match the decoder that was called
    #[error("Type mismatch: decoder expects {expected}, record holds type {found}")]
    TypeMismatch { expected: ShapeType, found: i32 },

    /// The payload ended before all declared fields could be read
    #[error("Truncated record payload at offset {offset}")]
    Truncated { offset: u64 },

    /// The record type code is not one this library decodes
    #[error("Unsupported shape type: {0}")]
    UnsupportedShapeType(i32),

    /// Declared counts or part indices are inconsistent
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// IO error occurred while reading
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main error type for shptools operations
#[derive(Debug, Error)]
pub enum ShapefileError {
    #[error(transparent)]
    Open(#[from] OpenError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// IO error occurred outside of a specific stage
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for shptools operations
pub type Result<T> = std::result::Result<T, ShapefileError>;

impl FormatError {
    /// Map an I/O error raised at `offset`, turning a short read into
    /// [`FormatError::TruncatedFile`].
    pub(crate) fn from_io(err: io::Error, offset: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::TruncatedFile { offset }
        } else {
            FormatError::Io(err)
        }
    }
}

impl DecodeError {
    /// Map an I/O error raised at `offset`, turning a short read into
    /// [`DecodeError::Truncated`].
    pub(crate) fn from_io(err: io::Error, offset: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::Truncated { offset }
        } else {
            DecodeError::Io(err)
        }
    }
}
