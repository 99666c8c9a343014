//! Shared test utilities for shptools integration tests.
//!
//! Holds path resolution, a source that fails every call, and helpers for
//! opening builder output, imported by each test crate via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use shptools::ShapefileReader;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::PathBuf;

// ===========================================================================
// Path resolution
// ===========================================================================

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

/// Write `bytes` under `test_output/` and return the path.
pub fn write_test_file(filename: &str, bytes: &[u8]) -> PathBuf {
    let path = test_output_path(filename);
    std::fs::write(&path, bytes).expect("write test shapefile");
    path
}

// ===========================================================================
// Sources
// ===========================================================================

/// Reader over an in-memory shapefile image.
pub fn reader_for(bytes: Vec<u8>) -> ShapefileReader<Cursor<Vec<u8>>> {
    ShapefileReader::from_reader(Cursor::new(bytes))
}

/// A source whose every read and seek fails, for asserting that a call
/// performs no I/O.
#[derive(Debug, Default)]
pub struct Unreadable {
    pub calls: usize,
}

impl Read for Unreadable {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        Err(io::Error::new(io::ErrorKind::Other, "read on unreadable source"))
    }
}

impl Seek for Unreadable {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        self.calls += 1;
        Err(io::Error::new(io::ErrorKind::Other, "seek on unreadable source"))
    }
}
