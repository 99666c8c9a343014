//! Magic numbers and fixed sizes of the `.shp` format.

/// Big-endian file code at byte 0 of every shapefile
pub const FILE_CODE: i32 = 9994;

/// Little-endian version at byte 28
pub const VERSION: i32 = 1000;

/// Size of the main file header in bytes
pub const HEADER_SIZE: u64 = 100;

/// Size of a record header (record number + content length) in bytes
pub const RECORD_HEADER_SIZE: u64 = 8;

/// Size of the shape type tag that starts every record's content
pub const SHAPE_TYPE_SIZE: u64 = 4;

/// Lengths in headers are counted in 16-bit words
pub const WORD_SIZE: u64 = 2;

/// Fixed field sizes used to compute payload layouts.
pub mod sizes {
    pub const INT: usize = 4;
    pub const DOUBLE: usize = 8;
    pub const POINT: usize = 2 * DOUBLE;
    pub const BOX: usize = 4 * DOUBLE;
    pub const RANGE: usize = 2 * DOUBLE;
}
