//! I/O module for reading ESRI shapefile (`.shp`) main files

pub mod constants;
pub mod decoder;
pub mod header;
pub mod index;
pub mod reader;
pub mod source;

pub use decoder::{
    decode, decode_multipatch, decode_multipoint, decode_multipoint_m, decode_multipoint_z,
    decode_null, decode_point, decode_point_m, decode_point_z, decode_polygon, decode_polygon_m,
    decode_polygon_z, decode_polyline, decode_polyline_m, decode_polyline_z,
};
pub use header::{validate, FileHeader, RecordHeader};
pub use index::{index_records, RecordDescriptor, RecordIndex};
pub use reader::{ShapefileReader, ShapefileReaderConfiguration, Shapes};
pub use source::{decode_all_parallel, decode_at, PositionedRead};
