//! # shptools
//!
//! A pure Rust library for reading geometry from ESRI Shapefile main files (`.shp`).
//!
//! The library validates the 100-byte file header, indexes every record in
//! one pass without reading payloads, and decodes records on demand into
//! strongly typed geometry values.
//!
//! ## Features
//!
//! - All fourteen shape types: Null, Point, PolyLine, Polygon, MultiPoint and
//!   their M and Z variants (MultiPatch decodes its bounding box only)
//! - Random access to any record by position after indexing
//! - Strict and failsafe reading, with non-fatal issues collected as notifications
//! - Parallel decoding over positioned reads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shptools::{Shape, ShapefileReader};
//!
//! let mut reader = ShapefileReader::open("roads.shp")?;
//! let header = reader.validate()?;
//! println!("file shape type: {}", header.shape_type);
//!
//! reader.index()?;
//! if let Some(Shape::PolyLine(line)) = reader.read_shape(0)? {
//!     for part in line.parts() {
//!         println!("part with {} points", part.len());
//!     }
//! }
//! # Ok::<(), shptools::ShapefileError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::header`] - main file header and record header parsing
//! - [`io::index`] - the record index built by a single pass over the file
//! - [`io::decoder`] - per-type payload decoders
//! - [`io::source`] - positioned reads and parallel decoding
//! - [`ShapefileReader`] - orchestrates the above over one byte source

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod notification;
pub mod shapes;
pub mod types;

// Re-export commonly used types
pub use error::{DecodeError, FormatError, OpenError, Result, ShapefileError};
pub use types::{BoundingBox2D, BoundingBoxZM, Dimensions, Point, ShapeType};

// Re-export shape types
pub use shapes::{
    MultiPatch, MultiPoint, MultiPointM, MultiPointZ, PatchType, PointM, PointZ, PolyLine,
    PolyLineM, PolyLineZ, Polygon, PolygonM, PolygonZ, Shape, ShapeRecord,
};

// Re-export I/O types
pub use io::{
    FileHeader, RecordDescriptor, RecordIndex, ShapefileReader, ShapefileReaderConfiguration,
};
pub use notification::{Notification, NotificationCollection, NotificationType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
