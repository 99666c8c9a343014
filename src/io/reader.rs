//! Shapefile reader orchestrator: the main entry point for reading `.shp` files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shptools::ShapefileReader;
//!
//! let mut reader = ShapefileReader::open("countries.shp")?;
//! for shape in reader.shapes()? {
//!     let shape = shape?;
//!     println!("{} with {} points", shape.shape_type(), shape.num_points());
//! }
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use indexmap::IndexMap;

use super::decoder;
use super::header::{self, FileHeader};
use super::index::{self, RecordDescriptor, RecordIndex};
#[cfg(any(unix, windows))]
use super::source::decode_all_parallel;
use crate::error::{DecodeError, FormatError, OpenError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::shapes::Shape;
use crate::types::ShapeType;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the shapefile reader.
#[derive(Debug, Clone)]
pub struct ShapefileReaderConfiguration {
    /// When `true`, [`ShapefileReader::read_all`] skips records that fail to
    /// decode and reports them as notifications instead of aborting.
    ///
    /// Default: `false` (strict mode).
    pub failsafe: bool,

    /// Warn when stored record numbers are not the sequence 1, 2, 3, ...
    pub check_record_numbers: bool,

    /// Warn when the header's file length disagrees with the real length.
    pub check_file_length: bool,

    /// Warn about non-null records whose type differs from the header's.
    pub check_shape_types: bool,
}

impl Default for ShapefileReaderConfiguration {
    fn default() -> Self {
        Self {
            failsafe: false,
            check_record_numbers: true,
            check_file_length: true,
            check_shape_types: true,
        }
    }
}

// ---------------------------------------------------------------------------
// ShapefileReader
// ---------------------------------------------------------------------------

/// Shapefile reader over any seekable byte stream.
///
/// The read pipeline is:
///
/// 1. [`validate`](Self::validate) the 100-byte main header.
/// 2. [`index`](Self::index) every record in one pass, without reading payloads.
/// 3. Decode the records the caller asks for, by position or all at once.
///
/// Dropping the reader (or calling [`into_inner`](Self::into_inner))
/// releases the source and the index. Decoded shapes are owned by the caller.
pub struct ShapefileReader<R: Read + Seek> {
    /// Underlying byte stream.
    reader: R,

    /// User configuration.
    config: ShapefileReaderConfiguration,

    /// Parsed main header, once validated.
    header: Option<FileHeader>,

    /// Record descriptors, once indexed.
    index: Option<RecordIndex>,

    /// Notifications collected during reading.
    notifications: NotificationCollection,
}

impl ShapefileReader<BufReader<File>> {
    /// Open a shapefile by path for random-access reading.
    pub fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, OpenError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => OpenError::NotFound(path.to_path_buf()),
            _ => OpenError::Io(e),
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Index the file and decode every record on the rayon thread pool,
    /// using positioned reads on the underlying file.
    ///
    /// Results are in record order; one failing record does not affect the others.
    #[cfg(any(unix, windows))]
    pub fn read_all_parallel(
        &mut self,
    ) -> std::result::Result<Vec<std::result::Result<Shape, DecodeError>>, FormatError> {
        self.index()?;
        let records = self.index.as_ref().map_or(&[][..], RecordIndex::as_slice);
        Ok(decode_all_parallel(self.reader.get_ref(), records))
    }
}

impl<R: Read + Seek> ShapefileReader<R> {
    /// Create a shapefile reader from any seekable byte stream.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            config: ShapefileReaderConfiguration::default(),
            header: None,
            index: None,
            notifications: NotificationCollection::new(),
        }
    }

    /// Set configuration options.
    pub fn with_config(mut self, config: ShapefileReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ShapefileReaderConfiguration {
        &self.config
    }

    /// Read and check the main header from the start of the stream.
    ///
    /// Discards any previous header, index and notifications.
    pub fn validate(&mut self) -> std::result::Result<&FileHeader, FormatError> {
        self.header = None;
        self.index = None;
        self.notifications.clear();
        self.reader.seek(SeekFrom::Start(0))?;
        let header = header::validate(&mut self.reader)?;
        Ok(self.header.insert(header))
    }

    /// The validated header, if [`validate`](Self::validate) has run.
    pub fn header(&self) -> Option<&FileHeader> {
        self.header.as_ref()
    }

    /// Build the record index, validating the header first if needed.
    ///
    /// The index is built once and cached.
    pub fn index(&mut self) -> std::result::Result<&RecordIndex, FormatError> {
        let index = match self.index.take() {
            Some(index) => index,
            None => {
                if self.header.is_none() {
                    self.validate()?;
                }
                let index = index::index_records(&mut self.reader)?;
                self.diagnose(&index);
                index
            }
        };
        Ok(self.index.insert(index))
    }

    /// Indexed records; empty until [`index`](Self::index) has run.
    pub fn records(&self) -> &[RecordDescriptor] {
        self.index.as_ref().map_or(&[][..], RecordIndex::as_slice)
    }

    pub fn num_records(&self) -> usize {
        self.records().len()
    }

    /// Bounds-checked record lookup; `None` past the end or before indexing.
    pub fn get_shape_record(&self, index: usize) -> Option<&RecordDescriptor> {
        self.records().get(index)
    }

    /// Decode one record through this reader's source.
    pub fn decode(&mut self, record: &RecordDescriptor) -> std::result::Result<Shape, DecodeError> {
        decoder::decode(&mut self.reader, record)
    }

    /// Decode the record at a 0-based position; `Ok(None)` when out of range.
    pub fn read_shape(&mut self, index: usize) -> std::result::Result<Option<Shape>, DecodeError> {
        match self.get_shape_record(index).copied() {
            Some(record) => self.decode(&record).map(Some),
            None => Ok(None),
        }
    }

    /// Iterate over the decoded shapes of every record, indexing first if needed.
    pub fn shapes(&mut self) -> std::result::Result<Shapes<'_, R>, FormatError> {
        self.index()?;
        let records = self.index.as_ref().map_or(&[][..], RecordIndex::as_slice);
        Ok(Shapes {
            reader: &mut self.reader,
            records: records.iter(),
        })
    }

    /// Decode every record.
    ///
    /// In strict mode the first failing record aborts the read. In failsafe
    /// mode failing records are skipped and reported as notifications.
    pub fn read_all(&mut self) -> Result<Vec<Shape>> {
        self.index()?;
        let records = self.index.as_ref().map_or(&[][..], RecordIndex::as_slice);
        let mut shapes = Vec::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            match decoder::decode(&mut self.reader, record) {
                Ok(shape) => shapes.push(shape),
                Err(err) if self.config.failsafe => {
                    self.notifications
                        .notify_record(i, NotificationType::Error, err.to_string());
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(shapes)
    }

    /// Number of records per raw type code, in order of first appearance.
    pub fn type_summary(&self) -> IndexMap<i32, usize> {
        let mut summary = IndexMap::new();
        for record in self.records() {
            *summary.entry(record.record_type).or_insert(0) += 1;
        }
        summary
    }

    /// Notifications collected so far.
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Mutable access to the stream; call [`validate`](Self::validate)
    /// again after changing its contents.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Release the index and header, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    fn diagnose(&mut self, index: &RecordIndex) {
        let file_type = self.header.as_ref().map(|h| h.shape_type);

        if self.config.check_file_length {
            if let Some(header) = &self.header {
                let declared = header.file_length_bytes();
                let actual = index.end_offset();
                if declared != actual {
                    self.notifications.notify(
                        NotificationType::Warning,
                        format!("header declares {declared} bytes, records end at {actual}"),
                    );
                }
            }
        }

        for (i, record) in index.iter().enumerate() {
            let expected_number = i as i64 + 1;
            if self.config.check_record_numbers && i64::from(record.record_number) != expected_number {
                self.notifications.notify_record(
                    i,
                    NotificationType::Warning,
                    format!(
                        "record number {}, expected {expected_number}",
                        record.record_number
                    ),
                );
            }

            match record.shape_type() {
                None => self.notifications.notify_record(
                    i,
                    NotificationType::NotSupported,
                    format!("unknown shape type {}", record.record_type),
                ),
                Some(ShapeType::MultiPatch) => self.notifications.notify_record(
                    i,
                    NotificationType::NotImplemented,
                    "MultiPatch: only the bounding box is decoded",
                ),
                _ => {}
            }

            if self.config.check_shape_types
                && record.record_type != ShapeType::Null.as_raw()
                && Some(record.record_type) != file_type
            {
                self.notifications.notify_record(
                    i,
                    NotificationType::Warning,
                    format!(
                        "shape type {} differs from file shape type {}",
                        record.record_type,
                        file_type.unwrap_or_default()
                    ),
                );
            }
        }
    }
}

/// Iterator over decoded shapes, returned by [`ShapefileReader::shapes`].
pub struct Shapes<'a, R: Read + Seek> {
    reader: &'a mut R,
    records: std::slice::Iter<'a, RecordDescriptor>,
}

impl<R: Read + Seek> Iterator for Shapes<'_, R> {
    type Item = std::result::Result<Shape, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(decoder::decode(self.reader, record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl<R: Read + Seek> ExactSizeIterator for Shapes<'_, R> {}
