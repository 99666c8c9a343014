//! Header validation, indexing and reader orchestration tests.

mod common;

use common::builders::*;
use common::{reader_for, write_test_file};
use shptools::io::{index_records, validate};
use shptools::{
    FormatError, NotificationType, OpenError, Point, Shape, ShapeType, ShapefileError,
    ShapefileReader, ShapefileReaderConfiguration,
};
use std::io::Cursor;

fn mixed_file() -> ShapefileBuilder {
    let ring = square(0.0, 0.0, 10.0);
    ShapefileBuilder::new(ShapeType::Polygon)
        .bbox([0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 0.0, 0.0])
        .record(5, encode_multi_part(&[0], &ring, None, None))
        .null()
        .record(5, encode_multi_part(&[0], &square(2.0, 2.0, 1.0), None, None))
}

// ===========================================================================
// Header
// ===========================================================================

#[test]
fn test_validate_header_fields() {
    let bytes = mixed_file().build();
    let header = validate(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(header.file_code, 9994);
    assert_eq!(header.version, 1000);
    assert_eq!(header.shape_type(), Some(ShapeType::Polygon));
    assert_eq!(header.file_length_bytes(), bytes.len() as u64);
    assert_eq!(header.bbox.x_max, 10.0);
}

#[test]
fn test_validate_rejects_bad_magic_and_version() {
    let bytes = ShapefileBuilder::new(ShapeType::Point).file_code(1234).build();
    assert!(matches!(
        validate(&mut Cursor::new(bytes)),
        Err(FormatError::BadMagic(1234))
    ));

    let bytes = ShapefileBuilder::new(ShapeType::Point).version(999).build();
    assert!(matches!(
        validate(&mut Cursor::new(bytes)),
        Err(FormatError::UnsupportedVersion(999))
    ));
}

#[test]
fn test_validate_rejects_every_single_bit_flip() {
    let good = ShapefileBuilder::new(ShapeType::Point).build();
    // file code: bytes 0..4, version: bytes 28..32
    for byte in (0..4).chain(28..32) {
        for bit in 0..8 {
            let mut bytes = good.clone();
            bytes[byte] ^= 1 << bit;
            let result = validate(&mut Cursor::new(bytes));
            assert!(
                matches!(
                    result,
                    Err(FormatError::BadMagic(_)) | Err(FormatError::UnsupportedVersion(_))
                ),
                "flip of byte {byte} bit {bit} was accepted"
            );
        }
    }
}

#[test]
fn test_validate_short_header() {
    let mut bytes = ShapefileBuilder::new(ShapeType::Point).build();
    bytes.truncate(60);
    assert!(matches!(
        validate(&mut Cursor::new(bytes)),
        Err(FormatError::TruncatedFile { .. })
    ));
}

// ===========================================================================
// Index
// ===========================================================================

#[test]
fn test_index_offsets_and_sizes() {
    let builder = mixed_file();
    let bytes = builder.build();
    let index = index_records(&mut Cursor::new(&bytes)).unwrap();

    assert_eq!(index.len(), 3);
    for (i, record) in index.iter().enumerate() {
        assert_eq!(record.record_number, i as i32 + 1);
        assert_eq!(record.payload_offset, builder.payload_offset(i));
    }
    assert_eq!(index.as_slice()[1].record_type, 0);
    assert_eq!(index.as_slice()[1].payload_size, 0);

    let total: u64 = index.iter().map(|r| r.payload_size + 12).sum();
    assert_eq!(100 + total, bytes.len() as u64);
}

#[test]
fn test_index_header_only_file() {
    let bytes = ShapefileBuilder::new(ShapeType::Point).build();
    let index = index_records(&mut Cursor::new(bytes)).unwrap();
    assert!(index.is_empty());
}

#[test]
fn test_index_truncated_last_record() {
    let mut bytes = mixed_file().build();
    bytes.truncate(bytes.len() - 3);
    assert!(matches!(
        index_records(&mut Cursor::new(bytes)),
        Err(FormatError::TruncatedFile { .. })
    ));
}

#[test]
fn test_index_partial_record_header() {
    let mut bytes = ShapefileBuilder::new(ShapeType::Point).point(1.0, 1.0).build();
    bytes.extend_from_slice(&[0, 0, 0, 2, 0]);
    assert!(matches!(
        index_records(&mut Cursor::new(bytes)),
        Err(FormatError::TruncatedFile { offset: 133 })
    ));
}

#[test]
fn test_index_invalid_content_length() {
    let mut bytes = ShapefileBuilder::new(ShapeType::Point).point(1.0, 1.0).build();
    // content length of record 1 lives at bytes 104..108
    bytes[104..108].copy_from_slice(&1i32.to_be_bytes());
    assert!(matches!(
        index_records(&mut Cursor::new(bytes)),
        Err(FormatError::InvalidContentLength {
            record_number: 1,
            content_length: 1
        })
    ));
}

#[test]
fn test_index_keeps_unknown_types() {
    let bytes = ShapefileBuilder::new(ShapeType::Point)
        .point(0.0, 0.0)
        .record(99, vec![1, 2, 3, 4])
        .point(1.0, 1.0)
        .build();
    let index = index_records(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.as_slice()[1].record_type, 99);
    assert_eq!(index.as_slice()[1].payload_size, 4);
}

// ===========================================================================
// Reader
// ===========================================================================

#[test]
fn test_get_shape_record_bounds() {
    let mut reader = reader_for(mixed_file().build());
    reader.index().unwrap();
    let n = reader.num_records();
    assert_eq!(n, 3);
    assert!(reader.get_shape_record(0).is_some());
    assert!(reader.get_shape_record(n - 1).is_some());
    assert!(reader.get_shape_record(n).is_none());
    assert!(reader.get_shape_record(n + 1000).is_none());
}

#[test]
fn test_read_all_mixed() {
    let mut reader = reader_for(mixed_file().build());
    let shapes = reader.read_all().unwrap();
    assert_eq!(shapes.len(), 3);
    assert!(matches!(shapes[0], Shape::Polygon(_)));
    assert!(shapes[1].is_null());
    assert_eq!(shapes[2].num_points(), 5);
    assert!(reader.notifications().is_empty());
}

#[test]
fn test_shapes_iterator_matches_read_shape() {
    let mut reader = reader_for(mixed_file().build());
    let from_iter: Vec<Shape> = reader
        .shapes()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    for (i, shape) in from_iter.iter().enumerate() {
        assert_eq!(reader.read_shape(i).unwrap().as_ref(), Some(shape));
    }
}

#[test]
fn test_strict_read_stops_on_corrupt_record() {
    let bytes = ShapefileBuilder::new(ShapeType::Polygon)
        .record(5, encode_multi_part(&[0, 50], &square(0.0, 0.0, 1.0), None, None))
        .build();
    let mut reader = reader_for(bytes);
    assert!(matches!(
        reader.read_all(),
        Err(ShapefileError::Decode(_))
    ));
}

#[test]
fn test_failsafe_skips_bad_records() {
    let bytes = ShapefileBuilder::new(ShapeType::Point)
        .point(0.0, 0.0)
        .record(1, vec![0u8; 8])
        .record(77, Vec::new())
        .point(2.0, 2.0)
        .build();
    let config = ShapefileReaderConfiguration {
        failsafe: true,
        ..Default::default()
    };
    let mut reader = reader_for(bytes).with_config(config);
    let shapes = reader.read_all().unwrap();

    assert_eq!(
        shapes,
        vec![
            Shape::Point(Point::new(0.0, 0.0)),
            Shape::Point(Point::new(2.0, 2.0))
        ]
    );
    let errors = reader.notifications().of_type(NotificationType::Error);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].record, Some(1));
    assert_eq!(errors[1].record, Some(2));
    assert_eq!(
        reader.notifications().of_type(NotificationType::NotSupported)[0].record,
        Some(2)
    );
}

#[test]
fn test_multipatch_notification() {
    let points = square(0.0, 0.0, 1.0);
    let bytes = ShapefileBuilder::new(ShapeType::MultiPatch)
        .record(31, encode_multipatch(&[0], &[5], &points, &[0.0; 5], &[0.0; 5]))
        .build();
    let mut reader = reader_for(bytes);
    let shapes = reader.read_all().unwrap();
    assert!(matches!(shapes[0], Shape::MultiPatch(_)));
    assert!(reader.notifications().has_type(NotificationType::NotImplemented));
}

#[test]
fn test_checks_can_be_disabled() {
    let bytes = ShapefileBuilder::new(ShapeType::Point)
        .numbered_record(7, 1, encode_point(0.0, 0.0))
        .record(8, encode_multipoint(&[Point::new(1.0, 1.0)], None, None))
        .file_length_words(9999)
        .build();

    let mut strict = reader_for(bytes.clone());
    strict.index().unwrap();
    assert_eq!(
        strict.notifications().of_type(NotificationType::Warning).len(),
        3
    );

    let config = ShapefileReaderConfiguration {
        check_record_numbers: false,
        check_file_length: false,
        check_shape_types: false,
        ..Default::default()
    };
    let mut quiet = reader_for(bytes).with_config(config);
    quiet.index().unwrap();
    assert!(quiet.notifications().is_empty());
}

#[test]
fn test_type_summary() {
    let mut reader = reader_for(mixed_file().build());
    reader.index().unwrap();
    let summary = reader.type_summary();
    assert_eq!(summary.get(&5), Some(&2));
    assert_eq!(summary.get(&0), Some(&1));
    assert_eq!(summary.keys().copied().collect::<Vec<_>>(), vec![5, 0]);
}

#[test]
fn test_validate_resets_index() {
    let mut reader = reader_for(mixed_file().build());
    reader.index().unwrap();
    assert_eq!(reader.num_records(), 3);
    reader.validate().unwrap();
    assert_eq!(reader.num_records(), 0);
    reader.index().unwrap();
    assert_eq!(reader.num_records(), 3);
}

#[test]
fn test_into_inner_returns_source() {
    let bytes = mixed_file().build();
    let len = bytes.len();
    let mut reader = reader_for(bytes);
    reader.index().unwrap();
    assert_eq!(reader.into_inner().into_inner().len(), len);
}

// ===========================================================================
// Files
// ===========================================================================

#[test]
fn test_open_missing_file() {
    let path = common::test_output_path("does_not_exist.shp");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(
        ShapefileReader::open(&path),
        Err(OpenError::NotFound(p)) if p == path
    ));
}

#[test]
fn test_open_and_read_file() {
    let path = write_test_file("reader_open.shp", &mixed_file().build());
    let mut reader = ShapefileReader::open(&path).unwrap();
    assert_eq!(reader.read_all().unwrap().len(), 3);
}

#[cfg(any(unix, windows))]
#[test]
fn test_parallel_matches_sequential() {
    let mut builder = ShapefileBuilder::new(ShapeType::PolyLine);
    for i in 0..64 {
        let offset = i as f64;
        builder = builder.record(
            3,
            encode_multi_part(&[0], &square(offset, -offset, 1.5), None, None),
        );
    }
    let path = write_test_file("reader_parallel.shp", &builder.build());

    let mut reader = ShapefileReader::open(&path).unwrap();
    let sequential = reader.read_all().unwrap();
    let parallel: Vec<Shape> = reader
        .read_all_parallel()
        .unwrap()
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(sequential, parallel);
}
