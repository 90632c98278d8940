//! # Atari Load-File Decoding Tests
//!
//! Segment walking, marker handling, run-vector resolution, structural
//! rejection, and the configurable projection. Fixtures are assembled with
//! `XexBuilder`.

use pretty_assertions::assert_eq;
use rstest::rstest;

use retroload_core::common::error::DecodeError;
use retroload_core::config::{LoadConfig, RunVectorDisposition};
use retroload_core::formats::atari::{AtariExecutable, Segment};

use crate::common::builder::XexBuilder;

#[test]
fn decodes_single_segment() {
    // start=0x0802, end=0x0805, four payload bytes.
    let buffer = vec![0x02, 0x08, 0x05, 0x08, 0x11, 0x22, 0x33, 0x44];
    let executable = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(
        executable.segments(),
        &[Segment {
            start_address: 0x0802,
            data: vec![0x11, 0x22, 0x33, 0x44]
        }]
    );
    assert_eq!(executable.run_address(), None);
}

#[test]
fn segment_length_is_end_minus_start_plus_one() {
    let buffer = XexBuilder::new().segment(0x3000, &[0x60]).build();
    let executable = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(executable.segments()[0].data.len(), 1);
    assert_eq!(executable.segments()[0].end_address(), 0x3000);
}

#[test]
fn consumes_leading_marker() {
    let buffer = XexBuilder::new()
        .marker()
        .segment(0x0802, &[0x11, 0x22])
        .build();
    let executable = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(executable.segments().len(), 1);
    assert_eq!(executable.segments()[0].start_address, 0x0802);
}

#[test]
fn consumes_markers_between_segments() {
    let buffer = XexBuilder::new()
        .marker()
        .segment(0x0802, &[0x11])
        .marker()
        .marker()
        .segment(0x4000, &[0x22, 0x33])
        .build();
    let executable = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(executable.segments().len(), 2);
    assert_eq!(executable.segments()[1].start_address, 0x4000);
}

#[test]
fn resolves_run_vector() {
    let buffer = XexBuilder::new()
        .marker()
        .segment(0x0823, &[0xA9, 0x00, 0x60])
        .run_vector(0x0823)
        .build();
    let executable = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(executable.run_address(), Some(0x0823));
    // The run-vector segment is retained in the decoded container.
    assert_eq!(executable.segments().len(), 2);
    assert!(executable.segments()[1].is_run_vector());
}

#[test]
fn last_run_vector_wins() {
    let buffer = XexBuilder::new()
        .run_vector(0x1000)
        .segment(0x2000, &[0xEA])
        .run_vector(0x3000)
        .build();
    let executable = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(executable.run_address(), Some(0x3000));
}

#[test]
fn run_vector_requires_two_payload_bytes() {
    let buffer = XexBuilder::new().segment(0x02E0, &[0x42]).build();
    let executable = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(executable.run_address(), None);
    assert!(!executable.segments()[0].is_run_vector());
}

#[test]
fn rejects_inverted_address_range() {
    let buffer = XexBuilder::new()
        .raw(&[0x05, 0x08, 0x02, 0x08, 0x11, 0x22, 0x33, 0x44])
        .build();
    assert_eq!(
        AtariExecutable::decode(&buffer),
        Err(DecodeError::InvalidSegmentBounds {
            start: 0x0805,
            end: 0x0802,
            offset: 0
        })
    );
}

#[test]
fn rejects_payload_cut_short() {
    // Declares 0x0802..=0x080B (ten bytes) but carries only two.
    let buffer = XexBuilder::new()
        .raw(&[0x02, 0x08, 0x0B, 0x08, 0x11, 0x22])
        .build();
    assert_eq!(
        AtariExecutable::decode(&buffer),
        Err(DecodeError::InvalidSegmentBounds {
            start: 0x0802,
            end: 0x080B,
            offset: 0
        })
    );
}

#[rstest]
#[case(&[0x02])]
#[case(&[0x02, 0x08])]
#[case(&[0x02, 0x08, 0x05])]
fn rejects_file_too_short_for_any_header(#[case] bytes: &[u8]) {
    assert_eq!(
        AtariExecutable::decode(bytes),
        Err(DecodeError::TruncatedHeader {
            offset: 0,
            remaining: bytes.len()
        })
    );
}

#[test]
fn rejects_trailing_bytes_after_last_segment() {
    let buffer = XexBuilder::new()
        .segment(0x0802, &[0x11, 0x22])
        .raw(&[0x60, 0x60])
        .build();
    assert_eq!(
        AtariExecutable::decode(&buffer),
        Err(DecodeError::TrailingBytes {
            offset: 6,
            remaining: 2
        })
    );
}

#[test]
fn rejects_marker_with_no_following_header() {
    let buffer = XexBuilder::new().segment(0x0802, &[0x11]).marker().build();
    assert_eq!(
        AtariExecutable::decode(&buffer),
        Err(DecodeError::TruncatedHeader {
            offset: 7,
            remaining: 0
        })
    );
}

#[test]
fn rejects_marker_only_file() {
    let buffer = XexBuilder::new().marker().build();
    assert_eq!(
        AtariExecutable::decode(&buffer),
        Err(DecodeError::TruncatedHeader {
            offset: 2,
            remaining: 0
        })
    );
}

#[test]
fn decodes_empty_file_to_empty_executable() {
    let executable = AtariExecutable::decode(&[]).unwrap();
    assert!(executable.segments().is_empty());
    assert_eq!(executable.run_address(), None);
}

#[test]
fn decoding_is_idempotent() {
    let buffer = XexBuilder::new()
        .marker()
        .segment(0x0802, &[0x11, 0x22, 0x33])
        .run_vector(0x0802)
        .build();
    let first = AtariExecutable::decode(&buffer).unwrap();
    let second = AtariExecutable::decode(&buffer).unwrap();
    assert_eq!(first, second);
}

#[test]
fn projection_omits_run_vector_by_default() {
    let buffer = XexBuilder::new()
        .segment(0x0823, &[0xA9, 0x01])
        .run_vector(0x0823)
        .build();
    let image = AtariExecutable::decode(&buffer)
        .unwrap()
        .to_load_image(&LoadConfig::default());
    assert_eq!(image.entry_address, 0x0823);
    assert_eq!(image.segments.len(), 1);
    assert_eq!(image.segments[0].dest_address, 0x0823);
}

#[test]
fn projection_retains_run_vector_when_configured() {
    let buffer = XexBuilder::new()
        .segment(0x0823, &[0xA9, 0x01])
        .run_vector(0x0823)
        .build();
    let config = LoadConfig {
        run_vector: RunVectorDisposition::Retain,
        ..LoadConfig::default()
    };
    let image = AtariExecutable::decode(&buffer)
        .unwrap()
        .to_load_image(&config);
    assert_eq!(image.entry_address, 0x0823);
    assert_eq!(image.segments.len(), 2);
    assert_eq!(image.segments[1].dest_address, 0x02E0);
    assert_eq!(image.segments[1].data, vec![0x23, 0x08]);
}

#[test]
fn projection_falls_back_to_first_segment_start() {
    let buffer = XexBuilder::new()
        .segment(0x4000, &[0xEA])
        .segment(0x5000, &[0xEA])
        .build();
    let image = AtariExecutable::decode(&buffer)
        .unwrap()
        .to_load_image(&LoadConfig::default());
    assert_eq!(image.entry_address, 0x4000);
    assert_eq!(image.segments.len(), 2);
}
