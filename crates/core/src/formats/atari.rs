//! Atari DOS load file (XEX) decoding.
//!
//! A load file is an ordered sequence of segments, little-endian throughout.
//! Each segment names an inclusive address range and carries
//! `end - start + 1` payload bytes immediately after the two address words:
//!
//! | Field         | Length               |
//! |---------------|----------------------|
//! | Start address | 2 bytes (LE)         |
//! | End address   | 2 bytes (LE)         |
//! | Payload       | `end - start + 1`    |
//!
//! The marker word `$FFFF` opens the file and may be repeated before any
//! later segment header; marker words are consumed and carry no data. A
//! segment starting at the OS run vector (`$02E0`) stores the execution
//! entry point in its first two payload bytes; when several are present the
//! last one observed wins.
//!
//! The whole buffer is walked eagerly at construction and must be consumed
//! exactly; any structural violation aborts the decode with no partial
//! result.

use tracing::{debug, trace};

use crate::common::constants::RUN_VECTOR_ADDRESS;
use crate::common::cursor::{ByteCursor, Endian};
use crate::common::error::DecodeError;
use crate::config::{LoadConfig, RunVectorDisposition};
use crate::image::{LoadImage, LoadSegment};

/// The marker word separating (and opening) segment sequences.
pub const SEGMENT_MARKER: u16 = 0xFFFF;

/// Byte span of one segment header (start and end address words).
const SEGMENT_HEADER_LEN: usize = 4;

/// One address-delimited load segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// First address the payload loads to.
    pub start_address: u16,
    /// Payload bytes.
    pub data: Vec<u8>,
}

impl Segment {
    /// Returns the inclusive end address, as declared in the file.
    ///
    /// The walk only admits segments whose payload fits the declared range,
    /// so `start + len - 1` always fits in 16 bits.
    pub fn end_address(&self) -> u16 {
        (u32::from(self.start_address) + self.data.len() as u32 - 1) as u16
    }

    /// Returns `true` if this segment sets the run vector.
    pub fn is_run_vector(&self) -> bool {
        self.start_address == RUN_VECTOR_ADDRESS && self.data.len() >= 2
    }
}

/// A fully decoded Atari load file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtariExecutable {
    run_address: Option<u16>,
    segments: Vec<Segment>,
}

impl AtariExecutable {
    /// Decodes and validates a load-file buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] for any structural violation: a buffer (or
    /// a `$FFFF` marker) not followed by a complete segment header, an
    /// inverted address range, a payload cut short by the end of the buffer,
    /// or trailing bytes after the last segment.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let cursor = ByteCursor::new(bytes);
        let mut offset = 0;
        let mut run_address = None;
        let mut segments: Vec<Segment> = Vec::new();

        loop {
            let mut after_marker = false;
            while cursor.len() - offset >= 2
                && cursor.read_u16(offset, Endian::Little)? == SEGMENT_MARKER
            {
                trace!(offset, "marker word");
                offset += 2;
                after_marker = true;
            }

            let remaining = cursor.len() - offset;
            if remaining == 0 {
                if after_marker {
                    // A marker promises a segment that is not there.
                    return Err(DecodeError::TruncatedHeader { offset, remaining });
                }
                break;
            }
            if remaining < SEGMENT_HEADER_LEN {
                if after_marker || segments.is_empty() {
                    return Err(DecodeError::TruncatedHeader { offset, remaining });
                }
                return Err(DecodeError::TrailingBytes { offset, remaining });
            }

            let start = cursor.read_u16(offset, Endian::Little)?;
            let end = cursor.read_u16(offset + 2, Endian::Little)?;
            if end < start {
                return Err(DecodeError::InvalidSegmentBounds { start, end, offset });
            }
            let len = usize::from(end - start) + 1;
            if remaining - SEGMENT_HEADER_LEN < len {
                return Err(DecodeError::InvalidSegmentBounds { start, end, offset });
            }

            let data = cursor.slice(offset + SEGMENT_HEADER_LEN, len)?.to_vec();
            trace!(start, end, len, "segment");
            offset += SEGMENT_HEADER_LEN + len;

            if start == RUN_VECTOR_ADDRESS && data.len() >= 2 {
                let run = ByteCursor::new(&data).read_u16(0, Endian::Little)?;
                debug!(run, "run vector");
                run_address = Some(run);
            }
            segments.push(Segment {
                start_address: start,
                data,
            });
        }

        debug!(segments = segments.len(), ?run_address, "load file decoded");
        Ok(Self {
            run_address,
            segments,
        })
    }

    /// Returns the resolved run address, if any run-vector segment was seen.
    pub fn run_address(&self) -> Option<u16> {
        self.run_address
    }

    /// Returns every decoded segment in file order, run-vector segments
    /// included.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Projects the load file into an address-mapped load image.
    ///
    /// The entry address is the resolved run address; a file with no run
    /// vector falls back to the first segment's start address (the
    /// conventional DOS behavior), and an empty file to zero. Run-vector
    /// segments are omitted from or retained in the projected list per
    /// [`LoadConfig::run_vector`].
    pub fn to_load_image(&self, config: &LoadConfig) -> LoadImage {
        let segments = self
            .segments
            .iter()
            .filter(|segment| {
                config.run_vector == RunVectorDisposition::Retain || !segment.is_run_vector()
            })
            .map(|segment| LoadSegment {
                dest_address: segment.start_address,
                data: segment.data.clone(),
            })
            .collect();
        let entry_address = self
            .run_address
            .or_else(|| self.segments.first().map(|segment| segment.start_address))
            .unwrap_or(0);
        LoadImage {
            entry_address,
            segments,
        }
    }
}
