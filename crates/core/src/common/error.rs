//! Decode and load fault definitions.
//!
//! This module defines the error types reported by the container decoders and
//! the memory loader. It provides:
//! 1. **Bounds Faults:** Reads past the end of an input buffer.
//! 2. **Decode Faults:** Structural violations in either container format.
//! 3. **Load Faults:** Image application past the top of the address space.
//!
//! Every fault is terminal for the call that produced it: the input is a
//! static buffer, so nothing is retried, and no partial container or image is
//! ever returned.

use thiserror::Error;

/// A read past the end of the input buffer.
///
/// Carries the requested span and the actual buffer length so diagnostics can
/// point at the exact overrunning read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("read of {length} byte(s) at offset {offset} overruns {buffer_len}-byte buffer")]
pub struct BoundsError {
    /// Start offset of the attempted read.
    pub offset: usize,
    /// Number of bytes requested.
    pub length: usize,
    /// Total length of the buffer read from.
    pub buffer_len: usize,
}

/// A structural violation found while decoding a container.
///
/// The first six variants are AppleSingle faults, the next three are Atari
/// load-file faults, and [`DecodeError::Bounds`] is shared by both decoders
/// whenever a fixed-layout read falls off the end of the buffer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The 4-byte magic number is not `$00051600`.
    #[error("magic number unrecognised: {actual:#010x}")]
    BadMagic {
        /// The value actually present in bytes 0–3.
        actual: u32,
    },

    /// The 4-byte version number is not `$00020000`.
    #[error("version number unrecognised: {actual:#010x}")]
    BadVersion {
        /// The value actually present in bytes 4–7.
        actual: u32,
    },

    /// A byte in the mandatory 16-byte zero filler is non-zero.
    #[error("zero filler incorrect at byte {index}, found {value:#04x}")]
    BadFiller {
        /// Index within the filler region (0–15).
        index: usize,
        /// The offending byte value.
        value: u8,
    },

    /// A directory record carries an entry id this decoder does not support.
    ///
    /// The format defines further ids (resource fork, comments, Finder info,
    /// and so on); only the data fork and ProDOS info entries are decoded.
    #[error("unknown entry id: {id}")]
    UnknownEntryId {
        /// The unsupported entry id.
        id: u32,
    },

    /// A directory record declares a length its entry type does not permit.
    #[error("incorrect length for entry id {id}, expected {expected}, found {length}")]
    BadEntryLength {
        /// Entry id of the offending record.
        id: u32,
        /// Length the entry type requires.
        expected: u32,
        /// Length the record declared.
        length: u32,
    },

    /// A directory record's payload range extends past the end of the buffer.
    #[error("entry payload at offset {offset} with length {length} overruns {buffer_len}-byte buffer")]
    TruncatedEntry {
        /// Declared payload offset, relative to the start of the buffer.
        offset: u32,
        /// Declared payload length.
        length: u32,
        /// Total length of the buffer.
        buffer_len: usize,
    },

    /// The buffer ends where a segment header was required.
    ///
    /// Reported when the file is too short to hold any segment, or when a
    /// `$FFFF` marker word promises a segment that is not there.
    #[error("segment header at offset {offset} requires 4 bytes, {remaining} remain")]
    TruncatedHeader {
        /// Offset at which the header was expected.
        offset: usize,
        /// Bytes remaining in the buffer at that offset.
        remaining: usize,
    },

    /// A segment's address range is inverted or its payload is cut short.
    #[error("segment {start:#06x}..={end:#06x} at offset {offset} has invalid bounds")]
    InvalidSegmentBounds {
        /// Declared start address.
        start: u16,
        /// Declared inclusive end address.
        end: u16,
        /// Offset of the segment header within the buffer.
        offset: usize,
    },

    /// Leftover bytes after the last segment cannot form a segment header.
    #[error("{remaining} trailing byte(s) at offset {offset} cannot form a segment header")]
    TrailingBytes {
        /// Offset of the first trailing byte.
        offset: usize,
        /// Number of trailing bytes.
        remaining: usize,
    },

    /// A fixed-layout read fell off the end of the buffer.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// A fault applying a load image to machine memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A segment's payload runs past the top of the 64 KiB address space.
    #[error("segment at {dest:#06x} with {len} byte(s) overruns the 64 KiB address space")]
    SegmentOverrun {
        /// Destination address of the offending segment.
        dest: u16,
        /// Payload length of the offending segment.
        len: usize,
    },
}
