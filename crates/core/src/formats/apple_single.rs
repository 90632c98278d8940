//! AppleSingle container decoding.
//!
//! AppleSingle combines the forks of a classic Apple file (data, resource,
//! metadata) into one buffer with a directory of typed entries. The header
//! layout, most significant byte first throughout:
//!
//! | Field             | Length   |
//! |-------------------|----------|
//! | Magic number      | 4 bytes  |
//! | Version number    | 4 bytes  |
//! | Filler            | 16 bytes |
//! | Number of entries | 2 bytes  |
//!
//! followed by one 12-byte descriptor per entry: entry id (4 bytes), offset
//! (4 bytes), length (4 bytes), both relative to the start of the whole
//! buffer. Of the fifteen defined entry ids only the data fork (1) and
//! ProDOS file info (11) are supported; anything else is a decode fault.
//!
//! The whole container is validated eagerly at construction; a partially
//! valid buffer never yields a partially decoded container.

use tracing::{debug, trace};

use crate::common::cursor::{ByteCursor, Endian};
use crate::common::error::DecodeError;
use crate::config::LoadConfig;
use crate::image::{LoadImage, LoadSegment};

/// The AppleSingle magic number (`$00051600`).
pub const MAGIC: u32 = 0x0005_1600;

/// The AppleSingle format version this decoder supports (`$00020000`).
pub const VERSION: u32 = 0x0002_0000;

/// Entry id of the data fork.
pub const ENTRY_ID_DATA_FORK: u32 = 1;

/// Entry id of the ProDOS file info entry.
pub const ENTRY_ID_PRODOS_INFO: u32 = 11;

/// Byte span of the fixed header (magic, version, filler, entry count).
const HEADER_LEN: usize = 26;

/// Byte span of one entry descriptor.
const ENTRY_RECORD_LEN: usize = 12;

/// Offset and length of the mandatory zero filler.
const FILLER_OFFSET: usize = 8;
const FILLER_LEN: usize = 16;

/// Offset of the big-endian entry count.
const ENTRY_COUNT_OFFSET: usize = 24;

/// Declared length a ProDOS file info entry must carry.
const PRODOS_INFO_LEN: u32 = 8;

/// A single typed entry from the container's directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Entry id 1: the raw program image bytes.
    DataFork {
        /// Payload bytes, exactly as stored.
        data: Vec<u8>,
    },
    /// Entry id 11: ProDOS file attributes.
    ProDosInfo {
        /// ProDOS access bits.
        access: u16,
        /// ProDOS file type.
        file_type: u16,
        /// ProDOS auxiliary type.
        auxiliary_type: u32,
    },
}

/// A fully validated AppleSingle container.
///
/// Entries appear in directory order. The decoder enforces no cardinality:
/// whatever entries are present are decoded, and consumers pick the one they
/// need (conventionally the first data fork).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppleSingle {
    entries: Vec<Entry>,
}

impl AppleSingle {
    /// Decodes and validates an AppleSingle buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] for any structural violation: wrong magic or
    /// version, non-zero filler, an unsupported entry id, an entry payload
    /// outside the buffer, or a buffer too short for its own declared shape.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let cursor = ByteCursor::new(bytes);

        let magic = cursor.read_u32(0, Endian::Big)?;
        if magic != MAGIC {
            return Err(DecodeError::BadMagic { actual: magic });
        }

        let version = cursor.read_u32(4, Endian::Big)?;
        if version != VERSION {
            return Err(DecodeError::BadVersion { actual: version });
        }

        let filler = cursor.slice(FILLER_OFFSET, FILLER_LEN)?;
        if let Some((index, &value)) = filler.iter().enumerate().find(|(_, byte)| **byte != 0) {
            return Err(DecodeError::BadFiller { index, value });
        }

        let entry_count = cursor.read_u16(ENTRY_COUNT_OFFSET, Endian::Big)?;

        let mut entries = Vec::with_capacity(usize::from(entry_count));
        for n in 0..usize::from(entry_count) {
            let record = HEADER_LEN + n * ENTRY_RECORD_LEN;
            let id = cursor.read_u32(record, Endian::Big)?;
            let offset = cursor.read_u32(record + 4, Endian::Big)?;
            let length = cursor.read_u32(record + 8, Endian::Big)?;
            trace!(id, offset, length, "directory record");

            let entry = match id {
                ENTRY_ID_DATA_FORK => Self::data_fork_entry(&cursor, offset, length)?,
                ENTRY_ID_PRODOS_INFO => Self::prodos_info_entry(&cursor, offset, length)?,
                id => return Err(DecodeError::UnknownEntryId { id }),
            };
            entries.push(entry);
        }

        debug!(entries = entries.len(), "container decoded");
        Ok(Self { entries })
    }

    /// Returns the decoded entries in directory order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the payload of the first data fork entry, if any.
    pub fn data_fork(&self) -> Option<&[u8]> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::DataFork { data } => Some(data.as_slice()),
            Entry::ProDosInfo { .. } => None,
        })
    }

    /// Projects the container into an address-mapped load image.
    ///
    /// The first data fork, if any, becomes a single segment at the
    /// configured data-fork address, which is also the entry address.
    pub fn to_load_image(&self, config: &LoadConfig) -> LoadImage {
        let segments = self
            .data_fork()
            .map(|data| LoadSegment {
                dest_address: config.data_fork_address,
                data: data.to_vec(),
            })
            .into_iter()
            .collect();
        LoadImage {
            entry_address: config.data_fork_address,
            segments,
        }
    }

    /// Extracts an entry's payload with the declared range checked against
    /// the whole buffer.
    fn payload<'a>(
        cursor: &ByteCursor<'a>,
        offset: u32,
        length: u32,
    ) -> Result<&'a [u8], DecodeError> {
        if u64::from(offset) + u64::from(length) > cursor.len() as u64 {
            return Err(DecodeError::TruncatedEntry {
                offset,
                length,
                buffer_len: cursor.len(),
            });
        }
        Ok(cursor.slice(offset as usize, length as usize)?)
    }

    fn data_fork_entry(
        cursor: &ByteCursor<'_>,
        offset: u32,
        length: u32,
    ) -> Result<Entry, DecodeError> {
        let data = Self::payload(cursor, offset, length)?.to_vec();
        Ok(Entry::DataFork { data })
    }

    fn prodos_info_entry(
        cursor: &ByteCursor<'_>,
        offset: u32,
        length: u32,
    ) -> Result<Entry, DecodeError> {
        if length != PRODOS_INFO_LEN {
            return Err(DecodeError::BadEntryLength {
                id: ENTRY_ID_PRODOS_INFO,
                expected: PRODOS_INFO_LEN,
                length,
            });
        }
        let info = ByteCursor::new(Self::payload(cursor, offset, length)?);
        Ok(Entry::ProDosInfo {
            access: info.read_u16(0, Endian::Big)?,
            file_type: info.read_u16(2, Endian::Big)?,
            auxiliary_type: info.read_u32(4, Endian::Big)?,
        })
    }
}
