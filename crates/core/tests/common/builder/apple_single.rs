//! AppleSingle container fixture builder.

use retroload_core::formats::apple_single::{ENTRY_ID_DATA_FORK, ENTRY_ID_PRODOS_INFO, MAGIC, VERSION};

/// One directory record staged in the builder.
enum Record {
    /// A record whose payload is appended after the directory; its offset
    /// and length are computed during `build`.
    Payload { id: u32, data: Vec<u8> },
    /// A verbatim record with explicit offset and length and no payload
    /// emitted, for out-of-bounds and truncation fixtures.
    Raw { id: u32, offset: u32, length: u32 },
}

/// Assembles AppleSingle buffers byte-for-byte.
///
/// A freshly constructed builder produces a valid, empty container; each
/// method perturbs exactly one aspect of the layout.
pub struct AppleSingleBuilder {
    magic: u32,
    version: u32,
    filler: [u8; 16],
    records: Vec<Record>,
    count_override: Option<u16>,
}

impl AppleSingleBuilder {
    pub fn new() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            filler: [0; 16],
            records: Vec::new(),
            count_override: None,
        }
    }

    pub fn magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn filler_byte(mut self, index: usize, value: u8) -> Self {
        self.filler[index] = value;
        self
    }

    /// Overrides the declared entry count regardless of staged records.
    pub fn entry_count(mut self, count: u16) -> Self {
        self.count_override = Some(count);
        self
    }

    /// Stages a record of arbitrary id whose payload follows the directory.
    pub fn entry(mut self, id: u32, data: &[u8]) -> Self {
        self.records.push(Record::Payload {
            id,
            data: data.to_vec(),
        });
        self
    }

    /// Stages a data fork entry (id 1).
    pub fn data_fork(self, data: &[u8]) -> Self {
        self.entry(ENTRY_ID_DATA_FORK, data)
    }

    /// Stages a well-formed ProDOS info entry (id 11, 8 payload bytes).
    pub fn prodos_info(self, access: u16, file_type: u16, auxiliary_type: u32) -> Self {
        let mut data = Vec::with_capacity(8);
        data.extend_from_slice(&access.to_be_bytes());
        data.extend_from_slice(&file_type.to_be_bytes());
        data.extend_from_slice(&auxiliary_type.to_be_bytes());
        self.entry(ENTRY_ID_PRODOS_INFO, &data)
    }

    /// Stages a verbatim directory record with no payload emitted.
    pub fn raw_record(mut self, id: u32, offset: u32, length: u32) -> Self {
        self.records.push(Record::Raw { id, offset, length });
        self
    }

    /// Assembles the buffer: fixed header, directory, then payload area.
    pub fn build(self) -> Vec<u8> {
        let count = self
            .count_override
            .unwrap_or(self.records.len() as u16);
        let directory_end = 26 + self.records.len() * 12;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.magic.to_be_bytes());
        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(&self.filler);
        bytes.extend_from_slice(&count.to_be_bytes());

        let mut payloads: Vec<u8> = Vec::new();
        for record in &self.records {
            match record {
                Record::Payload { id, data } => {
                    let offset = (directory_end + payloads.len()) as u32;
                    bytes.extend_from_slice(&id.to_be_bytes());
                    bytes.extend_from_slice(&offset.to_be_bytes());
                    bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
                    payloads.extend_from_slice(data);
                }
                Record::Raw { id, offset, length } => {
                    bytes.extend_from_slice(&id.to_be_bytes());
                    bytes.extend_from_slice(&offset.to_be_bytes());
                    bytes.extend_from_slice(&length.to_be_bytes());
                }
            }
        }
        bytes.extend_from_slice(&payloads);
        bytes
    }
}

impl Default for AppleSingleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
