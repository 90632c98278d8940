//! Flat 64 KiB address space.
//!
//! Both target machines address 64 KiB of byte-wide memory; this module
//! models exactly that and nothing more. Single-byte accesses cannot miss
//! (the address type is the address space); slice writes assert their span.

use std::fmt;

use crate::common::constants::ADDRESS_SPACE_SIZE;

/// A flat, zero-initialized 64 KiB memory.
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Creates a zero-filled memory covering the full address space.
    pub fn new() -> Self {
        Self {
            bytes: vec![0; ADDRESS_SPACE_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the size of the address space in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `false`; the address space is never empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads a single byte.
    pub fn read_u8(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr)]
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, addr: u16, value: u8) {
        self.bytes[usize::from(addr)] = value;
    }

    /// Reads a little-endian 16-bit word, wrapping at the top of memory the
    /// way the hardware address bus does.
    pub fn read_u16_le(&self, addr: u16) -> u16 {
        let low = self.read_u8(addr);
        let high = self.read_u8(addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Copies `data` into memory starting at `addr`.
    ///
    /// The span must fit below the top of memory; the loader validates this
    /// before calling.
    pub fn write_slice(&mut self, addr: u16, data: &[u8]) {
        let start = usize::from(addr);
        assert!(
            start + data.len() <= self.bytes.len(),
            "memory write out of bounds"
        );
        self.bytes[start..start + data.len()].copy_from_slice(data);
    }

    /// Returns a view of `len` bytes starting at `addr`.
    pub fn read_slice(&self, addr: u16, len: usize) -> &[u8] {
        let start = usize::from(addr);
        assert!(start + len <= self.bytes.len(), "memory read out of bounds");
        &self.bytes[start..start + len]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("len", &self.bytes.len())
            .finish()
    }
}
