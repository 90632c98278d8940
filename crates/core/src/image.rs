//! The format-neutral load image model.
//!
//! Both container decoders project into this shape; it is the sole contract
//! the memory loader depends on, decoupling it from which format produced
//! the data.

/// A destination-addressed run of program bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadSegment {
    /// First address the payload is copied to.
    pub dest_address: u16,
    /// Payload bytes, copied verbatim.
    pub data: Vec<u8>,
}

impl LoadSegment {
    /// Returns the inclusive end address of the segment, or `None` for an
    /// empty payload or one running past the top of the address space.
    pub fn end_address(&self) -> Option<u16> {
        if self.data.is_empty() {
            return None;
        }
        u16::try_from(usize::from(self.dest_address) + self.data.len() - 1).ok()
    }
}

/// An address-mapped program image ready to be copied into memory.
///
/// Segments apply in order; where ranges overlap, later segments win, which
/// matches sequential application by a single writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadImage {
    /// Address execution should begin at once all segments are applied.
    pub entry_address: u16,
    /// Ordered destination-addressed payloads.
    pub segments: Vec<LoadSegment>,
}

impl LoadImage {
    /// Returns the total payload size across all segments.
    pub fn byte_len(&self) -> usize {
        self.segments.iter().map(|segment| segment.data.len()).sum()
    }
}
