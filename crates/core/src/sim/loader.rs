//! Program image loading.
//!
//! The consumer side of the [`LoadImage`] contract: copy each segment to its
//! destination address range, then hand the entry address back for the
//! caller to place in the program counter.

use tracing::debug;

use crate::common::error::LoadError;
use crate::image::LoadImage;
use crate::sim::memory::Memory;

/// Applies `image` to `memory` and returns the entry address.
///
/// Segments apply in image order; overlapping ranges resolve to the later
/// writer. The entry address is returned rather than acted on because the
/// program counter belongs to whatever machine owns the memory.
///
/// # Errors
///
/// Returns [`LoadError::SegmentOverrun`] if a segment's payload would run
/// past the top of the address space. Segments before the offending one have
/// already been applied; nothing after it is.
pub fn load_image(memory: &mut Memory, image: &LoadImage) -> Result<u16, LoadError> {
    for segment in &image.segments {
        if usize::from(segment.dest_address) + segment.data.len() > memory.len() {
            return Err(LoadError::SegmentOverrun {
                dest: segment.dest_address,
                len: segment.data.len(),
            });
        }
        memory.write_slice(segment.dest_address, &segment.data);
        debug!(
            dest = segment.dest_address,
            len = segment.data.len(),
            "segment applied"
        );
    }
    Ok(image.entry_address)
}
