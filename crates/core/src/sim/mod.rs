//! Emulated memory and program image loading.
//!
//! Provides the consumer side of the load-image contract: a flat 64 KiB
//! address space and the operation that copies an image into it and hands
//! back the entry point.

/// Flat 64 KiB byte-addressable memory.
pub mod memory;

/// Applies load images to memory.
pub mod loader;

pub use loader::load_image;
pub use memory::Memory;
