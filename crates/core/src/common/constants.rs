//! Machine-convention constants.
//!
//! This module defines the handful of fixed addresses and sizes that are
//! properties of the target machines rather than of any one container format.
//! Format wire-layout constants (magic numbers, record sizes) live with their
//! decoders in [`crate::formats`].

/// Size of the emulated address space in bytes (64 KiB).
///
/// Both target machines are 8-bit micros with a 16-bit address bus; every
/// destination address in a load image refers to this space.
pub const ADDRESS_SPACE_SIZE: usize = 0x1_0000;

/// Conventional load address for Apple II program images (`$0803`).
///
/// AppleSingle carries no load address of its own; cc65-linked Apple II
/// binaries are loaded and entered at this fixed address by convention.
pub const DATA_FORK_LOAD_ADDRESS: u16 = 0x0803;

/// The Atari OS run vector (`RUNAD`, `$02E0`).
///
/// A load-file segment that starts here carries the execution entry point in
/// its first two bytes (little-endian) rather than ordinary program data.
pub const RUN_VECTOR_ADDRESS: u16 = 0x02E0;
