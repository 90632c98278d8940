//! Common utilities and types used throughout the container decoders.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the crate. It includes:
//! 1. **Byte Extraction:** A bounds-checked cursor for big- and little-endian reads.
//! 2. **Constants:** Machine conventions (address space size, vector addresses).
//! 3. **Error Handling:** The closed decode and load fault taxonomies.

/// Machine-convention constants shared across formats.
pub mod constants;

/// Bounds-checked byte buffer extraction.
pub mod cursor;

/// Decode and load fault definitions.
pub mod error;

pub use constants::{ADDRESS_SPACE_SIZE, DATA_FORK_LOAD_ADDRESS, RUN_VECTOR_ADDRESS};
pub use cursor::{ByteCursor, Endian};
pub use error::{BoundsError, DecodeError, LoadError};
