//! Executable container decoding for 8-bit machines.
//!
//! This crate decodes two legacy executable container formats into a common
//! address-mapped representation, with the following pieces:
//! 1. **Common:** Bounds-checked byte extraction, constants, and the closed fault taxonomies.
//! 2. **Formats:** AppleSingle (Apple II program images, big-endian header fields) and
//!    Atari DOS load files (XEX, little-endian address fields).
//! 3. **Image:** The format-neutral load image model both decoders project into.
//! 4. **Sim:** A flat 64 KiB memory and the loader that applies images to it.
//! 5. **Config:** Projection settings (run-vector disposition, data-fork address).
//!
//! Decoding is eager, pure, and I/O-free: callers supply an already-read byte
//! buffer and receive either a fully validated container or a single terminal
//! [`DecodeError`], never a partial result.

/// Common types and constants (cursor, errors, machine conventions).
pub mod common;
/// Projection and loading configuration.
pub mod config;
/// Container format decoders.
pub mod formats;
/// The format-neutral load image model.
pub mod image;
/// Emulated memory and image loading.
pub mod sim;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The shared decode fault taxonomy.
pub use crate::common::error::DecodeError;
/// The format-neutral decoded result.
pub use crate::image::LoadImage;
/// Convenience entry points decoding straight to a load image.
pub use crate::formats::{decode_apple_single, decode_atari_executable};
