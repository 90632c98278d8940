//! Container format decoders.
//!
//! One module per supported executable container, plus the two convenience
//! entry points that decode straight to a [`LoadImage`] with default
//! configuration. Use the typed containers directly when the projection
//! needs to be configured.

/// AppleSingle container decoding (Apple II program images).
pub mod apple_single;

/// Atari DOS load file (XEX) decoding.
pub mod atari;

pub use apple_single::AppleSingle;
pub use atari::AtariExecutable;

use crate::common::error::DecodeError;
use crate::config::LoadConfig;
use crate::image::LoadImage;

/// Decodes an AppleSingle buffer into a load image with default
/// configuration.
///
/// # Errors
///
/// Returns a [`DecodeError`] for any structural violation in the container.
pub fn decode_apple_single(bytes: &[u8]) -> Result<LoadImage, DecodeError> {
    Ok(AppleSingle::decode(bytes)?.to_load_image(&LoadConfig::default()))
}

/// Decodes an Atari load-file buffer into a load image with default
/// configuration.
///
/// # Errors
///
/// Returns a [`DecodeError`] for any structural violation in the load file.
pub fn decode_atari_executable(bytes: &[u8]) -> Result<LoadImage, DecodeError> {
    Ok(AtariExecutable::decode(bytes)?.to_load_image(&LoadConfig::default()))
}
