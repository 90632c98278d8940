//! Configuration for container projection and loading.
//!
//! This module defines the configuration structures that parameterize how a
//! decoded container is projected into a load image. It provides:
//! 1. **Dispositions:** The explicit choice of what happens to run-vector segments.
//! 2. **Structures:** A hierarchical config in the crate's conventional shape.
//!
//! Configuration is deserialized from JSON or built with `Config::default()`;
//! decoding itself never consults it; only the projection and loading steps do.

use serde::Deserialize;

use crate::common::constants::DATA_FORK_LOAD_ADDRESS;

/// Disposition of run-vector segments when projecting a load image.
///
/// An Atari load file stores its entry point as an ordinary-looking segment
/// targeting the OS run vector. Whether that segment is also forwarded to the
/// memory loader is a property of the consuming machine, so the choice is
/// explicit rather than baked into the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RunVectorDisposition {
    /// Consume run-vector segments: the entry point is resolved from them,
    /// but they are dropped from the projected segment list.
    #[default]
    Omit,
    /// Forward run-vector segments to memory like any other segment, in
    /// addition to resolving the entry point from them.
    Retain,
}

/// Root configuration structure.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use retroload_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.load.data_fork_address, 0x0803);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use retroload_core::config::{Config, RunVectorDisposition};
///
/// let json = r#"{
///     "load": {
///         "run_vector": "Retain",
///         "data_fork_address": 2051
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.load.run_vector, RunVectorDisposition::Retain);
/// assert_eq!(config.load.data_fork_address, 0x0803);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Projection and loading settings.
    #[serde(default)]
    pub load: LoadConfig,
}

/// Settings governing the projection of containers into load images.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
    /// What to do with run-vector segments (see [`RunVectorDisposition`]).
    #[serde(default)]
    pub run_vector: RunVectorDisposition,

    /// Destination and entry address for AppleSingle data forks.
    ///
    /// AppleSingle carries no load address in-band; the default is the cc65
    /// Apple II convention.
    #[serde(default = "LoadConfig::default_data_fork_address")]
    pub data_fork_address: u16,
}

impl LoadConfig {
    /// Returns the default data-fork load address.
    fn default_data_fork_address() -> u16 {
        DATA_FORK_LOAD_ADDRESS
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            run_vector: RunVectorDisposition::default(),
            data_fork_address: Self::default_data_fork_address(),
        }
    }
}
