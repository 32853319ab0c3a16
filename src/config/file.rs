//! TOML configuration file.

use super::{ConfigError, DecoderConfig, DEFAULT_BITS, DEFAULT_CHANNELS, DEFAULT_MODE};
use crate::report::DigestAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Full configuration file format.
///
/// ```toml
/// [decode]
/// bits = "00000011"
/// channels = "BGR"
/// mode = "row"
///
/// [output]
/// digest = "sha256"
/// report = "decode-report.toml"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub decode: DecodeSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Unvalidated extraction settings as written by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecodeSettings {
    /// Eight-character bit mask, MSB first.
    pub bits: String,
    /// Channel order, e.g. `RGB` or `bgr`.
    pub channels: String,
    /// `row` or `column`.
    pub mode: String,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS.to_string(),
            channels: DEFAULT_CHANNELS.to_string(),
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

/// Where and how results are written besides the decoded text.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Digest algorithm used in reports.
    pub digest: DigestAlgorithm,
    /// Optional TOML decode report path.
    pub report: Option<PathBuf>,
    /// Optional Prometheus textfile path.
    pub metrics_file: Option<PathBuf>,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    ///
    /// The `[decode]` values are not validated here; flags may still
    /// replace them. Call [`decoder_config`](Self::decoder_config) to check.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded config file");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Returns the validated decoder configuration.
    pub fn decoder_config(&self) -> Result<DecoderConfig, ConfigError> {
        DecoderConfig::try_from(self.decode.clone())
    }
}
