//! Decoder configuration.
//!
//! Every value is validated when it is parsed, so a [`DecoderConfig`]
//! can only exist once the mask, channel order and traversal mode are
//! known to be well formed. Nothing here touches pixel data.

mod file;

pub use file::{DecodeSettings, FileConfig, OutputSettings};

use crate::extraction::{BitMask, ChannelOrder, TraversalMode};
use serde::{Deserialize, Serialize};

/// Default mask: least significant bit only.
pub const DEFAULT_BITS: &str = "00000001";
/// Default channel order.
pub const DEFAULT_CHANNELS: &str = "RGB";
/// Default traversal mode.
pub const DEFAULT_MODE: &str = "column";

/// Validated extraction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DecodeSettings", into = "DecodeSettings")]
pub struct DecoderConfig {
    /// Bit positions pulled from each channel value.
    pub mask: BitMask,
    /// Order channel bits are appended per pixel.
    pub order: ChannelOrder,
    /// Order pixels are visited.
    pub mode: TraversalMode,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            mask: BitMask::LSB,
            order: ChannelOrder::RGB,
            mode: TraversalMode::ColumnMajor,
        }
    }
}

impl DecoderConfig {
    /// Creates a configuration from already validated parts.
    pub fn new(mask: BitMask, order: ChannelOrder, mode: TraversalMode) -> Self {
        Self { mask, order, mode }
    }

    /// Parses and validates the three textual settings.
    ///
    /// `bits` must be eight `'0'`/`'1'` characters with at least one `'1'`,
    /// `channels` a permutation of `RGB` (any case) and `mode` either
    /// `row` or `column`. The first invalid value is reported.
    pub fn parse(bits: &str, channels: &str, mode: &str) -> Result<Self, ConfigError> {
        let config = Self {
            mask: bits.parse()?,
            order: channels.parse()?,
            mode: mode.parse()?,
        };
        tracing::debug!(
            mask = %config.mask,
            order = %config.order,
            mode = %config.mode,
            "Decoder configuration validated"
        );
        Ok(config)
    }
}

impl TryFrom<DecodeSettings> for DecoderConfig {
    type Error = ConfigError;

    fn try_from(settings: DecodeSettings) -> Result<Self, Self::Error> {
        Self::parse(&settings.bits, &settings.channels, &settings.mode)
    }
}

impl From<DecoderConfig> for DecodeSettings {
    fn from(config: DecoderConfig) -> Self {
        Self {
            bits: config.mask.to_string(),
            channels: config.order.to_string(),
            mode: config.mode.to_string(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("bit mask must be exactly 8 characters, got {len}")]
    InvalidMaskLength { len: usize },
    #[error("bit mask may only contain '0' or '1', found {ch:?} at position {index}")]
    InvalidMaskChar { ch: char, index: usize },
    #[error("bit mask must select at least one bit")]
    EmptyMask,
    #[error("invalid channel order {0:?} (expected a permutation of RGB)")]
    InvalidChannelOrder(String),
    #[error("invalid traversal mode {0:?} (expected 'row' or 'column')")]
    InvalidTraversalMode(String),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}
