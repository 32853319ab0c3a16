//! Byte assembly and text filtering.
//!
//! Turns a finished [`BitStream`] into text: complete 8-bit groups
//! become character codes, a partial final group is discarded, and the
//! [`PrintableFilter`] decides which codes survive.

mod filter;
mod stats;

pub use filter::{PrintableFilter, CR, LF};
pub use stats::DecodeStats;

use crate::extraction::BitStream;

/// Text recovered by a decode pass.
///
/// May be empty: an image without a payload and an image whose payload
/// is entirely unprintable look the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    text: String,
    stats: DecodeStats,
}

impl DecodedText {
    /// Returns the decoded text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of retained characters.
    #[inline]
    pub fn char_count(&self) -> usize {
        self.stats.chars_retained
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the counters for the pass that produced this text.
    #[inline]
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Consumes self and returns the text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for DecodedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for DecodedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Consumes `stream` and assembles it into filtered text.
///
/// `pixels_visited` is only recorded in the stats.
pub fn assemble(stream: BitStream, pixels_visited: usize) -> DecodedText {
    let bits_extracted = stream.len();
    let trailing_bits = stream.trailing_bits();
    let bytes = stream.into_complete_bytes();

    let mut text = String::with_capacity(bytes.len());
    let chars_dropped = PrintableFilter.filter_into(&bytes, &mut text);

    let stats = DecodeStats {
        pixels_visited,
        bits_extracted,
        bytes_assembled: bytes.len(),
        trailing_bits,
        chars_retained: bytes.len() - chars_dropped,
        chars_dropped,
    };

    tracing::debug!(
        bytes = stats.bytes_assembled,
        trailing_bits,
        retained = stats.chars_retained,
        dropped = chars_dropped,
        "Assembled bit stream"
    );

    DecodedText { text, stats }
}
