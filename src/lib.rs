//! Bit-Plane Steganography Extraction Library
//!
//! Recovers text hidden in the bit-planes of an RGB image. The caller
//! chooses which bits of each channel carry the payload, the order the
//! three channels are read in, and whether pixels are walked row by row
//! or column by column.
//!
//! # Architecture
//!
//! The decoder is a single forward pass:
//!
//! ```text
//! source → extraction (traversal → channel bits) → assembly (bytes → text)
//!                                                       ↓
//!                                              report / metrics
//! ```
//!
//! # Design Principles
//!
//! - **Validate first**: configuration is fully checked before a pixel is read
//! - **One stream per decode**: no state is shared between passes
//! - **No guessing**: an empty result is valid; the decoder never claims an
//!   image is clean
//! - **ASCII only**: codes outside printable ASCII, LF and CR are dropped
//!
//! The traversal mode must match the one used when the payload was
//! embedded. A mismatch is not detectable and produces garbled text.
//!
//! # Example
//!
//! ```no_run
//! use stego_extract::{
//!     config::DecoderConfig,
//!     extraction::Decoder,
//!     source::load_frame,
//! };
//!
//! let config = DecoderConfig::parse("00000001", "RGB", "row").unwrap();
//! let frame = load_frame("hidden.png").unwrap();
//!
//! let text = Decoder::new(config).decode(&frame).unwrap();
//! println!("{} characters: {}", text.char_count(), text);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod assembly;
pub mod config;
pub mod extraction;
pub mod metrics;
pub mod report;
pub mod source;

// Re-export commonly used types at crate root
pub use assembly::{DecodeStats, DecodedText, PrintableFilter};
pub use config::{ConfigError, DecoderConfig, FileConfig};
pub use extraction::{
    decode, BitMask, BitStream, CancelToken, ChannelOrder, DecodeError, Decoder, Traversal,
    TraversalMode,
};
pub use report::{DecodeReport, DigestAlgorithm};
pub use source::{load_frame, Pixel, PixelSource, RgbFrame, SourceError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
