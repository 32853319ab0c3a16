//! Bit-plane extraction.
//!
//! This module walks an image in a planned order, pulls the selected
//! bit-planes out of every channel and collects them into a
//! [`BitStream`], which [`crate::assembly`] then turns into text.
//!
//! ```text
//! Traversal → ChannelComposer (BitMask per channel) → BitStream → assembly
//! ```

mod bitstream;
mod cancel;
mod channel;
mod mask;
mod traversal;

pub use bitstream::BitStream;
pub use cancel::CancelToken;
pub use channel::{Channel, ChannelComposer, ChannelOrder};
pub use mask::{BitMask, PlaneBits};
pub use traversal::{Coordinates, Traversal, TraversalMode};

use crate::assembly::{self, DecodedText};
use crate::config::{ConfigError, DecoderConfig};
use crate::source::{PixelSource, SourceError};
use std::time::Instant;
use thiserror::Error;

/// Upper bound on the bits reserved before traversal starts.
///
/// Larger streams grow as pixels are read.
const MAX_PRERESERVED_BITS: usize = 1 << 27;

/// Errors returned by a decode operation.
///
/// No variant means "no payload": an image whose bits decode to nothing
/// printable yields an empty [`DecodedText`], not an error.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("pixel source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    #[error("decode cancelled after {pixels_visited} pixels")]
    Cancelled { pixels_visited: usize },
}

/// Runs decode passes for one validated configuration.
///
/// Holding a `Decoder` means configuration is finished; each call to
/// [`decode`](Self::decode) performs a full extraction with its own
/// bit stream and returns the finished text. Passes never share state,
/// so a decoder can be used from several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    config: DecoderConfig,
    composer: ChannelComposer,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            composer: ChannelComposer::new(config.mask, config.order),
        }
    }

    /// Returns the configuration this decoder was built with.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Number of bits a full pass over a `width` x `height` image yields.
    ///
    /// Saturates at `usize::MAX` for dimensions whose bit count does not fit.
    pub fn capacity_bits(&self, width: u32, height: u32) -> usize {
        Traversal::new(width, height, self.config.mode)
            .len()
            .saturating_mul(self.composer.bits_per_pixel())
    }

    /// Decodes the hidden text in `source`.
    pub fn decode<S: PixelSource + ?Sized>(&self, source: &S) -> Result<DecodedText, DecodeError> {
        self.decode_with_cancel(source, &CancelToken::new())
    }

    /// Decodes the hidden text in `source`, stopping if `cancel` fires.
    ///
    /// The token is checked before every pixel and once more after the
    /// last. A cancelled pass drops its partial stream and returns
    /// [`DecodeError::Cancelled`].
    pub fn decode_with_cancel<S: PixelSource + ?Sized>(
        &self,
        source: &S,
        cancel: &CancelToken,
    ) -> Result<DecodedText, DecodeError> {
        let started = Instant::now();
        let stream = self.extract(source, cancel)?;
        let pixels = source.pixel_count();
        let text = assembly::assemble(stream, pixels);

        tracing::info!(
            pixels,
            bits = text.stats().bits_extracted,
            retained = text.char_count(),
            dropped = text.stats().chars_dropped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Decode finished"
        );

        Ok(text)
    }

    /// Runs the traversal and returns the raw bit stream.
    pub fn extract<S: PixelSource + ?Sized>(
        &self,
        source: &S,
        cancel: &CancelToken,
    ) -> Result<BitStream, DecodeError> {
        let (width, height) = source.dimensions();
        let plan = Traversal::new(width, height, self.config.mode);

        tracing::info!(
            width,
            height,
            mask = %self.config.mask,
            order = %self.config.order,
            mode = %self.config.mode,
            "Decode started"
        );

        let reserve = self.capacity_bits(width, height).min(MAX_PRERESERVED_BITS);
        let mut stream = BitStream::with_capacity(reserve);
        for (visited, (x, y)) in plan.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::warn!(pixels_visited = visited, "Decode cancelled");
                return Err(DecodeError::Cancelled {
                    pixels_visited: visited,
                });
            }
            let pixel = source.pixel(x, y)?;
            self.composer.compose(pixel, &mut stream);
        }
        if cancel.is_cancelled() {
            tracing::warn!(pixels_visited = plan.len(), "Decode cancelled");
            return Err(DecodeError::Cancelled {
                pixels_visited: plan.len(),
            });
        }

        tracing::trace!(stream = ?stream, "Traversal complete");
        Ok(stream)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

/// Validates the textual settings and decodes `source` in one step.
///
/// Configuration is checked in full before any pixel is read.
pub fn decode<S: PixelSource + ?Sized>(
    source: &S,
    bits: &str,
    channels: &str,
    mode: &str,
) -> Result<DecodedText, DecodeError> {
    let config = DecoderConfig::parse(bits, channels, mode)?;
    Decoder::new(config).decode(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Pixel, RgbFrame};
    use proptest::prelude::*;
    use std::cell::Cell;

    /// Embeds `payload` into the LSBs of a frame, row-major, RGB order.
    fn lsb_frame(width: u32, height: u32, payload: &[u8]) -> RgbFrame {
        let bits: Vec<u8> = payload
            .iter()
            .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1))
            .collect();
        RgbFrame::from_fn(width, height, |x, y| {
            let base = ((y * width + x) * 3) as usize;
            let bit = |i: usize| bits.get(base + i).copied().unwrap_or(0);
            Pixel::new(0xF0 | bit(0), 0x20 | bit(1), 0x7E | bit(2))
        })
    }

    /// Source that counts how many pixels were read.
    struct CountingSource {
        frame: RgbFrame,
        reads: Cell<usize>,
    }

    impl PixelSource for CountingSource {
        fn dimensions(&self) -> (u32, u32) {
            self.frame.dimensions()
        }

        fn pixel(&self, x: u32, y: u32) -> Result<Pixel, SourceError> {
            self.reads.set(self.reads.get() + 1);
            self.frame.pixel(x, y)
        }
    }

    /// Source whose pixel reads always fail.
    struct BrokenSource;

    impl PixelSource for BrokenSource {
        fn dimensions(&self) -> (u32, u32) {
            (2, 2)
        }

        fn pixel(&self, _x: u32, _y: u32) -> Result<Pixel, SourceError> {
            Err(SourceError::InvalidBuffer {
                expected: 12,
                actual: 0,
            })
        }
    }

    #[test]
    fn test_lsb_round_trip_two_by_two() {
        // 2x2 pixels * 3 channels = 12 bits: one byte plus 4 trailing bits
        let frame = lsb_frame(2, 2, b"H");
        let text = decode(&frame, "00000001", "RGB", "row").unwrap();

        assert_eq!(text.as_str().chars().next(), Some('H'));
        assert_eq!(text.stats().bits_extracted, 12);
        assert_eq!(text.stats().trailing_bits, 4);
    }

    #[test]
    fn test_lsb_message() {
        let message = b"Hello, stego!\n";
        let frame = lsb_frame(8, 8, message);
        let text = decode(&frame, "00000001", "rgb", "row").unwrap();

        assert!(text.as_str().starts_with("Hello, stego!\n"));
    }

    #[test]
    fn test_traversal_mode_changes_output() {
        let frame = lsb_frame(8, 8, b"Row major payload");

        let row = decode(&frame, "00000001", "RGB", "row").unwrap();
        let column = decode(&frame, "00000001", "RGB", "column").unwrap();

        assert_ne!(row.as_str(), column.as_str());
    }

    #[test]
    fn test_traversal_mode_irrelevant_for_single_row() {
        let frame = lsb_frame(16, 1, b"line");

        let row = decode(&frame, "00000001", "RGB", "row").unwrap();
        let column = decode(&frame, "00000001", "RGB", "column").unwrap();

        assert_eq!(row, column);
    }

    #[test]
    fn test_traversal_mode_irrelevant_for_single_column() {
        let frame = lsb_frame(1, 16, b"line");

        let row = decode(&frame, "00000001", "RGB", "row").unwrap();
        let column = decode(&frame, "00000001", "RGB", "column").unwrap();

        assert_eq!(row.as_str(), "line");
        assert_eq!(row, column);
    }

    #[test]
    fn test_invalid_mask_reads_no_pixels() {
        let source = CountingSource {
            frame: lsb_frame(4, 4, b"x"),
            reads: Cell::new(0),
        };

        for bits in ["00000000", "1010101"] {
            let result = decode(&source, bits, "RGB", "row");
            assert!(matches!(result, Err(DecodeError::Configuration(_))));
        }
        assert!(matches!(
            decode(&source, "00000001", "RGX", "row"),
            Err(DecodeError::Configuration(_))
        ));
        assert_eq!(source.reads.get(), 0);
    }

    #[test]
    fn test_source_error_surfaces() {
        let result = Decoder::default().decode(&BrokenSource);
        assert!(matches!(result, Err(DecodeError::SourceUnavailable(_))));
    }

    #[test]
    fn test_cancelled_decode_returns_no_text() {
        let frame = lsb_frame(4, 4, b"abc");
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = Decoder::default().decode_with_cancel(&frame, &cancel);
        assert!(matches!(
            result,
            Err(DecodeError::Cancelled { pixels_visited: 0 })
        ));
    }

    /// Fires the token while the final pixel is being read.
    struct CancelOnLastPixel {
        frame: RgbFrame,
        cancel: CancelToken,
    }

    impl PixelSource for CancelOnLastPixel {
        fn dimensions(&self) -> (u32, u32) {
            self.frame.dimensions()
        }

        fn pixel(&self, x: u32, y: u32) -> Result<Pixel, SourceError> {
            let (width, height) = self.frame.dimensions();
            if (x, y) == (width - 1, height - 1) {
                self.cancel.cancel();
            }
            self.frame.pixel(x, y)
        }
    }

    #[test]
    fn test_cancel_during_last_pixel_returns_no_text() {
        let cancel = CancelToken::new();
        let source = CancelOnLastPixel {
            frame: lsb_frame(3, 3, b"ab"),
            cancel: cancel.clone(),
        };

        let result = Decoder::default().decode_with_cancel(&source, &cancel);
        assert!(matches!(
            result,
            Err(DecodeError::Cancelled { pixels_visited: 9 })
        ));
    }

    #[test]
    fn test_empty_image_decodes_to_empty_text() {
        let frame = RgbFrame::new(Vec::new(), 0, 0).unwrap();
        let text = Decoder::default().decode(&frame).unwrap();

        assert!(text.is_empty());
        assert_eq!(text.char_count(), 0);
    }

    #[test]
    fn test_capacity_bits() {
        let config = DecoderConfig::parse("00000011", "RGB", "row").unwrap();
        assert_eq!(Decoder::new(config).capacity_bits(10, 5), 10 * 5 * 3 * 2);
    }

    #[test]
    fn test_capacity_bits_saturates() {
        let config = DecoderConfig::parse("11111111", "RGB", "row").unwrap();
        assert_eq!(
            Decoder::new(config).capacity_bits(u32::MAX, u32::MAX),
            usize::MAX
        );
    }

    /// Claims enormous dimensions but fails on the first read.
    struct HugeSource;

    impl PixelSource for HugeSource {
        fn dimensions(&self) -> (u32, u32) {
            (u32::MAX, u32::MAX)
        }

        fn pixel(&self, x: u32, y: u32) -> Result<Pixel, SourceError> {
            Err(SourceError::OutOfBounds {
                x,
                y,
                width: 0,
                height: 0,
            })
        }
    }

    #[test]
    fn test_huge_source_reports_error_without_panicking() {
        let config = DecoderConfig::parse("11111111", "RGB", "column").unwrap();
        let result = Decoder::new(config).decode(&HugeSource);

        assert!(matches!(result, Err(DecodeError::SourceUnavailable(_))));
    }

    #[test]
    fn test_decoder_on_rgb_image() {
        let img = image::RgbImage::from_pixel(3, 3, image::Rgb([0, 0, 0]));
        let text = Decoder::default().decode(&img).unwrap();

        // 27 zero bits: three NUL bytes, all dropped
        assert_eq!(text.stats().bytes_assembled, 3);
        assert_eq!(text.stats().chars_dropped, 3);
        assert!(text.is_empty());
    }

    fn arb_frame() -> impl Strategy<Value = RgbFrame> {
        (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |bytes| RgbFrame::new(bytes, w, h).unwrap())
        })
    }

    proptest! {
        #[test]
        fn stream_length_is_pixels_times_three_times_mask_bits(
            frame in arb_frame(),
            positions in prop::array::uniform8(any::<bool>()),
            row in any::<bool>(),
        ) {
            prop_assume!(positions.iter().any(|&p| p));
            let mask = BitMask::new(positions).unwrap();
            let mode = if row { TraversalMode::RowMajor } else { TraversalMode::ColumnMajor };
            let decoder = Decoder::new(DecoderConfig::new(mask, ChannelOrder::RGB, mode));

            let stream = decoder.extract(&frame, &CancelToken::new()).unwrap();
            let expected = frame.pixel_count() * 3 * mask.count() as usize;
            prop_assert_eq!(stream.len(), expected);
        }

        #[test]
        fn decoding_is_idempotent(frame in arb_frame(), order in 0usize..6) {
            let config = DecoderConfig::new(
                "00000011".parse().unwrap(),
                ChannelOrder::ALL[order],
                TraversalMode::ColumnMajor,
            );
            let decoder = Decoder::new(config);

            let first = decoder.decode(&frame).unwrap();
            let second = decoder.decode(&frame).unwrap();
            prop_assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
        }
    }
}
