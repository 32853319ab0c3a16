//! Pixel sources for extraction.
//!
//! This module provides the abstraction the decoder reads pixels through,
//! an in-memory RGB frame, and loading of image files via the `image`
//! crate. Sources are read-only for the lifetime of a decode.

mod file;
mod frame;
mod pixel;

pub use file::load_frame;
pub use frame::RgbFrame;
pub use pixel::Pixel;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a source cannot supply pixel data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("image file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to decode image {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },
}

/// Trait for anything that can hand out RGB pixels by coordinate.
///
/// Implemented by [`RgbFrame`] and directly by `image::RgbImage`, so
/// callers holding an already decoded image need no copy.
pub trait PixelSource {
    /// Returns `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Returns the pixel at `(x, y)`.
    fn pixel(&self, x: u32, y: u32) -> Result<Pixel, SourceError>;

    /// Returns the total number of pixels.
    fn pixel_count(&self) -> usize {
        let (width, height) = self.dimensions();
        (width as usize).saturating_mul(height as usize)
    }
}

impl PixelSource for image::RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        image::RgbImage::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Result<Pixel, SourceError> {
        let (width, height) = image::RgbImage::dimensions(self);
        self.get_pixel_checked(x, y)
            .map(|p| Pixel::from(p.0))
            .ok_or(SourceError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> Result<Pixel, SourceError> {
        (**self).pixel(x, y)
    }
}
