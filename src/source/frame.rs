//! In-memory RGB frame.

use super::{Pixel, PixelSource, SourceError};

/// A decoded image held as packed RGB triples in row-major order.
///
/// This is the form every file is converted to before decoding;
/// alpha and higher bit depths are already flattened away.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbFrame {
    /// Packed `[r, g, b, r, g, b, ...]` bytes.
    pixels: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
}

impl RgbFrame {
    /// Creates a frame from a packed RGB buffer.
    ///
    /// Fails if the buffer length does not equal `width * height * 3`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, SourceError> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(SourceError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Builds a frame by calling `f(x, y)` for every coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Pixel) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 3);
        for y in 0..height {
            for x in 0..width {
                let p = f(x, y);
                pixels.extend_from_slice(&[p.r, p.g, p.b]);
            }
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Returns the packed RGB bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl PixelSource for RgbFrame {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u32, y: u32) -> Result<Pixel, SourceError> {
        if x >= self.width || y >= self.height {
            return Err(SourceError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let offset = ((y as usize) * (self.width as usize) + x as usize) * 3;
        Ok(Pixel::new(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ))
    }
}

impl From<image::RgbImage> for RgbFrame {
    fn from(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            pixels: img.into_raw(),
            width,
            height,
        }
    }
}

impl std::fmt::Debug for RgbFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = RgbFrame::new(vec![0u8; 4 * 3 * 3], 4, 3).unwrap();

        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.pixel_count(), 12);
    }

    #[test]
    fn test_frame_invalid_size() {
        let result = RgbFrame::new(vec![0u8; 100], 640, 480);

        assert!(matches!(
            result,
            Err(SourceError::InvalidBuffer {
                expected: 921_600,
                actual: 100
            })
        ));
    }

    #[test]
    fn test_pixel_addressing_is_row_major() {
        let frame = RgbFrame::from_fn(3, 2, |x, y| Pixel::new(x as u8, y as u8, 0xEE));

        assert_eq!(frame.pixel(0, 0).unwrap(), Pixel::new(0, 0, 0xEE));
        assert_eq!(frame.pixel(2, 1).unwrap(), Pixel::new(2, 1, 0xEE));
        assert_eq!(&frame.as_bytes()[9..12], &[0, 1, 0xEE]);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let frame = RgbFrame::from_fn(2, 2, |_, _| Pixel::default());
        assert!(matches!(
            frame.pixel(0, 2),
            Err(SourceError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_from_rgb_image() {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let frame = RgbFrame::from(img);

        assert_eq!(frame.dimensions(), (2, 2));
        assert_eq!(frame.pixel(1, 1).unwrap(), Pixel::new(1, 2, 3));
    }
}
