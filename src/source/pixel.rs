//! RGB pixel value.

/// A single pixel's red, green and blue channel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    /// Creates a pixel from its three channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Pixel {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Pixel> for [u8; 3] {
    #[inline]
    fn from(p: Pixel) -> Self {
        [p.r, p.g, p.b]
    }
}
