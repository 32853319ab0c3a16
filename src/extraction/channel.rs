//! Channel ordering and per-pixel bit composition.

use super::{BitMask, BitStream};
use crate::config::ConfigError;
use crate::source::Pixel;
use std::fmt;
use std::str::FromStr;

/// One colour component of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Returns this channel's value in `pixel`.
    #[inline]
    pub fn select(self, pixel: Pixel) -> u8 {
        match self {
            Channel::Red => pixel.r,
            Channel::Green => pixel.g,
            Channel::Blue => pixel.b,
        }
    }

    fn symbol(self) -> char {
        match self {
            Channel::Red => 'R',
            Channel::Green => 'G',
            Channel::Blue => 'B',
        }
    }
}

/// A permutation of the three channels.
///
/// Determines the order each pixel's channel bits are appended to the
/// stream. Only the six permutations of R, G and B can be constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelOrder([Channel; 3]);

impl ChannelOrder {
    pub const RGB: Self = Self([Channel::Red, Channel::Green, Channel::Blue]);
    pub const RBG: Self = Self([Channel::Red, Channel::Blue, Channel::Green]);
    pub const GRB: Self = Self([Channel::Green, Channel::Red, Channel::Blue]);
    pub const GBR: Self = Self([Channel::Green, Channel::Blue, Channel::Red]);
    pub const BRG: Self = Self([Channel::Blue, Channel::Red, Channel::Green]);
    pub const BGR: Self = Self([Channel::Blue, Channel::Green, Channel::Red]);

    /// All six valid orderings.
    pub const ALL: [Self; 6] = [
        Self::RGB,
        Self::RBG,
        Self::GRB,
        Self::GBR,
        Self::BRG,
        Self::BGR,
    ];

    /// Returns the channels in visiting order.
    #[inline]
    pub fn channels(&self) -> [Channel; 3] {
        self.0
    }
}

impl FromStr for ChannelOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|order| order.to_string() == upper)
            .ok_or_else(|| ConfigError::InvalidChannelOrder(s.to_string()))
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in self.0 {
            write!(f, "{}", channel.symbol())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelOrder({})", self)
    }
}

/// Turns pixels into stream bits.
///
/// For each pixel the mask is applied to every channel in the configured
/// order and the results are appended back to back.
#[derive(Debug, Clone, Copy)]
pub struct ChannelComposer {
    mask: BitMask,
    order: ChannelOrder,
}

impl ChannelComposer {
    pub fn new(mask: BitMask, order: ChannelOrder) -> Self {
        Self { mask, order }
    }

    /// Bits appended per pixel.
    #[inline]
    pub fn bits_per_pixel(&self) -> usize {
        self.mask.count() as usize * 3
    }

    /// Appends `pixel`'s selected bits to `stream`.
    #[inline]
    pub fn compose(&self, pixel: Pixel, stream: &mut BitStream) {
        for channel in self.order.channels() {
            stream.push_plane(self.mask.extract(channel.select(pixel)));
        }
    }
}
