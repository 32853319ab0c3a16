//! Bit-plane selection.
//!
//! A [`BitMask`] marks which of the eight bit positions of a channel
//! value carry payload. Position 0 is the most significant bit and
//! position 7 the least significant, matching how masks are written
//! (`"10000000"` selects the MSB, `"00000001"` the LSB).

use crate::config::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Selected bit positions of an 8-bit channel value.
///
/// Always selects at least one position; the all-clear mask cannot be
/// constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitMask([bool; 8]);

impl BitMask {
    /// Least significant bit only.
    pub const LSB: Self = Self([false, false, false, false, false, false, false, true]);
    /// Most significant bit only.
    pub const MSB: Self = Self([true, false, false, false, false, false, false, false]);

    /// Creates a mask from eight positions, MSB first.
    pub fn new(positions: [bool; 8]) -> Result<Self, ConfigError> {
        if !positions.iter().any(|&p| p) {
            return Err(ConfigError::EmptyMask);
        }
        Ok(Self(positions))
    }

    /// Returns the selected positions, MSB first.
    #[inline]
    pub fn positions(&self) -> [bool; 8] {
        self.0
    }

    /// Number of bits taken from each channel value.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.iter().filter(|&&p| p).count() as u32
    }

    /// Pulls the selected bits out of `value`.
    ///
    /// The result keeps the bits in MSB to LSB order and always holds
    /// exactly [`count`](Self::count) bits.
    #[inline]
    pub fn extract(&self, value: u8) -> PlaneBits {
        let mut bits = 0u8;
        let mut len = 0u8;
        for (position, &selected) in self.0.iter().enumerate() {
            if selected {
                bits = (bits << 1) | ((value >> (7 - position)) & 1);
                len += 1;
            }
        }
        PlaneBits { bits, len }
    }
}

impl FromStr for BitMask {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 8 {
            return Err(ConfigError::InvalidMaskLength { len });
        }
        let mut positions = [false; 8];
        for (index, ch) in s.chars().enumerate() {
            positions[index] = match ch {
                '0' => false,
                '1' => true,
                _ => return Err(ConfigError::InvalidMaskChar { ch, index }),
            };
        }
        Self::new(positions)
    }
}

impl fmt::Display for BitMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &p in &self.0 {
            f.write_str(if p { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitMask({})", self)
    }
}

/// Bits taken from one channel value, right-aligned in `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneBits {
    bits: u8,
    len: u8,
}

impl PlaneBits {
    /// Right-aligned bit values.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Number of valid bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates the bits in order, most significant first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |shift| (self.bits >> shift) & 1 == 1)
    }
}
