//! Bit stream accumulated during a decode pass.

use super::PlaneBits;

/// Append-only sequence of extracted bits.
///
/// Bits are packed MSB first into bytes, so every complete group of
/// eight already sits in `data` as the character code it will become.
/// A stream belongs to exactly one decode operation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    /// Packed bits, MSB first.
    data: Vec<u8>,
    /// Number of valid bits.
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stream with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Appends a single bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            if let Some(last) = self.data.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// Appends the bits of one channel extraction, MSB first.
    #[inline]
    pub fn push_plane(&mut self, plane: PlaneBits) {
        for bit in plane.iter() {
            self.push(bit);
        }
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bits that do not fill a final byte.
    #[inline]
    pub fn trailing_bits(&self) -> usize {
        self.len % 8
    }

    /// Returns the complete bytes, leaving out any partial final group.
    #[inline]
    pub fn complete_bytes(&self) -> &[u8] {
        &self.data[..self.len / 8]
    }

    /// Consumes the stream and returns its complete bytes.
    ///
    /// A partial final group is discarded.
    pub fn into_complete_bytes(mut self) -> Vec<u8> {
        self.data.truncate(self.len / 8);
        self.data
    }

    /// Iterates every bit in append order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.data[i / 8] >> (7 - i % 8)) & 1 == 1)
    }
}

impl std::fmt::Debug for BitStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitStream")
            .field("bits", &self.len)
            .field("complete_bytes", &(self.len / 8))
            .field("trailing_bits", &self.trailing_bits())
            .finish()
    }
}
