//! Per-decode counters.

use serde::{Deserialize, Serialize};

/// Counts collected over one decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Pixels traversed.
    pub pixels_visited: usize,
    /// Bits appended to the stream.
    pub bits_extracted: usize,
    /// Complete 8-bit groups formed.
    pub bytes_assembled: usize,
    /// Bits left over after the last complete group.
    pub trailing_bits: usize,
    /// Characters kept by the printable filter.
    pub chars_retained: usize,
    /// Character codes dropped by the filter.
    pub chars_dropped: usize,
}

impl DecodeStats {
    /// Fraction of assembled bytes that were kept, in [0.0, 1.0].
    pub fn retention_ratio(&self) -> f64 {
        if self.bytes_assembled == 0 {
            return 0.0;
        }
        self.chars_retained as f64 / self.bytes_assembled as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_ratio() {
        let stats = DecodeStats {
            bytes_assembled: 4,
            chars_retained: 3,
            chars_dropped: 1,
            ..Default::default()
        };
        assert!((stats.retention_ratio() - 0.75).abs() < f64::EPSILON);
        assert_eq!(DecodeStats::default().retention_ratio(), 0.0);
    }
}
