//! Printable character filter.
//!
//! Only plain ASCII payloads are recovered. Codes outside the printable
//! range are dropped without a placeholder, which means a payload in any
//! other encoding loses bytes and its remaining characters shift.

/// Line feed.
pub const LF: u8 = 10;
/// Carriage return.
pub const CR: u8 = 13;

/// Decides which assembled character codes reach the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintableFilter;

impl PrintableFilter {
    /// Returns true for printable ASCII (32..=126), LF and CR.
    #[inline]
    pub fn accepts(&self, code: u8) -> bool {
        matches!(code, 32..=126 | LF | CR)
    }

    /// Appends every accepted code in `bytes` to `out`.
    ///
    /// Returns the number of codes that were dropped.
    pub fn filter_into(&self, bytes: &[u8], out: &mut String) -> usize {
        let mut dropped = 0;
        for &code in bytes {
            if self.accepts(code) {
                out.push(char::from(code));
            } else {
                dropped += 1;
            }
        }
        dropped
    }
}
