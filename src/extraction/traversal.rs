//! Pixel traversal planning.
//!
//! The traversal decides the order pixels contribute to the bit stream
//! and therefore the order the payload is reconstructed in. Decoding an
//! image with the other mode than it was embedded with does not fail;
//! it silently produces scrambled output.

use crate::config::ConfigError;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

/// Pixel visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraversalMode {
    /// Rows outer, columns inner: `for y { for x { .. } }`.
    RowMajor,
    /// Columns outer, rows inner: `for x { for y { .. } }`.
    #[default]
    ColumnMajor,
}

impl FromStr for TraversalMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(TraversalMode::RowMajor),
            "column" => Ok(TraversalMode::ColumnMajor),
            _ => Err(ConfigError::InvalidTraversalMode(s.to_string())),
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TraversalMode::RowMajor => "row",
            TraversalMode::ColumnMajor => "column",
        })
    }
}

/// A traversal plan over a `width` x `height` image.
///
/// The plan is a value; every call to [`iter`](Self::iter) starts a
/// fresh pass covering each coordinate exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    width: u32,
    height: u32,
    mode: TraversalMode,
}

impl Traversal {
    pub fn new(width: u32, height: u32, mode: TraversalMode) -> Self {
        Self {
            width,
            height,
            mode,
        }
    }

    /// Number of coordinates in one pass.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a new pass over the coordinates.
    pub fn iter(&self) -> Coordinates {
        Coordinates {
            plan: *self,
            next: 0,
            end: self.len(),
        }
    }

    fn coordinate(&self, index: usize) -> (u32, u32) {
        match self.mode {
            TraversalMode::RowMajor => {
                let w = self.width as usize;
                ((index % w) as u32, (index / w) as u32)
            }
            TraversalMode::ColumnMajor => {
                let h = self.height as usize;
                ((index / h) as u32, (index % h) as u32)
            }
        }
    }
}

impl IntoIterator for Traversal {
    type Item = (u32, u32);
    type IntoIter = Coordinates;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy `(x, y)` sequence produced by a [`Traversal`].
#[derive(Debug, Clone)]
pub struct Coordinates {
    plan: Traversal,
    next: usize,
    end: usize,
}

impl Iterator for Coordinates {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let coordinate = self.plan.coordinate(self.next);
        self.next += 1;
        Some(coordinate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coordinates {}
impl FusedIterator for Coordinates {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_row_major_order() {
        let coords: Vec<_> = Traversal::new(3, 2, TraversalMode::RowMajor).iter().collect();
        assert_eq!(coords, [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_column_major_order() {
        let coords: Vec<_> = Traversal::new(3, 2, TraversalMode::ColumnMajor)
            .iter()
            .collect();
        assert_eq!(coords, [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_empty_image() {
        let plan = Traversal::new(0, 5, TraversalMode::RowMajor);
        assert!(plan.is_empty());
        assert_eq!(plan.iter().next(), None);
    }

    #[test]
    fn test_restartable() {
        let plan = Traversal::new(4, 4, TraversalMode::ColumnMajor);
        let mut first = plan.iter();
        first.next();
        first.next();

        assert_eq!(first.len(), 14);
        assert_eq!(plan.iter().len(), 16);
        assert_eq!(plan.iter().collect::<Vec<_>>(), plan.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("row".parse::<TraversalMode>().unwrap(), TraversalMode::RowMajor);
        assert_eq!("column".parse::<TraversalMode>().unwrap(), TraversalMode::ColumnMajor);
        for bad in ["zigzag", "Column", "ROW", "cOlUmN", " row", ""] {
            assert_eq!(
                bad.parse::<TraversalMode>(),
                Err(ConfigError::InvalidTraversalMode(bad.to_string()))
            );
        }
    }

    proptest! {
        #[test]
        fn covers_every_pixel_once(width in 0u32..24, height in 0u32..24, row in any::<bool>()) {
            let mode = if row { TraversalMode::RowMajor } else { TraversalMode::ColumnMajor };
            let plan = Traversal::new(width, height, mode);
            let coords: Vec<_> = plan.iter().collect();
            let unique: HashSet<_> = coords.iter().copied().collect();

            prop_assert_eq!(coords.len(), (width * height) as usize);
            prop_assert_eq!(unique.len(), coords.len());
            prop_assert!(coords.iter().all(|&(x, y)| x < width && y < height));
        }
    }
}
