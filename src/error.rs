use core::fmt::{self, Display, Formatter};
use thiserror::Error;

/// The axis of a grid selection passed to a region inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// A column selected by [`BitMap::invert_column`].
    ///
    /// [`BitMap::invert_column`]: crate::BitMap::invert_column
    Column,
    /// A row selected by [`BitMap::invert_row`].
    ///
    /// [`BitMap::invert_row`]: crate::BitMap::invert_row
    Row,
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Region::Column => f.write_str("Column"),
            Region::Row => f.write_str("Row"),
        }
    }
}

/// Errors reported by [`BitMap`] operations.
///
/// Every error leaves the bitmap untouched.
///
/// [`BitMap`]: crate::BitMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitMapError {
    /// The bit index is not below the bit capacity.
    #[error("Bit index {index} out of bounds for a bitmap of {bit_capacity} bits")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The capacity of the bitmap.
        bit_capacity: usize,
    },
    /// A column or row selector is outside `1..=max`.
    #[error("{region} selection must be between 1-{max}.")]
    InvalidRegion {
        /// Which axis was selected.
        region: Region,
        /// The rejected 1-based selector.
        selected: usize,
        /// The largest valid selector, `0` if the grid has no such region.
        max: usize,
    },
}
