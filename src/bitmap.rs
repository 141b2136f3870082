use crate::error::{BitMapError, Region};
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::iter::{FusedIterator, Iterator};
use core::ops::Range;

/// Number of bits stored in one block.
pub const BLOCK_BITS: usize = u32::BITS as usize;

/// Computes the number of 32-bit blocks needed to store `bit_capacity` bits.
///
/// This is the smallest `n` with `n * 32 >= bit_capacity`, so a capacity of
/// zero needs no blocks at all.
///
/// # Examples
/// ```
/// use block_bitmap::block_count;
///
/// assert_eq!(block_count(0), 0);
/// assert_eq!(block_count(25), 1);
/// assert_eq!(block_count(32), 1);
/// assert_eq!(block_count(81), 3);
/// ```
pub const fn block_count(bit_capacity: usize) -> usize {
    bit_capacity.div_ceil(BLOCK_BITS)
}

pub(crate) const fn ones_mask(start_bit: usize, width: usize) -> u32 {
    if width >= BLOCK_BITS {
        // shift would overflow on u32
        !0u32
    } else {
        ((1u32 << width) - 1) << start_bit
    }
}

/// A fixed-capacity bitmap backed by 32-bit blocks.
///
/// Bit `k` lives in block `k / 32` at offset `k % 32`, least significant bit
/// first. The capacity is chosen once in [`new`] and never changes. Bits
/// between the capacity and the end of the last block are padding: they are
/// allocated but never read or written.
///
/// A bitmap can be viewed as a row-major grid with a caller-chosen column
/// count, see [`invert_column`], [`invert_row`] and [`Grid`].
///
/// [`new`]: BitMap::new
/// [`invert_column`]: BitMap::invert_column
/// [`invert_row`]: BitMap::invert_row
/// [`Grid`]: crate::Grid
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct BitMap {
    bit_capacity: usize,
    pub(crate) blocks: Box<[u32]>,
}

impl BitMap {
    /// Creates a new bitmap of `bit_capacity` bits, all unset.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let bitmap = BitMap::new(25);
    /// assert_eq!(bitmap.bit_capacity(), 25);
    /// assert_eq!(bitmap.block_count(), 1);
    /// assert_eq!(bitmap.popcount(), 0);
    /// ```
    pub fn new(bit_capacity: usize) -> Self {
        Self {
            bit_capacity,
            blocks: vec![0u32; block_count(bit_capacity)].into_boxed_slice(),
        }
    }

    /// Returns the number of addressable bits.
    #[inline]
    pub fn bit_capacity(&self) -> usize {
        self.bit_capacity
    }

    /// Returns the number of 32-bit blocks backing the bitmap.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the number of physically allocated bits, padding included.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// assert_eq!(BitMap::new(25).allocated_bits(), 32);
    /// assert_eq!(BitMap::new(81).allocated_bits(), 96);
    /// ```
    #[inline]
    pub fn allocated_bits(&self) -> usize {
        self.blocks.len() * BLOCK_BITS
    }

    /// Returns the raw storage blocks.
    #[inline]
    pub fn blocks(&self) -> &[u32] {
        &self.blocks
    }

    /// Sets the bit at the given index.
    ///
    /// # Errors
    /// Returns [`BitMapError::OutOfRange`] if `idx >= bit_capacity`, leaving
    /// the bitmap unchanged.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::{BitMap, BitMapError};
    ///
    /// let mut bm = BitMap::new(25);
    /// assert_eq!(bm.set(24), Ok(()));
    /// assert_eq!(bm.test(24), Ok(true));
    /// assert_eq!(
    ///     bm.set(25),
    ///     Err(BitMapError::OutOfRange { index: 25, bit_capacity: 25 })
    /// );
    /// ```
    #[inline]
    pub fn set(&mut self, idx: usize) -> Result<(), BitMapError> {
        let (block_idx, mask) = self.locate(idx)?;
        self.blocks[block_idx] |= mask;
        Ok(())
    }

    /// Clears the bit at the given index.
    ///
    /// # Errors
    /// Returns [`BitMapError::OutOfRange`] if `idx >= bit_capacity`, leaving
    /// the bitmap unchanged.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(8);
    /// bm.set(3).unwrap();
    /// bm.clear(3).unwrap();
    /// assert_eq!(bm.test(3), Ok(false));
    /// assert!(bm.clear(8).is_err());
    /// ```
    #[inline]
    pub fn clear(&mut self, idx: usize) -> Result<(), BitMapError> {
        let (block_idx, mask) = self.locate(idx)?;
        self.blocks[block_idx] &= !mask;
        Ok(())
    }

    /// Returns whether the bit at the given index is set.
    ///
    /// # Errors
    /// Returns [`BitMapError::OutOfRange`] if `idx >= bit_capacity`.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(8);
    /// bm.set(1).unwrap();
    /// assert_eq!(bm.test(1), Ok(true));
    /// assert_eq!(bm.test(0), Ok(false));
    /// ```
    #[inline]
    pub fn test(&self, idx: usize) -> Result<bool, BitMapError> {
        let (block_idx, mask) = self.locate(idx)?;
        Ok(self.blocks[block_idx] & mask != 0)
    }

    /// Toggles the bit at the given index.
    ///
    /// Returns the previous value of the bit (before the toggle).
    ///
    /// # Errors
    /// Returns [`BitMapError::OutOfRange`] if `idx >= bit_capacity`, leaving
    /// the bitmap unchanged.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(8);
    /// assert_eq!(bm.toggle(4), Ok(false)); // flipped from false to true
    /// assert_eq!(bm.toggle(4), Ok(true)); // flipped from true to false
    /// ```
    #[inline]
    pub fn toggle(&mut self, idx: usize) -> Result<bool, BitMapError> {
        let (block_idx, mask) = self.locate(idx)?;
        let bit = self.blocks[block_idx] & mask != 0;
        self.blocks[block_idx] ^= mask;
        Ok(bit)
    }

    /// Validates `idx` and returns its block index and single-bit mask.
    #[inline]
    fn locate(&self, idx: usize) -> Result<(usize, u32), BitMapError> {
        if idx >= self.bit_capacity {
            return Err(BitMapError::OutOfRange {
                index: idx,
                bit_capacity: self.bit_capacity,
            });
        }
        let (block_idx, bit_idx) = Self::idxs(idx);
        Ok((block_idx, 1 << bit_idx))
    }

    #[inline]
    fn idxs(idx: usize) -> (usize, usize) {
        (idx / BLOCK_BITS, idx % BLOCK_BITS)
    }

    /// Inverts every addressable bit. Padding bits are left untouched.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(10);
    /// bm.set(2).unwrap();
    /// bm.invert_all();
    /// assert_eq!(bm.popcount(), 9);
    /// assert_eq!(bm.test(2), Ok(false));
    /// ```
    pub fn invert_all(&mut self) {
        self.flip_range(0..self.bit_capacity);
    }

    /// Inverts all bits in the given range.
    ///
    /// An empty range is a no-op.
    ///
    /// # Errors
    /// Returns [`BitMapError::OutOfRange`] for the last index of the range if
    /// `range.end > bit_capacity`, leaving the bitmap unchanged.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(40);
    /// bm.invert_range(30..35).unwrap();
    /// assert_eq!(bm.test(29), Ok(false));
    /// assert_eq!(bm.test(30), Ok(true));
    /// assert_eq!(bm.test(34), Ok(true));
    /// assert_eq!(bm.test(35), Ok(false));
    /// assert!(bm.invert_range(35..41).is_err());
    /// ```
    pub fn invert_range(&mut self, range: Range<usize>) -> Result<(), BitMapError> {
        if range.end > self.bit_capacity {
            return Err(BitMapError::OutOfRange {
                index: range.end - 1,
                bit_capacity: self.bit_capacity,
            });
        }
        self.flip_range(range);
        Ok(())
    }

    /// Treats the bitmap as a row-major grid of `columns` columns and inverts
    /// every bit in the 1-based `column`.
    ///
    /// A trailing partial row only contributes a bit if it reaches the column.
    ///
    /// # Errors
    /// Returns [`BitMapError::InvalidRegion`] unless `1 <= column <= columns`,
    /// leaving the bitmap unchanged.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(25);
    /// bm.invert_column(5, 1).unwrap();
    /// let ones: Vec<usize> = (0..25).filter(|&i| bm.test(i).unwrap()).collect();
    /// assert_eq!(ones, [0, 5, 10, 15, 20]);
    /// assert!(bm.invert_column(5, 6).is_err());
    /// ```
    pub fn invert_column(&mut self, columns: usize, column: usize) -> Result<(), BitMapError> {
        if column == 0 || column > columns {
            return Err(BitMapError::InvalidRegion {
                region: Region::Column,
                selected: column,
                max: columns,
            });
        }
        for idx in (column - 1..self.bit_capacity).step_by(columns) {
            let (block_idx, bit_idx) = Self::idxs(idx);
            self.blocks[block_idx] ^= 1 << bit_idx;
        }
        Ok(())
    }

    /// Returns the number of rows when the bitmap is laid out with `columns`
    /// columns, counting a trailing partial row.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// assert_eq!(BitMap::new(25).row_count(5), 5);
    /// assert_eq!(BitMap::new(26).row_count(5), 6);
    /// assert_eq!(BitMap::new(26).row_count(0), 0);
    /// ```
    #[inline]
    pub fn row_count(&self, columns: usize) -> usize {
        if columns == 0 {
            0
        } else {
            self.bit_capacity.div_ceil(columns)
        }
    }

    /// Treats the bitmap as a row-major grid of `columns` columns and inverts
    /// every bit in the 1-based `row`.
    ///
    /// The last row may be shorter than `columns`; only its existing bits are
    /// inverted.
    ///
    /// # Errors
    /// Returns [`BitMapError::InvalidRegion`] unless
    /// `1 <= row <= row_count(columns)`, leaving the bitmap unchanged.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(25);
    /// bm.invert_row(5, 3).unwrap();
    /// let ones: Vec<usize> = (0..25).filter(|&i| bm.test(i).unwrap()).collect();
    /// assert_eq!(ones, [10, 11, 12, 13, 14]);
    /// assert!(bm.invert_row(5, 6).is_err());
    /// ```
    pub fn invert_row(&mut self, columns: usize, row: usize) -> Result<(), BitMapError> {
        let max = self.row_count(columns);
        if row == 0 || row > max {
            return Err(BitMapError::InvalidRegion {
                region: Region::Row,
                selected: row,
                max,
            });
        }
        let start = (row - 1) * columns;
        let end = start.saturating_add(columns).min(self.bit_capacity);
        self.flip_range(start..end);
        Ok(())
    }

    /// Inverts the bits in `range`, which must lie within the capacity.
    fn flip_range(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }

        let (start_block, start_bit) = Self::idxs(range.start);
        let (end_block, end_bit) = Self::idxs(range.end - 1);

        // all within one block
        if start_block == end_block {
            let width = end_bit - start_bit + 1;
            self.blocks[start_block] ^= ones_mask(start_bit, width);
            return;
        }

        // flip bits in first block
        self.blocks[start_block] ^= !0u32 << start_bit;

        // flip full blocks in between
        for block in &mut self.blocks[start_block + 1..end_block] {
            *block = !*block;
        }

        // flip bits in last block, padding excluded
        self.blocks[end_block] ^= ones_mask(0, end_bit + 1);
    }

    /// Returns the number of set bits in the bitmap.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let bm: BitMap = [true, false, true, false].into_iter().collect();
    /// assert_eq!(bm.popcount(), 2);
    /// ```
    #[inline]
    pub fn popcount(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Returns an iterator over all bits as `bool`, from least to most
    /// significant.
    ///
    /// The iterator yields exactly `bit_capacity` items in order.
    ///
    /// # Examples
    /// ```
    /// use block_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(4);
    /// bm.set(0).unwrap();
    /// bm.set(2).unwrap();
    /// assert_eq!(bm.iter().collect::<Vec<_>>(), [true, false, true, false]);
    /// ```
    #[inline]
    pub fn iter(&self) -> BitMapIter<'_> {
        BitMapIter {
            blocks: &self.blocks,
            bit_capacity: self.bit_capacity,
            block_idx: 0,
            bit_idx: 0,
        }
    }
}

impl<'bitmap> IntoIterator for &'bitmap BitMap {
    type Item = bool;
    type IntoIter = BitMapIter<'bitmap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for BitMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "LSB -> ")?;
        for (i, bit) in self.iter().enumerate() {
            if i % BLOCK_BITS == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
            if i % BLOCK_BITS == BLOCK_BITS - 1 && i + 1 < self.bit_capacity {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")?;
        Ok(())
    }
}

/// Constructs a bitmap whose capacity is the number of `bool`s yielded, where
/// `true` means set.
impl FromIterator<bool> for BitMap {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut blocks = Vec::new();
        let mut bit_capacity = 0;

        for bit in iter {
            let (block_idx, bit_idx) = Self::idxs(bit_capacity);
            if bit_idx == 0 {
                blocks.push(0u32);
            }
            if bit {
                blocks[block_idx] |= 1 << bit_idx;
            }
            bit_capacity += 1;
        }

        Self {
            bit_capacity,
            blocks: blocks.into_boxed_slice(),
        }
    }
}

/// Iterator over all bits in the bitmap as `bool` values.
///
/// Yields `true` for set bits and `false` for unset bits, starting from index 0.
///
/// Returned by [`BitMap::iter()`].
#[derive(Clone, Copy)]
pub struct BitMapIter<'bitmap> {
    blocks: &'bitmap [u32],
    bit_capacity: usize,
    block_idx: usize,
    bit_idx: usize,
}

impl Iterator for BitMapIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let absolute_idx = self.block_idx * BLOCK_BITS + self.bit_idx;
        if absolute_idx >= self.bit_capacity {
            return None;
        }
        let bit = self.blocks[self.block_idx] & 1 << self.bit_idx;
        self.bit_idx += 1;
        if self.bit_idx == BLOCK_BITS {
            self.bit_idx = 0;
            self.block_idx += 1;
        }
        Some(bit != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let consumed = self.block_idx * BLOCK_BITS + self.bit_idx;
        let remaining = self.bit_capacity.saturating_sub(consumed);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitMapIter<'_> {}

impl FusedIterator for BitMapIter<'_> {}
