use crate::bitmap::BitMap;
use alloc::string::{String, ToString};
use core::fmt::{self, Display, Formatter};

/// A row-major text view of a [`BitMap`].
///
/// Bits are written as `0`/`1` tokens in increasing index order, separated by
/// single spaces, with a line break after every `columns` tokens. The last
/// line is always terminated, including a trailing partial row. Padding bits
/// are never written. A column count of zero disables wrapping.
///
/// # Examples
/// ```
/// use block_bitmap::{BitMap, Grid};
///
/// let mut bm = BitMap::new(7);
/// bm.set(0).unwrap();
/// bm.set(4).unwrap();
/// assert_eq!(Grid::new(&bm, 3).to_string(), "1 0 0\n0 1 0\n0\n");
/// ```
#[derive(Clone, Copy)]
pub struct Grid<'bitmap> {
    bitmap: &'bitmap BitMap,
    columns: usize,
}

impl<'bitmap> Grid<'bitmap> {
    /// Creates a grid view of `bitmap` with `columns` tokens per line.
    pub fn new(bitmap: &'bitmap BitMap, columns: usize) -> Self {
        Self { bitmap, columns }
    }
}

impl Display for Grid<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, bit) in self.bitmap.iter().enumerate() {
            if i != 0 {
                if self.columns != 0 && i % self.columns == 0 {
                    f.write_str("\n")?;
                } else {
                    f.write_str(" ")?;
                }
            }
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("\n")
    }
}

/// Renders `bitmap` as a grid of `columns` columns.
///
/// Shorthand for `Grid::new(bitmap, columns).to_string()`.
///
/// # Examples
/// ```
/// use block_bitmap::{BitMap, render};
///
/// let mut bm = BitMap::new(25);
/// bm.set(0).unwrap();
/// let text = render(&bm, 5);
/// assert_eq!(text.lines().count(), 5);
/// assert_eq!(text.lines().next(), Some("1 0 0 0 0"));
/// ```
pub fn render(bitmap: &BitMap, columns: usize) -> String {
    Grid::new(bitmap, columns).to_string()
}
