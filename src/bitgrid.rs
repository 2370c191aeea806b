//! A runtime-sized square bit grid packed into unsigned words.
//!
//! Cells are addressed by [`Coord`] and laid out row-major, so iteration
//! yields `(0,0), (1,0), ..., (0,1), ...`. The word type `W` is generic over
//! any unsigned primitive; `u64` is the default.

use alloc::vec;
use alloc::vec::Vec;
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned};

use crate::config::MAX_BOARD_SIZE;
use crate::coord::Coord;

/// Errors returned by bit grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Side length is zero or larger than the supported maximum.
    SizeOutOfRange { size: usize, max: usize },
    /// Cell lies outside the grid.
    IndexOutOfBounds { coord: Coord, size: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::SizeOutOfRange { size, max } => {
                write!(f, "grid size {} is outside 1..={}", size, max)
            }
            GridError::IndexOutOfBounds { coord, size } => {
                write!(f, "cell ({}, {}) is outside a {}x{} grid", coord.x, coord.y, size, size)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GridError {}

/// Square occupancy set of `size`×`size` cells.
#[derive(Clone, PartialEq, Eq)]
pub struct BitGrid<W = u64>
where
    W: PrimInt + Unsigned,
{
    size: usize,
    words: Vec<W>,
}

impl<W> BitGrid<W>
where
    W: PrimInt + Unsigned,
{
    const WORD_BITS: usize = mem::size_of::<W>() * 8;

    /// Create an empty grid.
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GridError::SizeOutOfRange {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        let cells = size * size;
        let len = cells.div_ceil(Self::WORD_BITS);
        Ok(BitGrid {
            size,
            words: vec![W::zero(); len],
        })
    }

    /// Creates a grid with every listed cell set.
    pub fn from_cells<I>(size: usize, cells: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut grid = Self::new(size)?;
        for c in cells {
            grid.set(c)?;
        }
        Ok(grid)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn locate(&self, coord: Coord) -> Result<(usize, usize), GridError> {
        if !coord.in_bounds(self.size) {
            return Err(GridError::IndexOutOfBounds {
                coord,
                size: self.size,
            });
        }
        let idx = coord.y * self.size + coord.x;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    /// Gets the bit at `coord`.
    pub fn get(&self, coord: Coord) -> Result<bool, GridError> {
        let (w, b) = self.locate(coord)?;
        Ok((self.words[w] >> b) & W::one() != W::zero())
    }

    /// Like [`get`](Self::get) but treats off-grid cells as unset.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.get(coord).unwrap_or(false)
    }

    /// Sets the bit at `coord`. Returns `true` if it was previously clear.
    pub fn set(&mut self, coord: Coord) -> Result<bool, GridError> {
        let (w, b) = self.locate(coord)?;
        let mask = W::one() << b;
        let was_clear = self.words[w] & mask == W::zero();
        self.words[w] = self.words[w] | mask;
        Ok(was_clear)
    }

    /// Clears the bit at `coord`.
    pub fn clear(&mut self, coord: Coord) -> Result<(), GridError> {
        let (w, b) = self.locate(coord)?;
        self.words[w] = self.words[w] & !(W::one() << b);
        Ok(())
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// True when both grids share at least one set cell.
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| (*a & *b) != W::zero())
    }

    /// Sets every cell that is set in `other`. Grids must have equal size.
    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.size, other.size);
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a = *a | *b;
        }
    }

    /// Iterator over the set cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        (0..size * size).filter_map(move |idx| {
            let w = idx / Self::WORD_BITS;
            let b = idx % Self::WORD_BITS;
            if (self.words[w] >> b) & W::one() != W::zero() {
                Some(Coord::new(idx % size, idx / size))
            } else {
                None
            }
        })
    }
}

impl<W> fmt::Debug for BitGrid<W>
where
    W: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid<{}>:", self.size)?;
        for y in 0..self.size {
            for x in 0..self.size {
                let bit = if self.contains(Coord::new(x, y)) { '■' } else { '□' };
                write!(f, "{}", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Grid type used throughout the engine.
pub type Grid = BitGrid<u64>;
