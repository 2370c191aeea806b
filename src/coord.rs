//! Grid coordinates and the letter+number label codec (`"B1"` ↔ `(1, 0)`).

use alloc::string::{String, ToString};
use core::fmt;

use crate::common::EngineError;
use crate::config::MAX_BOARD_SIZE;

/// A 0-indexed cell position: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True when the cell lies inside an `size`×`size` board.
    #[inline]
    pub fn in_bounds(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Orthogonal neighbours that stay on the board, in the order
    /// right, left, down, up.
    pub fn neighbours(self, size: usize) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self;
        [
            x.checked_add(1).map(|nx| Coord::new(nx, y)),
            x.checked_sub(1).map(|nx| Coord::new(nx, y)),
            y.checked_add(1).map(|ny| Coord::new(x, ny)),
            y.checked_sub(1).map(|ny| Coord::new(x, ny)),
        ]
        .into_iter()
        .flatten()
        .filter(move |c| c.in_bounds(size))
    }

    /// True when `other` shares an edge with this cell.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// Parse a label such as `"B1"` for a board of the given size.
    ///
    /// The letter selects the column (case-insensitive), the number is the
    /// 1-based row. Surrounding whitespace is ignored.
    pub fn parse(label: &str, size: usize) -> Result<Coord, EngineError> {
        let malformed = || EngineError::MalformedLabel(label.to_string());
        let trimmed = label.trim();
        let mut chars = trimmed.chars();
        let col_ch = chars.next().ok_or_else(malformed)?.to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(malformed());
        }
        let x = (col_ch as u8 - b'A') as usize;
        let row_str = chars.as_str();
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let row: usize = row_str.parse().map_err(|_| malformed())?;
        if row == 0 {
            return Err(malformed());
        }
        let coord = Coord::new(x, row - 1);
        if !coord.in_bounds(size.min(MAX_BOARD_SIZE)) {
            return Err(malformed());
        }
        Ok(coord)
    }

    /// Render the cell as a label, e.g. `(1, 0)` → `"B1"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x < MAX_BOARD_SIZE {
            write!(f, "{}{}", (b'A' + self.x as u8) as char, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}
