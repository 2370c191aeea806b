//! A single placed vessel: the cells it occupies and the damage it has taken.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{EngineError, ShipDefect};
use crate::coord::Coord;

/// Orientation of a ship on the board. Single-cell ships report `Horizontal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps from `origin` along this orientation.
    #[inline]
    pub fn step(self, origin: Coord, offset: usize) -> Coord {
        match self {
            Orientation::Horizontal => Coord::new(origin.x + offset, origin.y),
            Orientation::Vertical => Coord::new(origin.x, origin.y + offset),
        }
    }
}

/// A ship occupying a straight run of cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    cells: Vec<Coord>,
    orientation: Orientation,
    hits: BTreeSet<Coord>,
}

impl Ship {
    /// Build a ship from an arbitrary ordering of its cells.
    ///
    /// Fails if the cells are empty, repeat, do not share a row or column,
    /// or leave a gap.
    pub fn from_cells<I>(cells: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut cells: Vec<Coord> = cells.into_iter().collect();
        let first = *cells.first().ok_or(EngineError::InvalidShip(ShipDefect::Empty))?;

        let unique: BTreeSet<Coord> = cells.iter().copied().collect();
        if unique.len() != cells.len() {
            return Err(EngineError::InvalidShip(ShipDefect::Duplicate));
        }

        let orientation = if cells.iter().all(|c| c.y == first.y) {
            cells.sort_by_key(|c| c.x);
            Orientation::Horizontal
        } else if cells.iter().all(|c| c.x == first.x) {
            cells.sort_by_key(|c| c.y);
            Orientation::Vertical
        } else {
            return Err(EngineError::InvalidShip(ShipDefect::Diagonal));
        };

        if cells.windows(2).any(|w| !w[0].is_adjacent(&w[1])) {
            return Err(EngineError::InvalidShip(ShipDefect::Gap));
        }

        Ok(Ship {
            cells,
            orientation,
            hits: BTreeSet::new(),
        })
    }

    /// Place a ship of `length` cells starting at `origin`.
    pub fn new(origin: Coord, orientation: Orientation, length: usize) -> Result<Self, EngineError> {
        if length == 0 {
            return Err(EngineError::InvalidShip(ShipDefect::Empty));
        }
        let cells = (0..length).map(|i| orientation.step(origin, i)).collect();
        Ok(Ship {
            cells,
            orientation: if length == 1 { Orientation::Horizontal } else { orientation },
            hits: BTreeSet::new(),
        })
    }

    /// Ship spanning two endpoints, given in either order.
    pub fn from_ends(start: Coord, end: Coord) -> Result<Self, EngineError> {
        if start.x != end.x && start.y != end.y {
            return Err(EngineError::InvalidShip(ShipDefect::Diagonal));
        }
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        if lo.y == hi.y {
            Ship::new(lo, Orientation::Horizontal, hi.x - lo.x + 1)
        } else {
            let (lo, hi) = if start.y <= end.y { (start, end) } else { (end, start) };
            Ship::new(lo, Orientation::Vertical, hi.y - lo.y + 1)
        }
    }

    /// Record a hit on `coord`. Returns `Ok(true)` if the cell was intact,
    /// `Ok(false)` if it was already damaged.
    pub fn register_hit(&mut self, coord: Coord) -> Result<bool, EngineError> {
        if !self.occupies(coord) {
            return Err(EngineError::OutOfRange(coord));
        }
        Ok(self.hits.insert(coord))
    }

    /// True once every cell has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.cells.len()
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn is_hit_at(&self, coord: Coord) -> bool {
        self.hits.contains(&coord)
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// First and last cell.
    pub fn ends(&self) -> (Coord, Coord) {
        (self.cells[0], self.cells[self.cells.len() - 1])
    }

    /// True if `coord` is on or next to the ship, diagonals included.
    pub fn is_near(&self, coord: Coord) -> bool {
        let (lo, hi) = self.ends();
        lo.x.saturating_sub(1) <= coord.x
            && coord.x <= hi.x + 1
            && lo.y.saturating_sub(1) <= coord.y
            && coord.y <= hi.y + 1
    }

    /// True if any cell of `other` is on or next to this ship.
    pub fn is_near_ship(&self, other: &Ship) -> bool {
        other.cells.iter().any(|c| self.is_near(*c))
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = self.ends();
        write!(
            f,
            "Ship {{ from: {}, to: {}, orientation: {:?}, hits: {} }}",
            lo,
            hi,
            self.orientation,
            self.hits.len(),
        )
    }
}
