//! Common types for the engine: shot results, cell states and errors.

use alloc::string::String;
use core::fmt;

use crate::bitgrid::GridError;
use crate::coord::Coord;

/// Outcome of a shot resolved by a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// The shot landed in open water.
    Miss,
    /// The shot struck a ship that is still afloat.
    Hit,
    /// The shot struck the last intact cell of a ship, carrying its length.
    HitAndSunk(usize),
}

impl ShotResult {
    /// True for `Hit` and `HitAndSunk`.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// What an observer of a board may know about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Unknown,
    Miss,
    Hit,
    Sunk,
}

/// Why a sequence of cells cannot form a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipDefect {
    Empty,
    Duplicate,
    Diagonal,
    Gap,
}

impl fmt::Display for ShipDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipDefect::Empty => write!(f, "no cells"),
            ShipDefect::Duplicate => write!(f, "duplicate cells"),
            ShipDefect::Diagonal => write!(f, "cells are neither in one row nor in one column"),
            ShipDefect::Gap => write!(f, "cells are not contiguous"),
        }
    }
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Underlying bit grid error.
    Grid(GridError),
    /// Cells do not describe a straight, gap-free ship.
    InvalidShip(ShipDefect),
    /// A ship was asked to record a hit on a cell it does not occupy.
    OutOfRange(Coord),
    /// No legal layout for the fleet was found within the attempt budget.
    UnplaceableFleet { attempts: usize },
    /// Two ships claim the same cell (or touch when spacing forbids it).
    Overlap(Coord),
    /// Shot or query outside the board.
    OutOfBounds { coord: Coord, size: usize },
    /// The cell has already been fired upon.
    DuplicateShot(Coord),
    /// The engine was driven in a way its own invariants forbid.
    ProtocolViolation(&'static str),
    /// A coordinate label could not be parsed for this board.
    MalformedLabel(String),
    /// Interactive input ended before a target was chosen.
    InputClosed,
}

impl EngineError {
    /// Errors a manual player may recover from by choosing again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::OutOfBounds { .. }
                | EngineError::DuplicateShot(_)
                | EngineError::MalformedLabel(_)
        )
    }
}

impl From<GridError> for EngineError {
    fn from(err: GridError) -> Self {
        EngineError::Grid(err)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Grid(e) => write!(f, "grid error: {}", e),
            EngineError::InvalidShip(d) => write!(f, "invalid ship: {}", d),
            EngineError::OutOfRange(c) => write!(f, "{} is not part of this ship", c),
            EngineError::UnplaceableFleet { attempts } => {
                write!(f, "could not place fleet after {} attempts", attempts)
            }
            EngineError::Overlap(c) => write!(f, "ships overlap or touch at {}", c),
            EngineError::OutOfBounds { coord, size } => {
                write!(f, "{} is outside the {}x{} board", coord, size, size)
            }
            EngineError::DuplicateShot(c) => write!(f, "{} has already been fired upon", c),
            EngineError::ProtocolViolation(what) => write!(f, "protocol violation: {}", what),
            EngineError::MalformedLabel(l) => write!(f, "malformed coordinate label {:?}", l),
            EngineError::InputClosed => write!(f, "input closed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
