//! Game board: the fleet it owns and the shots it has received.

use alloc::vec::Vec;
use core::fmt;
use log::debug;

use crate::bitgrid::Grid;
use crate::common::{CellState, EngineError, ShotResult};
use crate::coord::Coord;
use crate::fleet::{PlacementStrategy, ShipFactory};
use crate::ship::Ship;

/// An N×N board owning a fleet.
#[derive(Clone)]
pub struct Board {
    size: usize,
    ships: Vec<Ship>,
    ship_map: Grid,
    shots: Grid,
}

impl Board {
    /// Create an empty board (no ships placed, no shots received).
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Ok(Board {
            size,
            ships: Vec::new(),
            ship_map: Grid::new(size)?,
            shots: Grid::new(size)?,
        })
    }

    /// Create a board and install `ships` on it.
    pub fn with_fleet(size: usize, ships: Vec<Ship>) -> Result<Self, EngineError> {
        let mut board = Board::new(size)?;
        board.place_fleet(ships)?;
        Ok(board)
    }

    /// Create a board holding a fleet laid out by `factory` with `strategy`.
    pub fn generate<S>(factory: &ShipFactory, strategy: &mut S) -> Result<Self, EngineError>
    where
        S: PlacementStrategy + ?Sized,
    {
        Board::with_fleet(factory.size(), factory.generate_fleet(strategy)?)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Occupancy of all ships.
    pub fn ship_map(&self) -> &Grid {
        &self.ship_map
    }

    /// Install a fleet. Nothing is installed if any ship leaves the board or
    /// shares a cell with another.
    pub fn place_fleet(&mut self, ships: Vec<Ship>) -> Result<(), EngineError> {
        let mut map = self.ship_map.clone();
        for ship in &ships {
            for &c in ship.cells() {
                if !c.in_bounds(self.size) {
                    return Err(EngineError::OutOfBounds {
                        coord: c,
                        size: self.size,
                    });
                }
                if !map.set(c)? {
                    return Err(EngineError::Overlap(c));
                }
            }
        }
        self.ship_map = map;
        self.ships.extend(ships);
        Ok(())
    }

    fn check_bounds(&self, coord: Coord) -> Result<(), EngineError> {
        if coord.in_bounds(self.size) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                coord,
                size: self.size,
            })
        }
    }

    /// Resolve a shot at `coord`.
    pub fn receive_shot(&mut self, coord: Coord) -> Result<ShotResult, EngineError> {
        self.check_bounds(coord)?;
        if self.shots.contains(coord) {
            return Err(EngineError::DuplicateShot(coord));
        }
        self.shots.set(coord)?;

        let result = match self.ships.iter_mut().find(|s| s.occupies(coord)) {
            Some(ship) => {
                ship.register_hit(coord)?;
                if ship.is_sunk() {
                    ShotResult::HitAndSunk(ship.len())
                } else {
                    ShotResult::Hit
                }
            }
            None => ShotResult::Miss,
        };
        debug!("shot at {} -> {:?}", coord, result);
        Ok(result)
    }

    /// True when every ship is sunk.
    pub fn is_game_over(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    pub fn remaining_ship_count(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Number of shots received so far.
    pub fn shots_received(&self) -> usize {
        self.shots.count_ones()
    }

    pub fn is_shot(&self, coord: Coord) -> bool {
        self.shots.contains(coord)
    }

    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        self.ships.iter().find(|s| s.occupies(coord))
    }

    /// Public knowledge about one cell.
    pub fn cell_state(&self, coord: Coord) -> Result<CellState, EngineError> {
        self.check_bounds(coord)?;
        if !self.shots.contains(coord) {
            return Ok(CellState::Unknown);
        }
        Ok(match self.ship_at(coord) {
            None => CellState::Miss,
            Some(ship) if ship.is_sunk() => CellState::Sunk,
            Some(_) => CellState::Hit,
        })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  ship_map: {:?},\n  shots: {:?},\n  ships: {:?}\n}}",
            self.size, self.ship_map, self.shots, self.ships
        )
    }
}
