//! Engine defaults and per-game configuration.

use crate::bitgrid::GridError;
use crate::fleet::{FleetSpec, ShipFactory, ShipSpacing};

pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Largest supported board; column labels run out after `Z`.
pub const MAX_BOARD_SIZE: usize = 26;

/// Whole-fleet attempts made by random placement before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Random origins drawn for a single ship within one fleet attempt.
pub const SHIP_DRAWS_PER_ATTEMPT: usize = 100;

/// Everything needed to set up one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: FleetSpec,
    pub spacing: ShipSpacing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            fleet: FleetSpec::classic(),
            spacing: ShipSpacing::Touching,
        }
    }
}

impl GameConfig {
    /// Reject board sizes the grid cannot represent.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(GridError::SizeOutOfRange {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(())
    }

    /// Factory laying out this configuration's fleet.
    pub fn factory(&self) -> ShipFactory {
        ShipFactory::new(self.board_size, self.fleet.clone()).with_spacing(self.spacing)
    }
}
