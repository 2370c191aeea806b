//! Commonly used types and utilities for ease of import.

pub use crate::{
    AutomaticPlayer, Board, Coord, EngineError, FixedPlacement, FleetSpec, Game, GameConfig,
    Player, RandomPlacement, RandomPlayer, Seat, ShipFactory, ShipSpacing, ShotResult,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, ManualPlayer};
