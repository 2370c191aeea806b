#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitgrid;
mod board;
mod common;
mod config;
mod coord;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
mod player_ai;
#[cfg(feature = "std")]
mod player_cli;
mod player_random;
pub mod prelude;
pub mod simulation;
mod ship;
pub mod stats;
pub mod targeting;
#[cfg(feature = "std")]
pub mod ui;

pub use bitgrid::{BitGrid, Grid, GridError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::Coord;
pub use fleet::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
pub use player::{Player, TargetView};
pub use player_ai::*;
#[cfg(feature = "std")]
pub use player_cli::*;
pub use player_random::*;
pub use ship::*;
