use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::{
    board::Board,
    common::{CellState, EngineError, ShotResult},
    coord::Coord,
};

/// Read-only view of the opponent's board: only what the attacker's own
/// shots have revealed.
#[derive(Clone, Copy)]
pub struct TargetView<'a> {
    board: &'a Board,
}

impl<'a> TargetView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn cell_state(&self, coord: Coord) -> Result<CellState, EngineError> {
        self.board.cell_state(coord)
    }

    pub fn remaining_ship_count(&self) -> usize {
        self.board.remaining_ship_count()
    }

    pub fn shots_fired(&self) -> usize {
        self.board.shots_received()
    }

    /// Cells not yet fired upon, row-major.
    pub fn unshot_cells(&self) -> Vec<Coord> {
        let size = self.size();
        (0..size * size)
            .map(|i| Coord::new(i % size, i / size))
            .filter(|&c| !self.board.is_shot(c))
            .collect()
    }
}

/// Interface implemented by the different player kinds.
pub trait Player {
    /// Display name.
    fn name(&self) -> &str;

    /// Choose the next cell to fire at on the opponent's board.
    fn choose_target(
        &mut self,
        rng: &mut SmallRng,
        view: &TargetView<'_>,
    ) -> Result<Coord, EngineError>;

    /// Inform the player of the result of the shot it just fired.
    ///
    /// Fails with `ProtocolViolation` if `coord` is not the target this player
    /// last chose.
    fn notify_result(&mut self, coord: Coord, result: ShotResult) -> Result<(), EngineError>;

    /// Whether illegal targets should be answered with a re-prompt rather
    /// than ending the game.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Inform the player that the board refused its last target.
    fn notify_rejected(&mut self, _coord: Coord, _err: &EngineError) {}

    /// Inform the player of an opponent shot against its own board.
    fn observe_opponent_shot(&mut self, _coord: Coord, _result: ShotResult) {}
}

/// Checks that a reported coordinate matches the outstanding target.
pub(crate) fn take_pending(pending: &mut Option<Coord>, coord: Coord) -> Result<(), EngineError> {
    match pending.take() {
        Some(p) if p == coord => Ok(()),
        other => {
            *pending = other;
            log::warn!("result reported for {} which was never targeted", coord);
            Err(EngineError::ProtocolViolation(
                "result reported for a cell that was never targeted",
            ))
        }
    }
}
