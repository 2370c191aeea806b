use alloc::boxed::Box;
use alloc::string::String;
use log::{debug, error, info};
use rand::rngs::SmallRng;

use crate::{
    board::Board,
    common::{EngineError, ShotResult},
    coord::Coord,
    player::{Player, TargetView},
};

/// A player together with the board holding its own fleet.
pub struct Seat {
    pub player: Box<dyn Player>,
    pub board: Board,
}

impl Seat {
    pub fn new(player: Box<dyn Player>, board: Board) -> Self {
        Self { player, board }
    }
}

/// One resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub shooter: usize,
    pub target: Coord,
    pub result: ShotResult,
}

/// Final result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameOutcome {
    /// Seat index (0 or 1) of the winner.
    pub winner: usize,
    pub winner_name: String,
    /// Shots fired by each seat.
    pub shots: [usize; 2],
    pub turns: usize,
}

/// Two seats taking strictly alternating shots at each other's board.
pub struct Game {
    seats: [Seat; 2],
    turn: usize,
    shots: [usize; 2],
    turns: usize,
}

impl Game {
    pub fn new(first: Seat, second: Seat) -> Self {
        Self {
            seats: [first, second],
            turn: 0,
            shots: [0, 0],
            turns: 0,
        }
    }

    /// Let seat `seat` (0 or 1) fire first.
    pub fn starting_with(mut self, seat: usize) -> Self {
        self.turn = seat % 2;
        self
    }

    pub fn seat(&self, index: usize) -> &Seat {
        &self.seats[index % 2]
    }

    /// Seat to fire next.
    pub fn current(&self) -> usize {
        self.turn
    }

    /// Seat whose opponent has lost every ship, if any.
    pub fn winner(&self) -> Option<usize> {
        if self.seats[1].board.is_game_over() {
            Some(0)
        } else if self.seats[0].board.is_game_over() {
            Some(1)
        } else {
            None
        }
    }

    /// Play one shot for the current seat.
    ///
    /// Interactive players are asked again after an out-of-bounds or
    /// repeated target; for any other player such a target is returned as
    /// an error and the game cannot continue.
    pub fn play_turn(&mut self, rng: &mut SmallRng) -> Result<TurnReport, EngineError> {
        let shooter = self.turn;
        let (left, right) = self.seats.split_at_mut(1);
        let (attacker, defender) = if shooter == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        };

        let limit = defender.board.size() * defender.board.size();
        if defender.board.shots_received() >= limit {
            return Err(EngineError::ProtocolViolation("every cell has been fired upon"));
        }

        let (target, result) = loop {
            let target = attacker
                .player
                .choose_target(rng, &TargetView::new(&defender.board))?;
            match defender.board.receive_shot(target) {
                Ok(result) => break (target, result),
                Err(e) if e.is_recoverable() && attacker.player.is_interactive() => {
                    attacker.player.notify_rejected(target, &e);
                }
                Err(e) => {
                    error!("{} chose an illegal target {}: {}", attacker.player.name(), target, e);
                    return Err(e);
                }
            }
        };

        attacker.player.notify_result(target, result)?;
        defender.player.observe_opponent_shot(target, result);
        debug!("{} fires at {} -> {:?}", attacker.player.name(), target, result);

        self.shots[shooter] += 1;
        self.turns += 1;
        self.turn = 1 - shooter;
        Ok(TurnReport {
            shooter,
            target,
            result,
        })
    }

    /// Alternate turns until one fleet is sunk.
    pub fn play(&mut self, rng: &mut SmallRng) -> Result<GameOutcome, EngineError> {
        loop {
            if let Some(winner) = self.winner() {
                let outcome = GameOutcome {
                    winner,
                    winner_name: String::from(self.seats[winner].player.name()),
                    shots: self.shots,
                    turns: self.turns,
                };
                info!(
                    "{} wins after {} shots ({} turns)",
                    outcome.winner_name, outcome.shots[winner], outcome.turns
                );
                return Ok(outcome);
            }
            self.play_turn(rng)?;
        }
    }
}
