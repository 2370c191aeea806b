//! Unattended games between computer players, and the statistics they yield.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    board::Board,
    common::EngineError,
    config::GameConfig,
    fleet::RandomPlacement,
    game::{Game, GameOutcome, Seat},
    player::{Player, TargetView},
    player_ai::AutomaticPlayer,
    player_random::RandomPlayer,
    stats::{ShotStats, ShotSummary},
};

/// Computer player kinds that can take part in a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum, serde::Serialize))]
pub enum PlayerKind {
    Random,
    Automatic,
}

impl PlayerKind {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerKind::Random => "Random",
            PlayerKind::Automatic => "Automatic",
        }
    }

    /// Name used for the player in seat `seat`.
    pub fn player_name(&self, seat: usize) -> String {
        format!("Player {} ({})", seat + 1, self.label())
    }

    /// A fresh player aiming at a board laid out per `config`.
    pub fn build(self, name: String, config: &GameConfig) -> Result<Box<dyn Player>, EngineError> {
        Ok(match self {
            PlayerKind::Random => Box::new(RandomPlayer::new(name)),
            PlayerKind::Automatic => Box::new(
                AutomaticPlayer::new(name, config.board_size, &config.fleet)?
                    .with_spacing(config.spacing),
            ),
        })
    }
}

/// Play one fully seeded game: both fleets are placed at random, then
/// `starting_seat` fires first.
pub fn play_match(
    config: &GameConfig,
    kinds: [PlayerKind; 2],
    seed: u64,
    starting_seat: usize,
) -> Result<GameOutcome, EngineError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let factory = config.factory();
    let mut seats = [None, None];
    for (i, kind) in kinds.into_iter().enumerate() {
        let board = Board::generate(&factory, &mut RandomPlacement::new(&mut rng))?;
        let player = kind.build(kind.player_name(i), config)?;
        seats[i] = Some(Seat::new(player, board));
    }
    let [Some(first), Some(second)] = seats else {
        return Err(EngineError::ProtocolViolation("seat left empty"));
    };
    Game::new(first, second)
        .starting_with(starting_seat)
        .play(&mut rng)
}

/// Shots `player` needs to sink every ship on `board` with nobody firing back.
pub fn clear_board(
    player: &mut dyn Player,
    board: &mut Board,
    rng: &mut SmallRng,
) -> Result<usize, EngineError> {
    let limit = board.size() * board.size();
    while !board.is_game_over() {
        if board.shots_received() >= limit {
            return Err(EngineError::ProtocolViolation("every cell has been fired upon"));
        }
        let target = player.choose_target(rng, &TargetView::new(board))?;
        let result = board.receive_shot(target)?;
        player.notify_result(target, result)?;
    }
    Ok(board.shots_received())
}

/// Wins and winning shot counts per seat.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub games: usize,
    pub wins: [usize; 2],
    pub shots_to_win: [ShotStats; 2],
}

impl Tally {
    pub fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.wins[outcome.winner] += 1;
        self.shots_to_win[outcome.winner].record(outcome.shots[outcome.winner]);
    }

    pub fn merge(&mut self, other: &Tally) {
        self.games += other.games;
        for seat in 0..2 {
            self.wins[seat] += other.wins[seat];
            self.shots_to_win[seat].merge(&other.shots_to_win[seat]);
        }
    }
}

/// Aggregate outcome of a batch of games.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SimulationReport {
    pub games: usize,
    pub names: [String; 2],
    pub wins: [usize; 2],
    pub win_rate: [f64; 2],
    pub shots_to_win: [ShotSummary; 2],
}

/// Repeated games between two player kinds. Game `i` uses seed `seed + i`
/// and is started by seat `i % 2`, so results do not depend on how the
/// games are scheduled.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    kinds: [PlayerKind; 2],
}

impl Simulation {
    pub fn new(config: GameConfig, first: PlayerKind, second: PlayerKind) -> Self {
        Self {
            config,
            kinds: [first, second],
        }
    }

    fn play_range(
        config: &GameConfig,
        kinds: [PlayerKind; 2],
        seed: u64,
        games: impl Iterator<Item = usize>,
    ) -> Result<Tally, EngineError> {
        let mut tally = Tally::default();
        for i in games {
            let outcome = play_match(config, kinds, seed.wrapping_add(i as u64), i % 2)?;
            tally.record(&outcome);
        }
        Ok(tally)
    }

    /// Play `games` games one after another.
    pub fn run(&self, games: usize, seed: u64) -> Result<SimulationReport, EngineError> {
        let tally = Self::play_range(&self.config, self.kinds, seed, 0..games)?;
        Ok(self.report(&tally))
    }

    /// Play `games` games spread over `workers` blocking tasks.
    #[cfg(feature = "std")]
    pub async fn run_parallel(
        &self,
        games: usize,
        seed: u64,
        workers: usize,
    ) -> anyhow::Result<SimulationReport> {
        let workers = workers.max(1);
        let mut set = tokio::task::JoinSet::new();
        for w in 0..workers {
            let config = self.config.clone();
            let kinds = self.kinds;
            set.spawn_blocking(move || {
                Self::play_range(&config, kinds, seed, (w..games).step_by(workers))
            });
        }
        let mut total = Tally::default();
        while let Some(joined) = set.join_next().await {
            total.merge(&joined??);
        }
        Ok(self.report(&total))
    }

    /// Turn a tally into a report.
    pub fn report(&self, tally: &Tally) -> SimulationReport {
        let rate = |wins: usize| {
            if tally.games == 0 {
                0.0
            } else {
                wins as f64 / tally.games as f64
            }
        };
        let report = SimulationReport {
            games: tally.games,
            names: [self.kinds[0].player_name(0), self.kinds[1].player_name(1)],
            wins: tally.wins,
            win_rate: [rate(tally.wins[0]), rate(tally.wins[1])],
            shots_to_win: [
                tally.shots_to_win[0].summary(),
                tally.shots_to_win[1].summary(),
            ],
        };
        info!(
            "{} games: {} won {}, {} won {}",
            report.games, report.names[0], report.wins[0], report.names[1], report.wins[1]
        );
        report
    }
}
