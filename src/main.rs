#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging, ui, AutomaticPlayer, Board, FixedPlacement, Game, GameConfig, ManualPlayer,
    Player, RandomPlacement, RandomPlayer, Seat, ShipSpacing, DEFAULT_BOARD_SIZE,
};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

/// Who sits in each seat for every game mode.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seating {
    Human,
    Random,
    Automatic,
}

#[cfg(feature = "std")]
const MODES: [(Seating, Seating); 6] = [
    (Seating::Human, Seating::Human),
    (Seating::Human, Seating::Random),
    (Seating::Human, Seating::Automatic),
    (Seating::Random, Seating::Random),
    (Seating::Random, Seating::Automatic),
    (Seating::Automatic, Seating::Automatic),
];

#[derive(Parser)]
#[command(author, version, about = "Two-player Battleship in the terminal", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// 0 human-vs-human, 1 human-vs-random, 2 human-vs-automatic,
    /// 3 random-vs-random, 4 random-vs-automatic, 5 automatic-vs-automatic
    #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
    mode: u8,
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Forbid ships from touching, diagonals included.
    #[arg(long)]
    separated: bool,
    /// Use the deterministic fleet layout instead of a random one.
    #[arg(long)]
    fixed: bool,
    /// Show likely ship positions and a suggested target to human players.
    #[arg(long)]
    hints: bool,
}

#[cfg(feature = "std")]
fn build_player(
    seating: Seating,
    seat: usize,
    config: &GameConfig,
    hints: bool,
) -> anyhow::Result<Box<dyn Player>> {
    Ok(match seating {
        Seating::Human => {
            let player = ManualPlayer::stdio(format!("Player {}", seat + 1));
            if hints {
                Box::new(player.with_hints(&config.fleet))
            } else {
                Box::new(player)
            }
        }
        Seating::Random => Box::new(RandomPlayer::new(format!("Player {} (Random)", seat + 1))),
        Seating::Automatic => Box::new(
            AutomaticPlayer::new(
                format!("Player {} (Automatic)", seat + 1),
                config.board_size,
                &config.fleet,
            )?
            .with_spacing(config.spacing),
        ),
    })
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = GameConfig {
        board_size: cli.size,
        spacing: if cli.separated {
            ShipSpacing::Separated
        } else {
            ShipSpacing::Touching
        },
        ..GameConfig::default()
    };
    config.validate()?;

    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let factory = config.factory();
    let (first, second) = MODES[cli.mode as usize];
    let mut seats = Vec::with_capacity(2);
    for (i, seating) in [first, second].into_iter().enumerate() {
        let board = if cli.fixed {
            Board::generate(&factory, &mut FixedPlacement)?
        } else {
            Board::generate(&factory, &mut RandomPlacement::new(&mut rng))?
        };
        seats.push(Seat::new(build_player(seating, i, &config, cli.hints)?, board));
    }
    let second_seat = seats.pop().ok_or_else(|| anyhow::anyhow!("missing seat"))?;
    let first_seat = seats.pop().ok_or_else(|| anyhow::anyhow!("missing seat"))?;

    let mut game = Game::new(first_seat, second_seat);
    let outcome = game.play(&mut rng)?;

    println!();
    for seat in 0..2 {
        let s = game.seat(seat);
        println!("{}'s fleet:", s.player.name());
        print!("{}", ui::render_board(&s.board, true));
        println!();
    }
    println!("{}", ui::legend(true));
    println!(
        "{} WINS THE GAME after {} shots",
        outcome.winner_name, outcome.shots[outcome.winner]
    );
    Ok(())
}
