#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{init_logging, simulation::PlayerKind, simulation::Simulation, GameConfig, ShipSpacing};
#[cfg(feature = "std")]
use clap::Parser;

/// Play many unattended games and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    first: PlayerKind,
    #[arg(long, value_enum, default_value_t = PlayerKind::Automatic)]
    second: PlayerKind,
    #[arg(long, default_value_t = broadside::DEFAULT_BOARD_SIZE)]
    size: usize,
    #[arg(long)]
    separated: bool,
    /// Blocking tasks to spread the games over.
    #[arg(long, default_value_t = 4)]
    workers: usize,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = GameConfig {
        board_size: args.size,
        spacing: if args.separated {
            ShipSpacing::Separated
        } else {
            ShipSpacing::Touching
        },
        ..GameConfig::default()
    };
    config.validate()?;

    let sim = Simulation::new(config, args.first, args.second);
    let report = sim.run_parallel(args.games, args.seed, args.workers).await?;
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
