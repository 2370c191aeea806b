use broadside::{
    simulation::{clear_board, play_match, PlayerKind},
    AutomaticPlayer, Board, FixedPlacement, FleetSpec, GameConfig, Player, RandomPlacement,
    RandomPlayer, ShipFactory,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn small_fleet() -> FleetSpec {
    FleetSpec::new().with(5, 1).with(4, 1).with(3, 1).with(2, 1)
}

#[test]
fn test_automatic_clears_fixed_board() {
    let fleet = small_fleet();
    let factory = ShipFactory::new(10, fleet.clone());
    let mut board = Board::generate(&factory, &mut FixedPlacement).unwrap();
    let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let shots = clear_board(&mut player, &mut board, &mut rng).unwrap();
    assert!(shots <= 100, "needed {} shots", shots);
    assert!(board.is_game_over());
}

#[test]
fn test_automatic_beats_random_on_average() {
    let fleet = small_fleet();
    let factory = ShipFactory::new(10, fleet.clone());
    let mut rng = SmallRng::seed_from_u64(2024);
    let games = 1000;
    let (mut auto_total, mut random_total) = (0usize, 0usize);

    for _ in 0..games {
        let layout = factory
            .generate_fleet(&mut RandomPlacement::new(&mut rng))
            .unwrap();

        let mut board = Board::with_fleet(10, layout.clone()).unwrap();
        let mut auto = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
        auto_total += clear_board(&mut auto, &mut board, &mut rng).unwrap();

        let mut board = Board::with_fleet(10, layout).unwrap();
        let mut random = RandomPlayer::new("random");
        random_total += clear_board(&mut random, &mut board, &mut rng).unwrap();
    }

    let auto_mean = auto_total as f64 / games as f64;
    let random_mean = random_total as f64 / games as f64;
    assert!(
        auto_mean < random_mean,
        "automatic {:.1} vs random {:.1}",
        auto_mean,
        random_mean
    );
}

#[test]
fn test_random_player_never_repeats() {
    let fleet = FleetSpec::classic();
    let factory = ShipFactory::new(8, fleet);
    let mut rng = SmallRng::seed_from_u64(9);
    let mut board = Board::generate(&factory, &mut FixedPlacement).unwrap();
    let mut player = RandomPlayer::new("random");
    let shots = clear_board(&mut player, &mut board, &mut rng).unwrap();
    assert!(shots <= 64);
    assert_eq!(player.name(), "random");
}

#[test]
fn test_match_between_computers() {
    let config = GameConfig::default();
    for seed in 0..10 {
        let outcome =
            play_match(&config, [PlayerKind::Random, PlayerKind::Automatic], seed, 0).unwrap();
        let loser = 1 - outcome.winner;
        // seat 0 fires first, so it is never behind and at most one shot ahead
        assert!(outcome.shots[0] == outcome.shots[1] || outcome.shots[0] == outcome.shots[1] + 1);
        assert_eq!(outcome.turns, outcome.shots[0] + outcome.shots[1]);
        assert!(outcome.shots[outcome.winner] >= config.fleet.total_cells());
        assert!(outcome.shots[loser] <= 100);
        assert_eq!(
            outcome.winner_name,
            [PlayerKind::Random, PlayerKind::Automatic][outcome.winner].player_name(outcome.winner)
        );
    }
}

#[test]
fn test_match_is_reproducible() {
    let config = GameConfig::default();
    let kinds = [PlayerKind::Automatic, PlayerKind::Automatic];
    let a = play_match(&config, kinds, 77, 1).unwrap();
    let b = play_match(&config, kinds, 77, 1).unwrap();
    assert_eq!(a, b);
    assert!(a.shots[1] == a.shots[0] || a.shots[1] == a.shots[0] + 1);
}
