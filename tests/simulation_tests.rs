use broadside::simulation::{PlayerKind, Simulation, Tally};
use broadside::{GameConfig, ShipSpacing};

#[test]
fn test_sequential_run_is_reproducible() {
    let sim = Simulation::new(GameConfig::default(), PlayerKind::Random, PlayerKind::Automatic);
    let a = sim.run(20, 3).unwrap();
    let b = sim.run(20, 3).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.games, 20);
    assert_eq!(a.wins[0] + a.wins[1], 20);
    assert_eq!(a.names[0], "Player 1 (Random)");
    assert_eq!(a.names[1], "Player 2 (Automatic)");
    assert!(a.wins[1] > a.wins[0]);
    assert!((a.win_rate[0] + a.win_rate[1] - 1.0).abs() < 1e-9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_parallel_matches_sequential() {
    let config = GameConfig {
        spacing: ShipSpacing::Separated,
        ..GameConfig::default()
    };
    let sim = Simulation::new(config, PlayerKind::Automatic, PlayerKind::Automatic);
    let sequential = sim.run(24, 100).unwrap();
    for workers in [1, 3, 8] {
        let parallel = sim.run_parallel(24, 100, workers).await.unwrap();
        assert_eq!(parallel, sequential, "{} workers", workers);
    }
}

#[test]
fn test_empty_tally_report() {
    let sim = Simulation::new(GameConfig::default(), PlayerKind::Random, PlayerKind::Random);
    let report = sim.report(&Tally::default());
    assert_eq!(report.games, 0);
    assert_eq!(report.win_rate, [0.0, 0.0]);
    assert_eq!(report.shots_to_win[0].count, 0);
}

#[test]
fn test_report_serializes() {
    let sim = Simulation::new(GameConfig::default(), PlayerKind::Automatic, PlayerKind::Random);
    let report = sim.run(4, 9).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["games"], 4);
    assert_eq!(json["names"][0], "Player 1 (Automatic)");
    assert!(json["shots_to_win"][0]["mean"].is_number());
}
