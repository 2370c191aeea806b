use broadside::{
    AutomaticPlayer, Board, Coord, EngineError, FleetSpec, Orientation, Player, RandomPlacement,
    Ship, ShipFactory, ShipSpacing, ShotResult, TargetMode, TargetView,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

/// Fire one shot from `player` at `board`, reporting the result back.
fn fire(player: &mut AutomaticPlayer, board: &mut Board, rng: &mut SmallRng) -> (Coord, ShotResult) {
    let target = player.choose_target(rng, &TargetView::new(board)).unwrap();
    let result = board.receive_shot(target).unwrap();
    player.notify_result(target, result).unwrap();
    (target, result)
}

#[test]
fn test_opening_shot_is_densest_parity_cell() {
    let fleet = FleetSpec::classic();
    let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
    let board = Board::new(10).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(player.mode(), TargetMode::Search);

    let first = player.choose_target(&mut rng, &TargetView::new(&board)).unwrap();
    assert_eq!((first.x + first.y) % 2, 0);
    let density = player.density();
    for y in 0..10 {
        for x in 0..10 {
            if (x + y) % 2 == 0 {
                assert!(density.get(Coord::new(x, y)) <= density.get(first));
            }
        }
    }
}

#[test]
fn test_line_restriction_after_two_hits() {
    let ship = Ship::new(Coord::new(3, 5), Orientation::Horizontal, 4).unwrap();
    let mut board = Board::with_fleet(10, vec![ship]).unwrap();
    let fleet = FleetSpec::new().with(4, 1);
    let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);

    let mut hits = Vec::new();
    while hits.len() < 2 {
        let (c, result) = fire(&mut player, &mut board, &mut rng);
        if result == ShotResult::Hit {
            hits.push(c);
        }
    }
    assert_eq!(player.mode(), TargetMode::Target);
    let candidates: Vec<Coord> = player.candidates().copied().collect();
    assert!(!candidates.is_empty() && candidates.len() <= 2);
    let lo = hits.iter().map(|c| c.x).min().unwrap();
    let hi = hits.iter().map(|c| c.x).max().unwrap();
    for c in &candidates {
        assert_eq!(c.y, 5);
        assert!(c.x + 1 == lo || c.x == hi + 1, "{} is not an end of the line", c);
    }

    let mut shots = 0;
    loop {
        shots += 1;
        let (_, result) = fire(&mut player, &mut board, &mut rng);
        if result == ShotResult::HitAndSunk(4) {
            break;
        }
        assert!(shots <= 4, "line follow-up wandered off");
    }
    assert!(board.is_game_over());
    assert_eq!(player.mode(), TargetMode::Search);
    assert!(player.remaining_lengths().is_empty());
}

#[test]
fn test_back_to_search_after_sink() {
    let ships = vec![
        Ship::new(Coord::new(0, 0), Orientation::Vertical, 2).unwrap(),
        Ship::new(Coord::new(6, 6), Orientation::Horizontal, 3).unwrap(),
    ];
    let mut board = Board::with_fleet(10, ships).unwrap();
    let fleet = FleetSpec::new().with(2, 1).with(3, 1);
    let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
    let mut rng = SmallRng::seed_from_u64(2);

    loop {
        let (_, result) = fire(&mut player, &mut board, &mut rng);
        if let ShotResult::HitAndSunk(len) = result {
            assert_eq!(player.mode(), TargetMode::Search);
            assert_eq!(player.remaining_lengths().len(), 1);
            assert_ne!(player.remaining_lengths()[0], len);
            break;
        }
    }
}

#[test]
fn test_touching_ships_are_both_finished() {
    // two cruisers side by side: hits along a column belong to different ships
    let ships = vec![
        Ship::new(Coord::new(4, 4), Orientation::Horizontal, 3).unwrap(),
        Ship::new(Coord::new(4, 5), Orientation::Horizontal, 3).unwrap(),
    ];
    let mut board = Board::with_fleet(10, ships).unwrap();
    let fleet = FleetSpec::new().with(3, 2);
    let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    let shots = broadside::simulation::clear_board(&mut player, &mut board, &mut rng).unwrap();
    assert!(shots <= 50, "took {} shots", shots);
    assert!(player.remaining_lengths().is_empty());
}

#[test]
fn test_separated_spacing_skips_surroundings() {
    let ship = Ship::new(Coord::new(4, 4), Orientation::Horizontal, 2).unwrap();
    let mut board = Board::with_fleet(10, vec![ship]).unwrap();
    let fleet = FleetSpec::new().with(2, 1).with(3, 1);
    let mut player = AutomaticPlayer::new("auto", 10, &fleet)
        .unwrap()
        .with_spacing(ShipSpacing::Separated);
    let mut rng = SmallRng::seed_from_u64(4);

    while !board.is_game_over() {
        fire(&mut player, &mut board, &mut rng);
    }
    let density = player.density();
    for y in 3..=5 {
        for x in 3..=6 {
            assert_eq!(density.get(Coord::new(x, y)), 0);
        }
    }
    // keep firing: the ring around the sunk ship is never chosen
    for _ in 0..20 {
        let c = player.choose_target(&mut rng, &TargetView::new(&board)).unwrap();
        assert!(!(3..=6).contains(&c.x) || !(3..=5).contains(&c.y));
        let result = board.receive_shot(c).unwrap();
        player.notify_result(c, result).unwrap();
    }
}

#[test]
fn test_result_for_unchosen_cell_is_a_protocol_violation() {
    let fleet = FleetSpec::classic();
    let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
    assert!(matches!(
        player.notify_result(Coord::new(0, 0), ShotResult::Miss),
        Err(EngineError::ProtocolViolation(_))
    ));

    let board = Board::new(10).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);
    let target = player.choose_target(&mut rng, &TargetView::new(&board)).unwrap();
    let other = if target == Coord::new(0, 0) { Coord::new(1, 0) } else { Coord::new(0, 0) };
    assert!(matches!(
        player.notify_result(other, ShotResult::Miss),
        Err(EngineError::ProtocolViolation(_))
    ));
    // the real target is still outstanding
    player.notify_result(target, ShotResult::Miss).unwrap();
    assert!(player.notify_result(target, ShotResult::Miss).is_err());
}

#[test]
fn test_long_row_of_touching_ships_on_largest_board() {
    // twenty destroyers standing side by side, then a ship of length 20 below
    let mut ships: Vec<Ship> = (0..20)
        .map(|x| Ship::new(Coord::new(x, 0), Orientation::Vertical, 2).unwrap())
        .collect();
    ships.push(Ship::new(Coord::new(0, 20), Orientation::Horizontal, 20).unwrap());
    let mut board = Board::with_fleet(26, ships).unwrap();
    let fleet = FleetSpec::new().with(2, 20).with(20, 1);
    let mut player = AutomaticPlayer::new("auto", 26, &fleet).unwrap();
    let mut rng = SmallRng::seed_from_u64(26);

    let shots = broadside::simulation::clear_board(&mut player, &mut board, &mut rng).unwrap();
    assert!(board.is_game_over());
    assert!(shots <= 26 * 26);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn first_hit_is_followed_by_a_neighbour(seed in any::<u64>()) {
        let fleet = FleetSpec::classic();
        let factory = ShipFactory::new(10, fleet.clone());
        let mut board = Board::generate(&factory, &mut RandomPlacement::new(SmallRng::seed_from_u64(seed))).unwrap();
        let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);

        let hit = loop {
            let (c, result) = fire(&mut player, &mut board, &mut rng);
            if result.is_hit() {
                break c;
            }
        };
        prop_assert_eq!(player.mode(), TargetMode::Target);
        let (next, _) = fire(&mut player, &mut board, &mut rng);
        prop_assert!(next.is_adjacent(&hit), "{} does not neighbour {}", next, hit);
    }

    #[test]
    fn clears_any_board_without_repeating(seed in any::<u64>()) {
        let fleet = FleetSpec::classic();
        let factory = ShipFactory::new(10, fleet.clone());
        let mut board = Board::generate(&factory, &mut RandomPlacement::new(SmallRng::seed_from_u64(seed))).unwrap();
        let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let shots = broadside::simulation::clear_board(&mut player, &mut board, &mut rng).unwrap();
        prop_assert!(shots <= 100);
        prop_assert!(player.remaining_lengths().is_empty());
    }
}
