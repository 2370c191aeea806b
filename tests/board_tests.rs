use broadside::{
    Board, CellState, Coord, EngineError, FixedPlacement, FleetSpec, Orientation, Ship,
    ShipFactory, ShotResult,
};

fn cruiser_board() -> Board {
    let ship = Ship::from_cells([Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]).unwrap();
    Board::with_fleet(10, vec![ship]).unwrap()
}

#[test]
fn test_shots_until_sunk() {
    let mut board = cruiser_board();
    assert_eq!(board.receive_shot(Coord::new(0, 0)).unwrap(), ShotResult::Hit);
    assert_eq!(board.receive_shot(Coord::new(1, 0)).unwrap(), ShotResult::Hit);
    assert_eq!(board.receive_shot(Coord::new(3, 3)).unwrap(), ShotResult::Miss);
    assert!(!board.is_game_over());
    assert_eq!(
        board.receive_shot(Coord::new(2, 0)).unwrap(),
        ShotResult::HitAndSunk(3)
    );
    assert!(board.is_game_over());
    assert_eq!(board.remaining_ship_count(), 0);
    assert_eq!(board.shots_received(), 4);
}

#[test]
fn test_repeated_shot_is_rejected() {
    let mut board = cruiser_board();
    board.receive_shot(Coord::new(5, 5)).unwrap();
    assert_eq!(
        board.receive_shot(Coord::new(5, 5)),
        Err(EngineError::DuplicateShot(Coord::new(5, 5)))
    );
    board.receive_shot(Coord::new(0, 0)).unwrap();
    assert_eq!(
        board.receive_shot(Coord::new(0, 0)),
        Err(EngineError::DuplicateShot(Coord::new(0, 0)))
    );
    // a rejected shot changes nothing
    assert_eq!(board.shots_received(), 2);
    assert_eq!(board.ship_at(Coord::new(0, 0)).unwrap().hit_count(), 1);
}

#[test]
fn test_shot_off_the_board() {
    let mut board = cruiser_board();
    assert_eq!(
        board.receive_shot(Coord::new(10, 0)),
        Err(EngineError::OutOfBounds {
            coord: Coord::new(10, 0),
            size: 10
        })
    );
    assert!(board.cell_state(Coord::new(0, 10)).is_err());
    assert_eq!(board.shots_received(), 0);
}

#[test]
fn test_cell_states() {
    let mut board = cruiser_board();
    assert_eq!(board.cell_state(Coord::new(0, 0)).unwrap(), CellState::Unknown);
    board.receive_shot(Coord::new(0, 0)).unwrap();
    board.receive_shot(Coord::new(9, 9)).unwrap();
    assert_eq!(board.cell_state(Coord::new(0, 0)).unwrap(), CellState::Hit);
    assert_eq!(board.cell_state(Coord::new(9, 9)).unwrap(), CellState::Miss);
    assert_eq!(board.cell_state(Coord::new(1, 0)).unwrap(), CellState::Unknown);
    board.receive_shot(Coord::new(1, 0)).unwrap();
    board.receive_shot(Coord::new(2, 0)).unwrap();
    for x in 0..3 {
        assert_eq!(board.cell_state(Coord::new(x, 0)).unwrap(), CellState::Sunk);
    }
}

#[test]
fn test_place_fleet_is_atomic() {
    let mut board = Board::new(6).unwrap();
    let a = Ship::new(Coord::new(0, 0), Orientation::Horizontal, 3).unwrap();
    let b = Ship::new(Coord::new(2, 0), Orientation::Vertical, 2).unwrap();
    assert_eq!(
        board.place_fleet(vec![a.clone(), b]),
        Err(EngineError::Overlap(Coord::new(2, 0)))
    );
    assert!(board.ships().is_empty());
    assert!(board.ship_map().is_empty());

    let off = Ship::new(Coord::new(4, 5), Orientation::Horizontal, 3).unwrap();
    assert_eq!(
        board.place_fleet(vec![a.clone(), off]),
        Err(EngineError::OutOfBounds {
            coord: Coord::new(6, 5),
            size: 6
        })
    );
    assert!(board.ships().is_empty());

    board.place_fleet(vec![a]).unwrap();
    assert_eq!(board.ship_map().count_ones(), 3);
}

#[test]
fn test_remaining_ship_count() {
    let factory = ShipFactory::new(10, FleetSpec::classic());
    let mut board = Board::generate(&factory, &mut FixedPlacement).unwrap();
    assert_eq!(board.remaining_ship_count(), 5);

    let cells = board.ships()[0].cells().to_vec();
    for c in cells {
        board.receive_shot(c).unwrap();
    }
    assert_eq!(board.remaining_ship_count(), 4);
    assert!(!board.is_game_over());
}

#[test]
fn test_empty_board_is_over() {
    let board = Board::new(4).unwrap();
    assert!(board.is_game_over());
    assert_eq!(board.remaining_ship_count(), 0);
}

#[test]
fn test_board_size_limits() {
    assert!(matches!(Board::new(0), Err(EngineError::Grid(_))));
    assert!(matches!(Board::new(27), Err(EngineError::Grid(_))));
    assert!(Board::new(26).is_ok());
}
