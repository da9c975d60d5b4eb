use naval_combat::{
    Board, BoardError, CellState, Orientation, ShipClass, FLEET, NUM_SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_place_writes_occupied_cells() {
    let mut board = Board::new();
    board.place(1, 2, 2, Orientation::Horizontal).unwrap();
    for c in 2..5 {
        assert_eq!(board.cell(2, c).unwrap(), CellState::Occupied);
    }
    assert_eq!(board.count(CellState::Occupied), 3);
    assert_eq!(board.ship(1).unwrap().class(), ShipClass::Submarine);
}

#[test]
fn test_out_of_bounds_placement_leaves_board_unchanged() {
    let mut board = Board::new();
    board.place(6, 0, 0, Orientation::Horizontal).unwrap();
    let before = board.clone();

    assert_eq!(
        board.place(0, 0, 8, Orientation::Horizontal).unwrap_err(),
        BoardError::PlacementOutOfBounds
    );
    assert_eq!(
        board.place(0, 7, 0, Orientation::Vertical).unwrap_err(),
        BoardError::PlacementOutOfBounds
    );
    assert_eq!(board, before);
}

#[test]
fn test_colliding_placement_leaves_board_unchanged() {
    let mut board = Board::new();
    board.place(0, 4, 2, Orientation::Horizontal).unwrap();
    let before = board.clone();

    // crosses the carrier at (4, 3)
    assert_eq!(
        board.place(1, 3, 3, Orientation::Vertical).unwrap_err(),
        BoardError::PlacementCollision
    );
    assert_eq!(
        board.can_place(ShipClass::Frigate, 4, 5, Orientation::Horizontal),
        Err(BoardError::PlacementCollision)
    );
    assert_eq!(board, before);
    assert!(board.ship(1).is_none());

    // adjacent cells are fine
    board.place(1, 5, 2, Orientation::Horizontal).unwrap();
}

#[test]
fn test_slot_errors() {
    let mut board = Board::new();
    assert_eq!(
        board.place(NUM_SHIPS, 0, 0, Orientation::Horizontal).unwrap_err(),
        BoardError::InvalidIndex
    );
    board.place(9, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place(9, 5, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipAlreadyPlaced
    );
    assert_eq!(
        board.relocate(8, 1, 1, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipNotPlaced
    );
    assert_eq!(board.unplace(7).unwrap_err(), BoardError::ShipNotPlaced);
}

#[test]
fn test_relocate_frees_previous_cells() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.relocate(0, 5, 5, Orientation::Vertical).unwrap();

    for c in 0..4 {
        assert_eq!(board.cell(0, c).unwrap(), CellState::Empty);
    }
    for r in 5..9 {
        assert_eq!(board.cell(r, 5).unwrap(), CellState::Occupied);
    }
    assert_eq!(board.count(CellState::Occupied), 4);
    // the old position is free for another ship
    board.place(1, 0, 0, Orientation::Horizontal).unwrap();
}

#[test]
fn test_relocate_may_overlap_own_footprint() {
    let mut board = Board::new();
    board.place(0, 2, 2, Orientation::Horizontal).unwrap();
    board.relocate(0, 2, 3, Orientation::Horizontal).unwrap();
    assert_eq!(board.cell(2, 2).unwrap(), CellState::Empty);
    assert_eq!(board.cell(2, 6).unwrap(), CellState::Occupied);
    assert_eq!(board.count(CellState::Occupied), 4);
}

#[test]
fn test_failed_relocate_restores_ship() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.place(1, 5, 5, Orientation::Horizontal).unwrap();
    let before = board.clone();

    assert_eq!(
        board.relocate(0, 4, 6, Orientation::Vertical).unwrap_err(),
        BoardError::PlacementCollision
    );
    assert_eq!(board, before);
    assert_eq!(
        board.relocate(0, 0, 8, Orientation::Horizontal).unwrap_err(),
        BoardError::PlacementOutOfBounds
    );
    assert_eq!(board, before);
}

#[test]
fn test_unplace_frees_cells() {
    let mut board = Board::new();
    board.place(3, 1, 1, Orientation::Vertical).unwrap();
    let ship = board.unplace(3).unwrap();
    assert_eq!(ship.class(), ShipClass::Destroyer);
    assert_eq!(board.count(CellState::Empty), 100);
    assert!(board.ship(3).is_none());
}

#[test]
fn test_placement_locked_after_first_shot() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.resolve_shot(9, 9).unwrap();
    assert_eq!(
        board.place(1, 5, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::PlacementLocked
    );
    assert_eq!(
        board.relocate(0, 5, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::PlacementLocked
    );
    assert_eq!(board.unplace(0).unwrap_err(), BoardError::PlacementLocked);
}

#[test]
fn test_random_placement_is_valid() {
    let board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    for index in 0..NUM_SHIPS {
        let (r, c, o) = board.random_placement(&mut rng, index).unwrap();
        assert!(board.can_place(FLEET[index], r, c, o).is_ok());
    }
}

#[test]
fn test_place_fleet_randomly_no_overlap() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(7);
    board.place_fleet_randomly(&mut rng).unwrap();

    assert!(board.is_fleet_complete());
    assert_eq!(board.occupancy().count_ones(), TOTAL_SHIP_CELLS);
    assert_eq!(board.count(CellState::Occupied), TOTAL_SHIP_CELLS);
    for (r, c) in board.occupancy().iter_set_bits() {
        assert_eq!(board.cell(r, c).unwrap(), CellState::Occupied);
    }
    let classes: Vec<_> = board.ships().map(|s| s.class()).collect();
    assert_eq!(classes, FLEET.to_vec());
}

#[test]
fn test_place_fleet_randomly_requires_empty_board() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(3);
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place_fleet_randomly(&mut rng).unwrap_err(),
        BoardError::ShipAlreadyPlaced
    );
}

#[test]
fn test_place_remaining_keeps_manual_ships() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(11);
    board.place(0, 9, 0, Orientation::Horizontal).unwrap();
    board.place(6, 0, 9, Orientation::Horizontal).unwrap();

    board.place_remaining_randomly(&mut rng).unwrap();
    assert!(board.is_fleet_complete());
    assert_eq!(board.ship(0).unwrap().anchor(), (9, 0));
    assert_eq!(board.ship(6).unwrap().anchor(), (0, 9));
    assert_eq!(board.count(CellState::Occupied), TOTAL_SHIP_CELLS);
}

#[test]
fn test_same_seed_same_fleet() {
    let mut a = Board::new();
    let mut b = Board::new();
    a.place_fleet_randomly(&mut SmallRng::seed_from_u64(99)).unwrap();
    b.place_fleet_randomly(&mut SmallRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}
