use battleship_rl::{
    Board, BoardError, BoardView, CellState, Coordinate, GuessResult, Orientation, BOARD_SIZE,
    NUM_SHIPS, SHIPS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_manual_place_and_guess_sink() {
    let mut board = Board::standard();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();

    for c in 0..SHIPS[0].length() - 1 {
        assert_eq!(board.guess(0, c).unwrap(), GuessResult::Hit);
    }
    // final hit should sink
    assert_eq!(
        board.guess(0, SHIPS[0].length() - 1).unwrap(),
        GuessResult::Sink("Carrier")
    );
    assert!(board.ships().next().unwrap().is_sunk());

    // repeated guess triggers error
    assert_eq!(
        board.guess(0, SHIPS[0].length() - 1).unwrap_err(),
        BoardError::AlreadyGuessed
    );
}

#[test]
fn test_guess_marks_public_grid_only() {
    let mut board = Board::standard();
    board.place(4, 7, 3, Orientation::Vertical).unwrap();
    assert_eq!(board.unknown_cells().len(), BOARD_SIZE * BOARD_SIZE);

    assert_eq!(board.guess(0, 0).unwrap(), GuessResult::Miss);
    assert_eq!(board.guess(7, 3).unwrap(), GuessResult::Hit);
    assert_eq!(board.cell(Coordinate::new(0, 0)), Some(CellState::Miss));
    assert_eq!(board.cell(Coordinate::new(7, 3)), Some(CellState::Hit));
    // the unhit half of the destroyer still reads as unknown
    assert_eq!(board.cell(Coordinate::new(8, 3)), Some(CellState::Unknown));
    assert_eq!(board.guess(8, 3).unwrap(), GuessResult::Sink("Destroyer"));
}

#[test]
fn test_guess_out_of_bounds() {
    let mut board = Board::standard();
    assert_eq!(
        board.guess(BOARD_SIZE, 0).unwrap_err(),
        BoardError::OutOfBounds {
            row: BOARD_SIZE,
            col: 0,
            size: BOARD_SIZE
        }
    );
}

#[test]
fn test_place_errors() {
    let mut board = Board::standard();
    assert_eq!(
        board.place(0, 0, 6, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place(0, 5, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipAlreadyPlaced
    );
    assert_eq!(
        board.place(1, 0, 4, Orientation::Vertical).unwrap_err(),
        BoardError::ShipOverlaps
    );
    assert_eq!(
        board.place(NUM_SHIPS, 9, 9, Orientation::Vertical).unwrap_err(),
        BoardError::InvalidIndex
    );
}

#[test]
fn test_place_random_all_ships_no_overlap() {
    let mut board = Board::standard();
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_randomly(&mut rng).unwrap();

    let mut covered: Vec<Coordinate> = board.ships().flat_map(|s| s.cells().to_vec()).collect();
    let expected: usize = SHIPS.iter().map(|s| s.length()).sum();
    covered.sort();
    covered.dedup();
    assert_eq!(covered.len(), expected, "all ships should be placed without overlap");
    assert!(covered.iter().all(|c| c.in_bounds(BOARD_SIZE)));
}

#[test]
fn test_ship_too_long_cannot_be_placed() {
    let fleet = [battleship_rl::ShipType::new("Leviathan", 6)];
    let mut board = Board::new(5, &fleet);
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        board.place_randomly(&mut rng).unwrap_err(),
        BoardError::UnableToPlaceShip
    );
}

#[test]
fn test_clear_resets_ships_and_grid() {
    let mut board = Board::standard();
    let mut rng = SmallRng::seed_from_u64(3);
    board.place_randomly(&mut rng).unwrap();
    board.guess(5, 5).unwrap();
    assert_eq!(board.ships_afloat(), NUM_SHIPS);

    board.clear();
    assert_eq!(board.ships().count(), 0);
    assert_eq!(board.unknown_cells().len(), BOARD_SIZE * BOARD_SIZE);
    // an empty board is not a won board
    assert!(!board.all_sunk());
}
