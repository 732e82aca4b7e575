use battleship_rl::{Board, BoardError, BoardSignature, BoardView, Coordinate, BOARD_SIZE};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> (Board, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::standard();
    board.place_randomly(&mut rng).unwrap();
    let guesses = rng.random_range(0..BOARD_SIZE);
    for _ in 0..guesses {
        let r = rng.random_range(0..BOARD_SIZE);
        let c = rng.random_range(0..BOARD_SIZE);
        let _ = board.guess(r, c);
    }
    (board, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn guess_idempotent(seed in any::<u64>(), row in 0..BOARD_SIZE, col in 0..BOARD_SIZE) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::standard();
        board.place_randomly(&mut rng).unwrap();
        let before = BoardSignature::capture(&board);
        board.guess(row, col).unwrap();
        let after = BoardSignature::capture(&board);
        let err = board.guess(row, col).unwrap_err();
        prop_assert_eq!(err, BoardError::AlreadyGuessed);
        prop_assert_eq!(BoardSignature::capture(&board), after.clone());
        prop_assert_ne!(before, after);
    }

    #[test]
    fn attacked_cells_never_revert(seed in any::<u64>()) {
        let (mut board, mut rng) = random_board(seed);
        let attacked: Vec<Coordinate> = (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| Coordinate::new(r, c)))
            .filter(|c| !board.is_unknown(*c))
            .collect();
        let states: Vec<_> = attacked.iter().map(|c| board.cell(*c)).collect();
        for _ in 0..20 {
            let _ = board.guess(rng.random_range(0..BOARD_SIZE), rng.random_range(0..BOARD_SIZE));
        }
        let now: Vec<_> = attacked.iter().map(|c| board.cell(*c)).collect();
        prop_assert_eq!(states, now);
    }
}
