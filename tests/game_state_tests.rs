use hex_mcts::{Cell, GameState, HexError, Player};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn c(row: usize, col: usize) -> Cell {
    Cell::new(row, col)
}

#[test]
fn test_new_board_is_empty_with_white_to_move() {
    let state = GameState::new(5);
    assert_eq!(state.size(), 5);
    assert_eq!(state.turn(), Player::White);
    assert_eq!(state.winner(), Player::None);
    assert!(!state.is_terminal());
    assert_eq!(state.moves().len(), 25);
    assert!(state.stones(Player::White).is_empty());
    assert!(state.stones(Player::Black).is_empty());
}

#[test]
fn test_moves_are_column_major() {
    let state = GameState::new(2);
    assert_eq!(state.moves(), vec![c(0, 0), c(1, 0), c(0, 1), c(1, 1)]);
}

#[test]
fn test_play_alternates_turns_and_counts_stones() {
    let mut state = GameState::new(3);
    state.play(c(1, 1)).unwrap();
    assert_eq!(state.turn(), Player::Black);
    assert_eq!(state.owner(c(1, 1)), Some(Player::White));
    state.play(c(0, 0)).unwrap();
    assert_eq!(state.turn(), Player::White);
    assert_eq!(state.owner(c(0, 0)), Some(Player::Black));
    assert_eq!(state.num_played(Player::White), 1);
    assert_eq!(state.num_played(Player::Black), 1);
    assert_eq!(state.owner(c(3, 0)), None);
}

#[test]
fn test_occupied_cell_is_rejected_without_passing_the_turn() {
    let mut state = GameState::new(3);
    state.play(c(0, 0)).unwrap();
    let err = state.play(c(0, 0)).unwrap_err();
    assert_eq!(err, HexError::CellOccupied { cell: c(0, 0) });
    assert_eq!(state.turn(), Player::Black);
    assert_eq!(state.num_played(Player::Black), 0);
}

#[test]
fn test_out_of_bounds_cell_is_rejected() {
    let mut state = GameState::new(3);
    let err = state.play(c(3, 0)).unwrap_err();
    assert_eq!(err, HexError::OutOfBounds { cell: c(3, 0), size: 3 });
    assert!(state.place_black(c(0, 7)).is_err());
    assert_eq!(state.moves().len(), 9);
}

#[test]
fn test_set_turn_rejects_none() {
    let mut state = GameState::new(3);
    assert_eq!(state.set_turn(Player::None), Err(HexError::InvalidTurn(0)));
    state.set_turn(Player::Black).unwrap();
    assert_eq!(state.turn(), Player::Black);
}

#[test]
fn test_player_ids_round_trip() {
    for player in [Player::None, Player::White, Player::Black] {
        assert_eq!(Player::try_from(player.id()), Ok(player));
    }
    assert_eq!(Player::try_from(3), Err(HexError::InvalidPlayer(3)));
    assert_eq!(Player::White.opponent(), Player::Black);
    assert_eq!(Player::None.opponent(), Player::None);
}

#[test]
fn test_white_wins_by_joining_top_and_bottom_rows() {
    let mut state = GameState::new(3);
    state.place_white(c(0, 0)).unwrap();
    state.place_white(c(1, 0)).unwrap();
    assert_eq!(state.winner(), Player::None);
    state.place_white(c(2, 0)).unwrap();
    assert_eq!(state.winner(), Player::White);
    assert!(state.is_terminal());
}

#[test]
fn test_black_wins_by_joining_left_and_right_columns() {
    let mut state = GameState::new(3);
    // (1, 0) -> (0, 1) is a hex neighbour step, (0, 1) -> (0, 2) along the row
    state.place_black(c(1, 0)).unwrap();
    state.place_black(c(0, 1)).unwrap();
    state.place_black(c(0, 2)).unwrap();
    assert_eq!(state.winner(), Player::Black);
}

#[test]
fn test_diagonal_without_hex_adjacency_does_not_connect() {
    let mut state = GameState::new(2);
    // (0, 0) and (1, 1) are not neighbours on a hex grid
    state.place_white(c(0, 0)).unwrap();
    state.place_white(c(1, 1)).unwrap();
    assert_eq!(state.winner(), Player::None);
    assert_eq!(state.white_groups(), vec![vec![c(0, 0)], vec![c(1, 1)]]);
}

#[test]
fn test_would_lose_detects_a_completing_move() {
    let mut state = GameState::new(3);
    state.place_black(c(0, 0)).unwrap();
    state.place_black(c(0, 1)).unwrap();

    assert!(state.would_lose(c(0, 2), Player::Black));
    assert!(!state.would_lose(c(1, 1), Player::Black));
    assert!(!state.would_lose(c(0, 2), Player::White));
    // Queries leave the board untouched
    assert_eq!(state.owner(c(0, 2)), Some(Player::None));
}

#[test]
fn test_single_cell_board_is_decided_by_the_first_stone() {
    let mut state = GameState::new(1);
    assert!(state.would_lose(c(0, 0), Player::White));
    assert!(state.would_lose(c(0, 0), Player::Black));
    state.play(c(0, 0)).unwrap();
    assert_eq!(state.winner(), Player::White);
    assert!(state.moves().is_empty());
}

#[test]
fn test_groups_report_connected_chains() {
    let mut state = GameState::new(3);
    state.place_white(c(0, 0)).unwrap();
    state.place_white(c(0, 1)).unwrap();
    state.place_white(c(2, 2)).unwrap();
    state.place_black(c(1, 1)).unwrap();

    assert_eq!(
        state.white_groups(),
        vec![vec![c(0, 0), c(0, 1)], vec![c(2, 2)]]
    );
    assert_eq!(state.black_groups(), vec![vec![c(1, 1)]]);
    assert_eq!(state.neighbors(c(0, 0)), vec![c(0, 1), c(1, 0)]);
}

#[test]
fn test_moves_and_stones_partition_the_board() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    for size in [1, 2, 5, 8] {
        let mut state = GameState::new(size);
        while state.winner().is_none() {
            let moves = state.moves();
            let stones = state.stones(Player::White).len() + state.stones(Player::Black).len();
            assert_eq!(moves.len() + stones, size * size);

            let cell = *moves.choose(&mut rng).unwrap();
            state.play(cell).unwrap();
        }
        // Hex never ends in a draw, and a filled board always has a winner
        assert!(state.is_terminal());
    }
}

#[test]
fn test_display_draws_the_board_with_edge_markers() {
    let state = GameState::new(2);
    assert_eq!(state.to_string(), "  a b\n1 . . B\n 2 . . B\n    W W");

    let mut state = GameState::new(2);
    state.play(c(0, 1)).unwrap();
    state.play(c(1, 0)).unwrap();
    assert_eq!(state.to_string(), "  a b\n1 . W B\n 2 B . B\n    W W");
}

#[test]
fn test_cells_use_letter_number_notation() {
    assert_eq!("a1".parse::<Cell>(), Ok(c(0, 0)));
    assert_eq!("c2".parse::<Cell>(), Ok(c(1, 2)));
    assert_eq!("B10".parse::<Cell>(), Ok(c(9, 1)));
    assert_eq!(c(4, 3).to_string(), "d5");

    for bad in ["", "1a", "a0", "a", "?3"] {
        assert!(matches!(bad.parse::<Cell>(), Err(HexError::InvalidCell(_))));
    }
}

#[test]
fn test_wide_boards_use_multi_letter_columns() {
    assert_eq!(c(0, 25).to_string(), "z1");
    assert_eq!(c(0, 26).to_string(), "aa1");
    assert_eq!(c(2, 27).to_string(), "ab3");
    assert_eq!(c(0, 701).to_string(), "zz1");
    assert_eq!(c(0, 702).to_string(), "aaa1");

    for col in 0..800 {
        let cell = c(col % 40, col);
        assert_eq!(cell.to_string().parse::<Cell>(), Ok(cell));
    }

    let state = GameState::new(28);
    let header = state.to_string().lines().next().unwrap().to_string();
    assert!(header.ends_with("z aa ab"));
}

#[test]
#[should_panic]
fn test_zero_sized_board_panics() {
    let _ = GameState::new(0);
}
