//! Simulation tests - collision, movement, locking, sweeping, scoring, rotation, spawn

use ambient_tetris::progression::{drop_interval_for_level, level_for_lines};
use ambient_tetris::{
    collides, ActivePiece, Board, DropOutcome, GameState, PieceKind, Progression, BOARD_COLS,
    BOARD_ROWS,
};

fn vertical_i(x: i32, y: i32) -> ActivePiece {
    ActivePiece {
        kind: PieceKind::I,
        matrix: PieceKind::I.matrix().rotated(),
        x,
        y,
    }
}

fn fill_row_except(board: &mut Board, y: usize, skip: &[usize], value: u8) {
    for x in 0..BOARD_COLS {
        if !skip.contains(&x) {
            board.set(x, y, value);
        }
    }
}

fn drop_until_locked(game: &mut GameState) -> DropOutcome {
    for _ in 0..=BOARD_ROWS {
        let outcome = game.drop_piece();
        if outcome != DropOutcome::Moved {
            return outcome;
        }
    }
    panic!("piece never locked");
}

#[test]
fn test_collides_walls_and_floor() {
    let board = Board::new();

    assert!(!collides(&board, &ActivePiece::new(PieceKind::O, 0, 0)));
    assert!(collides(&board, &ActivePiece::new(PieceKind::O, -1, 0)));
    assert!(!collides(&board, &ActivePiece::new(PieceKind::O, 8, 0)));
    assert!(collides(&board, &ActivePiece::new(PieceKind::O, 9, 0)));
    assert!(!collides(&board, &ActivePiece::new(PieceKind::O, 0, 18)));
    assert!(collides(&board, &ActivePiece::new(PieceKind::O, 0, 19)));
}

#[test]
fn test_collides_ignores_rows_above_top() {
    let board = Board::new();
    assert!(!collides(&board, &ActivePiece::new(PieceKind::I, 3, -1)));
    assert!(!collides(&board, &ActivePiece::new(PieceKind::T, 3, -5)));
    // Still checked against the side walls up there.
    assert!(collides(&board, &ActivePiece::new(PieceKind::I, 7, -1)));
}

#[test]
fn test_collides_only_counts_filled_cells() {
    let board = Board::new();
    // Column 3 of the matrix is the only filled one, so x = -3 puts it on column 0.
    assert!(!collides(&board, &vertical_i(-3, 0)));
    assert!(collides(&board, &vertical_i(-4, 0)));
    assert!(!collides(&board, &vertical_i(6, 16)));
    assert!(collides(&board, &vertical_i(6, 17)));
}

#[test]
fn test_collides_with_occupied_cell() {
    let mut board = Board::new();
    board.set(5, 10, 1);
    assert!(collides(&board, &ActivePiece::new(PieceKind::O, 4, 9)));
    assert!(collides(&board, &ActivePiece::new(PieceKind::O, 5, 10)));
    assert!(!collides(&board, &ActivePiece::new(PieceKind::O, 6, 9)));
    assert!(!collides(&board, &ActivePiece::new(PieceKind::O, 4, 7)));
}

#[test]
fn test_move_is_atomic() {
    let mut game = GameState::with_seed(1);
    game.active = ActivePiece::new(PieceKind::O, 0, 5);
    let board = game.board;

    assert!(!game.move_piece(-1));
    assert_eq!((game.active.x, game.active.y), (0, 5));
    assert_eq!(game.board, board);

    assert!(game.move_piece(1));
    assert_eq!((game.active.x, game.active.y), (1, 5));

    game.board.set(3, 6, 4);
    assert!(!game.move_piece(1));
    assert_eq!(game.active.x, 1);
}

#[test]
fn test_drop_moves_or_locks() {
    let mut game = GameState::with_seed(99);
    for _ in 0..400 {
        if game.game_over {
            break;
        }
        let before = game.active;
        let filled_before = game.board.filled_count();
        match game.drop_piece() {
            DropOutcome::Moved => {
                assert_eq!(game.active.y, before.y + 1);
                assert_eq!(game.active.x, before.x);
                assert_eq!(game.board.filled_count(), filled_before);
            }
            DropOutcome::Locked { rows_cleared } => {
                let expected = filled_before + 4 - rows_cleared as usize * BOARD_COLS;
                assert_eq!(game.board.filled_count(), expected);
                assert_eq!(game.active.y, 0);
            }
            DropOutcome::Ignored => unreachable!("game was not over"),
        }
        // Vary the columns so the stack does not just grow in the middle.
        let _ = game.move_piece(if game.active.kind.id() % 2 == 0 { -1 } else { 1 });
    }
}

#[test]
fn test_sweep_clears_exactly_full_rows_and_keeps_order() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[], 1);
    fill_row_except(&mut board, 18, &[2], 2);
    fill_row_except(&mut board, 17, &[], 3);
    board.set(7, 16, 4);

    assert_eq!(board.sweep(), 2);

    let mut expected = Board::new();
    fill_row_except(&mut expected, 19, &[2], 2);
    expected.set(7, 18, 4);
    assert_eq!(board, expected);

    // No full rows left: sweeping again changes nothing.
    assert_eq!(board.sweep(), 0);
    assert_eq!(board, expected);
}

#[test]
fn test_score_is_square_of_batch() {
    for (k, points) in [(1, 100), (2, 400), (3, 900), (4, 1600)] {
        let mut progression = Progression::new();
        progression.record_clear(k);
        assert_eq!(progression.score, points);
        assert_eq!(progression.lines, k);
    }

    let mut progression = Progression::new();
    assert!(!progression.record_clear(0));
    assert_eq!(progression, Progression::new());
}

#[test]
fn test_level_and_interval_formulas() {
    assert_eq!(level_for_lines(0), 1);
    assert_eq!(level_for_lines(9), 1);
    assert_eq!(level_for_lines(10), 2);
    assert_eq!(level_for_lines(25), 3);

    assert_eq!(drop_interval_for_level(1), 1000);
    assert_eq!(drop_interval_for_level(5), 600);
    assert_eq!(drop_interval_for_level(10), 100);
    assert_eq!(drop_interval_for_level(15), 100);
}

#[test]
fn test_level_up_speeds_gravity() {
    let mut progression = Progression::new();
    assert!(!progression.record_clear(4));
    assert!(!progression.record_clear(4));
    assert!(progression.record_clear(2));
    assert_eq!(progression.lines, 10);
    assert_eq!(progression.level, 2);
    assert_eq!(progression.drop_interval_ms, 900);
    assert_eq!(progression.score, 1600 + 1600 + 400);
}

#[test]
fn test_four_row_clear_through_drop() {
    let mut game = GameState::with_seed(3);
    for y in 16..BOARD_ROWS {
        fill_row_except(&mut game.board, y, &[0], 5);
    }
    game.active = vertical_i(-3, 16);

    assert_eq!(game.drop_piece(), DropOutcome::Locked { rows_cleared: 4 });
    assert_eq!(game.board.filled_count(), 0);
    assert_eq!(game.progression.score, 1600);
    assert_eq!(game.progression.lines, 4);
    assert_eq!(game.progression.level, 1);
}

#[test]
fn test_rotate_with_wall_kick() {
    let mut game = GameState::with_seed(5);
    // Upright T hugging the left wall; turning it needs one column of room.
    game.active = ActivePiece {
        kind: PieceKind::T,
        matrix: PieceKind::T.matrix().rotated(),
        x: -1,
        y: 4,
    };
    assert!(game.rotate_piece());
    assert_eq!(game.active.x, 0);
    assert_eq!(game.active.y, 4);
    assert_eq!(game.active.matrix, PieceKind::T.matrix().rotated().rotated());
}

#[test]
fn test_failed_rotation_restores_piece() {
    let mut game = GameState::with_seed(5);
    let piece = vertical_i(-3, 0);
    game.active = piece;
    let board = game.board;

    assert!(!game.rotate_piece());
    assert_eq!(game.active, piece);
    assert_eq!(game.board, board);
}

#[test]
fn test_failed_rotation_when_boxed_in() {
    let mut game = GameState::with_seed(8);
    let piece = ActivePiece::new(PieceKind::I, 3, 0);
    game.active = piece;
    for y in 1..4 {
        fill_row_except(&mut game.board, y, &[], 6);
    }
    assert!(!game.rotate_piece());
    assert_eq!(game.active, piece);
}

#[test]
fn test_spawn_centers_next_piece() {
    let mut game = GameState::with_seed(21);
    for kind in PieceKind::ALL {
        game.board = Board::new();
        game.next = kind;
        assert!(game.spawn());
        assert!(!game.game_over);
        assert_eq!(game.active.kind, kind);
        let size = kind.matrix().size() as i32;
        assert_eq!(game.active.x, (BOARD_COLS as i32 - size) / 2);
        assert_eq!(game.active.y, 0);
    }
}

#[test]
fn test_spawn_sets_game_over_when_blocked() {
    let mut game = GameState::with_seed(4);
    for y in 0..2 {
        for x in 3..=6 {
            game.board.set(x, y, 1);
        }
    }
    assert!(!game.spawn());
    assert!(game.game_over);

    let board = game.board;
    let active = game.active;
    assert_eq!(game.drop_piece(), DropOutcome::Ignored);
    assert!(!game.move_piece(-1));
    assert!(!game.rotate_piece());
    assert_eq!(game.board, board);
    assert_eq!(game.active, active);
}

#[test]
fn test_reset_starts_clean() {
    let mut game = GameState::with_seed(4);
    game.board.set(0, 19, 3);
    game.progression.record_clear(3);
    game.game_over = true;

    game.reset();
    assert_eq!(game.board, Board::new());
    assert_eq!(game.progression, Progression::new());
    assert!(!game.game_over);
    assert_eq!(game.active.y, 0);
}

#[test]
fn test_two_o_pieces_settle_bottom_left() {
    let mut game = GameState::with_seed(12);
    game.active = ActivePiece::spawned(PieceKind::O);
    game.next = PieceKind::O;

    while game.move_piece(-1) {}
    assert_eq!(game.active.x, 0);
    assert_eq!(drop_until_locked(&mut game), DropOutcome::Locked { rows_cleared: 0 });

    assert_eq!(game.active.kind, PieceKind::O);
    assert!(game.move_piece(-1));
    assert!(game.move_piece(-1));
    assert_eq!(game.active.x, 2);
    assert_eq!(drop_until_locked(&mut game), DropOutcome::Locked { rows_cleared: 0 });

    assert_eq!(game.board.filled_count(), 8);
    for y in 18..20 {
        for x in 0..4 {
            assert_eq!(game.board.get(x, y), Some(2), "cell ({}, {})", x, y);
        }
    }
    assert_eq!(game.progression.score, 0);
    assert_eq!(game.progression.lines, 0);
    assert!(!game.game_over);
}
