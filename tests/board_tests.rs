//! Board tests - grid bookkeeping, movement, rotation and row clears

use tomino::core::{Board, BoardError, Piece};
use tomino::types::{PieceType, Position};

fn cell(row: i32, column: i32) -> Position {
    Position::new(row, column)
}

fn single_cell() -> Piece {
    Piece::from_positions(&[cell(0, 0)], PieceType::O).unwrap()
}

fn sorted(mut positions: Vec<Position>) -> Vec<Position> {
    positions.sort_by_key(|p| (p.row, p.column));
    positions
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(10, 20).unwrap();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.top(), 19);
    assert!(board.blocks().is_empty());
    assert!(board.piece().is_none());
    assert!(!board.has_collisions());
}

#[test]
fn test_board_rejects_degenerate_dimensions() {
    assert_eq!(
        Board::new(0, 5),
        Err(BoardError::InvalidDimensions { width: 0, height: 5 })
    );
    assert!(Board::new(4, -1).is_err());
}

#[test]
fn test_bounds_checks() {
    let board = Board::new(4, 6).unwrap();
    assert!(!board.is_out_of_bounds(cell(0, 0)));
    assert!(!board.is_out_of_bounds(cell(5, 3)));
    assert!(board.is_out_of_bounds(cell(-1, 0)));
    assert!(board.is_out_of_bounds(cell(0, -1)));
    assert!(board.is_out_of_bounds(cell(6, 0)));
    assert!(board.is_out_of_bounds(cell(0, 4)));
}

#[test]
fn test_row_clear_shifts_blocks_above() {
    let mut board = Board::new(4, 6).unwrap();
    for column in 0..4 {
        board.add_block(cell(0, column), PieceType::I);
    }
    board.add_block(cell(1, 0), PieceType::T);
    board.add_block(cell(3, 2), PieceType::S);

    assert!(board.is_row_full(0));
    assert_eq!(board.remove_full_rows(), 1);
    assert_eq!(board.blocks().len(), 2);

    let positions = sorted(board.blocks().iter().map(|b| b.position).collect());
    assert_eq!(positions, vec![cell(0, 0), cell(2, 2)]);
    assert_eq!(board.row_len(0), 1);
}

#[test]
fn test_row_clear_handles_non_adjacent_rows() {
    let mut board = Board::new(3, 6).unwrap();
    for row in [0, 2] {
        for column in 0..3 {
            board.add_block(cell(row, column), PieceType::L);
        }
    }
    board.add_block(cell(1, 1), PieceType::Z);
    board.add_block(cell(4, 0), PieceType::J);

    assert_eq!(board.remove_full_rows(), 2);
    let positions = sorted(board.blocks().iter().map(|b| b.position).collect());
    assert_eq!(positions, vec![cell(0, 1), cell(2, 0)]);
}

#[test]
fn test_no_full_rows_is_a_no_op() {
    let mut board = Board::new(4, 6).unwrap();
    board.add_block(cell(0, 0), PieceType::I);
    let before = board.clone();
    assert_eq!(board.remove_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_hard_drop_single_cell() {
    let height = 7;
    let mut board = Board::new(3, height).unwrap();
    board.add_piece(single_cell());
    assert_eq!(board.piece_top(), height - 1);

    assert_eq!(board.fall_piece(), (height - 1) as usize);
    assert_eq!(board.piece_positions()[0].row, 0);
    assert_eq!(board.fall_piece(), 0);
}

#[test]
fn test_spawn_centering() {
    let mut board = Board::new(6, 10).unwrap();
    let domino = Piece::from_positions(&[cell(0, 0), cell(0, 1)], PieceType::S).unwrap();
    board.add_piece(domino);

    let leftmost = board.piece_positions().iter().map(|p| p.column).min();
    assert_eq!(leftmost, Some(2));
    assert_eq!(board.piece_top(), 9);
}

#[test]
fn test_spawn_has_no_collision_check() {
    let mut board = Board::new(4, 2).unwrap();
    board.add_block(cell(1, 1), PieceType::I);
    board.add_piece(Piece::new(PieceType::O));
    assert!(board.has_collisions());
    assert!(board.has_block_collisions());
    assert!(!board.has_board_collisions());
}

#[test]
fn test_rejected_move_leaves_board_identical() {
    let mut board = Board::new(5, 5).unwrap();
    board.add_block(cell(1, 0), PieceType::Z);
    board.add_piece(single_cell());
    for _ in 0..2 {
        assert!(board.move_piece_left());
    }
    assert!(board.move_piece_down());
    assert!(board.move_piece_down());

    let before = board.clone();
    let fingerprint = board.fingerprint();

    // Wall on the left, locked block below.
    assert!(!board.move_piece_left());
    assert!(!board.move_piece_down());
    assert_eq!(board.fingerprint(), fingerprint);
    assert_eq!(board, before);
}

#[test]
fn test_accepted_move_and_its_inverse_restore_board() {
    let mut board = Board::new(10, 20).unwrap();
    board.add_piece(Piece::new(PieceType::T));
    let before = board.clone();

    assert!(board.move_piece(-3, 2));
    assert_ne!(board, before);
    assert!(board.move_piece(3, -2));
    assert_eq!(board, before);
}

#[test]
fn test_rotation_rolls_back_when_every_kick_fails() {
    // A horizontal I at the very top cannot stand up: the new column always
    // pokes above the board whatever the lateral offset.
    let mut board = Board::new(10, 20).unwrap();
    board.add_piece(Piece::new(PieceType::I));
    let before = board.clone();

    assert!(!board.rotate_piece());
    assert_eq!(board, before);
}

#[test]
fn test_rotation_kicks_off_left_wall_in_order() {
    let mut board = Board::new(10, 20).unwrap();
    board.add_piece(Piece::new(PieceType::I));
    assert!(board.move_piece(-2, 0));
    assert!(board.rotate_piece());
    assert_eq!(board.piece_positions()[0], cell(17, 4));

    while board.move_piece_left() {}
    assert_eq!(board.piece_positions()[0], cell(17, 0));

    // Lying back down needs columns -2..=1: -1, -2 and +1 all fail, +2 fits.
    assert!(board.rotate_piece());
    let columns: Vec<i32> = sorted(board.piece_positions().to_vec())
        .iter()
        .map(|p| p.column)
        .collect();
    assert_eq!(columns, vec![0, 1, 2, 3]);
    assert_eq!(board.piece_positions()[0], cell(17, 2));
}

#[test]
fn test_o_piece_never_rotates() {
    let mut board = Board::new(10, 20).unwrap();
    board.add_piece(Piece::new(PieceType::O));
    let before = board.clone();
    assert!(!board.rotate_piece());
    assert_eq!(board, before);
}

#[test]
fn test_shadow_lands_on_stack_without_moving_piece() {
    let mut board = Board::new(4, 8).unwrap();
    board.add_block(cell(2, 1), PieceType::J);
    board.add_piece(Piece::new(PieceType::O));
    let before = board.clone();

    // O spawns over columns 1 and 2; the block at (2, 1) stops it at row 3.
    let shadow = sorted(board.piece_shadow().to_vec());
    assert_eq!(shadow, vec![cell(3, 1), cell(3, 2), cell(4, 1), cell(4, 2)]);
    assert_eq!(board, before);
}

#[test]
fn test_shadow_matches_hard_drop() {
    let mut board = Board::new(10, 20).unwrap();
    board.add_block(cell(0, 4), PieceType::I);
    board.add_block(cell(5, 6), PieceType::I);
    board.add_piece(Piece::new(PieceType::T));

    let shadow = board.piece_shadow();
    board.fall_piece();
    assert_eq!(board.piece_positions(), shadow);
}

#[test]
fn test_lock_keeps_blocks_in_place() {
    let mut board = Board::new(10, 20).unwrap();
    board.add_piece(Piece::new(PieceType::L));
    board.fall_piece();
    let positions = board.piece_positions();

    let locked = board.lock_piece().unwrap();
    assert_eq!(locked.piece_type(), PieceType::L);
    assert!(board.piece().is_none());
    assert_eq!(
        board.blocks().iter().map(|b| b.position).collect::<Vec<_>>(),
        positions.to_vec()
    );
    assert!(!board.move_piece_left());
}

#[test]
fn test_clear_keeps_falling_piece_handles() {
    let mut board = Board::new(4, 6).unwrap();
    for column in 0..4 {
        board.add_block(cell(0, column), PieceType::I);
    }
    board.add_piece(Piece::new(PieceType::O));
    let before = board.piece_positions();

    assert_eq!(board.remove_full_rows(), 1);
    let after = board.piece_positions();
    assert_eq!(after.len(), 4);
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(b.row, a.row - 1);
        assert_eq!(b.column, a.column);
    }
}

#[test]
fn test_remove_all_blocks() {
    let mut board = Board::default();
    board.add_block(cell(0, 0), PieceType::T);
    board.add_piece(Piece::new(PieceType::Z));
    board.remove_all_blocks();
    assert!(board.blocks().is_empty());
    assert!(board.piece().is_none());
    assert_eq!(board.fingerprint(), 0);
}

#[test]
fn test_fingerprint_formula() {
    let mut board = Board::new(4, 6).unwrap();
    board.add_block(cell(2, 3), PieceType::L);
    // 4 * 6 * index(L) + 2 * 4 + 3
    assert_eq!(board.fingerprint(), 24 * 2 + 11);
}
