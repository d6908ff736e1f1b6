//! Game tests - lifecycle, gravity, locking, scoring and notifications

use std::cell::RefCell;
use std::rc::Rc;

use tomino::core::{
    Board, Game, GameEvent, GameStatus, NoInput, Piece, PieceProvider, PlayerInput, QueuedInput,
    SequenceProvider,
};
use tomino::types::{PieceType, PlayerAction, Position};

fn game(width: i32, height: i32, types: &[PieceType]) -> Game<SequenceProvider, QueuedInput> {
    Game::new(
        Board::new(width, height).unwrap(),
        SequenceProvider::of_types(types).unwrap(),
        QueuedInput::new(),
    )
}

/// Counts how often `event` fires.
fn counter<P: PieceProvider, I: PlayerInput>(game: &mut Game<P, I>, event: GameEvent) -> Rc<RefCell<u32>> {
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    game.subscribe(event, move || *c.borrow_mut() += 1);
    count
}

#[test]
fn test_unplaceable_first_piece_finishes_once() {
    // A T piece is two rows tall; the board has one.
    let mut game = game(10, 1, &[PieceType::T]);
    let finished = counter(&mut game, GameEvent::Finished);

    game.start();
    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(*finished.borrow(), 1);

    game.input_mut().push(PlayerAction::Fall);
    for _ in 0..10 {
        game.update(1.0);
    }
    assert!(!game.handle_player_action(PlayerAction::MoveDown));
    assert_eq!(*finished.borrow(), 1);
    assert_eq!(game.pieces_locked(), 0);
}

#[test]
fn test_blocked_spawn_after_lock_ends_session() {
    let mut game = game(4, 2, &[PieceType::O]);
    let finished = counter(&mut game, GameEvent::Finished);
    let landed = counter(&mut game, GameEvent::PieceFinishedFalling);

    game.start();
    assert!(game.is_playing());

    game.input_mut().push(PlayerAction::Fall);
    game.update(0.016);
    assert!(game.is_finished());
    assert_eq!(*landed.borrow(), 1);
    assert_eq!(*finished.borrow(), 1);

    game.update(5.0);
    assert_eq!(*finished.borrow(), 1);
}

#[test]
fn test_full_row_scores_one() {
    // The I piece spans the whole 4-wide board.
    let mut game = game(4, 4, &[PieceType::I]);
    game.start();

    for expected in 1..=3 {
        assert!(game.handle_player_action(PlayerAction::Fall));
        assert_eq!(game.score(), expected);
        assert!(game.is_playing());
    }
    assert_eq!(game.rows_cleared(), 3);
    assert_eq!(game.pieces_locked(), 3);
    // Only the falling piece is left.
    assert_eq!(game.board().blocks().len(), 4);
}

#[test]
fn test_double_clear_scores_two() {
    let mut game = game(2, 5, &[PieceType::O]);
    game.start();
    game.handle_player_action(PlayerAction::Fall);
    assert_eq!(game.score(), 2);
    game.handle_player_action(PlayerAction::Fall);
    assert_eq!(game.score(), 4);
}

#[test]
fn test_score_survives_non_clearing_locks() {
    let mut game = game(6, 10, &[PieceType::T, PieceType::S]);
    let mut last = 0;
    game.start();
    for _ in 0..4 {
        game.handle_player_action(PlayerAction::Fall);
        assert!(game.score() >= last);
        last = game.score();
    }
    assert_eq!(game.pieces_locked(), 4);
}

#[test]
fn test_only_blocked_move_down_locks() {
    let mut game = game(4, 6, &[PieceType::T]);
    let landed = counter(&mut game, GameEvent::PieceFinishedFalling);
    game.start();

    for _ in 0..4 {
        assert!(game.handle_player_action(PlayerAction::MoveDown));
    }
    // Resting on the floor: sideways moves and rotations keep it alive.
    game.handle_player_action(PlayerAction::MoveLeft);
    game.handle_player_action(PlayerAction::Rotate);
    game.handle_player_action(PlayerAction::MoveRight);
    assert_eq!(*landed.borrow(), 0);

    assert!(!game.handle_player_action(PlayerAction::MoveDown));
    assert_eq!(*landed.borrow(), 1);
    assert_eq!(game.pieces_locked(), 1);
    assert_eq!(game.board().piece_top(), 5);
}

#[test]
fn test_fall_drops_to_rest_and_respawns() {
    let mut game = game(10, 20, &[PieceType::O, PieceType::I]);
    game.start();
    assert!(game.handle_player_action(PlayerAction::Fall));

    let locked: Vec<Position> = game.board().blocks()[..4].iter().map(|b| b.position).collect();
    assert!(locked.iter().all(|p| p.row <= 1));
    assert_eq!(game.board().piece().map(|p| p.piece_type()), Some(PieceType::I));
}

#[test]
fn test_gravity_accumulates_elapsed_time() {
    let mut game = Game::new(
        Board::new(10, 20).unwrap(),
        SequenceProvider::repeat(Piece::new(PieceType::J)),
        NoInput,
    );
    game.start();
    let top = game.board().piece_top();

    for _ in 0..3 {
        game.update(0.25);
    }
    assert_eq!(game.board().piece_top(), top);
    game.update(0.25);
    assert_eq!(game.board().piece_top(), top - 1);

    game.update(2.5);
    assert_eq!(game.board().piece_top(), top - 2);
}

#[test]
fn test_one_action_per_update() {
    let mut game = game(10, 20, &[PieceType::T]);
    game.start();
    let start = game.board().piece_positions()[0];

    for action in [PlayerAction::MoveLeft, PlayerAction::MoveLeft, PlayerAction::MoveLeft] {
        game.input_mut().push(action);
    }
    game.update(0.016);
    assert_eq!(game.input().len(), 2);
    assert_eq!(game.board().piece_positions()[0], start.offset(0, -1));
}

#[test]
fn test_explicit_move_down_resets_fall_timer() {
    let mut game = game(10, 20, &[PieceType::T]);
    game.start();
    game.update(0.9);
    assert!(game.elapsed_time() > 0.0);

    game.input_mut().push(PlayerAction::MoveDown);
    game.update(0.016);
    assert_eq!(game.elapsed_time(), 0.0);
}

#[test]
fn test_observers_run_in_order_and_unsubscribe() {
    let mut game = game(4, 2, &[PieceType::O]);
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&log);
    let id = game.subscribe(GameEvent::Finished, move || first.borrow_mut().push("first"));
    let second = Rc::clone(&log);
    game.subscribe(GameEvent::Finished, move || second.borrow_mut().push("second"));
    let landed = Rc::clone(&log);
    game.subscribe(GameEvent::PieceFinishedFalling, move || landed.borrow_mut().push("landed"));

    game.start();
    game.handle_player_action(PlayerAction::Fall);
    assert_eq!(*log.borrow(), vec!["landed", "first", "second"]);

    assert!(game.unsubscribe(id));
    assert!(!game.unsubscribe(id));
    log.borrow_mut().clear();
    game.start();
    game.handle_player_action(PlayerAction::Fall);
    assert_eq!(*log.borrow(), vec!["landed", "second"]);
}

#[test]
fn test_restart_resets_session() {
    let mut game = game(4, 4, &[PieceType::I]);
    game.start();
    game.handle_player_action(PlayerAction::Fall);
    game.handle_player_action(PlayerAction::MoveLeft);
    assert_eq!(game.score(), 1);

    game.start();
    assert!(game.is_playing());
    assert_eq!(game.score(), 0);
    assert_eq!(game.pieces_locked(), 0);
    assert_eq!(game.board().blocks().len(), 4);
    assert_eq!(game.elapsed_time(), 0.0);
}

#[test]
fn test_next_piece_peeks_provider() {
    let mut game = game(10, 20, &[PieceType::S, PieceType::Z, PieceType::L]);
    game.start();
    assert_eq!(game.board().piece().map(|p| p.piece_type()), Some(PieceType::S));
    assert_eq!(game.next_piece().piece_type(), PieceType::Z);
    game.handle_player_action(PlayerAction::Fall);
    assert_eq!(game.next_piece().piece_type(), PieceType::L);
}
