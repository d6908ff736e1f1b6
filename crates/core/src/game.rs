//! Game module - the per-tick loop and piece lifecycle
//!
//! A [`Game`] owns the board and its two collaborators. Each
//! [`update`](Game::update) polls the input for at most one action; with no
//! action the fall timer advances and, once it reaches [`FALL_DELAY`], a
//! `MoveDown` is synthesized. A piece locks only when a downward step is
//! blocked, after which full rows are cleared, scored, and the next piece is
//! spawned. A spawn that collides ends the session.

use tracing::{debug, info};

use crate::board::Board;
use crate::collision::CollisionResolver;
use crate::events::{GameEvent, ObserverId, Observers};
use crate::input::PlayerInput;
use crate::piece::Piece;
use crate::provider::PieceProvider;
use crate::types::{PlayerAction, FALL_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Playing,
    Finished,
}

#[derive(Debug)]
pub struct Game<P, I> {
    board: Board,
    provider: P,
    input: I,
    observers: Observers,
    status: GameStatus,
    score: u32,
    elapsed_time: f32,
    pieces_locked: u32,
    rows_cleared: u32,
}

impl<P: PieceProvider, I: PlayerInput> Game<P, I> {
    pub fn new(board: Board, provider: P, input: I) -> Self {
        Self {
            board,
            provider,
            input,
            observers: Observers::new(),
            status: GameStatus::NotStarted,
            score: 0,
            elapsed_time: 0.0,
            pieces_locked: 0,
            rows_cleared: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Rows cleared this session. Never decreases until the next `start`.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Time accumulated towards the next gravity step.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// The piece that spawns after the current one locks.
    pub fn next_piece(&self) -> Piece {
        self.provider.next_piece()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn subscribe(&mut self, event: GameEvent, callback: impl FnMut() + 'static) -> ObserverId {
        self.observers.subscribe(event, callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Begin a new session: empty board, zero score, first piece spawned.
    ///
    /// If even the first piece does not fit the game finishes right away.
    pub fn start(&mut self) {
        self.score = 0;
        self.pieces_locked = 0;
        self.rows_cleared = 0;
        self.elapsed_time = 0.0;
        self.board.remove_all_blocks();
        self.status = GameStatus::Playing;
        info!(
            width = self.board.width(),
            height = self.board.height(),
            "game started"
        );
        self.spawn_piece();
    }

    /// Advance the game by one tick. No-op unless playing.
    pub fn update(&mut self, delta_time: f32) {
        if !self.is_playing() {
            return;
        }

        match self.input.player_action() {
            Some(action) => {
                self.handle_player_action(action);
            }
            None => {
                self.elapsed_time += delta_time;
                if self.elapsed_time >= FALL_DELAY {
                    self.handle_player_action(PlayerAction::MoveDown);
                    self.elapsed_time = 0.0;
                }
            }
        }
    }

    /// Apply one action to the falling piece.
    ///
    /// Returns whether the piece moved. A blocked `MoveDown`, and every `Fall`,
    /// lock the piece.
    pub fn handle_player_action(&mut self, action: PlayerAction) -> bool {
        if !self.is_playing() || self.board.piece().is_none() {
            return false;
        }

        let mut resolver = CollisionResolver::new(&self.board);
        let moved = match action {
            PlayerAction::MoveLeft => self.board.move_piece_left(),
            PlayerAction::MoveRight => self.board.move_piece_right(),
            PlayerAction::MoveDown => {
                self.elapsed_time = 0.0;
                self.board.move_piece_down()
            }
            PlayerAction::Rotate => self.board.rotate_piece(),
            PlayerAction::Fall => {
                self.elapsed_time = 0.0;
                self.fall(&mut resolver) > 0
            }
        };

        // A fall always ends blocked.
        let landed =
            action.locks_when_blocked() && (action == PlayerAction::Fall || !moved);

        if self.board.has_collisions() {
            resolver.resolve_collisions(&mut self.board, action == PlayerAction::Rotate);
        }
        if landed {
            self.piece_finished_falling();
        }
        moved
    }

    /// Step the piece down until it collides, refreshing the resolver's
    /// snapshot before every step. The last step is left colliding for the
    /// resolver to undo. Returns the rows actually gained.
    fn fall(&mut self, resolver: &mut CollisionResolver) -> usize {
        let mut steps = 0usize;
        while !self.board.has_collisions() {
            resolver.store_piece_positions(&self.board);
            self.board.translate_piece(-1, 0);
            steps += 1;
        }
        steps.saturating_sub(1)
    }

    fn piece_finished_falling(&mut self) {
        self.board.lock_piece();
        self.pieces_locked += 1;
        self.observers.notify(GameEvent::PieceFinishedFalling);

        let rows = self.board.remove_full_rows();
        self.rows_cleared += rows as u32;
        self.score += rows as u32;
        debug!(rows, score = self.score, "piece finished falling");

        self.spawn_piece();
    }

    fn spawn_piece(&mut self) -> bool {
        let piece = self.provider.get_piece();
        self.board.add_piece(piece);

        if self.board.has_collisions() {
            self.status = GameStatus::Finished;
            info!(
                score = self.score,
                pieces = self.pieces_locked,
                "game finished"
            );
            self.observers.notify(GameEvent::Finished);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{NoInput, QueuedInput};
    use crate::provider::SequenceProvider;
    use crate::types::{PieceType, Position};

    fn game_with(
        width: i32,
        height: i32,
        types: &[PieceType],
    ) -> Game<SequenceProvider, QueuedInput> {
        Game::new(
            Board::new(width, height).unwrap(),
            SequenceProvider::of_types(types).unwrap(),
            QueuedInput::new(),
        )
    }

    #[test]
    fn new_game_is_idle() {
        let mut game = game_with(10, 20, &[PieceType::T]);
        assert_eq!(game.status(), GameStatus::NotStarted);
        game.update(5.0);
        assert!(game.board().blocks().is_empty());
    }

    #[test]
    fn start_spawns_first_piece() {
        let mut game = game_with(10, 20, &[PieceType::T]);
        game.start();
        assert!(game.is_playing());
        assert_eq!(game.board().blocks().len(), 4);
        assert_eq!(game.board().piece_top(), 19);
        assert_eq!(game.provider().next_piece().piece_type(), PieceType::T);
    }

    #[test]
    fn gravity_waits_for_fall_delay() {
        let mut game = Game::new(
            Board::new(10, 20).unwrap(),
            SequenceProvider::of_types(&[PieceType::T]).unwrap(),
            NoInput,
        );
        game.start();
        let top = game.board().piece_top();

        game.update(0.5);
        assert_eq!(game.board().piece_top(), top);
        assert_eq!(game.elapsed_time(), 0.5);

        game.update(0.5);
        assert_eq!(game.board().piece_top(), top - 1);
        assert_eq!(game.elapsed_time(), 0.0);
    }

    #[test]
    fn input_action_does_not_advance_timer() {
        let mut game = game_with(10, 20, &[PieceType::T]);
        game.start();
        game.input_mut().push(PlayerAction::MoveLeft);
        game.update(3.0);
        assert_eq!(game.elapsed_time(), 0.0);
        assert_eq!(game.board().piece_top(), 19);
    }

    #[test]
    fn fall_reports_rows_through_resolver() {
        let mut game = game_with(4, 6, &[PieceType::O]);
        game.start();
        let mut resolver = CollisionResolver::new(&game.board);
        assert_eq!(game.fall(&mut resolver), 4);
        assert!(game.board.has_collisions());
        assert!(!resolver.resolve_collisions(&mut game.board, false));
        let rows: Vec<i32> = game.board.piece_positions().iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![0, 0, 1, 1]);
    }

    #[test]
    fn blocked_move_down_locks_and_respawns() {
        let mut game = game_with(4, 2, &[PieceType::O, PieceType::I]);
        game.start();
        assert!(!game.handle_player_action(PlayerAction::MoveDown));
        assert_eq!(game.pieces_locked(), 1);
        // Next spawn is the I piece, which overlaps the locked square.
        assert!(game.is_finished());
    }

    #[test]
    fn lateral_moves_never_lock() {
        let mut game = game_with(4, 2, &[PieceType::O]);
        game.start();
        for _ in 0..5 {
            game.handle_player_action(PlayerAction::MoveLeft);
            game.handle_player_action(PlayerAction::Rotate);
        }
        assert_eq!(game.pieces_locked(), 0);
        assert!(game.is_playing());
        assert_eq!(
            game.board().piece_positions()[0],
            Position::new(0, 0)
        );
    }
}
