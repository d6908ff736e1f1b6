//! Core rules of a falling-block puzzle game - pure, deterministic, and testable
//!
//! This crate holds the grid, the pieces, collision resolution and the game
//! loop. It has no dependency on rendering, devices or timing sources: the
//! host calls [`Game::update`] with the elapsed time and supplies pieces and
//! player actions through the [`PieceProvider`] and [`PlayerInput`] traits.
//!
//! # Module Structure
//!
//! - [`piece`]: detached piece geometry and the 90° rotation transform
//! - [`board`]: block arena, collision queries, movement, rotation, row clears
//! - [`collision`]: lateral kick search and the snapshot-restoring resolver
//! - [`game`]: the `NotStarted -> Playing -> Finished` state machine
//! - [`events`]: observer registry for the game's notifications
//! - [`provider`], [`input`]: collaborator traits and reference implementations
//!
//! # Example
//!
//! ```
//! use tomino_core::{Board, Game, GameStatus, QueuedInput, SequenceProvider};
//! use tomino_types::{PieceType, PlayerAction};
//!
//! let board = Board::new(10, 20).unwrap();
//! let provider = SequenceProvider::of_types(&[PieceType::T, PieceType::I]).unwrap();
//! let mut game = Game::new(board, provider, QueuedInput::new());
//! game.start();
//!
//! game.input_mut().push(PlayerAction::Rotate);
//! game.input_mut().push(PlayerAction::Fall);
//! game.update(0.016);
//! game.update(0.016);
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.next_piece().piece_type(), PieceType::T);
//! ```

pub mod board;
pub mod collision;
pub mod events;
pub mod game;
pub mod input;
pub mod piece;
pub mod provider;

pub use tomino_types as types;

pub use board::{ActivePiece, Block, BlockId, Board, BoardError, PieceSnapshot};
pub use collision::{kick, CollisionResolver};
pub use events::{GameEvent, ObserverId, Observers};
pub use game::{Game, GameStatus};
pub use input::{NoInput, PlayerInput, QueuedInput};
pub use piece::{Piece, PieceError, PieceShape};
pub use provider::{BagProvider, EmptySequence, PieceProvider, SequenceProvider, SimpleRng};
