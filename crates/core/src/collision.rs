//! Collision resolution after movement and rotation
//!
//! Both the board's rotate path and the game loop use the same kick policy:
//! try the lateral offsets in order and keep the first position that does not
//! collide. [`CollisionResolver`] adds a last-known-good snapshot that is
//! restored when nothing else works.

use tracing::trace;

use crate::board::{Board, PieceSnapshot};
use crate::types::KICK_OFFSETS;

/// Shift the falling piece by each column offset in turn until it stops colliding.
///
/// Every rejected offset is undone before the next one is tried. Returns the
/// offset that was kept, or `None` with the piece back at its starting spot.
pub fn kick(board: &mut Board, offsets: &[i32]) -> Option<i32> {
    for &offset in offsets {
        board.translate_piece(0, offset);
        if board.has_collisions() {
            trace!(offset, "kick rejected");
            board.translate_piece(0, -offset);
        } else {
            trace!(offset, "kick accepted");
            return Some(offset);
        }
    }
    None
}

/// Pairs a stored piece position with the kick policy for one resolution attempt.
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    saved: PieceSnapshot,
}

impl CollisionResolver {
    /// Create a resolver holding the falling piece's current positions.
    pub fn new(board: &Board) -> Self {
        Self {
            saved: board.store_piece_positions(),
        }
    }

    /// Refresh the last-known-good positions.
    pub fn store_piece_positions(&mut self, board: &Board) {
        self.saved = board.store_piece_positions();
    }

    pub fn saved_positions(&self) -> &PieceSnapshot {
        &self.saved
    }

    /// Get the falling piece out of a collision.
    ///
    /// Kicks are only attempted after a rotation; otherwise, or when every kick
    /// fails, the stored positions are restored. Returns `true` if a kick
    /// succeeded.
    pub fn resolve_collisions(&self, board: &mut Board, after_rotation: bool) -> bool {
        let offsets: &[i32] = if after_rotation { &KICK_OFFSETS } else { &[] };
        if kick(board, offsets).is_some() {
            return true;
        }
        board.restore_piece_positions(&self.saved);
        false
    }
}
