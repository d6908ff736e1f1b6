//! Piece module - detached piece geometry and the rotation transform
//!
//! A [`Piece`] is what a provider hands out: an ordered list of block
//! positions of one type. The first block is the rotation pivot. Once a piece
//! is added to a [`Board`](crate::Board) its blocks live in the board's arena
//! and are addressed through [`ActivePiece`](crate::board::ActivePiece).

use arrayvec::ArrayVec;

use crate::types::{PieceType, Position, MAX_PIECE_BLOCKS};

/// Block positions of a single piece, pivot first.
pub type PieceShape = ArrayVec<Position, MAX_PIECE_BLOCKS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PieceError {
    #[error("a piece needs at least one block")]
    Empty,
    #[error("a piece has at most {max} blocks, got {got}")]
    TooManyBlocks { got: usize, max: usize },
}

/// Canonical spawn shape for a piece type, as `(row, column)` with the pivot first.
pub fn shape_of(piece_type: PieceType) -> [(i32, i32); 4] {
    match piece_type {
        PieceType::I => [(0, 1), (0, 0), (0, 2), (0, 3)],
        PieceType::J => [(0, 1), (1, 0), (0, 0), (0, 2)],
        PieceType::L => [(0, 1), (0, 0), (0, 2), (1, 2)],
        PieceType::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
        PieceType::S => [(0, 1), (0, 0), (1, 1), (1, 2)],
        PieceType::T => [(0, 1), (0, 0), (0, 2), (1, 1)],
        PieceType::Z => [(0, 1), (1, 0), (1, 1), (0, 2)],
    }
}

/// Rotate positions 90° about the first one: `(r, c) -> (-c, r)` relative to the pivot.
///
/// This is the single rotation routine shared by detached pieces and the board.
pub fn rotate_about_pivot(positions: &mut [Position]) {
    let Some(&pivot) = positions.first() else {
        return;
    };
    for p in positions.iter_mut() {
        let row = p.row - pivot.row;
        let column = p.column - pivot.column;
        *p = Position::new(pivot.row - column, pivot.column + row);
    }
}

/// Column span (`max - min`) of a set of positions.
pub fn width_of(positions: &[Position]) -> i32 {
    let min = positions.iter().map(|p| p.column).min().unwrap_or(0);
    let max = positions.iter().map(|p| p.column).max().unwrap_or(0);
    (max - min).abs()
}

/// Highest row among a set of positions.
pub fn top_of(positions: &[Position]) -> i32 {
    positions.iter().map(|p| p.row).max().unwrap_or(0)
}

/// A piece that is not (yet) on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    piece_type: PieceType,
    positions: PieceShape,
}

impl Piece {
    /// Create the canonical tetromino for `piece_type`.
    pub fn new(piece_type: PieceType) -> Self {
        let positions = shape_of(piece_type)
            .iter()
            .map(|&rc| Position::from(rc))
            .collect();
        Self {
            piece_type,
            positions,
        }
    }

    /// Create a custom piece. The first position is the pivot.
    pub fn from_positions(
        positions: &[Position],
        piece_type: PieceType,
    ) -> Result<Self, PieceError> {
        if positions.is_empty() {
            return Err(PieceError::Empty);
        }
        if positions.len() > MAX_PIECE_BLOCKS {
            return Err(PieceError::TooManyBlocks {
                got: positions.len(),
                max: MAX_PIECE_BLOCKS,
            });
        }
        Ok(Self {
            piece_type,
            positions: positions.iter().copied().collect(),
        })
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn can_rotate(&self) -> bool {
        self.piece_type.can_rotate()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Column span of the piece, recomputed from current positions.
    pub fn width(&self) -> i32 {
        width_of(&self.positions)
    }

    /// Highest row occupied by the piece.
    pub fn top(&self) -> i32 {
        top_of(&self.positions)
    }

    /// Translate every block. No validity check.
    pub fn move_by(&mut self, row_offset: i32, column_offset: i32) {
        for p in self.positions.iter_mut() {
            *p = p.offset(row_offset, column_offset);
        }
    }

    /// Rotate 90° about the pivot; no-op for non-rotatable types.
    pub fn rotate(&mut self) {
        if self.can_rotate() {
            rotate_about_pivot(&mut self.positions);
        }
    }
}
