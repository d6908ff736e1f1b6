//! Board module - the grid, its blocks and the active piece
//!
//! The board owns every block in an arena (`Vec<Block>`). While a piece is
//! falling, the board also keeps an [`ActivePiece`]: the ordered handles of
//! that piece's blocks inside the arena. Locking a piece only drops those
//! handles; the blocks stay where they are.
//!
//! Coordinates: `(row, column)` with row 0 at the floor and `top = height - 1`.
//! All mutations are rolled back on failure, so whenever
//! [`Board::has_collisions`] is false every block is in bounds and no two
//! blocks share a position.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::collision;
use crate::piece::{rotate_about_pivot, top_of, width_of, Piece, PieceShape};
use crate::types::{
    PieceType, Position, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, KICK_OFFSETS,
    MAX_BOARD_DIMENSION, MAX_PIECE_BLOCKS,
};

/// Handle of a block inside the board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One occupied grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub position: Position,
    pub piece_type: PieceType,
}

/// The falling piece: handles into the arena, pivot first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    piece_type: PieceType,
    blocks: ArrayVec<BlockId, MAX_PIECE_BLOCKS>,
}

impl ActivePiece {
    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    pub fn can_rotate(&self) -> bool {
        self.piece_type.can_rotate()
    }
}

/// Saved positions of the active piece, keyed by block identity.
pub type PieceSnapshot = ArrayVec<(BlockId, Position), MAX_PIECE_BLOCKS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("board dimensions are limited to {max}x{max}, got {width}x{height}")]
    TooLarge { width: i32, height: i32, max: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    top: i32,
    blocks: Vec<Block>,
    piece: Option<ActivePiece>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        if width <= 0 || height <= 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        if width > MAX_BOARD_DIMENSION || height > MAX_BOARD_DIMENSION {
            return Err(BoardError::TooLarge {
                width,
                height,
                max: MAX_BOARD_DIMENSION,
            });
        }
        Ok(Self {
            width,
            height,
            top: height - 1,
            blocks: Vec::new(),
            piece: None,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Highest valid row.
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Every block on the board, falling piece included.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0)
    }

    pub fn piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    /// Whether `id` belongs to the falling piece.
    pub fn is_piece_block(&self, id: BlockId) -> bool {
        self.piece
            .as_ref()
            .is_some_and(|piece| piece.blocks.contains(&id))
    }

    /// Current positions of the falling piece, pivot first (empty if none).
    pub fn piece_positions(&self) -> PieceShape {
        match &self.piece {
            Some(piece) => piece.blocks.iter().map(|id| self.blocks[id.0].position).collect(),
            None => PieceShape::new(),
        }
    }

    /// Snapshot the falling piece's positions by block identity.
    pub fn store_piece_positions(&self) -> PieceSnapshot {
        match &self.piece {
            Some(piece) => piece
                .blocks
                .iter()
                .map(|&id| (id, self.blocks[id.0].position))
                .collect(),
            None => PieceSnapshot::new(),
        }
    }

    /// Move every snapshotted block back to its saved position.
    pub fn restore_piece_positions(&mut self, snapshot: &PieceSnapshot) {
        for &(id, position) in snapshot {
            if let Some(block) = self.blocks.get_mut(id.0) {
                block.position = position;
            }
        }
    }

    pub fn has_collisions(&self) -> bool {
        self.has_board_collisions() || self.has_block_collisions()
    }

    /// True if two blocks share a position.
    pub fn has_block_collisions(&self) -> bool {
        let unique: HashSet<Position> = self.blocks.iter().map(|b| b.position).collect();
        unique.len() != self.blocks.len()
    }

    /// True if any block lies outside the grid.
    pub fn has_board_collisions(&self) -> bool {
        self.blocks.iter().any(|b| self.collides_with_board(b))
    }

    pub fn collides_with_board(&self, block: &Block) -> bool {
        self.is_out_of_bounds(block.position)
    }

    pub fn is_out_of_bounds(&self, position: Position) -> bool {
        position.row < 0
            || position.row >= self.height
            || position.column < 0
            || position.column >= self.width
    }

    /// Place `piece` at the top centre and make it the falling piece.
    ///
    /// Collisions are not checked here; a colliding spawn means game over and
    /// is the caller's call to make.
    pub fn add_piece(&mut self, piece: Piece) {
        let offset_row = self.top - piece.top();
        let offset_col = (self.width - piece.width()) / 2;
        let piece_type = piece.piece_type();

        let mut handles = ArrayVec::new();
        for &position in piece.positions() {
            handles.push(BlockId(self.blocks.len()));
            self.blocks.push(Block {
                position: position.offset(offset_row, offset_col),
                piece_type,
            });
        }

        debug!(
            piece = piece_type.as_str(),
            row = offset_row,
            column = offset_col,
            "piece added"
        );
        self.piece = Some(ActivePiece {
            piece_type,
            blocks: handles,
        });
    }

    /// Insert a fixed block that is not part of the falling piece.
    pub fn add_block(&mut self, position: Position, piece_type: PieceType) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block {
            position,
            piece_type,
        });
        id
    }

    /// Stop treating the falling piece as active. Its blocks stay on the board.
    pub fn lock_piece(&mut self) -> Option<ActivePiece> {
        let piece = self.piece.take()?;
        debug!(piece = piece.piece_type.as_str(), "piece locked");
        Some(piece)
    }

    /// Translate the falling piece without any validity check.
    pub(crate) fn translate_piece(&mut self, row_offset: i32, column_offset: i32) {
        let Some(piece) = &self.piece else {
            return;
        };
        for id in &piece.blocks {
            let block = &mut self.blocks[id.0];
            block.position = block.position.offset(row_offset, column_offset);
        }
    }

    /// Rotate the falling piece about its pivot without any validity check.
    pub(crate) fn rotate_piece_unchecked(&mut self) {
        let Some(piece) = &self.piece else {
            return;
        };
        let mut positions = self.piece_positions();
        rotate_about_pivot(&mut positions);
        for (id, position) in piece.blocks.iter().zip(positions) {
            self.blocks[id.0].position = position;
        }
    }

    pub fn move_piece_left(&mut self) -> bool {
        self.move_piece(0, -1)
    }

    pub fn move_piece_right(&mut self) -> bool {
        self.move_piece(0, 1)
    }

    pub fn move_piece_down(&mut self) -> bool {
        self.move_piece(-1, 0)
    }

    /// Move the falling piece; undone and `false` if the result collides.
    pub fn move_piece(&mut self, row_offset: i32, column_offset: i32) -> bool {
        if self.piece.is_none() {
            return false;
        }
        self.translate_piece(row_offset, column_offset);
        if self.has_collisions() {
            self.translate_piece(-row_offset, -column_offset);
            return false;
        }
        true
    }

    /// Rotate the falling piece, kicking it sideways if the rotation collides.
    ///
    /// Returns `false` (with the piece back where it was) if the piece cannot
    /// rotate or no kick frees it.
    pub fn rotate_piece(&mut self) -> bool {
        let rotatable = self.piece.as_ref().is_some_and(ActivePiece::can_rotate);
        if !rotatable {
            return false;
        }

        let snapshot = self.store_piece_positions();
        self.rotate_piece_unchecked();

        if self.has_collisions() && !self.resolve_collisions_after_rotation() {
            self.restore_piece_positions(&snapshot);
            return false;
        }
        true
    }

    /// Try the kick offsets in order; `true` once the piece no longer collides.
    pub fn resolve_collisions_after_rotation(&mut self) -> bool {
        collision::kick(self, &KICK_OFFSETS).is_some()
    }

    /// Move the falling piece down until it stops. Returns the rows travelled.
    pub fn fall_piece(&mut self) -> usize {
        let mut rows = 0;
        while self.move_piece_down() {
            rows += 1;
        }
        rows
    }

    /// Where the falling piece would come to rest after a hard drop.
    ///
    /// The board is not touched.
    pub fn piece_shadow(&self) -> PieceShape {
        let Some(piece) = &self.piece else {
            return PieceShape::new();
        };

        let occupied: HashSet<Position> = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| !piece.blocks.contains(&BlockId(*i)))
            .map(|(_, b)| b.position)
            .collect();
        let fits = |positions: &PieceShape| {
            positions
                .iter()
                .all(|&p| !self.is_out_of_bounds(p) && !occupied.contains(&p))
        };

        let mut shadow = self.piece_positions();
        if !fits(&shadow) {
            return shadow;
        }
        loop {
            let next: PieceShape = shadow.iter().map(|p| p.offset(-1, 0)).collect();
            if !fits(&next) {
                return shadow;
            }
            shadow = next;
        }
    }

    /// Number of blocks in `row`.
    pub fn row_len(&self, row: i32) -> usize {
        self.blocks.iter().filter(|b| b.position.row == row).count()
    }

    pub fn is_row_full(&self, row: i32) -> bool {
        self.row_len(row) == self.width as usize
    }

    /// Clear every full row, top to bottom, shifting the blocks above each one down.
    ///
    /// Each clear is applied before the next row is examined so row indices
    /// stay consistent. Returns the number of rows removed.
    pub fn remove_full_rows(&mut self) -> usize {
        let mut removed = 0;
        for row in (0..self.height).rev() {
            if !self.is_row_full(row) {
                continue;
            }
            self.remove_row(row);
            for block in &mut self.blocks {
                if block.position.row > row {
                    block.position.row -= 1;
                }
            }
            removed += 1;
        }
        if removed > 0 {
            debug!(rows = removed, "rows removed");
        }
        removed
    }

    /// Drop every block in `row` from the arena, keeping piece handles valid.
    fn remove_row(&mut self, row: i32) {
        let mut remap = Vec::with_capacity(self.blocks.len());
        let mut next = 0;
        for block in &self.blocks {
            if block.position.row == row {
                remap.push(None);
            } else {
                remap.push(Some(BlockId(next)));
                next += 1;
            }
        }
        self.blocks.retain(|b| b.position.row != row);

        let emptied = match &mut self.piece {
            Some(piece) => {
                piece.blocks = piece.blocks.iter().filter_map(|id| remap[id.0]).collect();
                piece.blocks.is_empty()
            }
            None => false,
        };
        if emptied {
            self.piece = None;
        }
    }

    /// Remove every block, falling piece included.
    pub fn remove_all_blocks(&mut self) {
        self.blocks.clear();
        self.piece = None;
    }

    /// Cheap structural summary of the board.
    ///
    /// Distinct boards can share a fingerprint; compare boards with `==`.
    pub fn fingerprint(&self) -> i64 {
        let width = self.width as i64;
        let cells = width * self.height as i64;
        self.blocks
            .iter()
            .map(|b| {
                cells * b.piece_type.index() as i64
                    + b.position.row as i64 * width
                    + b.position.column as i64
            })
            .sum()
    }

    /// Column span of the falling piece (0 if none).
    pub fn piece_width(&self) -> i32 {
        width_of(&self.piece_positions())
    }

    /// Highest row of the falling piece (0 if none).
    pub fn piece_top(&self) -> i32 {
        top_of(&self.piece_positions())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            top: DEFAULT_BOARD_HEIGHT - 1,
            blocks: Vec::new(),
            piece: None,
        }
    }
}
