//! Shared vocabulary for the falling-block rules engine.
//!
//! Pure data types and constants with no external dependencies, usable by the
//! core rules, the terminal front end and tests alike.
//!
//! # Coordinates
//!
//! Positions are `(row, column)` pairs. Rows increase upward: row 0 is the
//! floor and `height - 1` is the highest valid row (the board's `top`).
//! Columns increase to the right starting at 0.
//!
//! # Examples
//!
//! ```
//! use tomino_types::{PieceType, PlayerAction, Position};
//!
//! let p = Position::new(3, 4).offset(-1, 2);
//! assert_eq!(p, Position::new(2, 6));
//!
//! assert_eq!(PieceType::from_str("t"), Some(PieceType::T));
//! assert!(!PieceType::O.can_rotate());
//!
//! assert_eq!(PlayerAction::from_str("moveLeft"), Some(PlayerAction::MoveLeft));
//! ```

/// Default board width in cells.
pub const DEFAULT_BOARD_WIDTH: i32 = 10;

/// Default board height in cells.
pub const DEFAULT_BOARD_HEIGHT: i32 = 20;

/// Time (in seconds) an idle piece waits before gravity moves it down one row.
pub const FALL_DELAY: f32 = 1.0;

/// Column offsets tried, in order, to kick a piece free after a rotation.
pub const KICK_OFFSETS: [i32; 4] = [-1, -2, 1, 2];

/// Largest accepted board width or height, in cells.
pub const MAX_BOARD_DIMENSION: i32 = 1024;

/// Upper bound on the number of blocks in a single piece.
pub const MAX_PIECE_BLOCKS: usize = 4;

/// Fixed timestep of the terminal host in milliseconds (~60 FPS).
pub const TICK_MS: u32 = 16;

/// A grid coordinate. Value type, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Returns this position translated by the given deltas.
    #[inline]
    pub const fn offset(self, row_offset: i32, column_offset: i32) -> Self {
        Self {
            row: self.row + row_offset,
            column: self.column + column_offset,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, column): (i32, i32)) -> Self {
        Self { row, column }
    }
}

/// The seven piece types.
///
/// Declaration order is significant: [`PieceType::index`] feeds the board
/// fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::J,
        PieceType::L,
        PieceType::O,
        PieceType::S,
        PieceType::T,
        PieceType::Z,
    ];

    /// Zero-based index in declaration order.
    pub fn index(self) -> i32 {
        match self {
            PieceType::I => 0,
            PieceType::J => 1,
            PieceType::L => 2,
            PieceType::O => 3,
            PieceType::S => 4,
            PieceType::T => 5,
            PieceType::Z => 6,
        }
    }

    /// Whether rotating a piece of this type has any effect.
    ///
    /// The square piece is rotation-invariant, so rotating it is a no-op.
    pub fn can_rotate(self) -> bool {
        !matches!(self, PieceType::O)
    }

    /// Parse piece type from string (case-insensitive)
    ///
    /// ```
    /// use tomino_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_str("i"), Some(PieceType::I));
    /// assert_eq!(PieceType::from_str("Z"), Some(PieceType::Z));
    /// assert_eq!(PieceType::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceType::I),
            "j" => Some(PieceType::J),
            "l" => Some(PieceType::L),
            "o" => Some(PieceType::O),
            "s" => Some(PieceType::S),
            "t" => Some(PieceType::T),
            "z" => Some(PieceType::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::I => "i",
            PieceType::J => "j",
            PieceType::L => "l",
            PieceType::O => "o",
            PieceType::S => "s",
            PieceType::T => "t",
            PieceType::Z => "z",
        }
    }
}

/// Discrete, already-classified player actions consumed by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down; locks the piece when blocked
    MoveDown,
    /// Rotate piece 90° about its pivot, kicking sideways if needed
    Rotate,
    /// Drop piece as far as it goes and lock it
    Fall,
}

impl PlayerAction {
    /// Parse action from string (case-insensitive)
    ///
    /// ```
    /// use tomino_types::PlayerAction;
    ///
    /// assert_eq!(PlayerAction::from_str("rotate"), Some(PlayerAction::Rotate));
    /// assert_eq!(PlayerAction::from_str("moveDown"), Some(PlayerAction::MoveDown));
    /// assert_eq!(PlayerAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(PlayerAction::MoveLeft),
            "moveright" => Some(PlayerAction::MoveRight),
            "movedown" => Some(PlayerAction::MoveDown),
            "rotate" => Some(PlayerAction::Rotate),
            "fall" => Some(PlayerAction::Fall),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::MoveLeft => "moveLeft",
            PlayerAction::MoveRight => "moveRight",
            PlayerAction::MoveDown => "moveDown",
            PlayerAction::Rotate => "rotate",
            PlayerAction::Fall => "fall",
        }
    }

    /// Whether a blocked attempt of this action locks the falling piece.
    pub fn locks_when_blocked(self) -> bool {
        matches!(self, PlayerAction::MoveDown | PlayerAction::Fall)
    }
}
