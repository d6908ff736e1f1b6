//! Terminal rendering for the puzzle board.
//!
//! Rendering goes through a plain character framebuffer: [`GameView`] maps a
//! board and its HUD into a [`FrameBuffer`] without any I/O, and
//! [`TerminalRenderer`] flushes framebuffers to a crossterm backend,
//! rewriting only the rows that changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tomino_core as core;
pub use tomino_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Hud, Viewport};
pub use renderer::{encode_changed_rows_into, encode_full_into, TerminalRenderer};
