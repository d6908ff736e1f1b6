//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::PlayerAction`] and host
//! commands, and provides [`KeyboardInput`], a [`tomino_core::PlayerInput`]
//! fed from those events. Key-release events are ignored so terminals with
//! and without release reporting behave the same.

pub mod keyboard;
pub mod map;

pub use tomino_types as types;

pub use keyboard::KeyboardInput;
pub use map::{handle_key_event, is_restart, should_quit, KeyCommand};
