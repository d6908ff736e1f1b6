//! `PlayerInput` backed by terminal key events.
//!
//! The host drains terminal events between ticks and hands each to
//! [`KeyboardInput::press`]. Mapped actions wait in a small bounded queue;
//! the game takes at most one per update, so a burst of presses plays out
//! over the following ticks instead of being lost.

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;
use tomino_core::PlayerInput;
use tracing::trace;

use crate::map::KeyCommand;
use crate::types::PlayerAction;

/// Pending actions beyond this are dropped until the game catches up.
pub const MAX_PENDING_ACTIONS: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    pending: ArrayVec<PlayerAction, MAX_PENDING_ACTIONS>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event.
    ///
    /// Game actions are queued and returned for the caller's bookkeeping;
    /// `Restart` and `Quit` are never queued and are left to the host.
    pub fn press(&mut self, key: KeyEvent) -> Option<KeyCommand> {
        let command = KeyCommand::from_key(key)?;
        if let KeyCommand::Play(action) = command {
            if self.pending.try_push(action).is_err() {
                trace!(action = action.as_str(), "input queue full, dropping action");
            }
        }
        Some(command)
    }

    pub fn pending(&self) -> &[PlayerAction] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl PlayerInput for KeyboardInput {
    fn player_action(&mut self) -> Option<PlayerAction> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}
