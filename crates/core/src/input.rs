//! Player input seam
//!
//! The game polls a [`PlayerInput`] once per update and consumes at most one
//! action. Device handling (keys, touch) lives outside the core.

use std::collections::VecDeque;

use crate::types::PlayerAction;

pub trait PlayerInput {
    /// The action for this tick, if any.
    fn player_action(&mut self) -> Option<PlayerAction>;
}

impl<T: PlayerInput + ?Sized> PlayerInput for Box<T> {
    fn player_action(&mut self) -> Option<PlayerAction> {
        (**self).player_action()
    }
}

/// Never produces an action; the piece only falls under gravity.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl PlayerInput for NoInput {
    fn player_action(&mut self) -> Option<PlayerAction> {
        None
    }
}

/// FIFO of pending actions, one handed out per poll.
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    pending: VecDeque<PlayerAction>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: PlayerAction) {
        self.pending.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl FromIterator<PlayerAction> for QueuedInput {
    fn from_iter<T: IntoIterator<Item = PlayerAction>>(actions: T) -> Self {
        Self {
            pending: actions.into_iter().collect(),
        }
    }
}

impl PlayerInput for QueuedInput {
    fn player_action(&mut self) -> Option<PlayerAction> {
        self.pending.pop_front()
    }
}
