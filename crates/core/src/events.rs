//! Game notifications
//!
//! Observers are plain callbacks registered on the game. They run
//! synchronously, in registration order, before the call that raised the
//! event returns.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// The session ended because the next piece could not be placed.
    Finished,
    /// A piece just locked; rows may be about to clear.
    PieceFinishedFalling,
}

/// Registration handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut()>;

#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, GameEvent, Callback)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, event: GameEvent, callback: impl FnMut() + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, event, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: GameEvent) {
        for (_, kind, callback) in self.entries.iter_mut() {
            if *kind == event {
                callback();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
