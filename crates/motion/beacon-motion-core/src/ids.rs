//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// A target registered with the visibility watcher.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CounterId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// Page-level ids handed out at mount. The watcher and the timer queue number their
/// own entries.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_counter: u32,
    next_deck: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_counter(&mut self) -> CounterId {
        let id = CounterId(self.next_counter);
        self.next_counter = self.next_counter.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_deck(&mut self) -> DeckId {
        let id = DeckId(self.next_deck);
        self.next_deck = self.next_deck.wrapping_add(1);
        id
    }
}
