//! Output contracts from the core engine.
//!
//! Outputs carry the presentation changes produced during one `update` (or `mount`),
//! keyed by the host's node key, plus a separate list of semantic events. Hosts apply
//! changes through a [`Presenter`](crate::presenter::Presenter) and forward events.

use serde::{Deserialize, Serialize};

use crate::ids::{DeckId, TargetId};

/// One mutation of a presentation node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change {
    SetText {
        node: String,
        text: String,
    },
    /// Toggle the node's "active" marker.
    SetActive {
        node: String,
        active: bool,
    },
    SetClass {
        node: String,
        class: String,
        enabled: bool,
    },
    SetStyle {
        node: String,
        property: String,
        value: String,
    },
}

impl Change {
    pub fn node(&self) -> &str {
        match self {
            Change::SetText { node, .. }
            | Change::SetActive { node, .. }
            | Change::SetClass { node, .. }
            | Change::SetStyle { node, .. } => node,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Visibility,
    Timers,
}

/// Discrete semantic signals emitted while stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    TargetTriggered {
        target: TargetId,
        node: String,
    },
    CounterStarted {
        node: String,
        target_value: u64,
    },
    CounterFinished {
        node: String,
        value: u64,
    },
    SlideChanged {
        deck: DeckId,
        index: usize,
    },
    SectionActivated {
        section: String,
    },
    FilterApplied {
        value: String,
    },
    CapabilityUnavailable {
        capability: Capability,
    },
}

/// Outputs returned by `Engine::update()` and `Engine::mount()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Text changes for one node, in emission order.
    pub fn texts_for<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.changes.iter().filter_map(move |c| match c {
            Change::SetText { node: n, text } if n == node => Some(text.as_str()),
            _ => None,
        })
    }
}
