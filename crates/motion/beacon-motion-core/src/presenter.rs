//! Render-target seam.
//!
//! The engine never touches a document. Hosts implement [`Presenter`] over whatever node
//! model they have and feed it the changes from each frame with [`apply_changes`].

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::outputs::Change;

/// Class name `set_active` toggles.
pub const ACTIVE_CLASS: &str = "active";

pub trait Presenter {
    fn set_text(&mut self, node: &str, text: &str);

    fn set_active(&mut self, node: &str, active: bool);

    /// Toggle an arbitrary class. The default only understands the active marker.
    fn set_class(&mut self, node: &str, class: &str, enabled: bool) {
        if class == ACTIVE_CLASS {
            self.set_active(node, enabled);
        }
    }

    /// Set one inline style property. Ignored by default.
    fn set_style(&mut self, _node: &str, _property: &str, _value: &str) {}
}

pub fn apply_changes(changes: &[Change], presenter: &mut dyn Presenter) {
    for change in changes {
        match change {
            Change::SetText { node, text } => presenter.set_text(node, text),
            Change::SetActive { node, active } => presenter.set_active(node, *active),
            Change::SetClass {
                node,
                class,
                enabled,
            } => presenter.set_class(node, class, *enabled),
            Change::SetStyle {
                node,
                property,
                value,
            } => presenter.set_style(node, property, value),
        }
    }
}

/// State of one node in a [`MemoryPresenter`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeState {
    pub text: Option<String>,
    pub classes: BTreeSet<String>,
    pub style: BTreeMap<String, String>,
}

impl NodeState {
    pub fn is_active(&self) -> bool {
        self.classes.contains(ACTIVE_CLASS)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }
}

/// In-memory node model. Useful as a headless renderer and as a test double.
#[derive(Clone, Debug, Default)]
pub struct MemoryPresenter {
    nodes: IndexMap<String, NodeState>,
}

impl MemoryPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, key: &str) -> Option<&NodeState> {
        self.nodes.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.nodes.get(key)?.text.as_deref()
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.nodes.get(key).is_some_and(NodeState::is_active)
    }

    /// Keys among `keys` whose node is active.
    pub fn active_among<'a>(&self, keys: &'a [String]) -> Vec<&'a str> {
        keys.iter()
            .filter(|k| self.is_active(k))
            .map(String::as_str)
            .collect()
    }

    fn entry(&mut self, key: &str) -> &mut NodeState {
        self.nodes.entry(key.to_string()).or_default()
    }
}

impl Presenter for MemoryPresenter {
    fn set_text(&mut self, node: &str, text: &str) {
        self.entry(node).text = Some(text.to_string());
    }

    fn set_active(&mut self, node: &str, active: bool) {
        self.set_class(node, ACTIVE_CLASS, active);
    }

    fn set_class(&mut self, node: &str, class: &str, enabled: bool) {
        let classes = &mut self.entry(node).classes;
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_style(&mut self, node: &str, property: &str, value: &str) {
        self.entry(node)
            .style
            .insert(property.to_string(), value.to_string());
    }
}
