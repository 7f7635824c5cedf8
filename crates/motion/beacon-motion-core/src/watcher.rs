//! Visibility watcher.
//!
//! Targets are registered against a host node key with a visibility threshold. The host
//! feeds visible-fraction samples; the watcher reports which targets crossed their
//! threshold. `Once` targets fire a single time and are then unregistered; `Continuous`
//! targets fire on every rising edge.
//!
//! When the host has no visibility facility the watcher still accepts registrations but
//! never fires.

use hashbrown::HashMap;
use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ids::TargetId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObserveMode {
    #[default]
    Once,
    Continuous,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObservableTarget {
    pub id: TargetId,
    pub node: String,
    pub threshold: f32,
    pub mode: ObserveMode,
    /// Set when a `Once` target fires. Never cleared.
    pub triggered: bool,
    /// Whether the last sample was at or above the threshold (edge detection).
    above: bool,
    registered: bool,
}

impl ObservableTarget {
    /// Whether `fraction` counts as crossing this target's threshold.
    /// A zero threshold still needs some part of the element on screen.
    #[inline]
    pub fn crosses(&self, fraction: f32) -> bool {
        fraction > 0.0 && fraction >= self.threshold
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

#[derive(Debug)]
pub struct VisibilityWatcher {
    available: bool,
    next_id: u32,
    targets: IndexMap<TargetId, ObservableTarget>,
    by_node: HashMap<String, Vec<TargetId>>,
}

impl Default for VisibilityWatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VisibilityWatcher {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            next_id: 0,
            targets: IndexMap::new(),
            by_node: HashMap::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Register `node` for monitoring.
    ///
    /// Observing a node again with the same mode and threshold returns the existing
    /// target. A triggered target stays untouched; one that was unobserved before it
    /// fired is monitored again from a below-threshold state.
    pub fn observe(
        &mut self,
        node: &str,
        threshold: f32,
        mode: ObserveMode,
    ) -> Result<TargetId, EngineError> {
        if node.is_empty() {
            return Err(EngineError::EmptyNodeKey { context: "observe" });
        }
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(EngineError::InvalidThreshold {
                node: node.to_string(),
                threshold,
            });
        }

        if let Some(existing) = self.find(node, threshold, mode) {
            if let Some(t) = self.targets.get_mut(&existing) {
                if !t.triggered && !t.registered {
                    t.registered = true;
                    t.above = false;
                    debug!("observing `{node}` again as {existing:?}");
                }
            }
            trace!("observe({node}) reuses target {existing:?}");
            return Ok(existing);
        }

        let id = TargetId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.targets.insert(
            id,
            ObservableTarget {
                id,
                node: node.to_string(),
                threshold,
                mode,
                triggered: false,
                above: false,
                registered: true,
            },
        );
        self.by_node.entry(node.to_string()).or_default().push(id);
        debug!("observing `{node}` as {id:?} (threshold {threshold}, {mode:?})");
        Ok(id)
    }

    fn find(&self, node: &str, threshold: f32, mode: ObserveMode) -> Option<TargetId> {
        self.by_node.get(node)?.iter().copied().find(|id| {
            self.targets
                .get(id)
                .is_some_and(|t| t.mode == mode && t.threshold == threshold)
        })
    }

    /// Stop monitoring a target. Returns false if it was not registered.
    pub fn unobserve(&mut self, id: TargetId) -> bool {
        match self.targets.get_mut(&id) {
            Some(t) if t.registered => {
                t.registered = false;
                true
            }
            _ => false,
        }
    }

    /// Stop monitoring every target.
    pub fn disconnect(&mut self) {
        for t in self.targets.values_mut() {
            t.registered = false;
        }
    }

    /// Feed one visible-fraction sample for `node`. Returns the targets that fired, in
    /// registration order.
    pub fn sample(&mut self, node: &str, fraction: f32) -> Vec<TargetId> {
        let mut fired = Vec::new();
        if !self.available {
            return fired;
        }
        let fraction = if fraction.is_nan() { 0.0 } else { fraction };
        let Some(ids) = self.by_node.get(node) else {
            trace!("visibility sample for unobserved node `{node}`");
            return fired;
        };
        for id in ids {
            let Some(t) = self.targets.get_mut(id) else {
                continue;
            };
            if !t.registered {
                continue;
            }
            let above = t.crosses(fraction);
            let rising = above && !t.above;
            t.above = above;
            if !rising {
                continue;
            }
            if t.mode == ObserveMode::Once {
                t.triggered = true;
                t.registered = false;
            }
            trace!("target {:?} (`{}`) fired at {fraction}", t.id, t.node);
            fired.push(t.id);
        }
        fired
    }

    pub fn target(&self, id: TargetId) -> Option<&ObservableTarget> {
        self.targets.get(&id)
    }

    pub fn is_observing(&self, id: TargetId) -> bool {
        self.targets.get(&id).is_some_and(|t| t.registered)
    }

    /// Number of targets still being monitored.
    pub fn active_len(&self) -> usize {
        self.targets.values().filter(|t| t.registered).count()
    }
}
