use hashbrown::HashMap;
use log::debug;

use crate::config::FilterCfg;
use crate::ids::TimerId;
use crate::outputs::Change;
use crate::page::{CourseCardNode, FilterButtonNode};
use crate::presenter::ACTIVE_CLASS;
use crate::timer::CardStep;

const HIDE_CLASS: &str = "hide";

/// A style step the engine must run on a card after `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredStep {
    pub card: usize,
    pub step: CardStep,
    pub delay_ms: u64,
}

/// Course-card filter driven by filter buttons.
///
/// Showing a card is immediate for layout and delayed for opacity; hiding is immediate for
/// opacity and delayed for layout. A card's pending step is dropped whenever a new
/// selection touches the card, so steps from an older selection never land.
#[derive(Clone, Debug)]
pub struct CourseFilter {
    buttons: Vec<FilterButtonNode>,
    cards: Vec<CourseCardNode>,
    cfg: FilterCfg,
    selected: Option<usize>,
    pending: HashMap<usize, TimerId>,
}

impl CourseFilter {
    pub fn new(buttons: Vec<FilterButtonNode>, cards: Vec<CourseCardNode>, cfg: &FilterCfg) -> Self {
        Self {
            buttons,
            cards,
            cfg: cfg.clone(),
            selected: None,
            pending: HashMap::new(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.buttons.get(i))
            .map(|b| b.filter.as_str())
    }

    pub fn buttons(&self) -> &[FilterButtonNode] {
        &self.buttons
    }

    pub fn cards(&self) -> &[CourseCardNode] {
        &self.cards
    }

    fn matches(&self, value: &str, card: &CourseCardNode) -> bool {
        value == self.cfg.all_value || card.category == value
    }

    /// Select button `index`. Immediate changes go to `out`; the returned steps must be
    /// scheduled by the caller and registered with [`CourseFilter::track`]. Timers that
    /// must be cancelled first are returned through `cancel`.
    pub fn select(
        &mut self,
        index: usize,
        out: &mut Vec<Change>,
        cancel: &mut Vec<TimerId>,
    ) -> Option<Vec<DeferredStep>> {
        let value = self.buttons.get(index)?.filter.clone();

        for (i, button) in self.buttons.iter().enumerate() {
            out.push(Change::SetClass {
                node: button.node.clone(),
                class: ACTIVE_CLASS.to_string(),
                enabled: i == index,
            });
        }

        let mut steps = Vec::with_capacity(self.cards.len());
        for (i, card) in self.cards.iter().enumerate() {
            if let Some(timer) = self.pending.remove(&i) {
                cancel.push(timer);
            }
            if self.matches(&value, card) {
                out.push(Change::SetClass {
                    node: card.node.clone(),
                    class: HIDE_CLASS.to_string(),
                    enabled: false,
                });
                out.push(style(&card.node, "display", "block"));
                steps.push(DeferredStep {
                    card: i,
                    step: CardStep::FadeIn,
                    delay_ms: self.cfg.fade_in_delay_ms,
                });
            } else {
                out.push(Change::SetClass {
                    node: card.node.clone(),
                    class: HIDE_CLASS.to_string(),
                    enabled: true,
                });
                out.push(style(&card.node, "opacity", "0"));
                steps.push(DeferredStep {
                    card: i,
                    step: CardStep::Collapse,
                    delay_ms: self.cfg.hide_delay_ms,
                });
            }
        }

        debug!("filter `{value}` selected");
        self.selected = Some(index);
        Some(steps)
    }

    /// Remember the timer carrying a card's pending step.
    pub fn track(&mut self, card: usize, timer: TimerId) {
        self.pending.insert(card, timer);
    }

    /// Run a card's deferred step once its timer fires.
    pub fn run_step(&mut self, card: usize, step: CardStep, out: &mut Vec<Change>) {
        self.pending.remove(&card);
        let Some(card) = self.cards.get(card) else {
            return;
        };
        out.push(match step {
            CardStep::FadeIn => style(&card.node, "opacity", "1"),
            CardStep::Collapse => style(&card.node, "display", "none"),
        });
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

fn style(node: &str, property: &str, value: &str) -> Change {
    Change::SetStyle {
        node: node.to_string(),
        property: property.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> CourseFilter {
        CourseFilter::new(
            vec![
                FilterButtonNode {
                    node: "f-all".into(),
                    filter: "all".into(),
                },
                FilterButtonNode {
                    node: "f-web".into(),
                    filter: "web".into(),
                },
            ],
            vec![
                CourseCardNode {
                    node: "c-web".into(),
                    category: "web".into(),
                },
                CourseCardNode {
                    node: "c-data".into(),
                    category: "data".into(),
                },
            ],
            &FilterCfg::default(),
        )
    }

    #[test]
    fn select_plans_show_and_hide_steps() {
        let mut f = filter();
        let mut out = Vec::new();
        let mut cancel = Vec::new();
        let steps = f.select(1, &mut out, &mut cancel).unwrap();
        assert_eq!(
            steps,
            vec![
                DeferredStep {
                    card: 0,
                    step: CardStep::FadeIn,
                    delay_ms: 10
                },
                DeferredStep {
                    card: 1,
                    step: CardStep::Collapse,
                    delay_ms: 300
                },
            ]
        );
        assert!(cancel.is_empty());
        assert!(out.contains(&style("c-data", "opacity", "0")));
        assert!(out.contains(&style("c-web", "display", "block")));
        assert_eq!(f.selected(), Some("web"));
    }

    #[test]
    fn reselect_cancels_pending_steps() {
        let mut f = filter();
        let mut out = Vec::new();
        let mut cancel = Vec::new();
        f.select(1, &mut out, &mut cancel).unwrap();
        f.track(1, TimerId(7));
        f.select(0, &mut out, &mut cancel).unwrap();
        assert_eq!(cancel, vec![TimerId(7)]);
        assert_eq!(f.pending_len(), 0);
    }

    #[test]
    fn unknown_button_is_ignored() {
        let mut f = filter();
        let mut out = Vec::new();
        assert!(f.select(5, &mut out, &mut Vec::new()).is_none());
        assert!(out.is_empty());
    }
}
