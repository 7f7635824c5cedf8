//! Input contracts for the core engine.
//!
//! Hosts collect what the browser observed since the previous frame and pass it into
//! `Engine::update()`. Inputs are applied at the start of the frame, before timers run.

use serde::{Deserialize, Serialize};

use crate::ids::DeckId;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    /// Visible-fraction samples, one per node that changed.
    #[serde(default)]
    pub visibility: Vec<VisibilitySample>,
    /// Latest vertical scroll offset in CSS pixels.
    #[serde(default)]
    pub scroll_y: Option<f64>,
    #[serde(default)]
    pub indicator_clicks: Vec<IndicatorClick>,
    /// Filter button indices, in click order.
    #[serde(default)]
    pub filter_clicks: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilitySample {
    pub node: String,
    pub fraction: f32,
}

impl VisibilitySample {
    pub fn new(node: impl Into<String>, fraction: f32) -> Self {
        Self {
            node: node.into(),
            fraction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorClick {
    pub deck: DeckId,
    /// Host-supplied index; wrapped into range by the deck.
    pub index: i64,
}

impl Inputs {
    pub fn visible(mut self, node: impl Into<String>, fraction: f32) -> Self {
        self.visibility.push(VisibilitySample::new(node, fraction));
        self
    }

    pub fn scrolled(mut self, y: f64) -> Self {
        self.scroll_y = Some(y);
        self
    }

    pub fn click_indicator(mut self, deck: DeckId, index: i64) -> Self {
        self.indicator_clicks.push(IndicatorClick { deck, index });
        self
    }

    pub fn click_filter(mut self, button: usize) -> Self {
        self.filter_clicks.push(button);
        self
    }
}
