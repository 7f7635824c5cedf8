//! Slide rotator.
//!
//! A deck keeps a cursor over its slides and mirrors it onto a parallel list of
//! indicators. Every `show_slide` rewrites the active marker of every slide and indicator,
//! so exactly one pair is active afterwards. Empty decks ignore every operation.

use log::{debug, warn};

use crate::ids::{DeckId, TimerId};
use crate::outputs::Change;

/// Wrap a host-supplied index into `0..len`, negative indices included.
/// Returns `None` for an empty collection.
pub fn wrap_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.rem_euclid(len as i64) as usize)
}

#[derive(Clone, Debug)]
pub struct SlideDeck {
    pub id: DeckId,
    slides: Vec<String>,
    indicators: Vec<String>,
    current_index: usize,
    /// Rotation timer, when armed.
    pub(crate) timer: Option<TimerId>,
}

impl SlideDeck {
    pub fn new(id: DeckId, slides: Vec<String>, indicators: Vec<String>) -> Self {
        if !indicators.is_empty() && indicators.len() != slides.len() {
            warn!(
                "deck {id:?}: {} slides but {} indicators; unmatched entries are skipped",
                slides.len(),
                indicators.len()
            );
        }
        Self {
            id,
            slides,
            indicators,
            current_index: 0,
            timer: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    pub fn is_rotating(&self) -> bool {
        self.timer.is_some()
    }

    /// Mark slide `index` (wrapped into range) and its indicator active and every other
    /// pair inactive. Returns the index shown, or `None` for an empty deck.
    pub fn show_slide(&mut self, index: usize, out: &mut Vec<Change>) -> Option<usize> {
        let index = wrap_index(index as i64, self.slides.len())?;
        for (i, slide) in self.slides.iter().enumerate() {
            let active = i == index;
            out.push(Change::SetActive {
                node: slide.clone(),
                active,
            });
            if let Some(dot) = self.indicators.get(i) {
                out.push(Change::SetActive {
                    node: dot.clone(),
                    active,
                });
            }
        }
        if self.current_index != index {
            debug!("deck {:?}: slide {} -> {}", self.id, self.current_index, index);
        }
        self.current_index = index;
        Some(index)
    }

    /// Show the slide after the current one, wrapping to the first.
    pub fn next_slide(&mut self, out: &mut Vec<Change>) -> Option<usize> {
        if self.slides.is_empty() {
            return None;
        }
        let next = (self.current_index + 1) % self.slides.len();
        self.show_slide(next, out)
    }

    /// Jump to the slide paired with indicator `index` (wrapped into range).
    pub fn select_indicator(&mut self, index: i64, out: &mut Vec<Change>) -> Option<usize> {
        let index = wrap_index(index, self.slides.len())?;
        self.show_slide(index, out)
    }
}
