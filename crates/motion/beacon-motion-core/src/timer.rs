//! Deterministic timer queue driven by the host clock.
//!
//! Entries are drained in `(due, scheduling order)` order. `pop_due` moves the queue's
//! clock to the due time of the entry it returns, so work scheduled while handling an
//! entry is measured from that instant and can still fall inside the current window.

use log::trace;

use crate::ids::{CounterId, DeckId, TimerId};

/// Deferred card style step scheduled by the course filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStep {
    /// Fade a shown card in (`opacity: 1`).
    FadeIn,
    /// Take a hidden card out of layout (`display: none`).
    Collapse,
}

/// Work a timer entry carries back to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    CounterTick(CounterId),
    AdvanceSlide(DeckId),
    CardStyle { card: usize, step: CardStep },
}

#[derive(Clone, Debug)]
struct Entry {
    id: TimerId,
    due: u64,
    seq: u64,
    period: Option<u64>,
    task: Task,
}

#[derive(Debug)]
pub struct TimerQueue {
    available: bool,
    now: u64,
    seq: u64,
    next_id: u32,
    entries: Vec<Entry>,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TimerQueue {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            now: 0,
            seq: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Current clock in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run `task` once after `delay_ms`. Returns `None` without a timer facility.
    pub fn schedule_once(&mut self, delay_ms: u64, task: Task) -> Option<TimerId> {
        self.push(delay_ms, None, task)
    }

    /// Run `task` every `period_ms` (at least 1 ms) until cancelled.
    pub fn schedule_repeating(&mut self, period_ms: u64, task: Task) -> Option<TimerId> {
        let period = period_ms.max(1);
        self.push(period, Some(period), task)
    }

    fn push(&mut self, delay_ms: u64, period: Option<u64>, task: Task) -> Option<TimerId> {
        if !self.available {
            return None;
        }
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let seq = self.next_seq();
        self.entries.push(Entry {
            id,
            due: self.now.saturating_add(delay_ms),
            seq,
            period,
            task,
        });
        trace!("timer {id:?} armed for {task:?} in {delay_ms}ms");
        Some(id)
    }

    fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq = self.seq.wrapping_add(1);
        s
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Pop the earliest entry due at or before `until`, advancing the clock to its due
    /// time. Repeating entries are re-armed one period later.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, Task)> {
        let (idx, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))?;

        let due = self.entries[idx].due;
        self.now = self.now.max(due);

        let (id, task) = match self.entries[idx].period {
            Some(period) => {
                let seq = self.next_seq();
                let e = &mut self.entries[idx];
                e.due = due.saturating_add(period);
                e.seq = seq;
                (e.id, e.task)
            }
            None => {
                let e = self.entries.swap_remove(idx);
                (e.id, e.task)
            }
        };
        Some((id, task))
    }

    /// Finish a frame: move the clock to `until`.
    pub fn advance_to(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
