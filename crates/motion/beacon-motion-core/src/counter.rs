//! Counter animator: counts a displayed integer up from zero to its target over a fixed
//! number of ticks.
//!
//! The accumulator is floating point and frames show its floor; the final frame always
//! shows the exact target so accumulated drift never reaches the screen.

use log::debug;

use crate::config::CounterCfg;
use crate::ids::CounterId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterState {
    Idle,
    Running,
    Finished,
}

/// One rendered counter frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    /// True for the final frame; no further tick should be scheduled.
    pub done: bool,
}

#[derive(Clone, Debug)]
pub struct CounterSpec {
    pub id: CounterId,
    pub node: String,
    pub target_value: u64,
    pub current_value: f64,
    pub step_count: u32,
    pub increment: f64,
    pub tick_interval_ms: u64,
    suffix: String,
    state: CounterState,
}

/// `value` followed by the counter suffix, e.g. `120+`.
pub fn format_counter(value: u64, suffix: &str) -> String {
    format!("{value}{suffix}")
}

impl CounterSpec {
    pub fn new(id: CounterId, node: impl Into<String>, target_value: u64, cfg: &CounterCfg) -> Self {
        let step_count = cfg.step_count.max(1);
        Self {
            id,
            node: node.into(),
            target_value,
            current_value: 0.0,
            step_count,
            increment: target_value as f64 / step_count as f64,
            tick_interval_ms: cfg.tick_interval_ms,
            suffix: cfg.suffix.clone(),
            state: CounterState::Idle,
        }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Start the run and render its first tick. Returns `None` if this counter has
    /// already run (or is running).
    pub fn start(&mut self) -> Option<CounterFrame> {
        if self.state != CounterState::Idle {
            debug!("counter `{}` already started; ignoring", self.node);
            return None;
        }
        self.current_value = 0.0;
        self.state = CounterState::Running;
        self.tick()
    }

    /// Render the final frame directly (reduced motion).
    pub fn finish_now(&mut self) -> Option<CounterFrame> {
        if self.state != CounterState::Idle {
            return None;
        }
        self.current_value = self.target_value as f64;
        self.state = CounterState::Finished;
        Some(CounterFrame {
            text: format_counter(self.target_value, &self.suffix),
            done: true,
        })
    }

    /// Advance one step. Returns `None` unless the counter is running.
    pub fn tick(&mut self) -> Option<CounterFrame> {
        if self.state != CounterState::Running {
            return None;
        }
        self.current_value += self.increment;
        let target = self.target_value as f64;
        if self.current_value < target {
            Some(CounterFrame {
                text: format_counter(self.current_value.floor() as u64, &self.suffix),
                done: false,
            })
        } else {
            self.state = CounterState::Finished;
            Some(CounterFrame {
                text: format_counter(self.target_value, &self.suffix),
                done: true,
            })
        }
    }
}
