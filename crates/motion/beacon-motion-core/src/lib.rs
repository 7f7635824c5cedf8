//! Beacon Motion Core (engine-agnostic)
//!
//! The viewport-reactive animation engine behind the Beacon site: a visibility watcher
//! with one-shot targets, a counter animator, a slide rotator, and the page features
//! that hang off them (reveal on scroll, section highlighting, navbar shadow, course
//! filter). The host owns the document; the engine consumes `Inputs`, runs its timers on
//! the host's clock and returns `Outputs` to apply through a `Presenter`.

pub mod config;
pub mod consumers;
pub mod counter;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod inputs;
pub mod outputs;
pub mod page;
pub mod presenter;
pub mod slider;
pub mod timer;
pub mod watcher;

// Re-exports for consumers (adapters)
pub use config::{Capabilities, Config};
pub use counter::{format_counter, CounterFrame, CounterSpec, CounterState};
pub use engine::Engine;
pub use error::EngineError;
pub use geometry::{visible_fraction, ElementRect, RootMargin};
pub use ids::{CounterId, DeckId, TargetId, TimerId};
pub use inputs::{IndicatorClick, Inputs, VisibilitySample};
pub use outputs::{Capability, Change, CoreEvent, Outputs};
pub use page::{parse_page_json, PageSpec};
pub use presenter::{apply_changes, MemoryPresenter, Presenter};
pub use slider::{wrap_index, SlideDeck};
pub use timer::{Task, TimerQueue};
pub use watcher::{ObservableTarget, ObserveMode, VisibilityWatcher};
