//! Page features that react to watcher triggers, scrolling or clicks.
//!
//! Each consumer owns its slice of the page snapshot and turns an event into changes.
//! Timing (where any) is delegated back to the engine's timer queue.

pub mod filter;
pub mod navbar;
pub mod reveal;
pub mod sections;

pub use filter::{CourseFilter, DeferredStep};
pub use navbar::NavbarShadow;
pub use reveal::Reveal;
pub use sections::SectionTracker;
