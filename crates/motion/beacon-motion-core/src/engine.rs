//! Engine: owns every component built from the page snapshot and steps them with the
//! host's clock.
//!
//! Methods:
//! - new, mount (page snapshot → components + initial frame), update (inputs → timers),
//!   stop_slider, dispose

use hashbrown::HashMap;
use log::{debug, trace, warn};

use crate::config::Config;
use crate::consumers::{CourseFilter, NavbarShadow, Reveal, SectionTracker};
use crate::counter::{CounterFrame, CounterSpec};
use crate::error::EngineError;
use crate::ids::{CounterId, DeckId, IdAllocator, TargetId, TimerId};
use crate::inputs::Inputs;
use crate::outputs::{Capability, Change, CoreEvent, Outputs};
use crate::page::PageSpec;
use crate::slider::SlideDeck;
use crate::timer::{Task, TimerQueue};
use crate::watcher::{ObserveMode, VisibilityWatcher};

/// What a watcher target triggers.
#[derive(Clone, Debug, PartialEq)]
enum Consumer {
    /// Start every counter of the stats group.
    Counters,
    Reveal(String),
    Section(usize),
}

#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    mounted: bool,
    disposed: bool,

    // Core
    watcher: VisibilityWatcher,
    timers: TimerQueue,
    counters: Vec<CounterSpec>,
    decks: Vec<SlideDeck>,

    // Consumers
    consumers: HashMap<TargetId, Vec<Consumer>>,
    reveal: Reveal,
    sections: SectionTracker,
    navbar: Option<NavbarShadow>,
    filter: Option<CourseFilter>,

    // Per-frame outputs
    outputs: Outputs,
}

impl Default for Engine {
    fn default() -> Self {
        Self::build(Config::default())
    }
}

impl Engine {
    /// Create an engine after validating `cfg`.
    pub fn new(cfg: Config) -> Result<Self, EngineError> {
        cfg.validate()?;
        Ok(Self::build(cfg))
    }

    fn build(cfg: Config) -> Self {
        Self {
            ids: IdAllocator::new(),
            mounted: false,
            disposed: false,
            watcher: VisibilityWatcher::new(cfg.capabilities.visibility),
            timers: TimerQueue::new(cfg.capabilities.timers),
            counters: Vec::new(),
            decks: Vec::new(),
            consumers: HashMap::new(),
            reveal: Reveal::new(&cfg.reveal, cfg.reduced_motion),
            sections: SectionTracker::default(),
            navbar: None,
            filter: None,
            outputs: Outputs::default(),
            cfg,
        }
    }

    /// Build every component from the page snapshot and render the initial state
    /// (first slide of each deck). An engine mounts once.
    pub fn mount(&mut self, page: PageSpec) -> Result<&Outputs, EngineError> {
        if self.mounted {
            return Err(EngineError::AlreadyMounted);
        }
        page.validate()?;
        self.outputs.clear();

        if !self.watcher.is_available() {
            warn!("no visibility facility; visibility-driven features stay inert");
            self.outputs.push_event(CoreEvent::CapabilityUnavailable {
                capability: Capability::Visibility,
            });
        }
        if !self.timers.is_available() {
            warn!("no timer facility; counters and slide rotation stay inert");
            self.outputs.push_event(CoreEvent::CapabilityUnavailable {
                capability: Capability::Timers,
            });
        }

        if let Some(stats) = page.stats {
            for c in &stats.counters {
                let id = self.ids.alloc_counter();
                self.counters
                    .push(CounterSpec::new(id, c.node.clone(), c.target, &self.cfg.counter));
            }
            let target =
                self.watcher
                    .observe(&stats.container, self.cfg.thresholds.stats, ObserveMode::Once)?;
            self.bind(target, Consumer::Counters);
        }

        for node in page.reveal {
            let target = self
                .watcher
                .observe(&node, self.cfg.thresholds.reveal, ObserveMode::Once)?;
            self.bind(target, Consumer::Reveal(node));
        }

        for (i, section) in page.sections.iter().enumerate() {
            let target = self.watcher.observe(
                &section.node,
                self.cfg.thresholds.sections,
                ObserveMode::Continuous,
            )?;
            self.bind(target, Consumer::Section(i));
        }
        self.sections = SectionTracker::new(page.sections, page.nav_links);

        for slider in page.sliders {
            let id = self.ids.alloc_deck();
            let mut deck = SlideDeck::new(id, slider.slides, slider.indicators);
            if let Some(index) = deck.show_slide(0, &mut self.outputs.changes) {
                self.outputs
                    .push_event(CoreEvent::SlideChanged { deck: id, index });
                if self.cfg.slider.autoplay {
                    deck.timer = self
                        .timers
                        .schedule_repeating(self.cfg.slider.interval_ms, Task::AdvanceSlide(id));
                }
            }
            self.decks.push(deck);
        }

        if let Some(filter) = page.filter {
            self.filter = Some(CourseFilter::new(
                filter.buttons,
                filter.cards,
                &self.cfg.filter,
            ));
        }
        self.navbar = page
            .navbar
            .map(|node| NavbarShadow::new(node, &self.cfg.navbar));

        self.mounted = true;
        debug!(
            "mounted: {} counters, {} decks, {} watched targets",
            self.counters.len(),
            self.decks.len(),
            self.watcher.active_len()
        );
        Ok(&self.outputs)
    }

    fn bind(&mut self, target: TargetId, consumer: Consumer) {
        let list = self.consumers.entry(target).or_default();
        if !list.contains(&consumer) {
            list.push(consumer);
        }
    }

    /// Step the engine by `dt_ms` milliseconds. Inputs are applied at the start of the
    /// frame, then every timer due inside the frame runs in order.
    pub fn update(&mut self, dt_ms: u64, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        if self.disposed {
            return &self.outputs;
        }

        self.apply_inputs(inputs);

        let until = self.timers.now().saturating_add(dt_ms);
        while let Some((timer, task)) = self.timers.pop_due(until) {
            self.run_task(timer, task);
        }
        self.timers.advance_to(until);

        &self.outputs
    }

    fn apply_inputs(&mut self, inputs: Inputs) {
        if let Some(y) = inputs.scroll_y {
            if let Some(navbar) = self.navbar.as_mut() {
                navbar.on_scroll(y, &mut self.outputs.changes);
            }
        }

        for sample in inputs.visibility {
            for target in self.watcher.sample(&sample.node, sample.fraction) {
                self.outputs.push_event(CoreEvent::TargetTriggered {
                    target,
                    node: sample.node.clone(),
                });
                self.dispatch(target);
            }
        }

        for click in inputs.indicator_clicks {
            let Some(deck) = self.decks.iter_mut().find(|d| d.id == click.deck) else {
                warn!("indicator click for unknown deck {:?}", click.deck);
                continue;
            };
            if let Some(index) = deck.select_indicator(click.index, &mut self.outputs.changes) {
                self.outputs.push_event(CoreEvent::SlideChanged {
                    deck: click.deck,
                    index,
                });
            }
        }

        for button in inputs.filter_clicks {
            self.select_filter(button);
        }
    }

    fn dispatch(&mut self, target: TargetId) {
        let Some(consumers) = self.consumers.get(&target).cloned() else {
            return;
        };
        for consumer in consumers {
            match consumer {
                Consumer::Counters => self.start_counters(),
                Consumer::Reveal(node) => self.reveal.reveal(&node, &mut self.outputs.changes),
                Consumer::Section(index) => {
                    if let Some(id) = self.sections.activate(index, &mut self.outputs.changes) {
                        let section = id.to_string();
                        self.outputs
                            .push_event(CoreEvent::SectionActivated { section });
                    }
                }
            }
        }
    }

    fn start_counters(&mut self) {
        if !self.cfg.reduced_motion && !self.timers.is_available() {
            debug!("counters left inert without timers");
            return;
        }
        for counter in &mut self.counters {
            let frame = if self.cfg.reduced_motion {
                counter.finish_now()
            } else {
                counter.start()
            };
            let Some(frame) = frame else {
                continue;
            };
            self.outputs.push_event(CoreEvent::CounterStarted {
                node: counter.node.clone(),
                target_value: counter.target_value,
            });
            debug!("counter `{}` -> {}", counter.node, counter.target_value);
            render_counter(counter, frame, &mut self.timers, &mut self.outputs);
        }
    }

    fn select_filter(&mut self, button: usize) {
        let Some(filter) = self.filter.as_mut() else {
            return;
        };
        let mut cancel = Vec::new();
        let Some(steps) = filter.select(button, &mut self.outputs.changes, &mut cancel) else {
            warn!("filter click for unknown button {button}");
            return;
        };
        for timer in cancel {
            self.timers.cancel(timer);
        }
        for step in steps {
            match self.timers.schedule_once(
                step.delay_ms,
                Task::CardStyle {
                    card: step.card,
                    step: step.step,
                },
            ) {
                Some(timer) => filter.track(step.card, timer),
                // Without timers the end state is applied at once.
                None => filter.run_step(step.card, step.step, &mut self.outputs.changes),
            }
        }
        if let Some(value) = filter.selected() {
            let value = value.to_string();
            self.outputs.push_event(CoreEvent::FilterApplied { value });
        }
    }

    fn run_task(&mut self, timer: TimerId, task: Task) {
        trace!("t={}ms timer {timer:?} -> {task:?}", self.timers.now());
        match task {
            Task::CounterTick(id) => {
                let Some(counter) = self.counters.iter_mut().find(|c| c.id == id) else {
                    return;
                };
                if let Some(frame) = counter.tick() {
                    render_counter(counter, frame, &mut self.timers, &mut self.outputs);
                }
            }
            Task::AdvanceSlide(id) => {
                let Some(deck) = self.decks.iter_mut().find(|d| d.id == id) else {
                    return;
                };
                if let Some(index) = deck.next_slide(&mut self.outputs.changes) {
                    self.outputs
                        .push_event(CoreEvent::SlideChanged { deck: id, index });
                }
            }
            Task::CardStyle { card, step } => {
                if let Some(filter) = self.filter.as_mut() {
                    filter.run_step(card, step, &mut self.outputs.changes);
                }
            }
        }
    }

    /// Cancel a deck's rotation timer. Returns false if it was not rotating.
    pub fn stop_slider(&mut self, deck: DeckId) -> bool {
        let Some(deck) = self.decks.iter_mut().find(|d| d.id == deck) else {
            return false;
        };
        match deck.timer.take() {
            Some(timer) => {
                self.timers.cancel(timer);
                debug!("deck {:?} rotation stopped", deck.id);
                true
            }
            None => false,
        }
    }

    /// Release every timer and watcher registration. The engine stays queryable, but
    /// later updates ignore their inputs and arm no timers.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.timers.cancel_all();
        self.watcher.disconnect();
        for deck in &mut self.decks {
            deck.timer = None;
        }
        debug!("engine disposed");
    }
}

/// Write a counter frame and schedule the next tick unless it was the last.
fn render_counter(
    counter: &CounterSpec,
    frame: CounterFrame,
    timers: &mut TimerQueue,
    outputs: &mut Outputs,
) {
    outputs.push_change(Change::SetText {
        node: counter.node.clone(),
        text: frame.text,
    });
    if frame.done {
        outputs.push_event(CoreEvent::CounterFinished {
            node: counter.node.clone(),
            value: counter.target_value,
        });
    } else {
        timers.schedule_once(counter.tick_interval_ms, Task::CounterTick(counter.id));
    }
}

impl Engine {
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Logical clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.timers.now()
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn watcher(&self) -> &VisibilityWatcher {
        &self.watcher
    }

    pub fn counters(&self) -> &[CounterSpec] {
        &self.counters
    }

    pub fn counter(&self, id: CounterId) -> Option<&CounterSpec> {
        self.counters.iter().find(|c| c.id == id)
    }

    pub fn decks(&self) -> &[SlideDeck] {
        &self.decks
    }

    pub fn deck(&self, id: DeckId) -> Option<&SlideDeck> {
        self.decks.iter().find(|d| d.id == id)
    }

    pub fn sections(&self) -> &SectionTracker {
        &self.sections
    }

    pub fn filter(&self) -> Option<&CourseFilter> {
        self.filter.as_ref()
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
