//! Image carousel state machine.
//!
//! A [`Carousel`] drives a single "currently displayed item" over an ordered
//! list of [`MediaItem`]s, with manual navigation, keyboard control inside the
//! fullscreen overlay, and timed autoplay.
//!
//! ## States
//!
//! ```text
//!              initialize(non-empty)
//!   Idle ───────────────────────────▶ Playing ◀──────┐
//!    ▲                                   │           │ toggle_play / resume
//!    │ items become empty                ▼           │
//!    └──────────────────────────────── Paused ───────┘
//!
//!   any state ── unmount() ──▶ Unmounted (terminal)
//! ```
//!
//! `Playing` means the autoplay timer is armed. That happens exactly when
//! `is_playing && !is_suspended && len > 1`.
//!
//! ## Timer model
//!
//! There is no wall clock in here. Time is fed in through [`Carousel::tick`],
//! which the browser script mirrors with `setInterval` and tests drive
//! directly. The timer is an owned value that only exists while armed; any
//! change to the item set, the play flag, or the suspension flag drops it and
//! (if still eligible) arms a fresh one with a new generation number and zero
//! elapsed time. Dropping the timer is the only way autoplay stops, so an
//! unmounted or emptied carousel can never be advanced by a stale tick.
//!
//! ## Suspension
//!
//! Three independent sources suspend autoplay: pointer hover
//! ([`Carousel::set_suspended`]), the fullscreen overlay
//! ([`Carousel::open_fullscreen`]), and being hidden
//! ([`Carousel::set_visible`], e.g. inside an unselected tab panel). While
//! suspended, toggling play/pause still updates the play flag so the right
//! thing happens when suspension ends.

use crate::config::CarouselConfig;
use crate::types::MediaItem;
use std::time::Duration;
use thiserror::Error;

/// Autoplay interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Dot indicators are only shown for carousels up to this many items.
pub const DEFAULT_MAX_DOTS: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("Slide index {index} is out of range for a carousel of {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// Tunables for a carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    /// Time between autoplay advances.
    pub interval: Duration,
    /// Whether a multi-item carousel starts playing.
    pub autoplay: bool,
    /// Upper bound on item count for rendering dot indicators.
    pub max_dots: usize,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            autoplay: true,
            max_dots: DEFAULT_MAX_DOTS,
        }
    }
}

impl From<&CarouselConfig> for CarouselOptions {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            autoplay: config.autoplay,
            max_dots: config.max_dots,
        }
    }
}

/// Observable lifecycle state, derived from the carousel's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    /// No items to show.
    Idle,
    /// Autoplay timer armed.
    Playing,
    /// Items present, timer not armed (paused, suspended, or a single item).
    Paused,
    /// Torn down; every operation is a no-op.
    Unmounted,
}

/// Keys the fullscreen overlay listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// A single repeating autoplay timer.
#[derive(Debug)]
struct AutoplayTimer {
    interval: Duration,
    elapsed: Duration,
    generation: u64,
}

impl AutoplayTimer {
    fn new(interval: Duration, generation: u64) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            generation,
        }
    }

    /// Accumulate `by` and return how many times the timer fired.
    fn advance(&mut self, by: Duration) -> u128 {
        let interval_ns = self.interval.as_nanos();
        if interval_ns == 0 {
            return 0;
        }
        let total = self.elapsed.as_nanos() + by.as_nanos();
        let fires = total / interval_ns;
        // remainder < interval, which came from a Duration, so it fits in u64
        self.elapsed = Duration::from_nanos((total % interval_ns) as u64);
        fires
    }
}

/// Carousel over an ordered list of media items.
#[derive(Debug)]
pub struct Carousel {
    items: Vec<MediaItem>,
    current: usize,
    playing: bool,
    hovered: bool,
    fullscreen: bool,
    visible: bool,
    mounted: bool,
    options: CarouselOptions,
    timer: Option<AutoplayTimer>,
    generation: u64,
}

impl Carousel {
    /// Mount a carousel over `items`.
    ///
    /// An empty list is a valid placeholder state, not an error.
    pub fn new(items: Vec<MediaItem>, options: CarouselOptions) -> Self {
        let mut carousel = Self {
            playing: options.autoplay && items.len() > 1,
            items,
            current: 0,
            hovered: false,
            fullscreen: false,
            visible: true,
            mounted: true,
            options,
            timer: None,
            generation: 0,
        };
        carousel.reschedule();
        carousel
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Index of the displayed item, `None` when there are no items.
    pub fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current)
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.items.get(self.current)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_suspended(&self) -> bool {
        self.hovered || self.fullscreen || !self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Generation of the armed timer. Changes every time the timer is rebuilt.
    pub fn timer_generation(&self) -> Option<u64> {
        self.timer.as_ref().map(|t| t.generation)
    }

    pub fn state(&self) -> CarouselState {
        if !self.mounted {
            CarouselState::Unmounted
        } else if self.items.is_empty() {
            CarouselState::Idle
        } else if self.timer.is_some() {
            CarouselState::Playing
        } else {
            CarouselState::Paused
        }
    }

    pub fn next(&mut self) {
        if !self.mounted || self.items.len() <= 1 {
            return;
        }
        self.current = (self.current + 1) % self.items.len();
    }

    pub fn previous(&mut self) {
        if !self.mounted || self.items.len() <= 1 {
            return;
        }
        let len = self.items.len();
        self.current = (self.current + len - 1) % len;
    }

    /// Jump to `index`. Out-of-range indices leave the carousel untouched.
    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if !self.mounted || index >= self.items.len() {
            log::warn!(
                "ignoring carousel jump to slide {index} ({} items)",
                self.items.len()
            );
            return Err(CarouselError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        if !self.mounted {
            return;
        }
        self.playing = !self.playing;
        self.reschedule();
    }

    /// Set the hover suspension source.
    pub fn set_suspended(&mut self, suspended: bool) {
        if !self.mounted || self.hovered == suspended {
            return;
        }
        let before = self.is_suspended();
        self.hovered = suspended;
        if before != self.is_suspended() {
            self.reschedule();
        }
    }

    /// Mark the carousel shown or hidden. Hiding also closes the overlay.
    pub fn set_visible(&mut self, visible: bool) {
        if !self.mounted || self.visible == visible {
            return;
        }
        let before = self.is_suspended();
        self.visible = visible;
        if !visible {
            self.fullscreen = false;
        }
        if before != self.is_suspended() {
            self.reschedule();
        }
    }

    /// Open the fullscreen overlay; keyboard handling becomes active.
    pub fn open_fullscreen(&mut self) {
        self.set_fullscreen(true);
    }

    pub fn close_fullscreen(&mut self) {
        self.set_fullscreen(false);
    }

    fn set_fullscreen(&mut self, open: bool) {
        if !self.mounted
            || self.items.is_empty()
            || !self.visible
            || self.fullscreen == open
        {
            return;
        }
        let before = self.is_suspended();
        self.fullscreen = open;
        if before != self.is_suspended() {
            self.reschedule();
        }
    }

    /// Handle a key press. Returns whether the key was consumed.
    ///
    /// Keys are only listened for while the fullscreen overlay is open.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.mounted || !self.fullscreen {
            return false;
        }
        match key {
            Key::ArrowLeft => self.previous(),
            Key::ArrowRight => self.next(),
            Key::Escape => self.close_fullscreen(),
            Key::Other => return false,
        }
        true
    }

    /// Replace the item set. Resets to the first item and restarts autoplay.
    pub fn replace_items(&mut self, items: Vec<MediaItem>) {
        if !self.mounted {
            log::warn!("ignoring item replacement on an unmounted carousel");
            return;
        }
        self.items = items;
        self.current = 0;
        if self.items.is_empty() {
            self.fullscreen = false;
        }
        self.reschedule();
    }

    /// Tear the carousel down. Terminal.
    pub fn unmount(&mut self) {
        self.timer = None;
        self.mounted = false;
        self.fullscreen = false;
        self.items.clear();
        self.current = 0;
    }

    /// Advance simulated time. Returns how many autoplay steps fired.
    pub fn tick(&mut self, elapsed: Duration) -> u128 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        let fires = timer.advance(elapsed);
        let len = self.items.len();
        if fires > 0 && len > 1 {
            let steps = (fires % len as u128) as usize;
            self.current = (self.current + steps) % len;
        }
        fires
    }

    /// `"3 / 7"` style position label, `None` when empty.
    pub fn counter_label(&self) -> Option<String> {
        self.current_index()
            .map(|i| format!("{} / {}", i + 1, self.items.len()))
    }

    /// Arrows, thumbnails, and the play button only make sense with 2+ items.
    pub fn shows_controls(&self) -> bool {
        self.items.len() > 1
    }

    pub fn shows_dots(&self) -> bool {
        self.items.len() > 1 && self.items.len() <= self.options.max_dots
    }

    fn should_autoplay(&self) -> bool {
        self.mounted && self.playing && !self.is_suspended() && self.items.len() > 1
    }

    /// Drop the current timer and arm a new one if autoplay is eligible.
    fn reschedule(&mut self) {
        self.timer = None;
        if self.should_autoplay() {
            self.generation += 1;
            self.timer = Some(AutoplayTimer::new(self.options.interval, self.generation));
        }
    }
}
