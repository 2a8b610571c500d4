#![forbid(unsafe_code)]

//! The carousel controller.
//!
//! [`Carousel`] ties a [`Surface`], the [`Track`], the [`TransitionMachine`]
//! and a [`Scheduler`] together. It is host-driven: the host forwards events
//! through [`Carousel::handle_event`] and advances time through
//! [`Carousel::advance_to`], the only place timers fire.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use vitrine_carousel::{Carousel, CarouselOptions, MemorySurface};
//!
//! let surface = MemorySurface::new(vec!["A", "B", "C"]);
//! let mut carousel = Carousel::mount(surface, CarouselOptions::default()).unwrap();
//! assert_eq!(carousel.current_index(), 0);
//!
//! carousel.next();
//! carousel.advance_to(Duration::from_millis(800));
//! assert_eq!(carousel.current_index(), 1);
//!
//! let surface = carousel.destroy();
//! assert_eq!(surface.children(), ["A", "B", "C"]);
//! ```

use core::fmt;
use core::time::Duration;

use vitrine_core::scheduler::{Scheduler, TimerId};

use crate::machine::{Outcome, Phase, TransitionMachine};
use crate::options::CarouselOptions;
use crate::render::{ArrowDirection, arrow_buttons, slide_style, track_style};
use crate::surface::Surface;
use crate::track::Track;
use crate::{CarouselError, MountError};

/// Slide-change listener: receives the real index and the original slide.
pub type SlideChangeFn<T> = Box<dyn FnMut(usize, &T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Machine,
    Autoplay,
}

/// Input the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselEvent {
    /// Pointer entered the container.
    PointerEnter,
    /// Pointer left the container.
    PointerLeave,
    /// An arrow button was clicked.
    Arrow(ArrowDirection),
}

/// Point-in-time view of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSnapshot {
    /// Position in the track.
    pub position: usize,
    /// Real index shown.
    pub real_index: usize,
    /// Machine phase.
    pub phase: Phase,
    /// Whether the autoplay timer is running.
    pub autoplay_active: bool,
    /// Whether moves currently animate.
    pub animated: bool,
}

/// Infinite-loop carousel bound to one surface.
pub struct Carousel<S: Surface> {
    surface: S,
    options: CarouselOptions,
    track: Track<S::Slide>,
    machine: TransitionMachine,
    scheduler: Scheduler<TimerKind>,
    machine_timer: Option<TimerId>,
    autoplay_timer: Option<TimerId>,
    hover_wired: bool,
    on_change: Option<SlideChangeFn<S::Slide>>,
}

impl<S: Surface> fmt::Debug for Carousel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("options", &self.options)
            .field("track_len", &self.track.len())
            .field("machine", &self.machine)
            .field("pending_timers", &self.scheduler.len())
            .field("autoplay_active", &self.autoplay_timer.is_some())
            .field("hover_wired", &self.hover_wired)
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

impl<S: Surface> Carousel<S> {
    /// Mount on `surface` with time starting at zero.
    ///
    /// # Errors
    ///
    /// [`MountError::NoSlides`] when the container is empty; the surface is
    /// left untouched apart from having been asked for its children.
    pub fn mount(surface: S, options: CarouselOptions) -> Result<Self, MountError> {
        Self::mount_at(surface, options, Duration::ZERO)
    }

    /// Mount on `surface` at host time `now`.
    ///
    /// Builds the track, styles it, places it on the first real slide without
    /// animation, appends arrows when enabled and starts autoplay when enabled.
    ///
    /// # Errors
    ///
    /// [`MountError::NoSlides`] when the container is empty.
    pub fn mount_at(
        mut surface: S,
        options: CarouselOptions,
        now: Duration,
    ) -> Result<Self, MountError> {
        let options = options.normalized();
        let originals = surface.take_slides();
        let Some(track) = Track::build(originals, |slide| surface.clone_slide(slide)) else {
            vitrine_core::warn!("carousel container has no slides; nothing mounted");
            return Err(MountError::NoSlides);
        };

        surface.mount_track(track.slides(), &slide_style(&options));
        let (machine, initial) = TransitionMachine::new(track.len(), options.transition_duration());

        let mut carousel = Self {
            surface,
            options,
            track,
            machine,
            scheduler: Scheduler::starting_at(now),
            machine_timer: None,
            autoplay_timer: None,
            hover_wired: false,
            on_change: None,
        };
        carousel.apply(initial);

        if let Some(arrows) = arrow_buttons(&carousel.options) {
            carousel.surface.mount_arrows(&arrows);
        }
        if carousel.options.autoplay {
            carousel.start_autoplay();
            carousel.hover_wired = true;
        }

        vitrine_core::debug!(
            slides = carousel.track.original_len(),
            autoplay = carousel.options.autoplay,
            arrows = carousel.options.arrows,
            "carousel mounted"
        );
        Ok(carousel)
    }

    /// Attach a slide-change listener (builder).
    #[must_use]
    pub fn on_slide_change(mut self, listener: impl FnMut(usize, &S::Slide) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// Replace or remove the slide-change listener.
    pub fn set_on_slide_change(&mut self, listener: Option<SlideChangeFn<S::Slide>>) {
        self.on_change = listener;
    }

    /// Advance one slide. Ignored while a transition is in flight.
    pub fn next(&mut self) {
        let outcome = self.machine.next();
        self.apply(outcome);
    }

    /// Go back one slide. Ignored while a transition is in flight.
    pub fn prev(&mut self) {
        let outcome = self.machine.prev();
        self.apply(outcome);
    }

    /// Animate to the real slide `index`. Ignored while a transition is in flight.
    ///
    /// # Errors
    ///
    /// [`CarouselError::IndexOutOfRange`] when `index` is not a real slide.
    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        let len = self.track.original_len();
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }
        self.go_to_slide(index + 1, false)
    }

    /// Move to track `position`, which may be a boundary clone.
    ///
    /// # Errors
    ///
    /// [`CarouselError::IndexOutOfRange`] when `position` is past the track.
    pub fn go_to_slide(&mut self, position: usize, instant: bool) -> Result<(), CarouselError> {
        let outcome = self.machine.go_to_slide(position, instant)?;
        self.apply(outcome);
        Ok(())
    }

    /// Start (or restart) autoplay when the `autoplay` option is enabled.
    pub fn start_autoplay(&mut self) {
        self.stop_autoplay();
        if self.options.autoplay {
            let interval = self.options.autoplay_interval();
            self.autoplay_timer = Some(self.scheduler.schedule_every(interval, TimerKind::Autoplay));
        }
    }

    /// Stop autoplay. Idempotent.
    pub fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Whether the autoplay timer is running.
    #[must_use]
    pub fn is_autoplay_active(&self) -> bool {
        self.autoplay_timer.is_some()
    }

    /// Real index of the current slide, in `0..slide_count()`.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.machine.real_index()
    }

    /// Whether a move or snap-back is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.machine.is_transitioning()
    }

    /// Number of original slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.track.original_len()
    }

    /// The track, clones included.
    #[must_use]
    pub fn track(&self) -> &Track<S::Slide> {
        &self.track
    }

    /// Effective options.
    #[must_use]
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// The surface being rendered into.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current scheduler time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Number of pending timers (transition and autoplay).
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Point-in-time view.
    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            position: self.machine.position(),
            real_index: self.machine.real_index(),
            phase: self.machine.phase(),
            autoplay_active: self.is_autoplay_active(),
            animated: self.machine.animated(),
        }
    }

    /// React to pointer and arrow input.
    ///
    /// Hover pauses and resumes autoplay only when autoplay was enabled at
    /// mount. Arrow clicks are ignored when arrows are disabled.
    pub fn handle_event(&mut self, event: CarouselEvent) {
        match event {
            CarouselEvent::PointerEnter if self.hover_wired => self.stop_autoplay(),
            CarouselEvent::PointerLeave if self.hover_wired => self.start_autoplay(),
            CarouselEvent::Arrow(ArrowDirection::Prev) if self.options.arrows => self.prev(),
            CarouselEvent::Arrow(ArrowDirection::Next) if self.options.arrows => self.next(),
            _ => {}
        }
    }

    /// Fire every timer due at or before `now`, in order.
    pub fn advance_to(&mut self, now: Duration) {
        let span = vitrine_core::debug_span!(
            "carousel_advance",
            now_ms = u64::try_from(now.as_millis()).unwrap_or(u64::MAX)
        );
        let _guard = span.enter();

        while let Some(fired) = self.scheduler.pop_due(now) {
            match fired.payload {
                TimerKind::Machine => {
                    if self.machine_timer != Some(fired.id) {
                        continue;
                    }
                    self.machine_timer = None;
                    let outcome = self.machine.on_timer();
                    vitrine_core::trace!(phase = ?self.machine.phase(), "machine wake");
                    self.apply(outcome);
                }
                TimerKind::Autoplay => self.next(),
            }
        }
        self.scheduler.advance_to(now);
    }

    /// Advance host time by `dt`.
    pub fn advance_by(&mut self, dt: Duration) {
        let now = self.scheduler.now().saturating_add(dt);
        self.advance_to(now);
    }

    /// Tear down: stop autoplay, detach hover handling, cancel every pending
    /// timer and restore the original slides into the container.
    ///
    /// Returns the surface, now holding exactly the originals in order.
    pub fn destroy(mut self) -> S {
        self.stop_autoplay();
        self.hover_wired = false;
        self.machine_timer = None;
        self.scheduler.clear();

        let Self {
            mut surface, track, ..
        } = self;
        let originals = track.into_originals();
        surface.restore(&originals);
        vitrine_core::debug!(slides = originals.len(), "carousel destroyed");
        surface
    }

    fn apply(&mut self, outcome: Outcome) {
        if let Some(delay) = outcome.wake_after {
            if let Some(id) = self.machine_timer.take() {
                self.scheduler.cancel(id);
            }
            self.machine_timer = Some(self.scheduler.schedule_once(delay, TimerKind::Machine));
        }
        if outcome.repaint {
            self.surface
                .paint_track(&track_style(&self.machine, &self.options));
        }
        if let Some(real) = outcome.changed {
            vitrine_core::debug!(real_index = real, "slide changed");
            if let (Some(listener), Some(slide)) = (self.on_change.as_mut(), self.track.original(real)) {
                listener(real, slide);
            }
        }
    }
}
