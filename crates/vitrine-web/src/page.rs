#![forbid(unsafe_code)]

//! Host-driven page runner.
//!
//! [`Page`] owns a document, the carousels mounted into it and an optional
//! [`LayoutManager`]. The host drives it without threads or blocking:
//!
//! 1. Push events via [`Page::push_event`].
//! 2. Advance time via [`Page::advance_time`] or [`Page::set_time`].
//! 3. Call [`Page::step`] to fire due timers and route queued events.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use vitrine_carousel::CarouselOptions;
//! use vitrine_core::event::Viewport;
//! use vitrine_web::{Document, ElementSpec, Page};
//!
//! let mut doc = Document::new();
//! let slider = ElementSpec::new("div")
//!     .id("slider")
//!     .child(ElementSpec::new("img").attr("src", "a.jpg"))
//!     .child(ElementSpec::new("img").attr("src", "b.jpg"));
//! doc.insert(doc.body(), &slider).unwrap();
//!
//! let mut page = Page::new(doc, Viewport::default());
//! let handle = page.mount_carousel("#slider", CarouselOptions::default()).unwrap();
//!
//! page.advance_time(Duration::from_millis(5800));
//! page.step();
//! assert_eq!(page.carousel(handle).unwrap().current_index(), 1);
//! ```

use core::time::Duration;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use vitrine_carousel::{Carousel, CarouselEvent, CarouselOptions, CarouselSnapshot};
use vitrine_core::clock::DeterministicClock;
use vitrine_core::event::{Event, PointerEvent, PointerEventKind, Viewport};
use vitrine_layout::{LayoutConfig, LayoutManager};

use crate::dom::{Document, NodeId};
use crate::surface::DomSurface;

/// Handle to a carousel mounted on a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarouselHandle(u32);

/// Result of a single [`Page::step`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Number of events processed during this step.
    pub events_processed: u32,
    /// Snapshot of every mounted carousel after the step, in mount order.
    pub carousels: Vec<CarouselSnapshot>,
    /// Host time the step ran at.
    pub now: Duration,
    /// Step index (monotonically increasing).
    pub step_idx: u64,
}

struct Mounted {
    handle: CarouselHandle,
    carousel: Carousel<DomSurface>,
    hovered: bool,
}

/// A document plus the widgets living in it.
pub struct Page {
    doc: Rc<RefCell<Document>>,
    clock: DeterministicClock,
    queue: VecDeque<Event>,
    viewport: Viewport,
    carousels: Vec<Mounted>,
    next_handle: u32,
    layout: Option<LayoutManager>,
    step_idx: u64,
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("now", &self.clock.now())
            .field("queued", &self.queue.len())
            .field("viewport", &self.viewport)
            .field("carousels", &self.carousels.len())
            .field("layout", &self.layout.is_some())
            .field("step_idx", &self.step_idx)
            .finish()
    }
}

impl Page {
    /// Page over `doc` at time zero.
    #[must_use]
    pub fn new(doc: Document, viewport: Viewport) -> Self {
        Self {
            doc: Rc::new(RefCell::new(doc)),
            clock: DeterministicClock::new(),
            queue: VecDeque::new(),
            viewport,
            carousels: Vec::new(),
            next_handle: 0,
            layout: None,
            step_idx: 0,
        }
    }

    /// Shared handle to the document.
    #[must_use]
    pub fn document(&self) -> Rc<RefCell<Document>> {
        Rc::clone(&self.doc)
    }

    /// Current host time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Advance host time by `dt`. Timers fire on the next [`step`](Self::step).
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set host time; earlier values are ignored.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Mount a carousel into the first element matching `selector`.
    ///
    /// Returns `None`, with a warning and no document change, when nothing
    /// matches or the container has no slides.
    pub fn mount_carousel(
        &mut self,
        selector: &str,
        options: CarouselOptions,
    ) -> Option<CarouselHandle> {
        let container = self.doc.borrow().query(selector).ok().flatten();
        let Some(container) = container else {
            vitrine_core::warn!(
                error = %vitrine_carousel::MountError::ContainerNotFound(selector.to_owned()),
                "carousel not mounted"
            );
            return None;
        };
        if self.doc.borrow().children(container).is_empty() {
            vitrine_core::warn!(selector, error = %vitrine_carousel::MountError::NoSlides, "carousel not mounted");
            return None;
        }

        let surface = DomSurface::new(Rc::clone(&self.doc), container);
        let carousel = Carousel::mount_at(surface, options, self.clock.now())
            .inspect_err(|err| {
                vitrine_core::warn!(selector, error = %err, "carousel not mounted");
            })
            .ok()?;

        let handle = CarouselHandle(self.next_handle);
        self.next_handle += 1;
        self.carousels.push(Mounted {
            handle,
            carousel,
            hovered: false,
        });
        Some(handle)
    }

    /// The carousel behind `handle`.
    #[must_use]
    pub fn carousel(&self, handle: CarouselHandle) -> Option<&Carousel<DomSurface>> {
        self.carousels
            .iter()
            .find(|m| m.handle == handle)
            .map(|m| &m.carousel)
    }

    /// Mutable access to the carousel behind `handle`.
    pub fn carousel_mut(&mut self, handle: CarouselHandle) -> Option<&mut Carousel<DomSurface>> {
        self.carousels
            .iter_mut()
            .find(|m| m.handle == handle)
            .map(|m| &mut m.carousel)
    }

    /// Destroy a carousel, restoring its original slides. Returns whether
    /// `handle` was mounted.
    pub fn destroy_carousel(&mut self, handle: CarouselHandle) -> bool {
        let Some(idx) = self.carousels.iter().position(|m| m.handle == handle) else {
            return false;
        };
        let mounted = self.carousels.remove(idx);
        mounted.carousel.destroy();
        true
    }

    /// Install an image layout manager and run its initial pass.
    ///
    /// Replaces (and destroys) any manager installed before.
    pub fn install_layout(&mut self, config: LayoutConfig) {
        if let Some(mut old) = self.layout.take() {
            old.destroy();
        }
        let mut manager = LayoutManager::starting_at(config, self.viewport, self.clock.now());
        manager.initialize_all(&mut *self.doc.borrow_mut());
        self.layout = Some(manager);
    }

    /// The installed layout manager.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutManager> {
        self.layout.as_ref()
    }

    /// Destroy the layout manager. Returns whether one was installed.
    pub fn destroy_layout(&mut self) -> bool {
        match self.layout.take() {
            Some(mut manager) => {
                manager.destroy();
                true
            }
            None => false,
        }
    }

    /// Queue a host event for the next step.
    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Number of events waiting for the next step.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Fire every timer due at the current time, then route queued events.
    pub fn step(&mut self) -> StepResult {
        let now = self.clock.now();
        self.run_timers(now);

        let mut events_processed = 0u32;
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            self.route(event);
        }

        self.step_idx += 1;
        StepResult {
            events_processed,
            carousels: self.carousels.iter().map(|m| m.carousel.snapshot()).collect(),
            now,
            step_idx: self.step_idx,
        }
    }

    /// Tear everything down: carousels restore their slides, the layout
    /// manager stops, queued events are dropped.
    pub fn destroy(&mut self) {
        for mounted in self.carousels.drain(..) {
            mounted.carousel.destroy();
        }
        self.destroy_layout();
        self.queue.clear();
    }

    fn run_timers(&mut self, now: Duration) {
        for mounted in &mut self.carousels {
            mounted.carousel.advance_to(now);
        }
        if let Some(layout) = self.layout.as_mut() {
            layout.advance_to(&mut *self.doc.borrow_mut(), now);
        }
    }

    fn route(&mut self, event: Event) {
        match event {
            Event::Pointer(pointer) => self.route_pointer(pointer),
            Event::Resize(viewport) => {
                self.viewport = viewport;
                if let Some(layout) = self.layout.as_mut() {
                    layout.on_resize(viewport);
                }
            }
            Event::Intersect { target, visible } => {
                let Some(layout) = self.layout.as_mut() else {
                    return;
                };
                let mut doc = self.doc.borrow_mut();
                let Some(section) = doc.get(NodeId::from_key(target)).and_then(|el| el.id.clone())
                else {
                    return;
                };
                layout.on_intersect(&mut *doc, &section, visible);
            }
            Event::Tick => {}
        }
    }

    fn route_pointer(&mut self, pointer: PointerEvent) {
        let target = NodeId::from_key(pointer.target);
        for mounted in &mut self.carousels {
            let surface = mounted.carousel.surface();
            if !surface.contains(target) {
                continue;
            }
            let event = match pointer.kind {
                PointerEventKind::Enter if !mounted.hovered => {
                    mounted.hovered = true;
                    CarouselEvent::PointerEnter
                }
                PointerEventKind::Leave if mounted.hovered => {
                    mounted.hovered = false;
                    CarouselEvent::PointerLeave
                }
                PointerEventKind::Click => match surface.arrow_at(target) {
                    Some(direction) => CarouselEvent::Arrow(direction),
                    None => continue,
                },
                _ => continue,
            };
            mounted.carousel.handle_event(event);
        }
    }
}
