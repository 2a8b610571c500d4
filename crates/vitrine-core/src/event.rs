#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The embedding host (a browser bridge or a test) translates its native
//! events into [`Event`] values and pushes them into a page. Element targets
//! are identified by an opaque `u32` key that the host's document model
//! hands out.

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible width (`window.innerWidth`, or `screen.width` on iOS).
    pub width: f64,
    /// Visible height (`window.innerHeight`).
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Pointer interaction kinds the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer entered the target (`mouseenter`).
    Enter,
    /// Pointer left the target (`mouseleave`).
    Leave,
    /// Primary button click.
    Click,
}

/// A pointer event on a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Host key of the element the listener is attached to.
    pub target: u32,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, target: u32) -> Self {
        Self { kind, target }
    }
}

/// Canonical host event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A pointer event.
    Pointer(PointerEvent),

    /// The viewport was resized.
    Resize(Viewport),

    /// An observed element crossed the visibility threshold.
    Intersect {
        /// Host key of the observed element.
        target: u32,
        /// Whether it is now intersecting the viewport.
        visible: bool,
    },

    /// A frame tick with no other input.
    Tick,
}

impl Event {
    /// Shorthand for a pointer event.
    #[must_use]
    pub const fn pointer(kind: PointerEventKind, target: u32) -> Self {
        Self::Pointer(PointerEvent::new(kind, target))
    }
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}
