#![forbid(unsafe_code)]

//! Browser hosting for the vitrine widgets.
//!
//! Two hosts share the widget crates:
//! - [`Page`]: a deterministic, step-driven page over the in-memory
//!   [`Document`], used natively and in tests.
//! - `CustomSlider` (wasm32 only): a `wasm-bindgen` class mounting a carousel
//!   on live DOM elements.
//!
//! Both drive widgets the same way: input is queued, time is passed in, and
//! timers only fire when the host steps.

pub mod dom;
mod layout_target;
pub mod page;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use dom::{Document, DomError, Element, ElementSpec, NodeId, Selector};
pub use page::{CarouselHandle, Page, StepResult};
pub use surface::DomSurface;

#[cfg(target_arch = "wasm32")]
pub use wasm::CustomSlider;

/// Native builds compile the browser class as a stub so workspace checks
/// stay green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct CustomSlider;

#[cfg(not(target_arch = "wasm32"))]
impl CustomSlider {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
