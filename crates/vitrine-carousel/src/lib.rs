#![forbid(unsafe_code)]

//! Infinite-loop slide carousel.
//!
//! A carousel takes the children of a container, frames them with a clone of
//! the last slide in front and a clone of the first slide behind, and slides
//! a horizontal track between them. Moving past either end animates onto the
//! clone and then snaps, without animation, to the matching real slide, so
//! the loop looks seamless.
//!
//! # Layers
//!
//! - [`track`]: the `n + 2` track and position to real-index mapping.
//! - [`machine`]: the transition state machine. No clock, no rendering.
//! - [`render`]: CSS descriptors computed from machine state.
//! - [`surface`]: the seam to whatever hosts the container.
//! - [`carousel`]: the controller wiring the above to a timer scheduler.
//!
//! Hosts drive time explicitly: nothing fires until
//! [`Carousel::advance_to`] is called.

pub mod carousel;
pub mod machine;
pub mod options;
pub mod render;
pub mod surface;
pub mod track;

use std::fmt;

pub use carousel::{Carousel, CarouselEvent, CarouselSnapshot, SlideChangeFn};
pub use machine::{Outcome, Phase, SETTLE_DELAY, SNAP_DELAY, SnapStage, TransitionMachine};
pub use options::CarouselOptions;
pub use render::{ArrowButton, ArrowDirection, SlideStyle, TrackStyle, Transition};
pub use surface::{MemorySurface, Surface};
pub use track::{SlotKind, Track};

/// Errors from driving a mounted carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    /// Requested position or index does not exist.
    IndexOutOfRange {
        /// Requested value.
        index: usize,
        /// Number of valid values.
        len: usize,
    },
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "slide index {index} out of range (len {len})")
            }
        }
    }
}

impl std::error::Error for CarouselError {}

/// Errors from mounting a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// No element matched the container selector.
    ContainerNotFound(String),
    /// The container has no children to use as slides.
    NoSlides,
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerNotFound(selector) => {
                write!(f, "carousel container not found: {selector}")
            }
            Self::NoSlides => write!(f, "carousel container has no slides"),
        }
    }
}

impl std::error::Error for MountError {}
