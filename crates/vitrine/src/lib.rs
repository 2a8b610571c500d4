#![forbid(unsafe_code)]

//! Vitrine public facade crate.
//!
//! Re-exports the widget crates behind one dependency and offers a small
//! prelude for page code.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use vitrine_core::clock::{DeterministicClock, HostClock, WallClock};
pub use vitrine_core::easing::{Easing, Tween};
pub use vitrine_core::event::{Event, PointerEvent, PointerEventKind, Viewport};
pub use vitrine_core::scheduler::{Scheduler, TimerId};

// --- Carousel re-exports ---------------------------------------------------

pub use vitrine_carousel::{
    Carousel, CarouselError, CarouselEvent, CarouselOptions, CarouselSnapshot, MemorySurface,
    MountError, Surface,
};

// --- Layout re-exports -----------------------------------------------------

pub use vitrine_layout::{ImageDimensions, LayoutConfig, LayoutError, LayoutManager, ViewMode};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use vitrine_web::{CarouselHandle, Document, DomError, ElementSpec, NodeId, Page, StepResult};

// --- Booking re-exports ----------------------------------------------------

#[cfg(feature = "booking")]
pub use vitrine_booking::{BookingConfig, BookingError, BookingHandler, BookingResponse};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for vitrine pages.
#[derive(Debug)]
pub enum Error {
    /// A carousel command was rejected.
    Carousel(CarouselError),
    /// A carousel could not be mounted.
    Mount(MountError),
    /// An image section could not be laid out.
    Layout(LayoutError),
    /// A document operation failed.
    #[cfg(feature = "web")]
    Dom(DomError),
    /// A booking submission failed.
    #[cfg(feature = "booking")]
    Booking(BookingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Carousel(err) => write!(f, "{err}"),
            Self::Mount(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Dom(err) => write!(f, "{err}"),
            #[cfg(feature = "booking")]
            Self::Booking(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Carousel(err) => Some(err),
            Self::Mount(err) => Some(err),
            Self::Layout(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Dom(err) => Some(err),
            #[cfg(feature = "booking")]
            Self::Booking(err) => Some(err),
        }
    }
}

impl From<CarouselError> for Error {
    fn from(err: CarouselError) -> Self {
        Self::Carousel(err)
    }
}

impl From<MountError> for Error {
    fn from(err: MountError) -> Self {
        Self::Mount(err)
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

#[cfg(feature = "web")]
impl From<DomError> for Error {
    fn from(err: DomError) -> Self {
        Self::Dom(err)
    }
}

#[cfg(feature = "booking")]
impl From<BookingError> for Error {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

/// Standard result type for vitrine APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Carousel, CarouselOptions, Error, Event, LayoutConfig, LayoutManager, PointerEventKind,
        Result, Viewport,
    };

    #[cfg(feature = "web")]
    pub use crate::{Document, ElementSpec, Page};

    pub use crate::{carousel, core, layout};
}

pub use vitrine_carousel as carousel;
pub use vitrine_core as core;
pub use vitrine_layout as layout;

#[cfg(feature = "booking")]
pub use vitrine_booking as booking;
#[cfg(feature = "web")]
pub use vitrine_web as web;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    type Slides = crate::MemorySurface<&'static str>;

    fn jump(carousel: &mut Carousel<Slides>, index: usize) -> Result<()> {
        carousel.go_to(index)?;
        Ok(())
    }

    #[test]
    fn errors_convert_through_question_mark() {
        let surface = crate::MemorySurface::new(vec!["a", "b"]);
        let mut carousel = Carousel::mount(surface, CarouselOptions::default()).unwrap();
        assert!(jump(&mut carousel, 1).is_ok());
        let err = jump(&mut carousel, 9).unwrap_err();
        assert!(matches!(err, Error::Carousel(_)));
        assert_eq!(err.to_string(), "slide index 9 out of range (len 2)");
    }

    #[test]
    fn mount_errors_convert() {
        let surface = crate::MemorySurface::<&str>::new(Vec::new());
        let err: Error = Carousel::mount(surface, CarouselOptions::default())
            .map(|_| ())
            .unwrap_err()
            .into();
        assert_eq!(err.to_string(), "carousel container has no slides");
    }
}
