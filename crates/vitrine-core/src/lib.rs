#![forbid(unsafe_code)]

//! Core: host clocks, timer scheduling, easing curves, host events and logging.

pub mod clock;
pub mod easing;
pub mod event;
pub mod logging;
pub mod scheduler;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
