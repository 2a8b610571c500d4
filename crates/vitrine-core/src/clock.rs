#![forbid(unsafe_code)]

//! Monotonic clocks for host-driven widgets.
//!
//! Widgets never read the system time themselves. The embedding host owns a
//! clock and passes `now` into each widget's scheduler entry point, which keeps
//! every timer-driven transition reproducible in tests.

use core::time::Duration;

/// A monotonic time source measured from an arbitrary origin.
pub trait HostClock {
    /// Current monotonic time since the clock's origin.
    fn now_mono(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Earlier values than the current time are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

impl HostClock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

/// Wall-clock backed monotonic time, usable on native targets and in browsers.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: web_time::Instant,
}

impl WallClock {
    /// Start a clock whose origin is the moment of construction.
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::start()
    }
}

impl HostClock for WallClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Convert a host timestamp in (possibly fractional) milliseconds to a [`Duration`].
///
/// Negative and non-finite inputs map to zero, matching how browsers clamp
/// `performance.now()` derived values.
#[must_use]
pub fn millis_f64(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}
