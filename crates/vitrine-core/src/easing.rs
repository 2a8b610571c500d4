#![forbid(unsafe_code)]

//! Easing curves and a scalar tween.
//!
//! Curves map `t` in [0, 1] to output in [0, 1]. [`Easing`] names the curves
//! the site widgets use and knows their CSS spelling, so a widget can either
//! hand the curve to the browser (`transition: transform 800ms ease-in-out`)
//! or sample it itself when driving a property such as `scrollLeft`.

use core::time::Duration;

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// jQuery's `swing`: a half cosine wave.
#[inline]
pub fn swing(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    0.5 - (t * core::f64::consts::PI).cos() / 2.0
}

/// Named easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Slow start and end; the browser's `ease-in-out`.
    #[default]
    EaseInOut,
    /// Half cosine, used for scripted scroll animation.
    Swing,
}

impl Easing {
    /// The curve as a function.
    #[must_use]
    pub const fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseInOut => ease_in_out,
            Self::Swing => swing,
        }
    }

    /// Sample the curve at `t`.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        (self.function())(t)
    }

    /// CSS timing-function keyword. `Swing` has no CSS equivalent and maps to
    /// the closest keyword.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInOut | Self::Swing => "ease-in-out",
        }
    }
}

/// Interpolates an `f64` value between `from` and `to` over a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a tween from `from` to `to` over `duration` with linear easing.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: Easing::Linear,
        }
    }

    /// Set the easing curve (builder).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance the tween by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Whether the tween has reached its end.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress before easing, in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.sample(self.progress())
    }

    /// Target value.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }
}
