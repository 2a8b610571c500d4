#![forbid(unsafe_code)]

//! Transition state machine.
//!
//! [`TransitionMachine`] holds the logical carousel state (track position,
//! phase, whether moves animate) and nothing else. It never touches a clock:
//! every accepted command returns an [`Outcome`] asking the caller to wake it
//! after some delay, and the caller feeds that wake-up back through
//! [`TransitionMachine::on_timer`].
//!
//! # Phases
//!
//! ```text
//!            settle            next/prev             speed elapsed
//! Mounting ─────────▶ Idle ──────────────▶ Transitioning ───────────▶ Idle
//!     │                 ▲                        │ landed on a clone
//!     │ next/prev       │ settle                 ▼
//!     └────────▶        └──── SnappingBack{Jumping} ◀── SnappingBack{Armed}
//!                                                    snap delay
//! ```
//!
//! # Invariants
//!
//! 1. At most one wake-up is outstanding; every new request replaces it.
//! 2. While transitioning or snapping back, animated moves are ignored
//!    (dropped, never queued). Instant moves always apply.
//! 3. In `Idle` and `Mounting` the position is a real slide (`1..=n`).
//! 4. The reported real index is always in `0..n`.

use core::time::Duration;

use crate::CarouselError;
use crate::track::real_index;

/// How long animation stays disabled around an instant move, and after mount.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Pause between landing on a boundary clone and jumping to the real slide.
pub const SNAP_DELAY: Duration = Duration::from_millis(50);

/// Progress of a snap-back from a boundary clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapStage {
    /// Resting on the clone, waiting for [`SNAP_DELAY`].
    Armed,
    /// Jumped without animation, waiting for [`SETTLE_DELAY`] to re-enable it.
    Jumping,
}

/// Carousel phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Just mounted on the first real slide; animation is held off until the
    /// settle delay passes so the initial placement does not animate.
    Mounting,
    /// At rest on a real slide.
    Idle,
    /// Moving to the current position.
    Transitioning {
        /// Whether this move is unanimated.
        instant: bool,
    },
    /// Landed on a boundary clone; returning to the matching real slide.
    SnappingBack {
        /// Real-slide position the snap lands on.
        to: usize,
        /// Progress of the snap.
        stage: SnapStage,
    },
}

/// What the caller must do after driving the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Call [`TransitionMachine::on_timer`] after this delay, replacing any
    /// earlier request. `None` leaves the outstanding request untouched, or,
    /// when returned from `on_timer`, means nothing further is pending.
    pub wake_after: Option<Duration>,
    /// Real index to announce to slide-change listeners.
    pub changed: Option<usize>,
    /// Position or animation flag changed and the track must be repainted.
    pub repaint: bool,
}

impl Outcome {
    /// Whether the command was ignored.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Logical carousel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionMachine {
    track_len: usize,
    position: usize,
    phase: Phase,
    animated: bool,
    speed: Duration,
}

impl TransitionMachine {
    /// Create a machine on the first real slide.
    ///
    /// The returned outcome paints the initial position without animation and
    /// requests the settle wake-up.
    #[must_use]
    pub fn new(track_len: usize, speed: Duration) -> (Self, Outcome) {
        let machine = Self {
            track_len: track_len.max(3),
            position: 1,
            phase: Phase::Mounting,
            animated: false,
            speed,
        };
        let outcome = Outcome {
            wake_after: Some(SETTLE_DELAY),
            changed: None,
            repaint: true,
        };
        (machine, outcome)
    }

    /// Current track position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Real index shown at the current position.
    #[inline]
    #[must_use]
    pub fn real_index(&self) -> usize {
        real_index(self.track_len, self.position)
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether position changes should animate.
    #[inline]
    #[must_use]
    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Track length this machine was built for.
    #[inline]
    #[must_use]
    pub fn track_len(&self) -> usize {
        self.track_len
    }

    /// Whether a move or snap-back is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(
            self.phase,
            Phase::Transitioning { .. } | Phase::SnappingBack { .. }
        )
    }

    /// Move to track `position`.
    ///
    /// Animated moves are ignored while a transition is in flight. Instant
    /// moves always apply and discard whatever was pending.
    ///
    /// # Errors
    ///
    /// [`CarouselError::IndexOutOfRange`] when `position` is past the track.
    pub fn go_to_slide(&mut self, position: usize, instant: bool) -> Result<Outcome, CarouselError> {
        if position >= self.track_len {
            return Err(CarouselError::IndexOutOfRange {
                index: position,
                len: self.track_len,
            });
        }
        if self.is_transitioning() && !instant {
            return Ok(Outcome::default());
        }

        self.position = position;
        self.phase = Phase::Transitioning { instant };
        self.animated = !instant;
        Ok(Outcome {
            wake_after: Some(if instant { SETTLE_DELAY } else { self.speed }),
            changed: None,
            repaint: true,
        })
    }

    /// Advance by one slide unless a transition is in flight.
    pub fn next(&mut self) -> Outcome {
        if self.is_transitioning() {
            return Outcome::default();
        }
        self.go_to_slide(self.position + 1, false)
            .unwrap_or_default()
    }

    /// Retreat by one slide unless a transition is in flight.
    pub fn prev(&mut self) -> Outcome {
        if self.is_transitioning() || self.position == 0 {
            return Outcome::default();
        }
        self.go_to_slide(self.position - 1, false)
            .unwrap_or_default()
    }

    /// Handle the wake-up requested by the previous outcome.
    pub fn on_timer(&mut self) -> Outcome {
        match self.phase {
            Phase::Idle => Outcome::default(),
            Phase::Mounting => {
                self.phase = Phase::Idle;
                self.animated = true;
                Outcome {
                    repaint: true,
                    ..Outcome::default()
                }
            }
            Phase::Transitioning { instant } => {
                self.phase = Phase::Idle;
                if instant {
                    self.animated = true;
                }
                let mut outcome = Outcome {
                    repaint: instant,
                    ..Outcome::default()
                };
                if let Some(to) = self.snap_target() {
                    self.phase = Phase::SnappingBack {
                        to,
                        stage: SnapStage::Armed,
                    };
                    outcome.wake_after = Some(SNAP_DELAY);
                }
                if !instant {
                    outcome.changed = Some(self.real_index());
                }
                outcome
            }
            Phase::SnappingBack {
                to,
                stage: SnapStage::Armed,
            } => {
                self.position = to;
                self.animated = false;
                self.phase = Phase::SnappingBack {
                    to,
                    stage: SnapStage::Jumping,
                };
                Outcome {
                    wake_after: Some(SETTLE_DELAY),
                    changed: None,
                    repaint: true,
                }
            }
            Phase::SnappingBack {
                stage: SnapStage::Jumping,
                ..
            } => {
                self.phase = Phase::Idle;
                self.animated = true;
                Outcome {
                    repaint: true,
                    ..Outcome::default()
                }
            }
        }
    }

    fn snap_target(&self) -> Option<usize> {
        let last = self.track_len - 1;
        match self.position {
            0 => Some(self.track_len - 2),
            p if p == last => Some(1),
            _ => None,
        }
    }
}
