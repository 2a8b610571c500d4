#![forbid(unsafe_code)]

//! Deferred-callback scheduler with a single entry point.
//!
//! Widgets register one-shot and repeating timers carrying a small payload
//! (usually an enum naming what should happen). The host advances time and the
//! widget drains due timers through [`Scheduler::pop_due`], handling each
//! payload before asking for the next one. Timers registered while handling a
//! payload are measured from the deadline of the timer that fired, so chains
//! such as "transition ends, then snap back 50ms later" resolve correctly
//! inside a single large time step.
//!
//! # Invariants
//!
//! 1. Due timers fire in deadline order; equal deadlines fire in the order
//!    they were scheduled.
//! 2. A cancelled timer never fires.
//! 3. Scheduler time never moves backwards.
//! 4. A repeating timer fires at most once per `pop_due` call and is
//!    re-armed one interval after its previous deadline.

use core::time::Duration;

/// Repeating intervals shorter than this are clamped to it, so a zero
/// interval cannot make [`Scheduler::pop_due`] spin forever.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cadence {
    Once,
    Every(Duration),
}

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TimerId,
    deadline: Duration,
    seq: u64,
    cadence: Cadence,
    payload: T,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// The timer's handle.
    pub id: TimerId,
    /// The deadline it was due at (also the scheduler's current time).
    pub deadline: Duration,
    /// The payload supplied when scheduling.
    pub payload: T,
}

/// Host-driven timer queue.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler whose time starts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Duration::ZERO)
    }

    /// Create an empty scheduler whose time starts at `now`.
    #[must_use]
    pub fn starting_at(now: Duration) -> Self {
        Self {
            now,
            next_id: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Scheduler time: the latest of the last fired deadline and the last
    /// time passed to [`advance_to`](Self::advance_to).
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `payload` once, `delay` after the current scheduler time.
    pub fn schedule_once(&mut self, delay: Duration, payload: T) -> TimerId {
        self.insert(delay, Cadence::Once, payload)
    }

    /// Fire `payload` every `interval`, first one interval from now.
    pub fn schedule_every(&mut self, interval: Duration, payload: T) -> TimerId {
        let interval = interval.max(MIN_INTERVAL);
        self.insert(interval, Cadence::Every(interval), payload)
    }

    fn insert(&mut self, delay: Duration, cadence: Cadence, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            deadline: self.now.saturating_add(delay),
            seq,
            cadence,
            payload,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Scheduler time moves to the fired deadline, so anything scheduled while
    /// handling the returned payload is relative to that deadline. Repeating
    /// timers are re-armed before returning.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<T>> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(pos, _)| pos)?;

        let deadline = self.entries[pos].deadline;
        self.now = self.now.max(deadline);

        let fired = match self.entries[pos].cadence {
            Cadence::Once => {
                let entry = self.entries.swap_remove(pos);
                Fired {
                    id: entry.id,
                    deadline,
                    payload: entry.payload,
                }
            }
            Cadence::Every(interval) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[pos];
                entry.deadline = deadline.saturating_add(interval);
                entry.seq = seq;
                Fired {
                    id: entry.id,
                    deadline,
                    payload: entry.payload.clone(),
                }
            }
        };
        Some(fired)
    }

    /// Move scheduler time forward to `now` once due timers are drained.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
