#![forbid(unsafe_code)]

//! The slide track: originals framed by two boundary clones.
//!
//! ```text
//! position:  0            1 .. n          n+1
//! slide:     clone(last)  originals       clone(first)
//! ```
//!
//! Positions `1..=n` are the real slides. The clones only exist so that a
//! move past either end animates onto something that looks like the wrapped
//! slide; they are never reported as the current slide.

/// What occupies a track position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Copy of the last original, at position 0.
    LeadingClone,
    /// An original slide with its real index.
    Original(usize),
    /// Copy of the first original, at the last position.
    TrailingClone,
}

/// Map a track position to the real index it displays.
///
/// Position 0 shows the last original, the final position shows the first
/// original, anything between is offset by one. Out-of-range positions are
/// clamped to the final position, so the result is always in `0..n`.
#[must_use]
pub fn real_index(track_len: usize, position: usize) -> usize {
    debug_assert!(track_len >= 3, "a track always holds at least one original and two clones");
    let last = track_len.saturating_sub(1);
    let originals = track_len.saturating_sub(2).max(1);
    match position.min(last) {
        0 => originals - 1,
        p if p == last => 0,
        p => p - 1,
    }
}

/// Ordered slide track of `n + 2` entries.
#[derive(Debug, Clone)]
pub struct Track<S> {
    slides: Vec<S>,
}

impl<S> Track<S> {
    /// Assemble `[clone(last), originals.., clone(first)]`.
    ///
    /// `clone` produces a structurally identical copy of a slide. Returns
    /// `None` when there are no originals.
    pub fn build(originals: Vec<S>, mut clone: impl FnMut(&S) -> S) -> Option<Self> {
        let first = originals.first()?;
        let last = originals.last()?;
        let first_clone = clone(first);
        let last_clone = clone(last);

        let mut slides = Vec::with_capacity(originals.len() + 2);
        slides.push(last_clone);
        slides.extend(originals);
        slides.push(first_clone);
        Some(Self { slides })
    }

    /// Number of track entries (`n + 2`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`: a track holds at least three entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of original slides.
    #[inline]
    #[must_use]
    pub fn original_len(&self) -> usize {
        self.slides.len() - 2
    }

    /// All track entries in display order.
    #[must_use]
    pub fn slides(&self) -> &[S] {
        &self.slides
    }

    /// The original slides, in order.
    #[must_use]
    pub fn originals(&self) -> &[S] {
        &self.slides[1..self.slides.len() - 1]
    }

    /// Original slide by real index.
    #[must_use]
    pub fn original(&self, real: usize) -> Option<&S> {
        self.originals().get(real)
    }

    /// What occupies `position`, or `None` past the end.
    #[must_use]
    pub fn kind(&self, position: usize) -> Option<SlotKind> {
        let last = self.slides.len() - 1;
        match position {
            0 => Some(SlotKind::LeadingClone),
            p if p == last => Some(SlotKind::TrailingClone),
            p if p < last => Some(SlotKind::Original(p - 1)),
            _ => None,
        }
    }

    /// Real index shown at `position`.
    #[must_use]
    pub fn real_index(&self, position: usize) -> usize {
        real_index(self.slides.len(), position)
    }

    /// Drop the clones and return the originals in order.
    #[must_use]
    pub fn into_originals(mut self) -> Vec<S> {
        self.slides.pop();
        self.slides.remove(0);
        self.slides
    }
}
