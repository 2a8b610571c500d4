#![forbid(unsafe_code)]

//! Rendering seam between the carousel controller and its container.
//!
//! A [`Surface`] owns one container exclusively. The controller asks it to
//! hand over the container's children, clone slides, mount the track and
//! arrows, repaint the track and finally put the originals back. Browser
//! hosts implement it over DOM elements; [`MemorySurface`] keeps everything
//! in plain vectors for headless use and tests.

use crate::render::{ArrowButton, SlideStyle, TrackStyle};

/// A container the carousel renders into.
pub trait Surface {
    /// Handle to one slide.
    type Slide;

    /// Detach the container's children and return them in order.
    fn take_slides(&mut self) -> Vec<Self::Slide>;

    /// Produce a structurally identical copy of `slide`.
    fn clone_slide(&mut self, slide: &Self::Slide) -> Self::Slide;

    /// Place `slides` (the whole track) into the container, each with `style`.
    fn mount_track(&mut self, slides: &[Self::Slide], style: &SlideStyle);

    /// Apply a new track transform and transition.
    fn paint_track(&mut self, style: &TrackStyle);

    /// Append the arrow buttons after the track.
    fn mount_arrows(&mut self, arrows: &[ArrowButton; 2]);

    /// Remove the track and arrows and put `originals` back, in order.
    fn restore(&mut self, originals: &[Self::Slide]);
}

/// In-memory surface.
///
/// Slides are plain values; cloning uses [`Clone`]. Every paint is recorded so
/// tests can assert on the exact sequence the controller produced.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface<T> {
    children: Vec<T>,
    track: Option<Vec<T>>,
    slide_style: Option<SlideStyle>,
    paints: Vec<TrackStyle>,
    arrows: Option<[ArrowButton; 2]>,
    clones_made: usize,
}

impl<T: Clone> MemorySurface<T> {
    /// A container holding `children`.
    #[must_use]
    pub fn new(children: Vec<T>) -> Self {
        Self {
            children,
            track: None,
            slide_style: None,
            paints: Vec::new(),
            arrows: None,
            clones_made: 0,
        }
    }

    /// Plain children of the container (empty while the track is mounted).
    #[must_use]
    pub fn children(&self) -> &[T] {
        &self.children
    }

    /// Mounted track entries, if any.
    #[must_use]
    pub fn track(&self) -> Option<&[T]> {
        self.track.as_deref()
    }

    /// Style applied to each track entry.
    #[must_use]
    pub fn slide_style(&self) -> Option<&SlideStyle> {
        self.slide_style.as_ref()
    }

    /// Every track paint, oldest first.
    #[must_use]
    pub fn paints(&self) -> &[TrackStyle] {
        &self.paints
    }

    /// The most recent track paint.
    #[must_use]
    pub fn last_paint(&self) -> Option<&TrackStyle> {
        self.paints.last()
    }

    /// Mounted arrows, if any.
    #[must_use]
    pub fn arrows(&self) -> Option<&[ArrowButton; 2]> {
        self.arrows.as_ref()
    }

    /// Number of slides cloned so far.
    #[must_use]
    pub fn clones_made(&self) -> usize {
        self.clones_made
    }
}

impl<T: Clone> Surface for MemorySurface<T> {
    type Slide = T;

    fn take_slides(&mut self) -> Vec<T> {
        std::mem::take(&mut self.children)
    }

    fn clone_slide(&mut self, slide: &T) -> T {
        self.clones_made += 1;
        slide.clone()
    }

    fn mount_track(&mut self, slides: &[T], style: &SlideStyle) {
        self.track = Some(slides.to_vec());
        self.slide_style = Some(*style);
    }

    fn paint_track(&mut self, style: &TrackStyle) {
        self.paints.push(*style);
    }

    fn mount_arrows(&mut self, arrows: &[ArrowButton; 2]) {
        self.arrows = Some(arrows.clone());
    }

    fn restore(&mut self, originals: &[T]) {
        self.track = None;
        self.arrows = None;
        self.children = originals.to_vec();
    }
}
