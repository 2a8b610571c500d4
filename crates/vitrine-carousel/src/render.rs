#![forbid(unsafe_code)]

//! Pure rendering descriptors.
//!
//! Everything a surface needs to paint is computed here from the machine and
//! the options; nothing is read back from the surface. The CSS strings match
//! what the slider has always written inline, e.g.
//! `translateX(calc(-75% * 2))` and `transform 800ms ease-in-out`.

use core::time::Duration;

use vitrine_core::easing::Easing;

use crate::machine::TransitionMachine;
use crate::options::CarouselOptions;

/// Class of the flex container wrapping the slides.
pub const TRACK_CLASS: &str = "slider-track";
/// Accessible label of the previous arrow.
pub const PREV_LABEL: &str = "上一張";
/// Accessible label of the next arrow.
pub const NEXT_LABEL: &str = "下一張";

/// An animated `transform` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Transition duration.
    pub duration: Duration,
    /// Timing function.
    pub easing: Easing,
}

impl Transition {
    /// CSS `transition` value.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "transform {}ms {}",
            self.duration.as_millis(),
            self.easing.css_name()
        )
    }
}

/// Paint state of the track element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    /// Width of one slide in percent.
    pub slide_width: f64,
    /// Track position shown.
    pub position: usize,
    /// Active transition, or `None` when moves are instant.
    pub transition: Option<Transition>,
}

impl TrackStyle {
    /// Horizontal offset in percent of the container (negative moves left).
    #[must_use]
    pub fn offset_percent(&self) -> f64 {
        -(self.slide_width * self.position as f64)
    }

    /// CSS `transform` value.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "translateX(calc(-{}% * {}))",
            self.slide_width, self.position
        )
    }

    /// CSS `transition` value (`none` when instant).
    #[must_use]
    pub fn transition_css(&self) -> String {
        self.transition
            .map_or_else(|| "none".to_owned(), |transition| transition.css())
    }
}

/// Track paint state as a function of machine state.
#[must_use]
pub fn track_style(machine: &TransitionMachine, options: &CarouselOptions) -> TrackStyle {
    TrackStyle {
        slide_width: options.slide_width,
        position: machine.position(),
        transition: machine.animated().then(|| Transition {
            duration: options.transition_duration(),
            easing: Easing::EaseInOut,
        }),
    }
}

/// Inline style shared by every track entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideStyle {
    /// Width of one slide in percent.
    pub slide_width: f64,
    /// Gap in pixels, subtracted from the width and used as right margin.
    pub gap: f64,
}

impl SlideStyle {
    /// CSS `width` value.
    #[must_use]
    pub fn width_css(&self) -> String {
        format!("calc({}% - {}px)", self.slide_width, self.gap)
    }

    /// CSS `margin-right` value.
    #[must_use]
    pub fn margin_right_css(&self) -> String {
        format!("{}px", self.gap)
    }

    /// All declarations as `(property, value)` pairs.
    #[must_use]
    pub fn declarations(&self) -> [(&'static str, String); 3] {
        [
            ("flex-shrink", "0".to_owned()),
            ("width", self.width_css()),
            ("margin-right", self.margin_right_css()),
        ]
    }
}

/// Slide style from the options.
#[must_use]
pub fn slide_style(options: &CarouselOptions) -> SlideStyle {
    SlideStyle {
        slide_width: options.slide_width,
        gap: options.gap,
    }
}

/// Which way an arrow moves the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    /// Calls `prev()`.
    Prev,
    /// Calls `next()`.
    Next,
}

/// An arrow button to append after the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowButton {
    /// Direction.
    pub direction: ArrowDirection,
    /// Class list.
    pub class: String,
    /// `aria-label`.
    pub label: &'static str,
}

/// Previous and next arrows, or `None` when arrows are disabled.
#[must_use]
pub fn arrow_buttons(options: &CarouselOptions) -> Option<[ArrowButton; 2]> {
    options.arrows.then(|| {
        [
            ArrowButton {
                direction: ArrowDirection::Prev,
                class: options.prev_arrow_class.clone(),
                label: PREV_LABEL,
            },
            ArrowButton {
                direction: ArrowDirection::Next,
                class: options.next_arrow_class.clone(),
                label: NEXT_LABEL,
            },
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_track_style_has_no_transition() {
        let options = CarouselOptions::default();
        let (machine, _) = TransitionMachine::new(5, options.transition_duration());
        let style = track_style(&machine, &options);
        assert_eq!(style.transform_css(), "translateX(calc(-75% * 1))");
        assert_eq!(style.transition_css(), "none");
        assert_eq!(style.offset_percent(), -75.0);
    }

    #[test]
    fn animated_track_style_uses_speed() {
        let options = CarouselOptions::default().with_speed(600);
        let (mut machine, _) = TransitionMachine::new(5, options.transition_duration());
        machine.on_timer();
        machine.next();
        let style = track_style(&machine, &options);
        assert_eq!(style.transform_css(), "translateX(calc(-75% * 2))");
        assert_eq!(style.transition_css(), "transform 600ms ease-in-out");
    }

    #[test]
    fn slide_style_subtracts_gap() {
        let style = slide_style(&CarouselOptions::default());
        assert_eq!(style.width_css(), "calc(75% - 16px)");
        assert_eq!(style.margin_right_css(), "16px");
        assert_eq!(style.declarations()[0], ("flex-shrink", "0".to_owned()));
    }

    #[test]
    fn fractional_geometry_keeps_precision() {
        let style = slide_style(&CarouselOptions::default().with_geometry(62.5, 0.0));
        assert_eq!(style.width_css(), "calc(62.5% - 0px)");
    }

    #[test]
    fn arrows_follow_options() {
        assert!(arrow_buttons(&CarouselOptions::default().with_arrows(false)).is_none());
        let [prev, next] = arrow_buttons(&CarouselOptions::default()).unwrap();
        assert_eq!(prev.direction, ArrowDirection::Prev);
        assert_eq!(prev.label, PREV_LABEL);
        assert!(next.class.contains("carousel-arrow-next"));
    }
}
