#![forbid(unsafe_code)]

//! Carousel configuration record.
//!
//! The record mirrors the options object page scripts pass when mounting a
//! slider, including its camelCase JSON spelling. Missing keys take their
//! defaults; [`CarouselOptions::normalized`] then applies the historical
//! fallback rule where a zero interval, duration or width means "use the
//! default" while a zero gap is kept.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Default autoplay interval in milliseconds.
pub const DEFAULT_AUTOPLAY_SPEED_MS: u64 = 5000;
/// Default transition duration in milliseconds.
pub const DEFAULT_SPEED_MS: u64 = 800;
/// Default visible width of one slide, in percent of the container.
pub const DEFAULT_SLIDE_WIDTH: f64 = 75.0;
/// Default gap between slides in pixels.
pub const DEFAULT_GAP: f64 = 16.0;
/// Default classes of the "previous" arrow button.
pub const DEFAULT_PREV_ARROW_CLASS: &str = "slick-prev carousel-arrow carousel-arrow-prev";
/// Default classes of the "next" arrow button.
pub const DEFAULT_NEXT_ARROW_CLASS: &str = "slick-next carousel-arrow carousel-arrow-next";

/// Carousel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselOptions {
    /// Advance automatically and pause while hovered.
    pub autoplay: bool,
    /// Autoplay interval in milliseconds.
    pub autoplay_speed: u64,
    /// Transition duration in milliseconds.
    pub speed: u64,
    /// Width of one slide in percent of the container.
    pub slide_width: f64,
    /// Space between slides in pixels.
    pub gap: f64,
    /// Append previous/next arrow buttons.
    pub arrows: bool,
    /// Class list of the previous arrow.
    pub prev_arrow_class: String,
    /// Class list of the next arrow.
    pub next_arrow_class: String,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_speed: DEFAULT_AUTOPLAY_SPEED_MS,
            speed: DEFAULT_SPEED_MS,
            slide_width: DEFAULT_SLIDE_WIDTH,
            gap: DEFAULT_GAP,
            arrows: true,
            prev_arrow_class: DEFAULT_PREV_ARROW_CLASS.to_owned(),
            next_arrow_class: DEFAULT_NEXT_ARROW_CLASS.to_owned(),
        }
    }
}

impl CarouselOptions {
    /// Parse the camelCase JSON options record.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the text is not an object of the expected shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(text).map(Self::normalized)
    }

    /// Replace zero/empty values (and a non-finite width) with their defaults.
    /// `gap` is left alone.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.autoplay_speed == 0 {
            self.autoplay_speed = DEFAULT_AUTOPLAY_SPEED_MS;
        }
        if self.speed == 0 {
            self.speed = DEFAULT_SPEED_MS;
        }
        if self.slide_width == 0.0 || !self.slide_width.is_finite() {
            self.slide_width = DEFAULT_SLIDE_WIDTH;
        }
        if self.prev_arrow_class.trim().is_empty() {
            self.prev_arrow_class = DEFAULT_PREV_ARROW_CLASS.to_owned();
        }
        if self.next_arrow_class.trim().is_empty() {
            self.next_arrow_class = DEFAULT_NEXT_ARROW_CLASS.to_owned();
        }
        self
    }

    /// Autoplay interval.
    #[must_use]
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_speed)
    }

    /// Transition duration.
    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.speed)
    }

    /// Set autoplay (builder).
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set arrow visibility (builder).
    #[must_use]
    pub fn with_arrows(mut self, arrows: bool) -> Self {
        self.arrows = arrows;
        self
    }

    /// Set the transition duration in milliseconds (builder).
    #[must_use]
    pub fn with_speed(mut self, speed_ms: u64) -> Self {
        self.speed = speed_ms;
        self
    }

    /// Set the autoplay interval in milliseconds (builder).
    #[must_use]
    pub fn with_autoplay_speed(mut self, autoplay_speed_ms: u64) -> Self {
        self.autoplay_speed = autoplay_speed_ms;
        self
    }

    /// Set slide width and gap (builder).
    #[must_use]
    pub fn with_geometry(mut self, slide_width: f64, gap: f64) -> Self {
        self.slide_width = slide_width;
        self.gap = gap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = CarouselOptions::default();
        assert!(options.autoplay);
        assert_eq!(options.autoplay_interval(), Duration::from_secs(5));
        assert_eq!(options.transition_duration(), Duration::from_millis(800));
        assert_eq!(options.slide_width, 75.0);
        assert_eq!(options.gap, 16.0);
        assert!(options.arrows);
    }

    #[test]
    fn json_missing_keys_take_defaults() {
        let options = CarouselOptions::from_json(r#"{"autoplay": false, "slideWidth": 60}"#).unwrap();
        assert!(!options.autoplay);
        assert_eq!(options.slide_width, 60.0);
        assert_eq!(options.speed, DEFAULT_SPEED_MS);
        assert_eq!(options.prev_arrow_class, DEFAULT_PREV_ARROW_CLASS);
    }

    #[test]
    fn zero_values_fall_back_except_gap() {
        let options = CarouselOptions::from_json(
            r#"{"speed": 0, "autoplaySpeed": 0, "slideWidth": 0, "gap": 0, "nextArrowClass": ""}"#,
        )
        .unwrap();
        assert_eq!(options.speed, DEFAULT_SPEED_MS);
        assert_eq!(options.autoplay_speed, DEFAULT_AUTOPLAY_SPEED_MS);
        assert_eq!(options.slide_width, DEFAULT_SLIDE_WIDTH);
        assert_eq!(options.gap, 0.0);
        assert_eq!(options.next_arrow_class, DEFAULT_NEXT_ARROW_CLASS);
    }

    #[test]
    fn non_finite_width_falls_back() {
        let options = CarouselOptions::default()
            .with_geometry(f64::INFINITY, 8.0)
            .normalized();
        assert_eq!(options.slide_width, DEFAULT_SLIDE_WIDTH);
        assert_eq!(options.gap, 8.0);

        let options = CarouselOptions::default()
            .with_geometry(f64::NEG_INFINITY, 8.0)
            .normalized();
        assert_eq!(options.slide_width, DEFAULT_SLIDE_WIDTH);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(CarouselOptions::from_json(r#"{"speed": "fast"}"#).is_err());
    }
}
