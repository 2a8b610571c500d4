#![forbid(unsafe_code)]

//! Layout manager configuration.
//!
//! Page scripts pass a partial camelCase record; missing keys keep the
//! defaults below.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_core::event::Viewport;

/// Responsive mode a viewport falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Narrower than the mobile breakpoint: height-driven, always scrollable.
    Mobile,
    /// At or above the breakpoint: width-driven.
    Desktop,
}

impl ViewMode {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Element selectors used to find the parts of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selectors {
    pub section: String,
    pub container: String,
    pub image_container: String,
    pub image: String,
    pub picture: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            section: ".image-layout-section".to_owned(),
            container: ".overflow-x-auto".to_owned(),
            image_container: ".image-container".to_owned(),
            image: ".centered-image".to_owned(),
            picture: "picture".to_owned(),
        }
    }
}

/// Data attribute names carrying per-image metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeNames {
    pub width: String,
    pub height: String,
    pub target_position: String,
    pub mobile_min_height: String,
    pub desktop_min_height: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            width: "data-width".to_owned(),
            height: "data-height".to_owned(),
            target_position: "data-target-position".to_owned(),
            mobile_min_height: "data-mobile-min-height".to_owned(),
            desktop_min_height: "data-desktop-min-height".to_owned(),
        }
    }
}

/// Layout manager configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Apply a section only once it scrolls into view.
    pub lazy_load: bool,
    /// Quiet period after the last resize before re-applying, in ms.
    pub resize_debounce_time: u64,
    /// Viewports narrower than this are [`ViewMode::Mobile`].
    pub mobile_breakpoint: f64,
    /// Mobile image height when the section does not set one.
    pub default_mobile_min_height: Option<String>,
    /// Desktop minimum image height when the section does not set one.
    pub default_desktop_min_height: Option<String>,
    /// Duration of the scroll-to-target animation, in ms.
    pub scroll_duration: u64,
    pub selectors: Selectors,
    pub attributes: AttributeNames,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lazy_load: true,
            resize_debounce_time: 150,
            mobile_breakpoint: 768.0,
            default_mobile_min_height: Some("300px".to_owned()),
            default_desktop_min_height: None,
            scroll_duration: 300,
            selectors: Selectors::default(),
            attributes: AttributeNames::default(),
        }
    }
}

impl LayoutConfig {
    /// Parse a partial camelCase JSON record.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the text is not an object of the expected shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Mode for `viewport`.
    #[must_use]
    pub fn view_mode(&self, viewport: Viewport) -> ViewMode {
        if viewport.width < self.mobile_breakpoint {
            ViewMode::Mobile
        } else {
            ViewMode::Desktop
        }
    }

    /// Resize debounce as a duration.
    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_time)
    }

    /// Scroll animation duration.
    #[must_use]
    pub fn scroll_animation(&self) -> Duration {
        Duration::from_millis(self.scroll_duration)
    }

    /// Disable lazy loading (builder). Hosts without visibility
    /// notifications use this.
    #[must_use]
    pub fn eager(mut self) -> Self {
        self.lazy_load = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        let config = LayoutConfig::default();
        assert_eq!(config.view_mode(Viewport::new(767.0, 600.0)), ViewMode::Mobile);
        assert_eq!(config.view_mode(Viewport::new(768.0, 600.0)), ViewMode::Desktop);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json(
            r#"{"lazyLoad": false, "selectors": {"section": ".hero"}, "defaultDesktopMinHeight": "70vh"}"#,
        )
        .unwrap();
        assert!(!config.lazy_load);
        assert_eq!(config.selectors.section, ".hero");
        assert_eq!(config.selectors.container, ".overflow-x-auto");
        assert_eq!(config.default_desktop_min_height.as_deref(), Some("70vh"));
        assert_eq!(config.resize_debounce(), Duration::from_millis(150));
        assert_eq!(config.attributes.width, "data-width");
    }

    #[test]
    fn mode_labels() {
        assert_eq!(ViewMode::Mobile.to_string(), "mobile");
        assert_eq!(ViewMode::Desktop.label(), "desktop");
    }
}
