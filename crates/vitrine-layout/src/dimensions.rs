#![forbid(unsafe_code)]

//! Image dimension math.
//!
//! Given the intrinsic size of a section's image, an optional focal point and
//! the viewport, compute the rendered size of the image and how far its
//! container must scroll to center the focal point.
//!
//! Desktop sizing is width-driven: the image fills the viewport width, or
//! honors a minimum height while never becoming narrower than the viewport.
//! Mobile sizing is height-driven and always scrollable.

use core::fmt;

use vitrine_core::event::Viewport;

use crate::config::{LayoutConfig, ViewMode};
use crate::css::{Axis, resolve, round6};

/// Raw data attributes of one image candidate (`<img>` or `<source>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAttrs {
    pub width: Option<String>,
    pub height: Option<String>,
    pub target_position: Option<String>,
}

impl SourceAttrs {
    /// Attributes from literal values.
    #[must_use]
    pub fn new(width: &str, height: &str) -> Self {
        Self {
            width: Some(width.to_owned()),
            height: Some(height.to_owned()),
            target_position: None,
        }
    }

    /// Set the focal point (builder).
    #[must_use]
    pub fn target(mut self, target_position: &str) -> Self {
        self.target_position = Some(target_position.to_owned());
        self
    }

    fn size(&self) -> Option<(f64, f64)> {
        let width = self.width.as_deref().and_then(parse_leading_float)?;
        let height = self.height.as_deref().and_then(parse_leading_float)?;
        (width > 0.0 && height > 0.0).then_some((width, height))
    }

    fn target_position(&self) -> Option<f64> {
        self.target_position.as_deref().and_then(parse_leading_float)
    }
}

/// Everything read from one section before sizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSource {
    /// Desktop `<source media="(min-width…)">` inside a `<picture>`.
    pub desktop_source: Option<SourceAttrs>,
    /// The `<img>` element.
    pub image: SourceAttrs,
    /// Container's mobile height override.
    pub mobile_min_height: Option<String>,
    /// Container's desktop minimum height override.
    pub desktop_min_height: Option<String>,
}

impl SectionSource {
    /// A section with only an `<img>`.
    #[must_use]
    pub fn image(image: SourceAttrs) -> Self {
        Self {
            image,
            ..Self::default()
        }
    }
}

/// Why a section could not be sized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No section with this id exists, or it lacks an image.
    SectionNotFound(String),
    /// Intrinsic width or height is missing, zero or not a number.
    InvalidDimensions(String),
    /// The mobile height resolves to nothing usable.
    InvalidMinHeight(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionNotFound(id) => write!(f, "layout section not found: {id}"),
            Self::InvalidDimensions(id) => write!(f, "invalid image dimensions in section {id}"),
            Self::InvalidMinHeight(value) => write!(f, "invalid minimum height: {value}"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Computed size and scroll data for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDimensions {
    /// Rendered width in pixels.
    pub width: f64,
    /// Rendered height in pixels.
    pub height: f64,
    /// Focal point in rendered pixels from the left edge.
    pub scaled_target: f64,
    /// Viewport width the container spans.
    pub container_width: f64,
    /// Whether the container should scroll to the focal point.
    pub needs_scroll: bool,
    /// Intrinsic width over height, six decimal places.
    pub aspect_ratio: f64,
    /// Mode the dimensions were computed for.
    pub mode: ViewMode,
}

impl ImageDimensions {
    /// Horizontal scroll offset that centers the focal point, clamped to the
    /// scrollable range.
    #[must_use]
    pub fn scroll_position(&self) -> f64 {
        scroll_position(self.scaled_target, self.width, self.container_width)
    }

    /// Inline styles for every part of the section.
    #[must_use]
    pub fn styles(&self) -> SectionStyles {
        let width = format!("{}px", self.width);
        let height = format!("{}px", self.height);
        let sized = || vec![("width", width.clone()), ("height", height.clone())];

        let mut picture = sized();
        picture.push(("display", "block".to_owned()));

        let mut image = sized();
        image.extend([
            ("object-fit", "cover".to_owned()),
            ("display", "block".to_owned()),
            ("transform", "translateZ(0)".to_owned()),
            ("backface-visibility", "hidden".to_owned()),
            ("will-change", "transform".to_owned()),
        ]);

        SectionStyles {
            container: vec![("height", height.clone())],
            image_container: sized(),
            picture,
            image,
        }
    }
}

/// One inline declaration.
pub type Declaration = (&'static str, String);

/// Inline styles for the parts of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStyles {
    /// Scroll container: height only.
    pub container: Vec<Declaration>,
    /// Image wrapper.
    pub image_container: Vec<Declaration>,
    /// `<picture>`, when present.
    pub picture: Vec<Declaration>,
    /// `<img>`.
    pub image: Vec<Declaration>,
}

/// `clamp(target - container / 2, 0, width - container)`.
#[must_use]
pub fn scroll_position(scaled_target: f64, width: f64, container_width: f64) -> f64 {
    (scaled_target - container_width / 2.0)
        .min(width - container_width)
        .max(0.0)
}

/// Leading-number parse in the manner of a lenient attribute reader:
/// `"1920px"` is 1920, `"abc"` is nothing.
#[must_use]
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    while end < bytes.len() {
        match bytes[end] {
            b'+' | b'-' if end == 0 => {}
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                let rest = &bytes[end + 1..];
                let digits_at = usize::from(matches!(rest.first(), Some(b'+' | b'-')));
                if !rest.get(digits_at).is_some_and(u8::is_ascii_digit) {
                    break;
                }
                seen_exp = true;
                end += digits_at;
            }
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    text[..end].parse().ok().filter(|v: &f64| v.is_finite())
}

/// Size a section for `viewport`.
///
/// # Errors
///
/// [`LayoutError::InvalidDimensions`] when no candidate carries a usable
/// intrinsic size, [`LayoutError::InvalidMinHeight`] when the mobile height
/// cannot be resolved.
pub fn calculate_dimensions(
    section_id: &str,
    source: &SectionSource,
    viewport: Viewport,
    config: &LayoutConfig,
) -> Result<ImageDimensions, LayoutError> {
    let mode = config.view_mode(viewport);

    let candidate = match (mode, &source.desktop_source) {
        (ViewMode::Desktop, Some(desktop)) if desktop.size().is_some() => desktop,
        _ => &source.image,
    };
    let (source_width, source_height) = candidate
        .size()
        .ok_or_else(|| LayoutError::InvalidDimensions(section_id.to_owned()))?;
    let target = candidate
        .target_position()
        .unwrap_or(source_width / 2.0);

    let aspect_ratio = round6(source_width / source_height);

    let (width, height) = match mode {
        ViewMode::Desktop => {
            let min_height = min_height(
                source.desktop_min_height.as_deref(),
                config.default_desktop_min_height.as_deref(),
                viewport,
            )
            .filter(|h| *h > 0.0);
            match min_height {
                Some(min) => {
                    let width = (min * aspect_ratio).round();
                    if width < viewport.width {
                        (viewport.width, (viewport.width / aspect_ratio).round())
                    } else {
                        (width, min)
                    }
                }
                None => (viewport.width, (viewport.width / aspect_ratio).round()),
            }
        }
        ViewMode::Mobile => {
            let height = min_height(
                source.mobile_min_height.as_deref(),
                config.default_mobile_min_height.as_deref(),
                viewport,
            )
            .filter(|h| *h > 0.0)
            .ok_or_else(|| {
                LayoutError::InvalidMinHeight(
                    source
                        .mobile_min_height
                        .clone()
                        .or_else(|| config.default_mobile_min_height.clone())
                        .unwrap_or_default(),
                )
            })?;
            ((height * aspect_ratio).round(), height)
        }
    };

    Ok(ImageDimensions {
        width,
        height,
        scaled_target: target / source_width * width,
        container_width: viewport.width,
        needs_scroll: mode == ViewMode::Mobile || width > viewport.width,
        aspect_ratio,
        mode,
    })
}

/// Section override first (when non-empty and valid), then the default.
fn min_height(overridden: Option<&str>, default: Option<&str>, viewport: Viewport) -> Option<f64> {
    overridden
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| resolve(v, viewport, Axis::Height))
        .or_else(|| default.and_then(|v| resolve(v, viewport, Axis::Height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn phone() -> Viewport {
        Viewport::new(375.0, 700.0)
    }

    fn landscape() -> SectionSource {
        SectionSource::image(SourceAttrs::new("1920", "1080"))
    }

    #[test]
    fn leading_float_parse() {
        assert_eq!(parse_leading_float("1920"), Some(1920.0));
        assert_eq!(parse_leading_float(" 12.5px"), Some(12.5));
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("-"), None);
    }

    #[test]
    fn desktop_without_min_height_fills_width() {
        let dims = calculate_dimensions("s", &landscape(), desktop(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.mode, ViewMode::Desktop);
        assert_eq!(dims.aspect_ratio, 1.777778);
        assert_eq!(dims.width, 1280.0);
        assert_eq!(dims.height, 720.0);
        assert!(!dims.needs_scroll);
        assert_eq!(dims.scaled_target, 640.0);
    }

    #[test]
    fn desktop_min_height_widens_image() {
        let mut source = landscape();
        source.desktop_min_height = Some("900px".to_owned());
        let dims = calculate_dimensions("s", &source, desktop(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.height, 900.0);
        assert_eq!(dims.width, 1600.0);
        assert!(dims.needs_scroll);
        assert_eq!(dims.scroll_position(), 160.0);
    }

    #[test]
    fn desktop_min_height_never_narrower_than_viewport() {
        let mut source = landscape();
        source.desktop_min_height = Some("400px".to_owned());
        let dims = calculate_dimensions("s", &source, desktop(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.width, 1280.0);
        assert_eq!(dims.height, 720.0);
    }

    #[test]
    fn desktop_prefers_source_and_falls_back_to_img() {
        let mut source = SectionSource::image(SourceAttrs::new("800", "1000"));
        source.desktop_source = Some(SourceAttrs::new("2000", "1000").target("500"));
        let dims = calculate_dimensions("s", &source, desktop(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.aspect_ratio, 2.0);
        assert_eq!(dims.scaled_target, 320.0);

        source.desktop_source = Some(SourceAttrs::default());
        let dims = calculate_dimensions("s", &source, desktop(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.aspect_ratio, 0.8);
    }

    #[test]
    fn mobile_uses_img_and_min_height() {
        let mut source = landscape();
        source.desktop_source = Some(SourceAttrs::new("4000", "1000"));
        let dims = calculate_dimensions("s", &source, phone(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.mode, ViewMode::Mobile);
        assert_eq!(dims.height, 300.0);
        assert_eq!(dims.width, 533.0);
        assert!(dims.needs_scroll);

        source.mobile_min_height = Some("50vh".to_owned());
        let dims = calculate_dimensions("s", &source, phone(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.height, 350.0);
        assert_eq!(dims.width, 622.0);
    }

    #[test]
    fn focal_point_scales_with_width() {
        let source = SectionSource::image(SourceAttrs::new("1920", "1080").target("1440"));
        let dims = calculate_dimensions("s", &source, phone(), &LayoutConfig::default()).unwrap();
        assert_eq!(dims.scaled_target, 1440.0 / 1920.0 * 533.0);
        assert_eq!(dims.scroll_position(), 533.0 - 375.0);
    }

    #[test]
    fn invalid_sizes_are_errors() {
        for (w, h) in [("0", "100"), ("abc", "100"), ("100", ""), ("-5", "10")] {
            let source = SectionSource::image(SourceAttrs::new(w, h));
            assert_eq!(
                calculate_dimensions("hero", &source, desktop(), &LayoutConfig::default()),
                Err(LayoutError::InvalidDimensions("hero".to_owned()))
            );
        }
    }

    #[test]
    fn unusable_mobile_height_is_an_error() {
        let config = LayoutConfig {
            default_mobile_min_height: None,
            ..LayoutConfig::default()
        };
        let err = calculate_dimensions("s", &landscape(), phone(), &config).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidMinHeight(_)));
    }

    #[test]
    fn scroll_clamps_both_ends() {
        assert_eq!(scroll_position(10.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_position(1900.0, 2000.0, 1000.0), 1000.0);
        assert_eq!(scroll_position(1200.0, 2000.0, 1000.0), 700.0);
        assert_eq!(scroll_position(500.0, 800.0, 1000.0), 0.0);
    }

    #[test]
    fn styles_cover_every_part() {
        let dims = calculate_dimensions("s", &landscape(), desktop(), &LayoutConfig::default()).unwrap();
        let styles = dims.styles();
        assert_eq!(styles.container, [("height", "720px".to_owned())]);
        assert_eq!(styles.image_container[0], ("width", "1280px".to_owned()));
        assert!(styles.picture.contains(&("display", "block".to_owned())));
        assert!(styles.image.contains(&("object-fit", "cover".to_owned())));
    }
}
