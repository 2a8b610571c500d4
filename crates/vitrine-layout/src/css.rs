#![forbid(unsafe_code)]

//! CSS length parsing and resolution to pixels.

use vitrine_core::event::Viewport;

/// Root font size used for `rem` and `em`.
pub const ROOT_FONT_SIZE: f64 = 16.0;

/// Which viewport axis a length is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal; `%` is relative to the viewport width.
    Width,
    /// Vertical; `%` is relative to the viewport height.
    Height,
}

/// A parsed CSS length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssLength {
    /// Absolute pixels. Unitless numbers parse as pixels too.
    Px(f64),
    /// Percent of the viewport width.
    Vw(f64),
    /// Percent of the viewport height.
    Vh(f64),
    /// Percent of the viewport along the resolution axis.
    Percent(f64),
    /// Multiples of the root font size.
    Rem(f64),
    /// Multiples of the font size (the root size here).
    Em(f64),
}

impl CssLength {
    /// Parse `300px`, `60vh`, `100vw`, `50%`, `2rem`, `1.5em` or `300`.
    ///
    /// Returns `None` for empty input, unknown units, negative or
    /// non-finite values.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().to_ascii_lowercase();
        if text.is_empty() {
            return None;
        }
        const UNITS: [(&str, fn(f64) -> CssLength); 6] = [
            ("px", CssLength::Px),
            ("vw", CssLength::Vw),
            ("vh", CssLength::Vh),
            ("rem", CssLength::Rem),
            ("em", CssLength::Em),
            ("%", CssLength::Percent),
        ];
        let (number, make): (&str, fn(f64) -> CssLength) = UNITS
            .iter()
            .find_map(|(unit, make)| text.strip_suffix(*unit).map(|n| (n, *make)))
            .unwrap_or((text.as_str(), CssLength::Px as fn(f64) -> CssLength));

        let value: f64 = number.trim_end().parse().ok()?;
        (value.is_finite() && value >= 0.0).then(|| make(value))
    }

    /// Resolve to pixels, rounded to six decimal places.
    #[must_use]
    pub fn to_px(self, viewport: Viewport, axis: Axis) -> f64 {
        let px = match self {
            Self::Px(v) => v,
            Self::Vw(v) => v / 100.0 * viewport.width,
            Self::Vh(v) => v / 100.0 * viewport.height,
            Self::Percent(v) => {
                let base = match axis {
                    Axis::Width => viewport.width,
                    Axis::Height => viewport.height,
                };
                v / 100.0 * base
            }
            Self::Rem(v) | Self::Em(v) => v * ROOT_FONT_SIZE,
        };
        round6(px)
    }
}

/// Parse and resolve in one step.
#[must_use]
pub fn resolve(text: &str, viewport: Viewport, axis: Axis) -> Option<f64> {
    CssLength::parse(text).map(|len| len.to_px(viewport, axis))
}

/// Round to six decimal places.
#[must_use]
pub fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
