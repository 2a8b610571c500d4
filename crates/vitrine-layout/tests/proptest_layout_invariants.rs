#![forbid(unsafe_code)]

//! Property-based invariant tests for layout math.
//!
//! 1. The scroll position always lies in `[0, max(0, width - viewport)]`.
//! 2. Desktop images are never narrower than the viewport.
//! 3. Mobile images always use the resolved mobile height and need scrolling.
//! 4. The scaled focal point keeps its relative position.

use proptest::prelude::*;
use vitrine_core::event::Viewport;
use vitrine_layout::{LayoutConfig, SectionSource, SourceAttrs, ViewMode, calculate_dimensions, scroll_position};

fn source(w: u32, h: u32, target: Option<u32>) -> SectionSource {
    let mut attrs = SourceAttrs::new(&w.to_string(), &h.to_string());
    if let Some(t) = target {
        attrs = attrs.target(&t.to_string());
    }
    SectionSource::image(attrs)
}

proptest! {
    #[test]
    fn scroll_is_clamped(target in -5_000.0f64..5_000.0, width in 0.0f64..5_000.0, container in 1.0f64..3_000.0) {
        let pos = scroll_position(target, width, container);
        prop_assert!(pos >= 0.0);
        prop_assert!(pos <= (width - container).max(0.0));
    }
}

proptest! {
    #[test]
    fn desktop_covers_viewport(
        w in 100u32..6_000,
        h in 100u32..6_000,
        vw in 768u32..3_000,
        min in prop::option::of(100u32..2_000),
    ) {
        let mut src = source(w, h, None);
        src.desktop_min_height = min.map(|m| format!("{m}px"));
        let viewport = Viewport::new(f64::from(vw), 900.0);
        let dims = calculate_dimensions("s", &src, viewport, &LayoutConfig::default()).unwrap();
        prop_assert_eq!(dims.mode, ViewMode::Desktop);
        prop_assert!(dims.width >= viewport.width);
        prop_assert_eq!(dims.needs_scroll, dims.width > viewport.width);
    }
}

proptest! {
    #[test]
    fn mobile_is_height_driven(w in 100u32..6_000, h in 100u32..6_000, vw in 200u32..768) {
        let viewport = Viewport::new(f64::from(vw), 700.0);
        let dims = calculate_dimensions("s", &source(w, h, None), viewport, &LayoutConfig::default()).unwrap();
        prop_assert_eq!(dims.mode, ViewMode::Mobile);
        prop_assert_eq!(dims.height, 300.0);
        prop_assert!(dims.needs_scroll);
    }
}

proptest! {
    #[test]
    fn focal_point_keeps_relative_position(w in 100u32..6_000, h in 100u32..6_000, frac in 0.0f64..=1.0) {
        let target = (f64::from(w) * frac).floor() as u32;
        let dims = calculate_dimensions(
            "s",
            &source(w, h, Some(target)),
            Viewport::new(1280.0, 800.0),
            &LayoutConfig::default(),
        )
        .unwrap();
        let expected = f64::from(target) / f64::from(w);
        prop_assert!((dims.scaled_target / dims.width - expected).abs() < 1e-9);
    }
}
