#![forbid(unsafe_code)]

//! Layout manager: applies section layouts and keeps them current.
//!
//! The manager never owns the document. Every operation that reads or writes
//! elements takes a [`LayoutTarget`], which a browser host implements over
//! its DOM and tests implement with [`MemoryTarget`].
//!
//! # Lifecycle
//!
//! 1. [`LayoutManager::initialize_all`]: eager mode applies every section
//!    now; lazy mode starts observing them.
//! 2. [`LayoutManager::on_intersect`]: an observed section that becomes
//!    visible is applied once and no longer observed.
//! 3. [`LayoutManager::on_resize`]: restarts the debounce; when it expires
//!    during [`LayoutManager::advance_to`] the cache is cleared and every
//!    section re-applied.
//! 4. [`LayoutManager::destroy`]: cancels the debounce, stops scroll
//!    animations and forgets every section.

use core::time::Duration;
use std::collections::HashMap;

use vitrine_core::easing::{Easing, Tween};
use vitrine_core::event::Viewport;
use vitrine_core::scheduler::{Scheduler, TimerId};

use crate::config::LayoutConfig;
use crate::dimensions::{ImageDimensions, LayoutError, SectionSource, SectionStyles, calculate_dimensions};

/// Element access the manager needs.
pub trait LayoutTarget {
    /// Ids of every element matching the section selector, in document order.
    fn section_ids(&self, config: &LayoutConfig) -> Vec<String>;

    /// Read a section's image attributes, or `None` if the section or its
    /// image is missing.
    fn section_source(&self, section_id: &str, config: &LayoutConfig) -> Option<SectionSource>;

    /// Write computed inline styles into the section.
    fn apply_styles(&mut self, section_id: &str, styles: &SectionStyles, config: &LayoutConfig);

    /// Current horizontal scroll offset of the section's container.
    fn scroll_left(&self, section_id: &str, config: &LayoutConfig) -> f64;

    /// Set the horizontal scroll offset of the section's container.
    fn set_scroll_left(&mut self, section_id: &str, value: f64, config: &LayoutConfig);
}

#[derive(Debug, Clone, PartialEq)]
struct ScrollAnimation {
    section: String,
    tween: Tween,
    last: Duration,
}

/// Responsive image layout manager.
#[derive(Debug)]
pub struct LayoutManager {
    config: LayoutConfig,
    viewport: Viewport,
    scheduler: Scheduler<()>,
    resize_timer: Option<TimerId>,
    observed: Vec<String>,
    cache: HashMap<String, ImageDimensions>,
    scrolls: Vec<ScrollAnimation>,
    destroyed: bool,
}

impl LayoutManager {
    /// Create a manager for `viewport` with time starting at zero.
    #[must_use]
    pub fn new(config: LayoutConfig, viewport: Viewport) -> Self {
        Self::starting_at(config, viewport, Duration::ZERO)
    }

    /// Create a manager at host time `now`.
    #[must_use]
    pub fn starting_at(config: LayoutConfig, viewport: Viewport, now: Duration) -> Self {
        Self {
            config,
            viewport,
            scheduler: Scheduler::starting_at(now),
            resize_timer: None,
            observed: Vec::new(),
            cache: HashMap::new(),
            scrolls: Vec::new(),
            destroyed: false,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Last known viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Sections still waiting to become visible.
    #[must_use]
    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    /// Whether `section_id` is waiting to become visible.
    #[must_use]
    pub fn is_observing(&self, section_id: &str) -> bool {
        self.observed.iter().any(|id| id == section_id)
    }

    /// Dimensions last applied to `section_id`.
    #[must_use]
    pub fn cached(&self, section_id: &str) -> Option<&ImageDimensions> {
        self.cache.get(section_id)
    }

    /// Whether a resize re-layout is pending.
    #[must_use]
    pub fn is_resize_pending(&self) -> bool {
        self.resize_timer.is_some()
    }

    /// Whether `section_id` is animating its scroll.
    #[must_use]
    pub fn is_scrolling(&self, section_id: &str) -> bool {
        self.scrolls.iter().any(|anim| anim.section == section_id)
    }

    /// Apply every section now (eager) or start observing them (lazy).
    pub fn initialize_all(&mut self, target: &mut impl LayoutTarget) {
        if self.destroyed {
            return;
        }
        let ids = target.section_ids(&self.config);
        vitrine_core::debug!(sections = ids.len(), lazy = self.config.lazy_load, "layout init");
        if self.config.lazy_load {
            for id in ids {
                if !self.is_observing(&id) {
                    self.observed.push(id);
                }
            }
        } else {
            for id in ids {
                let _ = self.apply_layout(target, &id);
            }
        }
    }

    /// Visibility change for an observed section.
    pub fn on_intersect(&mut self, target: &mut impl LayoutTarget, section_id: &str, visible: bool) {
        if !visible || !self.is_observing(section_id) {
            return;
        }
        self.observed.retain(|id| id != section_id);
        let _ = self.apply_layout(target, section_id);
    }

    /// Record a new viewport and restart the debounce.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.destroyed {
            return;
        }
        self.viewport = viewport;
        if let Some(id) = self.resize_timer.take() {
            self.scheduler.cancel(id);
        }
        self.resize_timer = Some(self.scheduler.schedule_once(self.config.resize_debounce(), ()));
    }

    /// Fire the debounce if due and step scroll animations to `now`.
    pub fn advance_to(&mut self, target: &mut impl LayoutTarget, now: Duration) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            if self.resize_timer != Some(fired.id) {
                continue;
            }
            self.resize_timer = None;
            self.cache.clear();
            let ids = target.section_ids(&self.config);
            vitrine_core::debug!(sections = ids.len(), "layout resize");
            for id in ids {
                let _ = self.apply_layout(target, &id);
            }
        }
        self.scheduler.advance_to(now);

        for anim in &mut self.scrolls {
            anim.tween.tick(now.saturating_sub(anim.last));
            anim.last = now.max(anim.last);
            target.set_scroll_left(&anim.section, anim.tween.value(), &self.config);
        }
        self.scrolls.retain(|anim| !anim.tween.is_complete());
    }

    /// Size one section, write its styles and start its scroll animation.
    ///
    /// Returns the applied dimensions.
    ///
    /// # Errors
    ///
    /// [`LayoutError::SectionNotFound`] when the target has no such section,
    /// or any sizing error from [`calculate_dimensions`]. Errors are logged
    /// and the section is left untouched.
    pub fn apply_layout(
        &mut self,
        target: &mut impl LayoutTarget,
        section_id: &str,
    ) -> Result<ImageDimensions, LayoutError> {
        let Some(source) = target.section_source(section_id, &self.config) else {
            vitrine_core::warn!(section = section_id, "layout section not found");
            return Err(LayoutError::SectionNotFound(section_id.to_owned()));
        };
        let dims = calculate_dimensions(section_id, &source, self.viewport, &self.config)
            .inspect_err(|err| {
                vitrine_core::warn!(section = section_id, error = %err, "layout skipped");
            })?;

        target.apply_styles(section_id, &dims.styles(), &self.config);
        self.cache.insert(section_id.to_owned(), dims);

        self.scrolls.retain(|anim| anim.section != section_id);
        if dims.needs_scroll {
            let from = target.scroll_left(section_id, &self.config);
            let tween = Tween::new(from, dims.scroll_position(), self.config.scroll_animation())
                .easing(Easing::Swing);
            self.scrolls.push(ScrollAnimation {
                section: section_id.to_owned(),
                tween,
                last: self.scheduler.now(),
            });
        }
        vitrine_core::trace!(
            section = section_id,
            width = dims.width,
            height = dims.height,
            mode = %dims.mode,
            "layout applied"
        );
        Ok(dims)
    }

    /// Stop observing, cancel the debounce and animations, forget the cache.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.scheduler.clear();
        self.resize_timer = None;
        self.observed.clear();
        self.scrolls.clear();
        self.cache.clear();
    }
}

/// One section held by [`MemoryTarget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySection {
    /// Attributes reported to the manager; `None` simulates a missing image.
    pub source: Option<SectionSource>,
    /// Last styles written.
    pub styles: Option<SectionStyles>,
    /// Container scroll offset.
    pub scroll_left: f64,
    /// Number of times styles were written.
    pub applied: usize,
}

/// In-memory [`LayoutTarget`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    sections: Vec<(String, MemorySection)>,
}

impl MemoryTarget {
    /// Empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section (builder).
    #[must_use]
    pub fn with_section(mut self, id: &str, source: SectionSource) -> Self {
        self.sections.push((
            id.to_owned(),
            MemorySection {
                source: Some(source),
                ..MemorySection::default()
            },
        ));
        self
    }

    /// Section state by id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&MemorySection> {
        self.sections.iter().find(|(key, _)| key == id).map(|(_, s)| s)
    }

    fn section_mut(&mut self, id: &str) -> Option<&mut MemorySection> {
        self.sections.iter_mut().find(|(key, _)| key == id).map(|(_, s)| s)
    }
}

impl LayoutTarget for MemoryTarget {
    fn section_ids(&self, _config: &LayoutConfig) -> Vec<String> {
        self.sections.iter().map(|(id, _)| id.clone()).collect()
    }

    fn section_source(&self, section_id: &str, _config: &LayoutConfig) -> Option<SectionSource> {
        self.section(section_id).and_then(|s| s.source.clone())
    }

    fn apply_styles(&mut self, section_id: &str, styles: &SectionStyles, _config: &LayoutConfig) {
        if let Some(section) = self.section_mut(section_id) {
            section.styles = Some(styles.clone());
            section.applied += 1;
        }
    }

    fn scroll_left(&self, section_id: &str, _config: &LayoutConfig) -> f64 {
        self.section(section_id).map_or(0.0, |s| s.scroll_left)
    }

    fn set_scroll_left(&mut self, section_id: &str, value: f64, _config: &LayoutConfig) {
        if let Some(section) = self.section_mut(section_id) {
            section.scroll_left = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::SourceAttrs;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn target() -> MemoryTarget {
        MemoryTarget::new()
            .with_section("hero", SectionSource::image(SourceAttrs::new("1920", "1080")))
            .with_section("map", SectionSource::image(SourceAttrs::new("3000", "1000").target("2700")))
    }

    #[test]
    fn eager_applies_everything() {
        let mut t = target();
        let mut m = LayoutManager::new(LayoutConfig::default().eager(), Viewport::new(1280.0, 800.0));
        m.initialize_all(&mut t);
        assert_eq!(t.section("hero").unwrap().applied, 1);
        assert_eq!(t.section("map").unwrap().applied, 1);
        assert!(m.observed().is_empty());
        assert_eq!(m.cached("hero").unwrap().height, 720.0);
    }

    #[test]
    fn lazy_applies_on_first_visibility_only() {
        let mut t = target();
        let mut m = LayoutManager::new(LayoutConfig::default(), Viewport::new(1280.0, 800.0));
        m.initialize_all(&mut t);
        assert_eq!(m.observed(), ["hero", "map"]);
        assert_eq!(t.section("hero").unwrap().applied, 0);

        m.on_intersect(&mut t, "hero", false);
        assert_eq!(t.section("hero").unwrap().applied, 0);
        m.on_intersect(&mut t, "hero", true);
        m.on_intersect(&mut t, "hero", true);
        assert_eq!(t.section("hero").unwrap().applied, 1);
        assert!(!m.is_observing("hero"));
        assert!(m.is_observing("map"));
    }

    #[test]
    fn resize_is_debounced() {
        let mut t = target();
        let mut m = LayoutManager::new(LayoutConfig::default().eager(), Viewport::new(1280.0, 800.0));
        m.initialize_all(&mut t);

        m.on_resize(Viewport::new(1000.0, 800.0));
        m.advance_to(&mut t, ms(100));
        m.on_resize(Viewport::new(900.0, 800.0));
        m.advance_to(&mut t, ms(249));
        assert!(m.is_resize_pending());
        assert_eq!(t.section("hero").unwrap().applied, 1);

        m.advance_to(&mut t, ms(250));
        assert!(!m.is_resize_pending());
        assert_eq!(t.section("hero").unwrap().applied, 2);
        assert_eq!(m.cached("hero").unwrap().width, 900.0);
    }

    #[test]
    fn scroll_animates_to_clamped_target() {
        let mut t = target();
        let mut m = LayoutManager::new(LayoutConfig::default().eager(), Viewport::new(375.0, 700.0));
        m.initialize_all(&mut t);
        assert!(m.is_scrolling("map"));

        m.advance_to(&mut t, ms(150));
        let mid = t.section("map").unwrap().scroll_left;
        assert!(mid > 0.0 && mid < 525.0, "{mid}");

        m.advance_to(&mut t, ms(300));
        assert!(!m.is_scrolling("map"));
        let dims = *m.cached("map").unwrap();
        assert_eq!(dims.width, 900.0);
        assert_eq!(t.section("map").unwrap().scroll_left, dims.scroll_position());
    }

    #[test]
    fn missing_section_is_an_error() {
        let mut t = target();
        let mut m = LayoutManager::new(LayoutConfig::default(), Viewport::default());
        assert_eq!(
            m.apply_layout(&mut t, "nope"),
            Err(LayoutError::SectionNotFound("nope".to_owned()))
        );
    }

    #[test]
    fn destroy_cancels_pending_work() {
        let mut t = target();
        let mut m = LayoutManager::new(LayoutConfig::default(), Viewport::new(375.0, 700.0));
        m.initialize_all(&mut t);
        m.on_intersect(&mut t, "map", true);
        m.on_resize(Viewport::new(400.0, 700.0));
        m.destroy();

        m.advance_to(&mut t, ms(1_000));
        assert!(m.observed().is_empty());
        assert!(!m.is_resize_pending());
        assert_eq!(t.section("map").unwrap().applied, 1);
        assert_eq!(t.section("map").unwrap().scroll_left, 0.0);
        m.on_resize(Viewport::new(500.0, 700.0));
        assert!(!m.is_resize_pending());
    }
}
