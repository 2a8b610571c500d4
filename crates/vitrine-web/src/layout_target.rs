#![forbid(unsafe_code)]

//! [`LayoutTarget`] for the in-memory document.
//!
//! Expected section markup:
//!
//! ```text
//! section#hero.image-layout-section
//!   div.overflow-x-auto            [data-mobile-min-height] [data-desktop-min-height]
//!     div.image-container
//!       picture                    (optional)
//!         source[media="(min-width: 768px)"][data-width][data-height][data-target-position]
//!         img.centered-image[data-width][data-height][data-target-position]
//! ```

use vitrine_layout::{LayoutConfig, LayoutTarget, SectionSource, SectionStyles, SourceAttrs};

use crate::dom::{Document, NodeId};

/// Media-query fragment marking the desktop `<source>`.
const DESKTOP_SOURCE: &str = r#"source[media*="min-width"]"#;

struct SectionParts {
    container: NodeId,
    image_container: Option<NodeId>,
    picture: Option<NodeId>,
    image: Option<NodeId>,
}

impl Document {
    fn section_parts(&self, section_id: &str, config: &LayoutConfig) -> Option<SectionParts> {
        let section = self.query(&format!("#{section_id}")).ok()??;
        let container = self.query_within(section, &config.selectors.container).ok()??;
        let image_container = self
            .query_within(container, &config.selectors.image_container)
            .ok()
            .flatten();
        let picture = self
            .query_within(container, &config.selectors.picture)
            .ok()
            .flatten();
        let image = self.query_within(picture.unwrap_or(container), "img").ok().flatten();
        Some(SectionParts {
            container,
            image_container,
            picture,
            image,
        })
    }

    fn source_attrs(&self, node: NodeId, config: &LayoutConfig) -> SourceAttrs {
        let read = |name: &str| self.attr(node, name).map(str::to_owned);
        SourceAttrs {
            width: read(&config.attributes.width),
            height: read(&config.attributes.height),
            target_position: read(&config.attributes.target_position),
        }
    }

    fn apply_declarations(&mut self, node: Option<NodeId>, declarations: &[(&'static str, String)]) {
        let Some(node) = node else {
            return;
        };
        for (property, value) in declarations {
            let _ = self.set_style(node, property, value);
        }
    }
}

impl LayoutTarget for Document {
    fn section_ids(&self, config: &LayoutConfig) -> Vec<String> {
        self.query_all(&config.selectors.section)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|node| self.get(node)?.id.clone())
            .collect()
    }

    fn section_source(&self, section_id: &str, config: &LayoutConfig) -> Option<SectionSource> {
        let parts = self.section_parts(section_id, config)?;
        let image = parts.image?;
        let desktop_source = parts
            .picture
            .and_then(|picture| self.query_within(picture, DESKTOP_SOURCE).ok().flatten())
            .map(|source| self.source_attrs(source, config));
        let container_attr = |name: &str| self.attr(parts.container, name).map(str::to_owned);

        Some(SectionSource {
            desktop_source,
            image: self.source_attrs(image, config),
            mobile_min_height: container_attr(&config.attributes.mobile_min_height),
            desktop_min_height: container_attr(&config.attributes.desktop_min_height),
        })
    }

    fn apply_styles(&mut self, section_id: &str, styles: &SectionStyles, config: &LayoutConfig) {
        let Some(parts) = self.section_parts(section_id, config) else {
            return;
        };
        self.apply_declarations(Some(parts.container), &styles.container);
        self.apply_declarations(parts.image_container, &styles.image_container);
        self.apply_declarations(parts.picture, &styles.picture);
        self.apply_declarations(parts.image, &styles.image);
    }

    fn scroll_left(&self, section_id: &str, config: &LayoutConfig) -> f64 {
        self.section_parts(section_id, config)
            .and_then(|parts| self.get(parts.container))
            .map_or(0.0, |el| el.scroll_left)
    }

    fn set_scroll_left(&mut self, section_id: &str, value: f64, config: &LayoutConfig) {
        let container = self.section_parts(section_id, config).map(|parts| parts.container);
        if let Some(el) = container.and_then(|c| self.get_mut(c)) {
            el.scroll_left = value;
        }
    }
}
