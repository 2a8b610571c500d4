#![forbid(unsafe_code)]

//! Responsive image layout for full-bleed picture sections.
//!
//! Each section holds a scroll container with one image (optionally inside a
//! `<picture>` with a desktop `<source>`). The image is sized to the viewport
//! and the container scrolled so the image's focal point sits in the middle.
//!
//! - [`css`]: CSS length parsing.
//! - [`config`]: [`LayoutConfig`] and the mobile/desktop split.
//! - [`dimensions`]: pure sizing and scroll math.
//! - [`manager`]: [`LayoutManager`], lazy application, resize debounce and
//!   scroll animation against a [`LayoutTarget`].

pub mod config;
pub mod css;
pub mod dimensions;
pub mod manager;

pub use config::{AttributeNames, LayoutConfig, Selectors, ViewMode};
pub use css::{Axis, CssLength};
pub use dimensions::{
    ImageDimensions, LayoutError, SectionSource, SectionStyles, SourceAttrs, calculate_dimensions,
    scroll_position,
};
pub use manager::{LayoutManager, LayoutTarget, MemorySection, MemoryTarget};
