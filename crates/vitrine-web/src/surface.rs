#![forbid(unsafe_code)]

//! Carousel surface over a shared [`Document`].

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_carousel::render::TRACK_CLASS;
use vitrine_carousel::{ArrowButton, ArrowDirection, SlideStyle, Surface, TrackStyle};

use crate::dom::{Document, DomError, NodeId};

/// Log a rejected document write and count it.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn record(failed: &mut usize, op: &'static str, result: Result<(), DomError>) {
    if let Err(err) = result {
        vitrine_core::warn!(op, error = %err, "carousel dom write dropped");
        *failed += 1;
    }
}

/// Renders a carousel into one container element of a document.
///
/// Slides are element handles; the track is a `div.slider-track` flex row
/// appended to the container, followed by the arrow buttons.
#[derive(Debug, Clone)]
pub struct DomSurface {
    doc: Rc<RefCell<Document>>,
    container: NodeId,
    track: Option<NodeId>,
    arrows: Vec<(ArrowDirection, NodeId)>,
    failed_writes: usize,
}

impl DomSurface {
    /// Surface over `container`.
    #[must_use]
    pub fn new(doc: Rc<RefCell<Document>>, container: NodeId) -> Self {
        Self {
            doc,
            container,
            track: None,
            arrows: Vec::new(),
            failed_writes: 0,
        }
    }

    /// Writes rejected by the document, e.g. for a stale [`NodeId`].
    #[must_use]
    pub fn failed_writes(&self) -> usize {
        self.failed_writes
    }

    /// The container element.
    #[must_use]
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The track element while mounted.
    #[must_use]
    pub fn track(&self) -> Option<NodeId> {
        self.track
    }

    /// Which arrow, if any, `target` is (or is inside of).
    #[must_use]
    pub fn arrow_at(&self, target: NodeId) -> Option<ArrowDirection> {
        let doc = self.doc.borrow();
        self.arrows
            .iter()
            .find(|(_, node)| doc.contains(*node, target))
            .map(|(direction, _)| *direction)
    }

    /// Whether `target` is the container or inside it.
    #[must_use]
    pub fn contains(&self, target: NodeId) -> bool {
        self.doc.borrow().contains(self.container, target)
    }
}

impl Surface for DomSurface {
    type Slide = NodeId;

    fn take_slides(&mut self) -> Vec<NodeId> {
        self.doc.borrow_mut().take_children(self.container)
    }

    fn clone_slide(&mut self, slide: &NodeId) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        doc.deep_clone(*slide).unwrap_or_else(|_| doc.create_element("div"))
    }

    fn mount_track(&mut self, slides: &[NodeId], style: &SlideStyle) {
        let mut doc = self.doc.borrow_mut();
        let failed = &mut self.failed_writes;
        let track = doc.create_element("div");
        record(failed, "set_attr", doc.set_attr(track, "class", TRACK_CLASS));
        record(failed, "set_style", doc.set_style(track, "display", "flex"));
        for slide in slides {
            for (property, value) in style.declarations() {
                record(failed, "set_style", doc.set_style(*slide, property, &value));
            }
            record(failed, "append_child", doc.append_child(track, *slide));
        }
        record(failed, "append_child", doc.append_child(self.container, track));
        self.track = Some(track);
    }

    fn paint_track(&mut self, style: &TrackStyle) {
        let Some(track) = self.track else {
            return;
        };
        let mut doc = self.doc.borrow_mut();
        let failed = &mut self.failed_writes;
        let transition = style.transition_css();
        record(failed, "set_style", doc.set_style(track, "transition", &transition));
        record(failed, "set_style", doc.set_style(track, "transform", &style.transform_css()));
    }

    fn mount_arrows(&mut self, arrows: &[ArrowButton; 2]) {
        let mut doc = self.doc.borrow_mut();
        let failed = &mut self.failed_writes;
        for arrow in arrows {
            let button = doc.create_element("button");
            record(failed, "set_attr", doc.set_attr(button, "type", "button"));
            record(failed, "set_attr", doc.set_attr(button, "class", &arrow.class));
            record(failed, "set_attr", doc.set_attr(button, "aria-label", arrow.label));
            record(failed, "append_child", doc.append_child(self.container, button));
            self.arrows.push((arrow.direction, button));
        }
    }

    fn restore(&mut self, originals: &[NodeId]) {
        let mut doc = self.doc.borrow_mut();
        let failed = &mut self.failed_writes;
        doc.take_children(self.container);
        for slide in originals {
            record(failed, "append_child", doc.append_child(self.container, *slide));
        }
        self.track = None;
        self.arrows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;
    use vitrine_carousel::{Carousel, CarouselOptions};

    fn setup() -> (Rc<RefCell<Document>>, NodeId) {
        let mut doc = Document::new();
        let container = doc
            .insert(
                doc.body(),
                &ElementSpec::new("div")
                    .id("slider")
                    .child(ElementSpec::new("figure").text("A"))
                    .child(ElementSpec::new("figure").text("B")),
            )
            .unwrap();
        (Rc::new(RefCell::new(doc)), container)
    }

    #[test]
    fn mount_builds_track_and_arrows() {
        let (doc, container) = setup();
        let surface = DomSurface::new(Rc::clone(&doc), container);
        let carousel = Carousel::mount(surface, CarouselOptions::default()).unwrap();

        let d = doc.borrow();
        let kids = d.children(container);
        assert_eq!(kids.len(), 3);
        let track = carousel.surface().track().unwrap();
        assert_eq!(kids[0], track);
        assert_eq!(d.style(track, "display"), Some("flex"));
        assert_eq!(d.style(track, "transform"), Some("translateX(calc(-75% * 1))"));
        assert_eq!(d.style(track, "transition"), Some("none"));

        let texts: Vec<_> = d
            .children(track)
            .iter()
            .map(|n| d.get(*n).unwrap().text.clone().unwrap())
            .collect();
        assert_eq!(texts, ["B", "A", "B", "A"]);
        assert_eq!(d.style(d.children(track)[0], "width"), Some("calc(75% - 16px)"));
        assert_eq!(d.attr(kids[1], "aria-label"), Some("上一張"));
        assert_eq!(carousel.surface().arrow_at(kids[2]), Some(ArrowDirection::Next));
    }

    #[test]
    fn restore_puts_originals_back() {
        let (doc, container) = setup();
        let before = doc.borrow().children(container).to_vec();
        let surface = DomSurface::new(Rc::clone(&doc), container);
        let carousel = Carousel::mount(surface, CarouselOptions::default()).unwrap();
        let surface = carousel.destroy();
        assert_eq!(doc.borrow().children(container), &before[..]);
        assert!(surface.track().is_none());
        assert_eq!(surface.arrow_at(before[0]), None);
        assert_eq!(surface.failed_writes(), 0);
    }

    #[test]
    fn stale_nodes_are_counted_not_ignored() {
        let (doc, container) = setup();
        let slides = doc.borrow().children(container).to_vec();

        let mut other = Document::new();
        let stale = (0..32).map(|_| other.create_element("div")).last().unwrap();
        assert!(doc.borrow().get(stale).is_none());

        let mut surface = DomSurface::new(Rc::clone(&doc), stale);
        surface.mount_track(&slides, &SlideStyle { slide_width: 75.0, gap: 16.0 });
        assert_eq!(surface.failed_writes(), 1);
        surface.restore(&slides);
        assert_eq!(surface.failed_writes(), 3);
    }
}
