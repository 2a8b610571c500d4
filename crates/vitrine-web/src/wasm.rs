#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use vitrine_carousel::render::TRACK_CLASS;
use vitrine_carousel::{
    ArrowButton, ArrowDirection, Carousel, CarouselEvent, CarouselOptions, SlideChangeFn,
    SlideStyle, Surface, TrackStyle,
};
use vitrine_core::clock::{HostClock, WallClock, millis_f64};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

type EventQueue = Rc<RefCell<VecDeque<CarouselEvent>>>;

fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Slide-change key of the options object. `JSON.stringify` drops functions,
/// so it is read separately.
const ON_SLIDE_CHANGE: &str = "onSlideChange";

fn slide_change_listener(callback: js_sys::Function) -> SlideChangeFn<Element> {
    Box::new(move |index, slide: &Element| {
        let _ = callback.call2(&JsValue::NULL, &JsValue::from(index), slide.as_ref());
    })
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

/// Carousel surface over live DOM elements.
struct WebSysSurface {
    document: web_sys::Document,
    container: Element,
    track: Option<Element>,
    arrows: Vec<(ArrowDirection, Element)>,
}

impl Surface for WebSysSurface {
    type Slide = Element;

    fn take_slides(&mut self) -> Vec<Element> {
        let children = self.container.children();
        let slides: Vec<Element> = (0..children.length())
            .filter_map(|i| children.item(i))
            .collect();
        for slide in &slides {
            slide.remove();
        }
        slides
    }

    fn clone_slide(&mut self, slide: &Element) -> Element {
        slide
            .clone_node_with_deep(true)
            .ok()
            .and_then(|node| node.dyn_into::<Element>().ok())
            .unwrap_or_else(|| slide.clone())
    }

    fn mount_track(&mut self, slides: &[Element], style: &SlideStyle) {
        let Ok(track) = self.document.create_element("div") else {
            console_warn("carousel: failed to create track element");
            return;
        };
        track.set_class_name(TRACK_CLASS);
        set_style(&track, "display", "flex");
        for slide in slides {
            for (property, value) in style.declarations() {
                set_style(slide, property, &value);
            }
            let _ = track.append_child(slide);
        }
        let _ = self.container.append_child(&track);
        self.track = Some(track);
    }

    fn paint_track(&mut self, style: &TrackStyle) {
        if let Some(track) = &self.track {
            set_style(track, "transition", &style.transition_css());
            set_style(track, "transform", &style.transform_css());
        }
    }

    fn mount_arrows(&mut self, arrows: &[ArrowButton; 2]) {
        for arrow in arrows {
            let Ok(button) = self.document.create_element("button") else {
                continue;
            };
            let _ = button.set_attribute("type", "button");
            button.set_class_name(&arrow.class);
            let _ = button.set_attribute("aria-label", arrow.label);
            let _ = self.container.append_child(&button);
            self.arrows.push((arrow.direction, button));
        }
    }

    fn restore(&mut self, originals: &[Element]) {
        self.container.set_inner_html("");
        for slide in originals {
            let _ = self.container.append_child(slide);
        }
        self.track = None;
        self.arrows.clear();
    }
}

struct Listener {
    target: Element,
    kind: &'static str,
    closure: Closure<dyn FnMut()>,
}

impl Listener {
    fn attach(target: &Element, kind: &'static str, queue: &EventQueue, event: CarouselEvent) -> Self {
        let queue = Rc::clone(queue);
        let closure = Closure::<dyn FnMut()>::new(move || queue.borrow_mut().push_back(event));
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Infinite-loop slider bound to a DOM container.
///
/// DOM listeners only queue input; it is applied, together with any due
/// timers, on [`CustomSlider::tick`]. Call `tick` from
/// `requestAnimationFrame` or a short interval.
///
/// When the container is missing or empty the slider is inert: a console
/// warning is logged, the document is left untouched and every method is a
/// no-op.
#[wasm_bindgen]
pub struct CustomSlider {
    carousel: Option<Carousel<WebSysSurface>>,
    clock: WallClock,
    queue: EventQueue,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl CustomSlider {
    /// Mount on the first element matching `selector`.
    ///
    /// `options` is a plain object with the camelCase option keys; missing
    /// keys take their defaults. A function under `onSlideChange` is
    /// installed as the slide-change callback.
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str, options: JsValue) -> Result<CustomSlider, JsValue> {
        let (options, callback) = if options.is_undefined() || options.is_null() {
            (CarouselOptions::default(), None)
        } else {
            let callback = js_sys::Reflect::get(&options, &JsValue::from_str(ON_SLIDE_CHANGE))?
                .dyn_into::<js_sys::Function>()
                .ok();
            let text: String = js_sys::JSON::stringify(&options)?.into();
            let options = CarouselOptions::from_json(&text)
                .map_err(|err| JsValue::from_str(&err.to_string()))?;
            (options, callback)
        };

        let clock = WallClock::start();
        let mut slider = Self {
            carousel: None,
            clock,
            queue: Rc::new(RefCell::new(VecDeque::new())),
            listeners: Vec::new(),
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let Some(container) = document.query_selector(selector)? else {
            console_warn(&format!("carousel container not found: {selector}"));
            return Ok(slider);
        };
        if container.child_element_count() == 0 {
            console_warn("carousel container has no slides");
            return Ok(slider);
        }

        let surface = WebSysSurface {
            document,
            container: container.clone(),
            track: None,
            arrows: Vec::new(),
        };
        let mut carousel = Carousel::mount_at(surface, options, clock.now_mono())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        if let Some(callback) = callback {
            carousel.set_on_slide_change(Some(slide_change_listener(callback)));
        }

        slider.listeners.push(Listener::attach(
            &container,
            "mouseenter",
            &slider.queue,
            CarouselEvent::PointerEnter,
        ));
        slider.listeners.push(Listener::attach(
            &container,
            "mouseleave",
            &slider.queue,
            CarouselEvent::PointerLeave,
        ));
        for (direction, button) in &carousel.surface().arrows {
            slider.listeners.push(Listener::attach(
                button,
                "click",
                &slider.queue,
                CarouselEvent::Arrow(*direction),
            ));
        }
        slider.carousel = Some(carousel);
        Ok(slider)
    }

    /// Whether the slider mounted.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.carousel.is_some()
    }

    /// Fire due timers at the current wall-clock time, then apply queued input.
    pub fn tick(&mut self) {
        let now = self.clock.now_mono();
        self.run(|carousel| carousel.advance_to(now));
    }

    /// Advance slider time by `ms` milliseconds without reading the clock.
    #[wasm_bindgen(js_name = advanceBy)]
    pub fn advance_by(&mut self, ms: f64) {
        let dt = millis_f64(ms);
        self.run(|carousel| carousel.advance_by(dt));
    }

    pub fn next(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.next();
        }
    }

    pub fn prev(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.prev();
        }
    }

    /// Move to the real slide `index`.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: usize) -> Result<(), JsValue> {
        match self.carousel.as_mut() {
            Some(carousel) => carousel
                .go_to(index)
                .map_err(|err| JsValue::from_str(&err.to_string())),
            None => Ok(()),
        }
    }

    #[wasm_bindgen(js_name = startAutoplay)]
    pub fn start_autoplay(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.start_autoplay();
        }
    }

    #[wasm_bindgen(js_name = stopAutoplay)]
    pub fn stop_autoplay(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.stop_autoplay();
        }
    }

    #[wasm_bindgen(js_name = getCurrentIndex)]
    pub fn current_index(&self) -> usize {
        self.carousel.as_ref().map_or(0, Carousel::current_index)
    }

    /// Register `callback(index, slideElement)`, replacing any earlier one.
    #[wasm_bindgen(js_name = onSlideChange)]
    pub fn on_slide_change(&mut self, callback: js_sys::Function) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.set_on_slide_change(Some(slide_change_listener(callback)));
        }
    }

    /// Remove listeners, cancel timers and restore the original slides.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.queue.borrow_mut().clear();
        if let Some(carousel) = self.carousel.take() {
            carousel.destroy();
        }
    }
}

impl CustomSlider {
    fn run(&mut self, advance: impl FnOnce(&mut Carousel<WebSysSurface>)) {
        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        advance(carousel);
        let pending: Vec<CarouselEvent> = self.queue.borrow_mut().drain(..).collect();
        for event in pending {
            carousel.handle_event(event);
        }
    }
}
