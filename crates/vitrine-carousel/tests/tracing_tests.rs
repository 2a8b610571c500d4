#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "tracing"), allow(dead_code))]

//! Tracing integration tests.
//!
//! With spans enabled:
//!   cargo test -p vitrine-carousel --features tracing --test tracing_tests
//!
//! Zero-overhead check (no feature):
//!   cargo test -p vitrine-carousel --test tracing_tests -- zero_overhead

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use vitrine_carousel::{Carousel, CarouselOptions, MemorySurface};

/// Captures span names and event messages.
#[derive(Clone, Default)]
struct Capture {
    spans: Arc<Mutex<Vec<String>>>,
    messages: Arc<Mutex<Vec<String>>>,
    now_ms: Arc<Mutex<Vec<u64>>>,
}

struct NowVisitor(Option<u64>);

impl tracing::field::Visit for NowVisitor {
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        if field.name() == "now_ms" {
            self.0 = Some(value);
        }
    }

    fn record_debug(&mut self, _field: &tracing::field::Field, _value: &dyn std::fmt::Debug) {}
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
        let mut visitor = NowVisitor(None);
        attrs.record(&mut visitor);
        if let Some(now) = visitor.0 {
            self.now_ms.lock().unwrap().push(now);
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.messages.lock().unwrap().push(message);
        }
    }
}

fn run_scenario() {
    let options = CarouselOptions::default().with_autoplay(false);
    let mut carousel = Carousel::mount(MemorySurface::new(vec!["A", "B"]), options).unwrap();
    carousel.advance_to(Duration::from_millis(50));
    carousel.next();
    carousel.advance_to(Duration::from_millis(900));
    let _ = carousel.destroy();
}

#[test]
fn zero_overhead_without_subscriber() {
    run_scenario();
}

#[cfg(feature = "tracing")]
#[test]
fn lifecycle_is_traced() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, run_scenario);

    let spans = capture.spans.lock().unwrap().clone();
    assert!(spans.iter().any(|name| name == "carousel_advance"), "{spans:?}");

    let messages = capture.messages.lock().unwrap().clone();
    for expected in ["carousel mounted", "slide changed", "carousel destroyed"] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected:?} in {messages:?}"
        );
    }
}

#[cfg(feature = "tracing")]
#[test]
fn empty_mount_warns() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, || {
        let options = CarouselOptions::default();
        assert!(Carousel::mount(MemorySurface::<u8>::new(Vec::new()), options).is_err());
    });
    let messages = capture.messages.lock().unwrap().clone();
    assert!(messages.iter().any(|m| m.contains("no slides")), "{messages:?}");
}

#[cfg(feature = "tracing")]
#[test]
fn far_future_time_saturates_in_span() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let far = Duration::from_secs(u64::MAX / 100);
    tracing::subscriber::with_default(subscriber, || {
        let options = CarouselOptions::default().with_autoplay(false);
        let mut carousel = Carousel::mount(MemorySurface::new(vec!["A", "B"]), options).unwrap();
        carousel.advance_to(Duration::from_millis(50));
        carousel.advance_to(far);
        assert!(!carousel.is_transitioning());
    });
    let now_ms = capture.now_ms.lock().unwrap().clone();
    assert_eq!(now_ms, [50, u64::MAX]);
}
