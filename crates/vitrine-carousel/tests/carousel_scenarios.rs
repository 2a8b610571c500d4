#![forbid(unsafe_code)]

//! End-to-end carousel scenarios against the in-memory surface.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use vitrine_carousel::{
    ArrowDirection, Carousel, CarouselError, CarouselEvent, CarouselOptions, MemorySurface,
    MountError, Phase,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn manual() -> CarouselOptions {
    CarouselOptions::default().with_autoplay(false)
}

type Log = Rc<RefCell<Vec<(usize, &'static str)>>>;

fn mounted(slides: Vec<&'static str>, options: CarouselOptions) -> (Carousel<MemorySurface<&'static str>>, Log) {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let carousel = Carousel::mount(MemorySurface::new(slides), options)
        .unwrap()
        .on_slide_change(move |index, slide| sink.borrow_mut().push((index, *slide)));
    (carousel, log)
}

#[test]
fn mount_builds_framed_track_and_arrows() {
    let (carousel, _) = mounted(vec!["A", "B", "C"], manual());
    let surface = carousel.surface();

    assert_eq!(surface.track(), Some(&["C", "A", "B", "C", "A"][..]));
    assert!(surface.children().is_empty());
    assert_eq!(surface.clones_made(), 2);
    assert_eq!(surface.slide_style().unwrap().width_css(), "calc(75% - 16px)");

    let first = surface.last_paint().unwrap();
    assert_eq!(first.transform_css(), "translateX(calc(-75% * 1))");
    assert_eq!(first.transition_css(), "none");

    let arrows = surface.arrows().unwrap();
    assert_eq!(arrows[0].direction, ArrowDirection::Prev);
    assert_eq!(arrows[1].direction, ArrowDirection::Next);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn animation_enables_after_settle() {
    let (mut carousel, _) = mounted(vec!["A", "B"], manual());
    assert_eq!(carousel.snapshot().phase, Phase::Mounting);
    carousel.advance_to(ms(50));
    let snap = carousel.snapshot();
    assert_eq!(snap.phase, Phase::Idle);
    assert!(snap.animated);
    assert_eq!(
        carousel.surface().last_paint().unwrap().transition_css(),
        "transform 800ms ease-in-out"
    );
}

#[test]
fn forward_wrap_reports_each_slide_and_returns_home() {
    let (mut carousel, log) = mounted(vec!["A", "B", "C"], manual());
    carousel.advance_to(ms(50));

    for _ in 0..3 {
        carousel.next();
        carousel.advance_by(ms(1000));
    }

    assert_eq!(*log.borrow(), [(1, "B"), (2, "C"), (0, "A")]);
    assert_eq!(carousel.current_index(), 0);
    let snap = carousel.snapshot();
    assert_eq!(snap.position, 1);
    assert_eq!(snap.phase, Phase::Idle);
    assert!(snap.animated);
}

#[test]
fn snap_back_paints_clone_then_jump() {
    let (mut carousel, _) = mounted(vec!["A", "B"], manual());
    carousel.advance_to(ms(50));
    carousel.next();
    carousel.advance_to(ms(850));
    carousel.next();
    assert_eq!(carousel.snapshot().position, 3);

    carousel.advance_to(ms(1650));
    assert!(carousel.is_transitioning());
    carousel.next();
    assert_eq!(carousel.snapshot().position, 3, "moves are dropped during snap-back");

    carousel.advance_to(ms(1700));
    let jump = carousel.surface().last_paint().unwrap();
    assert_eq!(jump.position, 1);
    assert_eq!(jump.transition_css(), "none");

    carousel.advance_to(ms(1750));
    assert!(!carousel.is_transitioning());
    assert!(carousel.surface().last_paint().unwrap().transition.is_some());
}

#[test]
fn backward_wrap_lands_on_last_slide() {
    let (mut carousel, log) = mounted(vec!["A", "B", "C"], manual());
    carousel.advance_to(ms(50));
    carousel.handle_event(CarouselEvent::Arrow(ArrowDirection::Prev));
    carousel.advance_by(ms(1000));

    assert_eq!(*log.borrow(), [(2, "C")]);
    assert_eq!(carousel.snapshot().position, 3);
}

#[test]
fn requests_during_transition_are_dropped() {
    let (mut carousel, log) = mounted(vec!["A", "B", "C"], manual());
    carousel.advance_to(ms(50));
    carousel.next();
    carousel.next();
    carousel.prev();
    carousel.go_to(2).unwrap();
    carousel.advance_by(ms(1000));
    assert_eq!(*log.borrow(), [(1, "B")]);
}

#[test]
fn go_to_validates_real_index() {
    let (mut carousel, log) = mounted(vec!["A", "B", "C"], manual());
    carousel.advance_to(ms(50));
    assert_eq!(
        carousel.go_to(3),
        Err(CarouselError::IndexOutOfRange { index: 3, len: 3 })
    );
    carousel.go_to(2).unwrap();
    carousel.advance_by(ms(800));
    assert_eq!(*log.borrow(), [(2, "C")]);
}

#[test]
fn instant_moves_do_not_notify() {
    let (mut carousel, log) = mounted(vec!["A", "B", "C"], manual());
    carousel.advance_to(ms(50));
    carousel.go_to_slide(3, true).unwrap();
    carousel.advance_by(ms(100));
    assert!(log.borrow().is_empty());
    assert_eq!(carousel.current_index(), 2);
    assert!(carousel.snapshot().animated);
}

#[test]
fn autoplay_advances_and_pauses_on_hover() {
    let options = CarouselOptions::default().with_autoplay_speed(3000);
    let (mut carousel, log) = mounted(vec!["A", "B", "C"], options);
    assert!(carousel.is_autoplay_active());

    carousel.advance_to(ms(3800));
    assert_eq!(*log.borrow(), [(1, "B")]);

    carousel.handle_event(CarouselEvent::PointerEnter);
    assert!(!carousel.is_autoplay_active());
    carousel.advance_to(ms(20_000));
    assert_eq!(log.borrow().len(), 1);

    carousel.handle_event(CarouselEvent::PointerLeave);
    carousel.advance_to(ms(22_999));
    assert_eq!(log.borrow().len(), 1);
    carousel.advance_to(ms(23_800));
    assert_eq!(*log.borrow(), [(1, "B"), (2, "C")]);
}

#[test]
fn hover_is_inert_without_autoplay() {
    let (mut carousel, _) = mounted(vec!["A", "B"], manual());
    carousel.handle_event(CarouselEvent::PointerLeave);
    assert!(!carousel.is_autoplay_active());
}

#[test]
fn stop_and_start_are_idempotent() {
    let (mut carousel, _) = mounted(vec!["A", "B"], CarouselOptions::default());
    carousel.advance_to(ms(50));
    carousel.start_autoplay();
    carousel.start_autoplay();
    assert_eq!(carousel.pending_timers(), 1);
    carousel.stop_autoplay();
    carousel.stop_autoplay();
    assert_eq!(carousel.pending_timers(), 0);
}

#[test]
fn arrows_disabled_ignores_clicks() {
    let (mut carousel, _) = mounted(vec!["A", "B"], manual().with_arrows(false));
    assert!(carousel.surface().arrows().is_none());
    carousel.advance_to(ms(50));
    carousel.handle_event(CarouselEvent::Arrow(ArrowDirection::Next));
    assert!(!carousel.is_transitioning());
}

#[test]
fn single_slide_loops_onto_itself() {
    let (mut carousel, log) = mounted(vec!["only"], manual());
    assert_eq!(carousel.surface().track(), Some(&["only", "only", "only"][..]));
    carousel.advance_to(ms(50));
    carousel.next();
    carousel.advance_by(ms(1000));
    carousel.prev();
    carousel.advance_by(ms(1000));
    assert_eq!(*log.borrow(), [(0, "only"), (0, "only")]);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn empty_container_fails_to_mount() {
    let err = Carousel::mount(MemorySurface::<&str>::new(Vec::new()), manual()).unwrap_err();
    assert_eq!(err, MountError::NoSlides);
}

#[test]
fn destroy_mid_transition_restores_originals_and_cancels_timers() {
    let (mut carousel, log) = mounted(vec!["A", "B", "C"], CarouselOptions::default());
    carousel.advance_to(ms(50));
    carousel.next();
    assert!(carousel.pending_timers() >= 2);

    let surface = carousel.destroy();
    assert_eq!(surface.children(), ["A", "B", "C"]);
    assert!(surface.track().is_none());
    assert!(surface.arrows().is_none());
    assert!(log.borrow().is_empty());
}

#[test]
fn mount_at_offsets_every_timer() {
    let surface = MemorySurface::new(vec!["A", "B"]);
    let mut carousel = Carousel::mount_at(surface, manual(), ms(10_000)).unwrap();
    carousel.advance_to(ms(10_049));
    assert_eq!(carousel.snapshot().phase, Phase::Mounting);
    carousel.advance_to(ms(10_050));
    assert_eq!(carousel.snapshot().phase, Phase::Idle);
}
