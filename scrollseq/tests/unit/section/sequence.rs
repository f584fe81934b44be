use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::error::ScrollSeqError;

const DT: f64 = 1.0 / 60.0;

fn color(i: usize) -> [u8; 4] {
    [i as u8, 255 - i as u8, 7, 255]
}

fn frame(i: usize) -> Frame {
    let bytes: Vec<u8> = std::iter::repeat_n(color(i), 12).flatten().collect();
    Frame::from_premul_rgba8(4, 3, &bytes).unwrap()
}

fn viewport() -> Viewport {
    Viewport::new(8, 6).unwrap()
}

/// 200vh container at the top of the page.
fn container(vp: Viewport) -> ContainerGeometry {
    ContainerGeometry::new(0.0, 2.0 * vp.height_f64()).unwrap()
}

fn loaded(n: usize) -> ScrollSequence {
    let frames = FrameSequence::from_frames((0..n).map(frame));
    ScrollSequence::new(SequenceConfig::new(frames), container(viewport()), viewport()).unwrap()
}

fn settle(seq: &mut ScrollSequence) {
    for _ in 0..600 {
        seq.tick(DT);
        if seq.progress().is_settled() {
            return;
        }
    }
    panic!("sequence did not settle");
}

fn center_pixel(seq: &ScrollSequence) -> Option<[u8; 4]> {
    seq.surface().snapshot().pixel(4, 3)
}

#[test]
fn half_scroll_settles_on_middle_frame() {
    let mut seq = loaded(54);
    assert_eq!(seq.progress().get(), 0.0);

    seq.on_scroll(3.0);
    assert_eq!(seq.tracker().progress(), 0.5);
    assert!(!seq.progress().is_settled());

    settle(&mut seq);
    assert_eq!(seq.progress().get(), 0.5);
    assert_eq!(seq.current_index(), Some(27));
    assert_eq!(seq.drawn_index(), Some(27));
    assert_eq!(center_pixel(&seq), Some(color(27)));
}

#[test]
fn smoothed_progress_lags_raw_progress() {
    let mut seq = loaded(10);
    seq.on_scroll(6.0);
    seq.tick(DT);
    let p = seq.progress().get();
    assert!(p > 0.0 && p < 1.0);
    assert!(seq.drawn_index().unwrap() < 9);
}

#[test]
fn first_frame_is_painted_eagerly_when_it_loads() {
    let mut seq = ScrollSequence::new(
        SequenceConfig::new(FrameSequence::pending(3)),
        container(viewport()),
        viewport(),
    )
    .unwrap();
    assert!(!seq.redraw_current());
    assert_eq!(seq.surface().writes(), 0);

    seq.on_frame_loaded(2, Arc::new(frame(2))).unwrap();
    assert_eq!(seq.drawn_index(), None);

    seq.on_frame_loaded(0, Arc::new(frame(0))).unwrap();
    assert_eq!(seq.drawn_index(), Some(0));
    assert_eq!(center_pixel(&seq), Some(color(0)));

    assert!(seq.on_frame_loaded(5, Arc::new(frame(5))).is_err());
}

#[test]
fn selected_frame_is_painted_when_it_arrives_late() {
    let mut seq = ScrollSequence::new(
        SequenceConfig::new(FrameSequence::pending(4)),
        container(viewport()),
        viewport(),
    )
    .unwrap();
    seq.on_scroll(6.0);
    settle(&mut seq);
    assert_eq!(seq.current_index(), Some(3));
    assert_eq!(seq.drawn_index(), None);

    seq.on_frame_loaded(3, Arc::new(frame(3))).unwrap();
    assert_eq!(seq.drawn_index(), Some(3));
}

#[test]
fn failed_frame_keeps_previous_content() {
    let mut frames = FrameSequence::pending(4);
    frames.set_loaded(0, Arc::new(frame(0))).unwrap();
    let mut seq =
        ScrollSequence::new(SequenceConfig::new(frames), container(viewport()), viewport())
            .unwrap();
    assert!(seq.redraw_current());

    seq.on_frame_failed(2).unwrap();
    assert!(!seq.render(0.5));
    assert_eq!(seq.drawn_index(), Some(0));
    assert_eq!(center_pixel(&seq), Some(color(0)));
}

#[test]
fn empty_sequence_never_draws() {
    let mut seq = ScrollSequence::new(
        SequenceConfig::new(FrameSequence::pending(0)),
        container(viewport()),
        viewport(),
    )
    .unwrap();
    seq.on_scroll(3.0);
    settle(&mut seq);
    assert_eq!(seq.current_index(), None);
    assert!(!seq.redraw_current());
    assert_eq!(seq.surface().writes(), 0);
}

#[test]
fn resize_resyncs_canvas_and_redraws_current_frame() {
    let mut seq = loaded(54);
    seq.on_scroll(3.0);
    settle(&mut seq);

    let big = Viewport::new(16, 12).unwrap();
    seq.on_layout(container(big), big).unwrap();
    assert_eq!(seq.surface().viewport(), big);
    // Same scroll offset, tracked range twice as long.
    assert_eq!(seq.tracker().progress(), 0.25);
    // The canvas shows the frame for the (still unsettled) smoothed value, not a blank.
    assert_eq!(seq.drawn_index(), Some(27));
    assert_eq!(seq.surface().snapshot().pixel(15, 11), Some(color(27)));
}

#[test]
fn redraw_at_same_progress_and_size_is_identical() {
    let mut seq = loaded(54);
    assert!(seq.render(0.3));
    let a = seq.surface().snapshot();
    assert!(seq.render(0.3));
    assert_eq!(a, seq.surface().snapshot());
}

#[test]
fn custom_drawer_replaces_cover_fit() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let log = calls.clone();
    let config = SequenceConfig::new(FrameSequence::from_frames((0..5).map(frame))).with_draw(
        move |f: &Frame, s: &mut Surface| -> ScrollSeqResult<()> {
            log.borrow_mut().push(f.pixels()[0]);
            s.pixels_mut().fill(9);
            Ok(())
        },
    );
    let mut seq = ScrollSequence::new(config, container(viewport()), viewport()).unwrap();
    assert!(seq.render(1.0));
    assert_eq!(*calls.borrow(), vec![4]);
    assert!(seq.surface().pixels().iter().all(|&b| b == 9));
}

#[test]
fn drawer_errors_are_swallowed() {
    let config = SequenceConfig::new(FrameSequence::from_frames([frame(0)])).with_draw(
        |_: &Frame, _: &mut Surface| -> ScrollSeqResult<()> {
            Err(ScrollSeqError::render("no context"))
        },
    );
    let mut seq = ScrollSequence::new(config, container(viewport()), viewport()).unwrap();
    assert!(!seq.redraw_current());
    assert_eq!(seq.drawn_index(), None);
}

#[test]
fn observers_follow_smoothed_value() {
    let mut seq = loaded(54);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    seq.progress_mut().on_change(move |p| sink.borrow_mut().push(p));
    seq.on_scroll(6.0);
    settle(&mut seq);
    assert_eq!(seen.borrow().last().copied(), Some(1.0));

    seq.release();
    assert_eq!(seq.progress().observer_count(), 0);
    assert_eq!(seq.frames().loaded_count(), 0);
}

#[test]
fn settle_now_jumps_to_raw() {
    let mut seq = loaded(54);
    seq.on_scroll(6.0);
    seq.settle_now();
    assert_eq!(seq.progress().get(), 1.0);
    assert_eq!(seq.drawn_index(), Some(53));
}

#[test]
fn invalid_spring_is_rejected() {
    let config = SequenceConfig::new(FrameSequence::pending(1)).with_spring_config(SpringConfig {
        stiffness: -1.0,
        ..SpringConfig::default()
    });
    assert!(ScrollSequence::new(config, container(viewport()), viewport()).is_err());
}
