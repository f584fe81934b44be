use std::sync::Arc;

use super::*;
use crate::assets::frames::{Frame, FrameSequence};

const DT: f64 = 1.0 / 60.0;

fn color(i: usize) -> [u8; 4] {
    [i as u8, 200, (i * 3) as u8, 255]
}

fn frame(i: usize) -> Arc<Frame> {
    let bytes: Vec<u8> = std::iter::repeat_n(color(i), 16).flatten().collect();
    Arc::new(Frame::from_premul_rgba8(4, 4, &bytes).unwrap())
}

fn viewport() -> Viewport {
    Viewport::new(8, 6).unwrap()
}

fn battery(top_screens: f64) -> Section {
    let parts = SectionParts {
        name: "battery".to_string(),
        title_text: "Adaptive EQ that tunes music to your ears,".to_string(),
        template: UrlTemplate::parse("battery/{index}.jpg").unwrap(),
        height_screens: 2.0,
        top_screens,
        title: TitleEffect::showcase(2.0).unwrap(),
        sequence: SequenceConfig::new(FrameSequence::pending(54)),
    };
    Section::new(parts, viewport()).unwrap()
}

fn load_all(section: &mut Section, key: usize) {
    for index in 0..54 {
        section
            .handle(&HostEvent::FrameLoaded {
                section: key,
                index,
                frame: frame(index),
            })
            .unwrap();
    }
}

fn settle(section: &mut Section) {
    for _ in 0..600 {
        section.handle(&HostEvent::Tick { dt: DT }).unwrap();
        if section.sequence().progress().is_settled() {
            return;
        }
    }
    panic!("section did not settle");
}

#[test]
fn start_subscribes_and_requests_every_frame() {
    let mut bus = EventBus::new();
    let mut s = battery(0.0);
    assert_eq!(s.lifecycle(), Lifecycle::Idle);

    let requests = s.start(&mut bus, 3).unwrap();
    assert_eq!(s.lifecycle(), Lifecycle::Running);
    assert_eq!(requests.len(), 54);
    assert_eq!(
        requests[7],
        FrameRequest {
            section: 3,
            index: 7,
            url: "battery/0007.jpg".to_string(),
        }
    );
    assert_eq!(bus.len(), 4);
    for kind in [
        EventKind::Scroll,
        EventKind::Resize,
        EventKind::Tick,
        EventKind::FrameLoad,
    ] {
        assert!(bus.is_subscribed(kind, 3));
    }

    assert!(s.start(&mut bus, 3).unwrap().is_empty());
    assert_eq!(bus.len(), 4);
}

#[test]
fn container_follows_cumulative_layout() {
    let s = battery(4.0);
    assert_eq!(s.container(), ContainerGeometry::new(24.0, 12.0).unwrap());
    assert_eq!(s.sequence().tracker().range(), (24.0, 30.0));
}

#[test]
fn events_before_start_are_ignored() {
    let mut s = battery(0.0);
    s.handle(&HostEvent::Scroll { y: 3.0 }).unwrap();
    s.handle(&HostEvent::FrameLoaded {
        section: 0,
        index: 0,
        frame: frame(0),
    })
    .unwrap();
    assert_eq!(s.sequence().tracker().progress(), 0.0);
    assert_eq!(s.sequence().frames().loaded_count(), 0);
    assert_eq!(s.sequence().surface().writes(), 0);
}

#[test]
fn loads_for_other_sections_are_ignored() {
    let mut bus = EventBus::new();
    let mut s = battery(0.0);
    s.start(&mut bus, 1).unwrap();
    s.handle(&HostEvent::FrameLoaded {
        section: 0,
        index: 0,
        frame: frame(0),
    })
    .unwrap();
    assert_eq!(s.sequence().frames().loaded_count(), 0);
}

#[test]
fn half_scroll_shows_middle_frame_and_hides_title() {
    let mut bus = EventBus::new();
    let mut s = battery(0.0);
    s.start(&mut bus, 0).unwrap();
    load_all(&mut s, 0);
    assert_eq!(s.sequence().drawn_index(), Some(0));

    let y = s.sequence().tracker().scroll_for_progress(0.5);
    s.handle(&HostEvent::Scroll { y }).unwrap();
    settle(&mut s);

    assert_eq!(s.sequence().drawn_index(), Some(27));
    assert_eq!(s.sequence().surface().snapshot().pixel(4, 3), Some(color(27)));
    let style = s.overlay();
    assert_eq!(style.title_opacity, 0.0);
    assert_eq!(style.progress_bar_scale_x, 0.5);
}

#[test]
fn title_peaks_at_an_eighth_of_a_two_screen_section() {
    let mut bus = EventBus::new();
    let mut s = battery(0.0);
    s.start(&mut bus, 0).unwrap();
    let y = s.sequence().tracker().scroll_for_progress(0.125);
    s.handle(&HostEvent::Scroll { y }).unwrap();
    settle(&mut s);
    assert_eq!(s.overlay().title_opacity, 1.0);
    assert_eq!(s.overlay().title_scale, 1.0);
}

#[test]
fn resize_event_resizes_canvas() {
    let mut bus = EventBus::new();
    let mut s = battery(0.0);
    s.start(&mut bus, 0).unwrap();
    load_all(&mut s, 0);

    let bigger = Viewport::new(16, 10).unwrap();
    s.handle(&HostEvent::Resize(bigger)).unwrap();
    assert_eq!(s.sequence().surface().viewport(), bigger);
    assert_eq!(s.container(), ContainerGeometry::new(0.0, 20.0).unwrap());
    assert_eq!(s.sequence().drawn_index(), Some(0));
    assert_eq!(s.sequence().surface().snapshot().pixel(8, 5), Some(color(0)));
}

#[test]
fn stop_unsubscribes_and_blocks_late_writes() {
    let mut bus = EventBus::new();
    let mut s = battery(0.0);
    s.start(&mut bus, 0).unwrap();
    s.handle(&HostEvent::FrameLoaded {
        section: 0,
        index: 0,
        frame: frame(0),
    })
    .unwrap();
    let y = s.sequence().tracker().scroll_for_progress(1.0);
    s.handle(&HostEvent::Scroll { y }).unwrap();

    s.stop(&mut bus);
    assert_eq!(s.lifecycle(), Lifecycle::Stopped);
    assert!(bus.is_empty());
    assert!(bus.targets(EventKind::Tick).is_empty());

    let writes = s.sequence().surface().writes();
    s.handle(&HostEvent::FrameLoaded {
        section: 0,
        index: 53,
        frame: frame(53),
    })
    .unwrap();
    s.handle(&HostEvent::Tick { dt: DT }).unwrap();
    s.handle(&HostEvent::Resize(Viewport::new(20, 20).unwrap()))
        .unwrap();
    assert_eq!(s.sequence().surface().writes(), writes);
    assert_eq!(s.sequence().surface().viewport(), viewport());
}

#[test]
fn restart_requests_released_frames_again() {
    let mut bus = EventBus::new();
    let mut s = battery(0.0);
    s.start(&mut bus, 0).unwrap();
    load_all(&mut s, 0);
    s.stop(&mut bus);

    let requests = s.start(&mut bus, 5).unwrap();
    assert_eq!(requests.len(), 54);
    assert_eq!(requests[0].section, 5);
    assert_eq!(bus.len(), 4);
}

#[test]
fn invalid_geometry_is_rejected() {
    let parts = SectionParts {
        name: "flat".to_string(),
        title_text: String::new(),
        template: UrlTemplate::parse("{index}.png").unwrap(),
        height_screens: 0.0,
        top_screens: 0.0,
        title: TitleEffect::showcase(1.0).unwrap(),
        sequence: SequenceConfig::new(FrameSequence::pending(1)),
    };
    assert!(Section::new(parts, viewport()).is_err());
}
