use std::io::Cursor;

use super::*;
use crate::assets::loader::MemoryLoader;
use crate::host::events::EventKind;
use crate::page::config::{FramesConfig, SectionConfig};

const DT: f64 = 1.0 / 60.0;

fn color(section: usize, i: usize) -> [u8; 4] {
    [(i * 4) as u8, (section * 100 + 50) as u8, 10, 255]
}

fn png(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn config() -> PageConfig {
    PageConfig {
        viewport: Viewport::new(16, 20).unwrap(),
        sections: vec![
            SectionConfig::new(
                "intro",
                FramesConfig {
                    template: "intro/{index}.png".to_string(),
                    count: 5,
                },
                4.0,
                "Intro",
            ),
            SectionConfig::new(
                "battery",
                FramesConfig {
                    template: "battery/{index}.png".to_string(),
                    count: 54,
                },
                2.0,
                "Battery",
            ),
        ],
    }
}

fn loader() -> MemoryLoader {
    let mut l = MemoryLoader::new();
    for i in 0..5 {
        l.insert(format!("intro/{i:04}.png"), png(color(0, i)));
    }
    for i in 0..54 {
        l.insert(format!("battery/{i:04}.png"), png(color(1, i)));
    }
    l
}

fn started() -> Page {
    let mut page = Page::new(config()).unwrap();
    page.start().unwrap();
    page.load_all(&mut loader()).unwrap();
    page
}

#[test]
fn layout_stacks_sections() {
    let page = Page::new(config()).unwrap();
    assert_eq!(page.document_height(), 120.0);
    assert_eq!(page.max_scroll(), 100.0);
    assert_eq!(page.sections()[1].container().top, 80.0);
    assert!(page.bus().is_empty());
    assert_eq!(page.pending_loads(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = config();
    cfg.sections[1].name = "intro".to_string();
    assert!(Page::new(cfg).is_err());
}

#[test]
fn start_queues_every_frame_and_loads_paint_first_frames() {
    let mut page = Page::new(config()).unwrap();
    page.start().unwrap();
    assert_eq!(page.pending_loads(), 59);
    assert_eq!(page.bus().targets(EventKind::Tick), vec![0, 1]);

    assert_eq!(page.pump_loads(&mut loader(), 3).unwrap(), 3);
    assert_eq!(page.pending_loads(), 56);
    assert_eq!(page.load_all(&mut loader()).unwrap(), 56);

    for (key, s) in page.sections().iter().enumerate() {
        assert_eq!(s.sequence().drawn_index(), Some(0));
        assert_eq!(
            s.sequence().surface().snapshot().pixel(8, 15),
            Some(color(key, 0))
        );
    }
}

#[test]
fn missing_frames_are_marked_failed() {
    let mut page = Page::new(config()).unwrap();
    page.start().unwrap();
    let mut l = MemoryLoader::new();
    l.insert("intro/0000.png", png(color(0, 0)));
    l.insert("intro/0001.png", b"garbage".to_vec());
    page.load_all(&mut l).unwrap();

    let intro = page.section("intro").unwrap().sequence().frames();
    assert_eq!(intro.loaded_count(), 1);
    assert_eq!(intro.failed_count(), 4);
    let battery = page.section("battery").unwrap().sequence().frames();
    assert_eq!(battery.failed_count(), 54);
}

#[test]
fn scroll_is_clamped_to_document() {
    let mut page = started();
    page.scroll_to(1_000.0).unwrap();
    assert_eq!(page.scroll_y(), 100.0);
    page.scroll_to(-5.0).unwrap();
    assert_eq!(page.scroll_y(), 0.0);
    assert!(page.scroll_to(f64::NAN).is_err());
}

#[test]
fn half_way_through_second_section() {
    let mut page = started();
    page.scroll_to(90.0).unwrap();
    assert_eq!(page.section("battery").unwrap().sequence().tracker().progress(), 0.5);

    let ticks = page.settle(DT, 1_000).unwrap();
    assert!(ticks < 1_000);
    assert!(page.is_settled());

    let battery = page.section("battery").unwrap();
    assert_eq!(battery.sequence().drawn_index(), Some(27));
    assert_eq!(battery.overlay().title_opacity, 0.0);
    assert_eq!(battery.overlay().progress_bar_scale_x, 0.5);
    assert_eq!(page.section("intro").unwrap().sequence().drawn_index(), Some(4));

    let view = page.compose();
    assert_eq!((view.width, view.height), (16, 20));
    assert_eq!(view.pixel(8, 15), Some(color(1, 27)));
    assert_eq!(view.pixel(3, 2), Some([255, 255, 255, 255]));
    assert_eq!(view.pixel(12, 2), Some(color(1, 27)));
    assert_eq!(view.pixel(3, PROGRESS_BAR_HEIGHT), Some(color(1, 27)));
}

#[test]
fn compose_at_top_shows_first_section_with_empty_bar() {
    let page = started();
    let view = page.compose();
    assert_eq!(view.pixel(0, 0), Some(color(0, 0)));
    assert_eq!(view.pixel(8, 15), Some(color(0, 0)));
}

#[test]
fn sticky_canvas_positions() {
    assert_eq!(sticky_offset(80.0, 40.0, 20.0, 70.0), Some(10.0));
    assert_eq!(sticky_offset(80.0, 40.0, 20.0, 90.0), Some(0.0));
    assert_eq!(sticky_offset(0.0, 80.0, 20.0, 70.0), Some(-10.0));
    assert_eq!(sticky_offset(0.0, 80.0, 20.0, 80.0), None);
    assert_eq!(sticky_offset(80.0, 40.0, 20.0, 60.0), None);
    assert_eq!(sticky_offset(0.0, 10.0, 20.0, 0.0), Some(0.0));
}

#[test]
fn resize_reflows_document_and_canvases() {
    let mut page = started();
    page.scroll_to(100.0).unwrap();
    page.resize(Viewport::new(8, 10).unwrap()).unwrap();

    assert_eq!(page.document_height(), 60.0);
    assert_eq!(page.scroll_y(), 50.0);
    for s in page.sections() {
        assert_eq!(s.sequence().surface().viewport(), page.viewport());
    }
    assert_eq!(page.section("battery").unwrap().container().top, 40.0);
    assert_eq!(page.section("battery").unwrap().sequence().tracker().progress(), 1.0);
}

#[test]
fn stop_tears_everything_down() {
    let mut page = Page::new(config()).unwrap();
    page.start().unwrap();
    page.pump_loads(&mut loader(), 1).unwrap();
    page.stop();
    assert!(page.bus().is_empty());
    assert_eq!(page.pending_loads(), 0);

    let writes: Vec<u64> = page
        .sections()
        .iter()
        .map(|s| s.sequence().surface().writes())
        .collect();
    page.scroll_to(90.0).unwrap();
    page.tick(DT).unwrap();
    page.resize(Viewport::new(30, 30).unwrap()).unwrap();
    let after: Vec<u64> = page
        .sections()
        .iter()
        .map(|s| s.sequence().surface().writes())
        .collect();
    assert_eq!(writes, after);
}

#[test]
fn report_serializes() {
    let mut page = started();
    page.scroll_to(90.0).unwrap();
    page.settle(DT, 1_000).unwrap();
    let report = page.report();
    assert_eq!(report.sections.len(), 2);
    assert_eq!(report.sections[1].frame_index, Some(27));
    assert_eq!(report.sections[1].loaded, 54);
    assert!(report.sections[1].running);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["sections"][1]["name"], "battery");
    assert_eq!(json["sections"][1]["overlay"]["progress_bar_scale_x"], 0.5);
}
