use super::*;

const PAGE: &str = r#"{
  "viewport": { "width": 640, "height": 360 },
  "sections": [
    {
      "name": "spatial-audio",
      "frames": { "template": "spatial-audio/{index}.jpg", "count": 215 },
      "height_screens": 4,
      "title": {
        "text": "Spatial audio",
        "opacity": [[0, 0], [0.25, 1], [0.5, 0]],
        "scale": [[0, 0.95], { "at": 0.25, "value": 1.0, "ease": "ease_out" }, [0.5, 1.2]]
      },
      "offset": ["start", "end"],
      "spring": { "damping": 40, "stiffness": 200 }
    },
    {
      "name": "battery",
      "frames": { "template": "battery/{index:3}.png", "count": 54 },
      "height_screens": 2
    }
  ]
}"#;

#[test]
fn parses_and_validates_page_json() {
    let page = PageConfig::from_reader(PAGE.as_bytes()).unwrap();
    page.validate().unwrap();

    assert_eq!(page.viewport, Viewport::new(640, 360).unwrap());
    assert_eq!(page.sections.len(), 2);
    let audio = &page.sections[0];
    assert_eq!(audio.frames.count, 215);
    assert_eq!(audio.offset, ScrollOffset::ALL);
    assert_eq!(audio.spring.damping, 40.0);
    assert_eq!(audio.spring.mass, 1.0);
    assert!(audio.clamp);

    let fx = audio.title_effect().unwrap();
    assert_eq!(fx.style(0.125).title_opacity, 0.5);
    assert_eq!(fx.scale().keys()[1].ease, crate::animation::ease::Ease::EaseOut);

    let battery = &page.sections[1];
    assert_eq!(battery.title, TitleConfig::default());
    assert_eq!(battery.spring, SpringConfig::default());
}

#[test]
fn omitted_title_curves_follow_section_height() {
    let page = PageConfig::from_reader(PAGE.as_bytes()).unwrap();
    let fx = page.sections[1].title_effect().unwrap();
    assert_eq!(fx.style(0.125).title_opacity, 1.0);
    assert_eq!(fx.style(0.25).title_opacity, 0.0);
}

#[test]
fn tops_stack_in_screens() {
    let page = PageConfig::showcase();
    assert_eq!(page.section_tops(), vec![0.0, 4.0]);
    assert_eq!(page.height_screens(), 6.0);
}

#[test]
fn showcase_is_valid_and_round_trips_through_json() {
    let page = PageConfig::showcase();
    page.validate().unwrap();
    assert_eq!(page.sections[0].frames.count, 215);
    assert_eq!(page.sections[1].frames.count, 54);
    assert_eq!(
        page.sections[0].title.text,
        "With Personalised Spatial Audio that places sound all around you,"
    );
    assert_eq!(
        page.sections[1].title.text,
        "Adaptive EQ that tunes music to your ears,"
    );

    let json = page.to_json_pretty().unwrap();
    let back = PageConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, page);
}

#[test]
fn to_parts_builds_pending_sequence() {
    let page = PageConfig::showcase();
    let parts = page.sections[1].to_parts(4.0).unwrap();
    assert_eq!(parts.name, "battery");
    assert_eq!(parts.top_screens, 4.0);
    assert_eq!(parts.template.url(3), "battery/0003.jpg");
    assert_eq!(parts.sequence.keyframes.len(), 54);
    assert_eq!(parts.sequence.keyframes.loaded_count(), 0);
}

#[test]
fn validation_failures() {
    let mut page = PageConfig::showcase();
    page.sections[1].name = "spatial-audio".to_string();
    assert!(page.validate().unwrap_err().to_string().contains("duplicate"));

    let mut page = PageConfig::showcase();
    page.sections[0].height_screens = 0.0;
    assert!(page.validate().is_err());

    let mut page = PageConfig::showcase();
    page.sections[0].frames.template = "no-placeholder.jpg".to_string();
    let err = page.validate().unwrap_err().to_string();
    assert!(err.starts_with("validation error:"), "{err}");
    assert!(err.contains("spatial-audio"), "{err}");

    let mut page = PageConfig::showcase();
    page.sections[0].title.opacity = Some(vec![
        CurvePoint::Pair([0.5, 1.0]),
        CurvePoint::Pair([0.0, 0.0]),
    ]);
    assert!(page.validate().is_err());

    let mut page = PageConfig::showcase();
    page.sections.clear();
    assert!(page.validate().is_err());

    let mut page = PageConfig::showcase();
    page.viewport.width = 0;
    assert!(page.validate().is_err());
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = PageConfig::from_reader("{ \"viewport\": ".as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));

    let err = PageConfig::from_reader(
        r#"{"viewport":{"width":1,"height":1},"sections":[],"extra":1}"#.as_bytes(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("extra"));
}

#[test]
fn missing_file_is_reported() {
    let err = PageConfig::from_path("target/definitely/missing/page.json").unwrap_err();
    assert!(err.to_string().contains("open page JSON"));
}
