use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::interpolate::{Keyframe, Keyframes};
use crate::animation::spring::SpringConfig;
use crate::assets::frames::FrameSequence;
use crate::assets::template::UrlTemplate;
use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};
use crate::scroll::offset::ScrollOffset;
use crate::scroll::tracker::ScrollOptions;
use crate::section::overlay::{TitleEffect, showcase_breakpoints};
use crate::section::composer::SectionParts;
use crate::section::sequence::SequenceConfig;

/// JSON description of a scroll page: a viewport and a stack of sections.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Initial viewport size.
    pub viewport: Viewport,
    /// Sections from top to bottom.
    pub sections: Vec<SectionConfig>,
}

/// One section of a [`PageConfig`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Unique section name.
    pub name: String,
    /// Frame source.
    pub frames: FramesConfig,
    /// Height in viewport heights (4 means 400vh).
    pub height_screens: f64,
    /// Title overlay.
    #[serde(default)]
    pub title: TitleConfig,
    /// Tracked range, `["start", "end"]` by default.
    #[serde(default)]
    pub offset: ScrollOffset,
    /// Clamp raw progress into `[0, 1]`.
    #[serde(default = "default_clamp")]
    pub clamp: bool,
    /// Smoothing spring.
    #[serde(default)]
    pub spring: SpringConfig,
}

fn default_clamp() -> bool {
    true
}

/// Where a section's frames come from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FramesConfig {
    /// URL template with an `{index}` placeholder.
    pub template: String,
    /// Number of frames.
    pub count: usize,
}

/// Title text and curves. Missing curves use the showcase fade scaled to the section height.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleConfig {
    /// Text shown over the canvas.
    #[serde(default)]
    pub text: String,
    /// Opacity over smoothed progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Vec<CurvePoint>>,
    /// Scale over smoothed progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec<CurvePoint>>,
}

/// A curve control point, either `[at, value]` or `{ "at", "value", "ease" }`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CurvePoint {
    /// Linear point.
    Pair([f64; 2]),
    /// Point with easing toward the next one.
    Keyframe(Keyframe<f64>),
}

impl CurvePoint {
    fn to_keyframe(&self) -> Keyframe<f64> {
        match self {
            Self::Pair([at, value]) => Keyframe::new(*at, *value),
            Self::Keyframe(k) => k.clone(),
        }
    }
}

impl PageConfig {
    /// Parse a page from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollSeqResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollSeqError::serde(format!("parse page JSON: {e}")))
    }

    /// Parse a page from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollSeqResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollSeqError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> ScrollSeqResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScrollSeqError::serde(format!("write page JSON: {e}")))
    }

    /// The built-in two-section product page: a 215-frame sequence over 400vh followed by a
    /// 54-frame sequence over 200vh.
    pub fn showcase() -> Self {
        Self {
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            sections: vec![
                SectionConfig::new(
                    "spatial-audio",
                    FramesConfig {
                        template: "spatial-audio/{index}.jpg".to_string(),
                        count: 215,
                    },
                    4.0,
                    "With Personalised Spatial Audio that places sound all around you,",
                ),
                SectionConfig::new(
                    "battery",
                    FramesConfig {
                        template: "battery/{index}.jpg".to_string(),
                        count: 54,
                    },
                    2.0,
                    "Adaptive EQ that tunes music to your ears,",
                ),
            ],
        }
    }

    /// Check every section and the viewport.
    pub fn validate(&self) -> ScrollSeqResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        if self.sections.is_empty() {
            return Err(ScrollSeqError::validation("page has no sections"));
        }
        let mut seen = std::collections::HashSet::new();
        for s in &self.sections {
            if !seen.insert(s.name.as_str()) {
                return Err(ScrollSeqError::validation(format!(
                    "duplicate section name '{}'",
                    s.name
                )));
            }
            s.validate()?;
        }
        Ok(())
    }

    /// Section tops in viewport heights, stacked from 0.
    pub fn section_tops(&self) -> Vec<f64> {
        let mut top = 0.0;
        self.sections
            .iter()
            .map(|s| {
                let t = top;
                top += s.height_screens;
                t
            })
            .collect()
    }

    /// Total page height in viewport heights.
    pub fn height_screens(&self) -> f64 {
        self.sections.iter().map(|s| s.height_screens).sum()
    }
}

impl SectionConfig {
    /// Section with default title curves, offset and spring.
    pub fn new(
        name: impl Into<String>,
        frames: FramesConfig,
        height_screens: f64,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            frames,
            height_screens,
            title: TitleConfig {
                text: title.into(),
                opacity: None,
                scale: None,
            },
            offset: ScrollOffset::default(),
            clamp: true,
            spring: SpringConfig::default(),
        }
    }

    /// Check geometry, template, curves and spring.
    pub fn validate(&self) -> ScrollSeqResult<()> {
        let ctx = |e: ScrollSeqError| {
            ScrollSeqError::validation(format!("section '{}': {e}", self.name))
        };
        if self.name.is_empty() {
            return Err(ScrollSeqError::validation("section name must not be empty"));
        }
        if !self.height_screens.is_finite() || self.height_screens <= 0.0 {
            return Err(ctx(ScrollSeqError::validation(
                "height_screens must be > 0",
            )));
        }
        UrlTemplate::parse(&self.frames.template).map_err(ctx)?;
        self.title_effect().map_err(ctx)?;
        self.spring.validate().map_err(ctx)?;
        Ok(())
    }

    /// Title curves, falling back to the showcase shape for this height.
    pub fn title_effect(&self) -> ScrollSeqResult<TitleEffect> {
        let bp = showcase_breakpoints(self.height_screens);
        let opacity = match &self.title.opacity {
            Some(points) => curve(points)?,
            None => Keyframes::linear(&bp, &[0.0, 1.0, 0.0])?,
        };
        let scale = match &self.title.scale {
            Some(points) => curve(points)?,
            None => Keyframes::linear(&bp, &[0.95, 1.0, 1.2])?,
        };
        Ok(TitleEffect::new(opacity, scale))
    }

    /// Tracker options.
    pub fn scroll_options(&self) -> ScrollOptions {
        ScrollOptions {
            offset: self.offset,
            clamp: self.clamp,
        }
    }

    /// Parts for a section whose frames are not loaded yet.
    pub fn to_parts(&self, top_screens: f64) -> ScrollSeqResult<SectionParts> {
        let sequence = SequenceConfig::new(FrameSequence::pending(self.frames.count))
            .with_scroll_options(self.scroll_options())
            .with_spring_config(self.spring);
        Ok(SectionParts {
            name: self.name.clone(),
            title_text: self.title.text.clone(),
            template: UrlTemplate::parse(&self.frames.template)?,
            height_screens: self.height_screens,
            top_screens,
            title: self.title_effect()?,
            sequence,
        })
    }
}

fn curve(points: &[CurvePoint]) -> ScrollSeqResult<Keyframes<f64>> {
    Keyframes::new(points.iter().map(CurvePoint::to_keyframe).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/page/config.rs"]
mod tests;
