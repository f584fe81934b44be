use crate::animation::ease::Ease;
use crate::animation::interpolate::{Keyframe, Keyframes};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};
use crate::page::document::Page;
use crate::render::surface::FrameRGBA;

/// Ticks allowed for the springs to come to rest in [`ScrollSession::render_settled`].
pub const DEFAULT_MAX_SETTLE_TICKS: usize = 10_000;

/// Scripted document scroll position over time.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollPath {
    points: Keyframes<f64>,
    hold_secs: f64,
}

impl ScrollPath {
    /// Scroll from `from_y` to `to_y` over `duration_secs` at constant speed.
    pub fn linear(from_y: f64, to_y: f64, duration_secs: f64) -> ScrollSeqResult<Self> {
        Self::eased(from_y, to_y, duration_secs, Ease::Linear)
    }

    /// Scroll from `from_y` to `to_y` over `duration_secs` with `ease`.
    pub fn eased(from_y: f64, to_y: f64, duration_secs: f64, ease: Ease) -> ScrollSeqResult<Self> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(ScrollSeqError::validation(
                "scroll path duration must be finite and >= 0",
            ));
        }
        let mut start = Keyframe::new(0.0, from_y);
        start.ease = ease;
        let points = if duration_secs == 0.0 {
            Keyframes::new(vec![Keyframe::new(0.0, to_y)])?
        } else {
            Keyframes::new(vec![start, Keyframe::new(duration_secs, to_y)])?
        };
        Ok(Self {
            points,
            hold_secs: 0.0,
        })
    }

    /// Path through arbitrary `(seconds, scroll_y)` keyframes starting at 0 s.
    pub fn from_keyframes(points: Keyframes<f64>) -> ScrollSeqResult<Self> {
        if points.keys()[0].at != 0.0 {
            return Err(ScrollSeqError::validation("scroll path must start at 0 s"));
        }
        Ok(Self {
            points,
            hold_secs: 0.0,
        })
    }

    /// Keep the final position for `secs` more, letting the springs settle.
    pub fn with_hold(mut self, secs: f64) -> ScrollSeqResult<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(ScrollSeqError::validation("hold must be finite and >= 0"));
        }
        self.hold_secs = secs;
        Ok(self)
    }

    /// Total length including the hold.
    pub fn duration_secs(&self) -> f64 {
        let keys = self.points.keys();
        keys[keys.len() - 1].at + self.hold_secs
    }

    /// Scroll position at `t` seconds.
    pub fn scroll_at(&self, t: f64) -> f64 {
        self.points.sample(t)
    }
}

/// Summary of a [`ScrollSession::play`] run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Document scroll offset after the last frame.
    pub final_scroll_y: f64,
    /// Whether every spring was at rest after the last frame.
    pub settled: bool,
}

/// Drives a [`Page`] with a fixed-rate clock.
///
/// Every output frame applies the scripted scroll position, ticks the springs by one frame
/// duration and composes the view.
#[derive(Debug)]
pub struct ScrollSession {
    page: Page,
    fps: Fps,
}

impl ScrollSession {
    /// Session over a started `page`.
    pub fn new(page: Page, fps: Fps) -> Self {
        Self { page, fps }
    }

    /// Driven page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable page, for loading frames or resizing between runs.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Give the page back.
    pub fn into_page(self) -> Page {
        self.page
    }

    /// Clock rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Scroll to `y`, let the springs come to rest and compose the view.
    pub fn render_settled(&mut self, y: f64, max_ticks: usize) -> ScrollSeqResult<FrameRGBA> {
        self.page.scroll_to(y)?;
        let dt = self.fps.frame_duration_secs();
        let ticks = self.page.settle(dt, max_ticks)?;
        if !self.page.is_settled() {
            tracing::warn!(ticks, "springs still moving, composing anyway");
        }
        Ok(self.page.compose())
    }

    /// Play `path` into `sink`.
    #[tracing::instrument(skip(self, path, sink))]
    pub fn play(
        &mut self,
        path: &ScrollPath,
        sink: &mut dyn FrameSink,
    ) -> ScrollSeqResult<PlaybackStats> {
        let total = self.fps.secs_to_frames_ceil(path.duration_secs()).max(1);
        let dt = self.fps.frame_duration_secs();
        let viewport = self.page.viewport();
        sink.begin(SinkConfig {
            width: viewport.width,
            height: viewport.height,
            fps: self.fps,
        })?;

        for n in 0..total {
            let t = n as f64 * dt;
            self.page.scroll_to(path.scroll_at(t))?;
            self.page.tick(dt)?;
            let frame = self.page.compose();
            sink.push_frame(FrameIndex(n), &frame)?;
        }
        sink.end()?;

        let stats = PlaybackStats {
            frames: total,
            final_scroll_y: self.page.scroll_y(),
            settled: self.page.is_settled(),
        };
        tracing::debug!(?stats, "playback finished");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scroll_session.rs"]
mod tests;
