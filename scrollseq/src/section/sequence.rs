use std::sync::Arc;

use crate::animation::smoother::Smoother;
use crate::animation::spring::SpringConfig;
use crate::assets::frames::{Frame, FrameSequence};
use crate::foundation::core::Viewport;
use crate::foundation::error::ScrollSeqResult;
use crate::render::cover::CoverFitDrawer;
use crate::render::draw::DrawFrame;
use crate::render::select::select_index;
use crate::render::surface::Surface;
use crate::scroll::tracker::{ContainerGeometry, ScrollOptions, ScrollTracker};

/// Configuration of a [`ScrollSequence`].
pub struct SequenceConfig {
    /// Frames to scrub through.
    pub keyframes: FrameSequence,
    /// Tracked range of the container.
    pub scroll_options: ScrollOptions,
    /// Smoothing spring.
    pub spring_config: SpringConfig,
    /// Custom drawer replacing [`CoverFitDrawer`].
    pub draw: Option<Box<dyn DrawFrame>>,
}

impl SequenceConfig {
    /// Defaults for everything except the frames.
    pub fn new(keyframes: FrameSequence) -> Self {
        Self {
            keyframes,
            scroll_options: ScrollOptions::default(),
            spring_config: SpringConfig::default(),
            draw: None,
        }
    }

    /// Replace the scroll options.
    pub fn with_scroll_options(mut self, scroll_options: ScrollOptions) -> Self {
        self.scroll_options = scroll_options;
        self
    }

    /// Replace the spring.
    pub fn with_spring_config(mut self, spring_config: SpringConfig) -> Self {
        self.spring_config = spring_config;
        self
    }

    /// Draw with `draw` instead of the cover-fit drawer.
    pub fn with_draw(mut self, draw: impl DrawFrame + 'static) -> Self {
        self.draw = Some(Box::new(draw));
        self
    }
}

/// Scroll-scrubbed image sequence drawn onto a viewport-sized canvas.
///
/// Raw progress comes from a [`ScrollTracker`], is smoothed by a spring ([`Smoother`]) and every
/// change of the smoothed value redraws the selected frame. The owner feeds observations in and
/// calls [`ScrollSequence::tick`] once per scheduler tick.
pub struct ScrollSequence {
    frames: FrameSequence,
    tracker: ScrollTracker,
    smoother: Smoother,
    surface: Surface,
    drawer: Box<dyn DrawFrame>,
    drawn: Option<usize>,
}

impl std::fmt::Debug for ScrollSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSequence")
            .field("frames", &self.frames.len())
            .field("tracker", &self.tracker)
            .field("smoother", &self.smoother)
            .field("surface", &self.surface)
            .field("drawn", &self.drawn)
            .finish()
    }
}

impl ScrollSequence {
    /// Build the sequence for `container` in a viewport of `viewport` size.
    ///
    /// The smoothed value starts at rest on the initial raw progress.
    pub fn new(
        config: SequenceConfig,
        container: ContainerGeometry,
        viewport: Viewport,
    ) -> ScrollSeqResult<Self> {
        let tracker = ScrollTracker::new(config.scroll_options, container, viewport.height_f64());
        let smoother = Smoother::new(config.spring_config, tracker.progress())?;
        Ok(Self {
            frames: config.keyframes,
            tracker,
            smoother,
            surface: Surface::new(viewport)?,
            drawer: config
                .draw
                .unwrap_or_else(|| Box::new(CoverFitDrawer::new())),
            drawn: None,
        })
    }

    /// Smoothed progress signal. Read it with [`Smoother::get`].
    pub fn progress(&self) -> &Smoother {
        &self.smoother
    }

    /// Mutable smoothed progress, for registering observers.
    pub fn progress_mut(&mut self) -> &mut Smoother {
        &mut self.smoother
    }

    /// Canvas surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Frame sequence.
    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    /// Raw progress tracker.
    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// Frame position selected by the current smoothed progress.
    pub fn current_index(&self) -> Option<usize> {
        select_index(self.smoother.get(), self.frames.len())
    }

    /// Frame position last painted onto the surface.
    pub fn drawn_index(&self) -> Option<usize> {
        self.drawn
    }

    /// Observe a document scroll position.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        let raw = self.tracker.on_scroll(scroll_y);
        self.smoother.set_target(raw);
    }

    /// Resize reactor: follow a layout change, size the surface to `viewport` and redraw the
    /// current frame, since resizing wipes the backing store.
    pub fn on_layout(
        &mut self,
        container: ContainerGeometry,
        viewport: Viewport,
    ) -> ScrollSeqResult<()> {
        let raw = self.tracker.on_layout(container, viewport.height_f64());
        self.smoother.set_target(raw);
        if self.surface.resize(viewport)? {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                "canvas resized"
            );
            self.drawn = None;
        }
        self.redraw_current();
        Ok(())
    }

    /// Advance the spring by `dt` seconds and redraw if the smoothed value moved.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        let p = self.smoother.tick(dt)?;
        self.render(p);
        Some(p)
    }

    /// Snap the smoothed value onto the raw value and redraw.
    pub fn settle_now(&mut self) {
        let raw = self.tracker.progress();
        self.smoother.jump(raw);
        self.redraw_current();
    }

    /// Draw the frame selected by the synchronous smoothed value.
    pub fn redraw_current(&mut self) -> bool {
        self.render(self.smoother.get())
    }

    /// Draw the frame selected by `progress`. Returns `true` if something was painted.
    ///
    /// Empty sequences, frames that have not loaded and frames that failed leave the surface
    /// untouched.
    pub fn render(&mut self, progress: f64) -> bool {
        let Some(index) = select_index(progress, self.frames.len()) else {
            return false;
        };
        self.draw_index(index)
    }

    /// Record a completed load. Paints it if it is the selected frame, or if it is the first
    /// frame and the canvas is still blank.
    pub fn on_frame_loaded(&mut self, index: usize, frame: Arc<Frame>) -> ScrollSeqResult<()> {
        self.frames.set_loaded(index, frame)?;
        let selected = self.current_index();
        if selected == Some(index) || (index == 0 && self.drawn.is_none()) {
            self.draw_index(index);
        }
        Ok(())
    }

    /// Record a failed load. The position will draw nothing.
    pub fn on_frame_failed(&mut self, index: usize) -> ScrollSeqResult<()> {
        self.frames.set_failed(index)
    }

    /// Drop observers and decoded frames.
    pub fn release(&mut self) {
        self.smoother.clear_observers();
        self.frames.release();
        self.drawn = None;
    }

    fn draw_index(&mut self, index: usize) -> bool {
        let Some(frame) = self.frames.get(index).cloned() else {
            return false;
        };
        match self.drawer.draw(&frame, &mut self.surface) {
            Ok(()) => {
                self.drawn = Some(index);
                true
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "frame draw skipped");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/sequence.rs"]
mod tests;
