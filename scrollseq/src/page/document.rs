use std::collections::VecDeque;
use std::sync::Arc;

use crate::assets::decode::decode_frame;
use crate::assets::loader::FrameLoader;
use crate::foundation::core::{Rgba8Premul, Viewport};
use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};
use crate::foundation::math::round_half_up;
use crate::host::events::{EventBus, HostEvent};
use crate::page::config::PageConfig;
use crate::render::compose::{blit_over, fill_rect_over};
use crate::render::select::select_index;
use crate::render::surface::FrameRGBA;
use crate::section::composer::{FrameRequest, Lifecycle, Section};
use crate::section::overlay::OverlayStyle;

/// Height of the progress bar drawn over each sticky canvas, in pixels.
pub const PROGRESS_BAR_HEIGHT: u32 = 8;

/// A document of stacked sections driven by one event loop.
///
/// The page owns the [`EventBus`] and routes host events to the sections registered for them.
/// Frame requests from started sections are queued and completed by [`Page::pump_loads`].
pub struct Page {
    config: PageConfig,
    viewport: Viewport,
    scroll_y: f64,
    sections: Vec<Section>,
    bus: EventBus,
    queue: VecDeque<FrameRequest>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("sections", &self.sections)
            .field("queued_loads", &self.queue.len())
            .finish()
    }
}

impl Page {
    /// Validate `config` and lay its sections out top to bottom. Nothing is subscribed until
    /// [`Page::start`].
    pub fn new(config: PageConfig) -> ScrollSeqResult<Self> {
        config.validate()?;
        let viewport = config.viewport;
        let sections = config
            .sections
            .iter()
            .zip(config.section_tops())
            .map(|(s, top)| Section::new(s.to_parts(top)?, viewport))
            .collect::<ScrollSeqResult<Vec<_>>>()?;
        Ok(Self {
            config,
            viewport,
            scroll_y: 0.0,
            sections,
            bus: EventBus::new(),
            queue: VecDeque::new(),
        })
    }

    /// Configuration the page was built from.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current document scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Sections from top to bottom.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Mutable section by name.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    /// Event registrations.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Document height in pixels.
    pub fn document_height(&self) -> f64 {
        self.config.height_screens() * self.viewport.height_f64()
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height_f64()).max(0.0)
    }

    /// Frame requests not yet completed.
    pub fn pending_loads(&self) -> usize {
        self.queue.len()
    }

    /// Start every section and queue its frame requests.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> ScrollSeqResult<()> {
        for (key, section) in self.sections.iter_mut().enumerate() {
            let requests = section.start(&mut self.bus, key)?;
            self.queue.extend(requests);
        }
        let y = self.scroll_y;
        self.dispatch(&HostEvent::Scroll { y })
    }

    /// Stop every section. Queued loads are dropped.
    pub fn stop(&mut self) {
        for section in &mut self.sections {
            section.stop(&mut self.bus);
        }
        self.queue.clear();
    }

    /// Route `event` to the sections registered for its kind.
    pub fn dispatch(&mut self, event: &HostEvent) -> ScrollSeqResult<()> {
        for target in self.bus.targets(event.kind()) {
            if let Some(section) = self.sections.get_mut(target) {
                section.handle(event)?;
            }
        }
        Ok(())
    }

    /// Scroll the document to `y`, clamped to the reachable range.
    pub fn scroll_to(&mut self, y: f64) -> ScrollSeqResult<()> {
        if !y.is_finite() {
            return Err(ScrollSeqError::validation("scroll position must be finite"));
        }
        self.scroll_y = y.clamp(0.0, self.max_scroll());
        let y = self.scroll_y;
        self.dispatch(&HostEvent::Scroll { y })
    }

    /// Resize the viewport. Section heights are in screens, so the document reflows with it.
    pub fn resize(&mut self, viewport: Viewport) -> ScrollSeqResult<()> {
        let viewport = Viewport::new(viewport.width, viewport.height)?;
        self.viewport = viewport;
        self.dispatch(&HostEvent::Resize(viewport))?;
        let y = self.scroll_y.clamp(0.0, self.max_scroll());
        if y != self.scroll_y {
            self.scroll_y = y;
            self.dispatch(&HostEvent::Scroll { y })?;
        }
        Ok(())
    }

    /// Advance every spring by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> ScrollSeqResult<()> {
        self.dispatch(&HostEvent::Tick { dt })
    }

    /// `true` when every section's smoothed progress is at rest.
    pub fn is_settled(&self) -> bool {
        self.sections
            .iter()
            .all(|s| s.sequence().progress().is_settled())
    }

    /// Tick by `dt` until settled or `max_ticks` ran out. Returns the ticks used.
    pub fn settle(&mut self, dt: f64, max_ticks: usize) -> ScrollSeqResult<usize> {
        for n in 0..max_ticks {
            if self.is_settled() {
                return Ok(n);
            }
            self.tick(dt)?;
        }
        Ok(max_ticks)
    }

    /// Complete up to `max` queued frame requests through `loader`. Fetch or decode failures
    /// mark the frame failed. Returns how many requests were completed.
    pub fn pump_loads<L: FrameLoader + ?Sized>(
        &mut self,
        loader: &mut L,
        max: usize,
    ) -> ScrollSeqResult<usize> {
        let mut done = 0;
        while done < max {
            let Some(req) = self.queue.pop_front() else {
                break;
            };
            let event = match loader.fetch(&req.url).and_then(|bytes| decode_frame(&bytes)) {
                Ok(frame) => HostEvent::FrameLoaded {
                    section: req.section,
                    index: req.index,
                    frame: Arc::new(frame),
                },
                Err(e) => {
                    tracing::warn!(url = %req.url, error = %e, "frame load failed");
                    HostEvent::FrameFailed {
                        section: req.section,
                        index: req.index,
                    }
                }
            };
            self.dispatch(&event)?;
            done += 1;
        }
        Ok(done)
    }

    /// Complete every queued frame request.
    pub fn load_all<L: FrameLoader + ?Sized>(&mut self, loader: &mut L) -> ScrollSeqResult<usize> {
        self.pump_loads(loader, usize::MAX)
    }

    /// Compose the visible part of the document: each section's sticky canvas with its progress
    /// bar along the top edge, over black.
    pub fn compose(&self) -> FrameRGBA {
        let mut out = FrameRGBA::filled(self.viewport, [0, 0, 0, 255]);
        let vh = self.viewport.height_f64();
        let y = self.scroll_y;
        for section in &self.sections {
            let container = section.container();
            let Some(dst_y) = sticky_offset(container.top, container.height, vh, y) else {
                continue;
            };
            let surface = section.sequence().surface();
            let dst_y = round_half_up(dst_y) as i64;
            blit_over(
                &mut out,
                surface.pixels(),
                surface.width(),
                surface.height(),
                dst_y,
            );

            let style = section.overlay();
            let bar_w =
                round_half_up(style.progress_bar_scale_x.clamp(0.0, 1.0) * f64::from(out.width));
            fill_rect_over(
                &mut out,
                0,
                dst_y,
                bar_w as i64,
                dst_y + i64::from(PROGRESS_BAR_HEIGHT),
                Rgba8Premul::white(),
            );
        }
        out
    }

    /// Snapshot of every section's state.
    pub fn report(&self) -> PageReport {
        PageReport {
            viewport: self.viewport,
            scroll_y: self.scroll_y,
            document_height: self.document_height(),
            sections: self.sections.iter().map(SectionReport::from_section).collect(),
        }
    }
}

/// Viewport offset of a sticky canvas inside a section spanning `[top, top + height)`, or `None`
/// when the section is out of view.
///
/// The canvas sticks to the viewport top while the section covers the viewport and scrolls with
/// the section otherwise.
pub fn sticky_offset(top: f64, height: f64, viewport_height: f64, scroll_y: f64) -> Option<f64> {
    if top + height <= scroll_y || top >= scroll_y + viewport_height {
        return None;
    }
    let pinned_until = (top + height - viewport_height).max(top);
    Some(scroll_y.clamp(top, pinned_until) - scroll_y)
}

/// Serializable state of a [`Page`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageReport {
    /// Viewport size.
    pub viewport: Viewport,
    /// Document scroll offset.
    pub scroll_y: f64,
    /// Document height in pixels.
    pub document_height: f64,
    /// Per-section state, top to bottom.
    pub sections: Vec<SectionReport>,
}

/// Serializable state of one section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionReport {
    /// Section name.
    pub name: String,
    /// Title text.
    pub title: String,
    /// Whether the section is subscribed.
    pub running: bool,
    /// Raw tracker progress.
    pub raw_progress: f64,
    /// Smoothed progress.
    pub progress: f64,
    /// Whether the spring is at rest.
    pub settled: bool,
    /// Frame selected by smoothed progress.
    pub frame_index: Option<usize>,
    /// Frame last painted.
    pub drawn_index: Option<usize>,
    /// Number of frames.
    pub frame_count: usize,
    /// Frames loaded.
    pub loaded: usize,
    /// Frames that failed.
    pub failed: usize,
    /// Overlay values.
    pub overlay: OverlayStyle,
}

impl SectionReport {
    fn from_section(s: &Section) -> Self {
        let seq = s.sequence();
        let frames = seq.frames();
        let progress = seq.progress().get();
        Self {
            name: s.name().to_string(),
            title: s.title_text().to_string(),
            running: s.lifecycle() == Lifecycle::Running,
            raw_progress: seq.tracker().progress(),
            progress,
            settled: seq.progress().is_settled(),
            frame_index: select_index(progress, frames.len()),
            drawn_index: seq.drawn_index(),
            frame_count: frames.len(),
            loaded: frames.loaded_count(),
            failed: frames.failed_count(),
            overlay: s.overlay(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/document.rs"]
mod tests;
