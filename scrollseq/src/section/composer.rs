use crate::assets::frames::FrameSlot;
use crate::assets::template::UrlTemplate;
use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};
use crate::host::events::{EventBus, EventKind, HostEvent, ListenerId};
use crate::scroll::tracker::ContainerGeometry;
use crate::section::overlay::{OverlayStyle, TitleEffect};
use crate::section::sequence::{ScrollSequence, SequenceConfig};

/// Everything needed to build a [`Section`].
pub struct SectionParts {
    /// Display name, also used in logs.
    pub name: String,
    /// Title text shown over the canvas.
    pub title_text: String,
    /// Where frame `i` is fetched from.
    pub template: UrlTemplate,
    /// Section height in viewport heights.
    pub height_screens: f64,
    /// Document offset of the section top in viewport heights.
    pub top_screens: f64,
    /// Title curves.
    pub title: TitleEffect,
    /// Frames, tracking, smoothing and drawing.
    pub sequence: SequenceConfig,
}

/// Lifecycle of a [`Section`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built, not yet started.
    Idle,
    /// Subscribed to host events.
    Running,
    /// Torn down. Events are ignored.
    Stopped,
}

/// A frame fetch the host must perform for a running section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    /// Key the section was started with.
    pub section: usize,
    /// Position in the section's sequence.
    pub index: usize,
    /// Location of the encoded image.
    pub url: String,
}

/// A tall block of the page with a sticky canvas scrubbed by its own scroll progress.
pub struct Section {
    name: String,
    title_text: String,
    template: UrlTemplate,
    height_screens: f64,
    top_screens: f64,
    viewport: Viewport,
    title: TitleEffect,
    sequence: ScrollSequence,
    lifecycle: Lifecycle,
    key: Option<usize>,
    listeners: Vec<ListenerId>,
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("height_screens", &self.height_screens)
            .field("top_screens", &self.top_screens)
            .field("lifecycle", &self.lifecycle)
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl Section {
    /// Build an idle section laid out for `viewport`.
    pub fn new(parts: SectionParts, viewport: Viewport) -> ScrollSeqResult<Self> {
        if !parts.height_screens.is_finite() || parts.height_screens <= 0.0 {
            return Err(ScrollSeqError::validation(format!(
                "section '{}' height must be > 0 screens",
                parts.name
            )));
        }
        if !parts.top_screens.is_finite() || parts.top_screens < 0.0 {
            return Err(ScrollSeqError::validation(format!(
                "section '{}' top must be >= 0 screens",
                parts.name
            )));
        }
        let container = container_for(parts.top_screens, parts.height_screens, viewport)?;
        let sequence = ScrollSequence::new(parts.sequence, container, viewport)?;
        Ok(Self {
            name: parts.name,
            title_text: parts.title_text,
            template: parts.template,
            height_screens: parts.height_screens,
            top_screens: parts.top_screens,
            viewport,
            title: parts.title,
            sequence,
            lifecycle: Lifecycle::Idle,
            key: None,
            listeners: Vec::new(),
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title text.
    pub fn title_text(&self) -> &str {
        &self.title_text
    }

    /// Frame URL template.
    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// Height in viewport heights.
    pub fn height_screens(&self) -> f64 {
        self.height_screens
    }

    /// Top edge in viewport heights.
    pub fn top_screens(&self) -> f64 {
        self.top_screens
    }

    /// Document-space box for the current viewport.
    pub fn container(&self) -> ContainerGeometry {
        let vh = self.viewport.height_f64();
        ContainerGeometry {
            top: self.top_screens * vh,
            height: self.height_screens * vh,
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Scroll-scrubbed canvas.
    pub fn sequence(&self) -> &ScrollSequence {
        &self.sequence
    }

    /// Mutable canvas, for observers and custom setup.
    pub fn sequence_mut(&mut self) -> &mut ScrollSequence {
        &mut self.sequence
    }

    /// Overlay style for the current smoothed progress.
    pub fn overlay(&self) -> OverlayStyle {
        self.title.style(self.sequence.progress().get())
    }

    /// Subscribe to host events under `key`, size the canvas to the viewport and return the
    /// frames still to fetch.
    ///
    /// Starting a running section is a no-op. A stopped section can be started again; its frames
    /// were released so all of them are requested.
    #[tracing::instrument(skip(self, bus), fields(section = %self.name))]
    pub fn start(&mut self, bus: &mut EventBus, key: usize) -> ScrollSeqResult<Vec<FrameRequest>> {
        if self.lifecycle == Lifecycle::Running {
            return Ok(Vec::new());
        }
        for kind in [
            EventKind::Scroll,
            EventKind::Resize,
            EventKind::Tick,
            EventKind::FrameLoad,
        ] {
            self.listeners.push(bus.subscribe(kind, key));
        }
        self.key = Some(key);
        self.lifecycle = Lifecycle::Running;
        self.sequence.on_layout(self.container(), self.viewport)?;
        tracing::debug!(frames = self.sequence.frames().len(), "section started");

        let frames = self.sequence.frames();
        Ok((0..frames.len())
            .filter(|&i| matches!(frames.slot(i), Some(FrameSlot::Pending)))
            .map(|index| FrameRequest {
                section: key,
                index,
                url: self.template.url(index),
            })
            .collect())
    }

    /// Remove every subscription and release frames and observers.
    ///
    /// Events handed to the section afterwards are ignored, so nothing writes to the canvas.
    pub fn stop(&mut self, bus: &mut EventBus) {
        for id in self.listeners.drain(..) {
            bus.unsubscribe(id);
        }
        if self.lifecycle == Lifecycle::Running {
            tracing::debug!(section = %self.name, "section stopped");
        }
        self.sequence.release();
        self.key = None;
        self.lifecycle = Lifecycle::Stopped;
    }

    /// React to a host event. Ignored unless running.
    pub fn handle(&mut self, event: &HostEvent) -> ScrollSeqResult<()> {
        let Some(key) = self.key.filter(|_| self.lifecycle == Lifecycle::Running) else {
            return Ok(());
        };
        match event {
            HostEvent::Scroll { y } => self.sequence.on_scroll(*y),
            HostEvent::Resize(viewport) => {
                self.viewport = *viewport;
                self.sequence.on_layout(self.container(), *viewport)?;
            }
            HostEvent::Tick { dt } => {
                self.sequence.tick(*dt);
            }
            HostEvent::FrameLoaded {
                section,
                index,
                frame,
            } if *section == key => {
                self.sequence.on_frame_loaded(*index, frame.clone())?;
            }
            HostEvent::FrameFailed { section, index } if *section == key => {
                tracing::warn!(section = %self.name, index, "frame failed to load");
                self.sequence.on_frame_failed(*index)?;
            }
            HostEvent::FrameLoaded { .. } | HostEvent::FrameFailed { .. } => {}
        }
        Ok(())
    }
}

fn container_for(
    top_screens: f64,
    height_screens: f64,
    viewport: Viewport,
) -> ScrollSeqResult<ContainerGeometry> {
    let vh = viewport.height_f64();
    ContainerGeometry::new(top_screens * vh, height_screens * vh)
}

#[cfg(test)]
#[path = "../../tests/unit/section/composer.rs"]
mod tests;
