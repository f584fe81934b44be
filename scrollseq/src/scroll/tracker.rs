use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};
use crate::foundation::math::progress_between;
use crate::scroll::offset::ScrollOffset;

/// Options for a [`ScrollTracker`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    /// Start/end intersections of the tracked range.
    pub offset: ScrollOffset,
    /// Clamp progress into `[0, 1]`.
    pub clamp: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            offset: ScrollOffset::ALL,
            clamp: true,
        }
    }
}

/// Document-space box of the tracked container, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    /// Document y of the container's top edge.
    pub top: f64,
    /// Container height.
    pub height: f64,
}

impl ContainerGeometry {
    /// Validated geometry.
    pub fn new(top: f64, height: f64) -> ScrollSeqResult<Self> {
        if !top.is_finite() || !height.is_finite() || height < 0.0 {
            return Err(ScrollSeqError::validation(
                "container geometry must be finite with height >= 0",
            ));
        }
        Ok(Self { top, height })
    }
}

/// Raw scroll progress of one container.
///
/// The tracker is fed scroll and resize observations and recomputes progress from the latest of
/// each; it holds no timing state.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    options: ScrollOptions,
    container: ContainerGeometry,
    viewport_height: f64,
    scroll_y: f64,
    progress: f64,
}

impl ScrollTracker {
    /// Tracker for `container` inside a viewport `viewport_height` pixels tall.
    pub fn new(
        options: ScrollOptions,
        container: ContainerGeometry,
        viewport_height: f64,
    ) -> Self {
        let mut t = Self {
            options,
            container,
            viewport_height,
            scroll_y: 0.0,
            progress: 0.0,
        };
        t.progress = t.compute();
        t
    }

    /// Tracker configuration.
    pub fn options(&self) -> ScrollOptions {
        self.options
    }

    /// Latest raw progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Document scroll positions where progress is 0 and 1.
    pub fn range(&self) -> (f64, f64) {
        let ContainerGeometry { top, height } = self.container;
        let vh = self.viewport_height;
        (
            self.options.offset.start.scroll_position(top, height, vh),
            self.options.offset.end.scroll_position(top, height, vh),
        )
    }

    /// Scroll position at which raw progress equals `p` (unclamped inverse of the mapping).
    pub fn scroll_for_progress(&self, p: f64) -> f64 {
        let (start, end) = self.range();
        start + (end - start) * p
    }

    /// Observe a document scroll position. Returns the new raw progress.
    pub fn on_scroll(&mut self, scroll_y: f64) -> f64 {
        self.scroll_y = scroll_y;
        self.progress = self.compute();
        self.progress
    }

    /// Observe a layout change (viewport resize or container reflow). Returns the new raw progress.
    pub fn on_layout(&mut self, container: ContainerGeometry, viewport_height: f64) -> f64 {
        self.container = container;
        self.viewport_height = viewport_height;
        self.progress = self.compute();
        self.progress
    }

    fn compute(&self) -> f64 {
        let (start, end) = self.range();
        let p = if start == end {
            if self.scroll_y >= start { 1.0 } else { 0.0 }
        } else {
            progress_between(start, end, self.scroll_y)
        };
        if self.options.clamp {
            p.clamp(0.0, 1.0)
        } else {
            p
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
