use std::sync::Arc;

use crate::assets::frames::Frame;
use crate::foundation::core::Viewport;

/// Something the host environment reports to the page.
#[derive(Clone, Debug)]
pub enum HostEvent {
    /// Document scrolled to `y` pixels.
    Scroll {
        /// Document scroll offset.
        y: f64,
    },
    /// Viewport changed size.
    Resize(Viewport),
    /// Scheduler tick of `dt` seconds (drives springs).
    Tick {
        /// Seconds since the previous tick.
        dt: f64,
    },
    /// A frame request completed.
    FrameLoaded {
        /// Owning section.
        section: usize,
        /// Position in that section's sequence.
        index: usize,
        /// Decoded frame.
        frame: Arc<Frame>,
    },
    /// A frame request failed. The position stays blank.
    FrameFailed {
        /// Owning section.
        section: usize,
        /// Position in that section's sequence.
        index: usize,
    },
}

impl HostEvent {
    /// Listener category this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Resize(_) => EventKind::Resize,
            Self::Tick { .. } => EventKind::Tick,
            Self::FrameLoaded { .. } | Self::FrameFailed { .. } => EventKind::FrameLoad,
        }
    }
}

/// Listener categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Document scroll.
    Scroll,
    /// Viewport resize.
    Resize,
    /// Scheduler tick.
    Tick,
    /// Frame load completion.
    FrameLoad,
}

/// Handle for one registration on an [`EventBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of which targets listen to which event kinds.
///
/// The bus stores no callbacks: dispatchers ask it for the targets of an event and route the
/// event to them. Removing a registration is immediate, so an event dispatched afterwards never
/// reaches the old target.
#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, usize)>,
}

impl EventBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` for events of `kind`.
    pub fn subscribe(&mut self, kind: EventKind, target: usize) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, target));
        id
    }

    /// Remove a registration. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _, _)| *l != id);
        self.listeners.len() != before
    }

    /// Targets registered for `kind`, in registration order, without duplicates.
    pub fn targets(&self, kind: EventKind) -> Vec<usize> {
        let mut out = Vec::new();
        for &(_, k, target) in &self.listeners {
            if k == kind && !out.contains(&target) {
                out.push(target);
            }
        }
        out
    }

    /// `true` if `target` listens to `kind`.
    pub fn is_subscribed(&self, kind: EventKind, target: usize) -> bool {
        self.listeners
            .iter()
            .any(|&(_, k, t)| k == kind && t == target)
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/events.rs"]
mod tests;
