//! scrollseq scrubs image sequences with the document scroll position.
//!
//! A page is a stack of tall sections. Each section pins a viewport-sized canvas while the
//! document scrolls through it and paints one frame of its image sequence per position:
//!
//! 1. **Track**: document scroll offset -> raw progress in `[0, 1]` ([`ScrollTracker`])
//! 2. **Smooth**: raw progress -> spring-smoothed progress, advanced once per tick ([`Smoother`])
//! 3. **Select**: smoothed progress -> frame index `round(N * p)` clamped to the sequence
//! 4. **Draw**: frame -> canvas with cover-fit scaling ([`CoverFitDrawer`] or a custom
//!    [`DrawFrame`])
//!
//! The same smoothed progress drives the title fade/scale and the progress bar of each section
//! ([`OverlayStyle`]).
//!
//! Everything is single-threaded and event-driven: the host feeds [`HostEvent`]s (scroll, resize,
//! tick, frame-load completion) into a [`Page`], which routes them through an [`EventBus`] to the
//! sections that subscribed in [`Section::start`]. [`ScrollSession`] replaces the host with a
//! fixed-rate clock and a scripted [`ScrollPath`] for offline rendering.
//!
//! Pixels are **premultiplied RGBA8** end-to-end; sinks convert at the boundary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod encode;
mod foundation;
mod host;
mod page;
mod render;
mod scroll;
mod section;
mod session;

pub use animation::ease::Ease;
pub use animation::interpolate::{Keyframe, Keyframes, Lerp};
pub use animation::smoother::{Smoother, Subscription};
pub use animation::spring::{Spring, SpringConfig};
pub use assets::decode::decode_frame;
pub use assets::frames::{Frame, FrameSequence, FrameSlot};
pub use assets::loader::{FrameLoader, FsLoader, MemoryLoader, normalize_rel_path};
pub use assets::template::UrlTemplate;
pub use encode::png::{PngSequenceSink, write_png};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Affine, Fps, FrameIndex, Rgba8Premul, Viewport};
pub use foundation::error::{ScrollSeqError, ScrollSeqResult};
pub use host::events::{EventBus, EventKind, HostEvent, ListenerId};
pub use page::config::{CurvePoint, FramesConfig, PageConfig, SectionConfig, TitleConfig};
pub use page::document::{PROGRESS_BAR_HEIGHT, Page, PageReport, SectionReport, sticky_offset};
pub use render::cover::{CoverFit, CoverFitDrawer, cover_fit};
pub use render::draw::DrawFrame;
pub use render::select::select_index;
pub use render::surface::{FrameRGBA, Surface};
pub use scroll::offset::{Edge, Intersection, ScrollOffset};
pub use scroll::tracker::{ContainerGeometry, ScrollOptions, ScrollTracker};
pub use section::composer::{FrameRequest, Lifecycle, Section, SectionParts};
pub use section::overlay::{OverlayStyle, TitleEffect, showcase_breakpoints};
pub use section::sequence::{ScrollSequence, SequenceConfig};
pub use session::scroll_session::{
    DEFAULT_MAX_SETTLE_TICKS, PlaybackStats, ScrollPath, ScrollSession,
};
