//! Frame sinks.
//!
//! Sinks consume composed frames in playback order and are used by `ScrollSession::play`.

pub(crate) mod png;
pub(crate) mod sink;
