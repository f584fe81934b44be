//! Offline playback of scripted scroll paths.

pub(crate) mod scroll_session;
