//! Scroll offsets and raw progress tracking.

pub(crate) mod offset;
pub(crate) mod tracker;
