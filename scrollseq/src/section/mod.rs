//! Sections: the scroll-scrubbed canvas, its overlay and its lifecycle.

pub(crate) mod composer;
pub(crate) mod overlay;
pub(crate) mod sequence;
