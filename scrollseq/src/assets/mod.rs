//! Frame sources: URL templates, loaders, decoding and per-section frame storage.

pub(crate) mod decode;
pub(crate) mod frames;
pub(crate) mod loader;
pub(crate) mod template;
