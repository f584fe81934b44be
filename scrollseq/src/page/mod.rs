//! Page configuration and the stacked-section document.

pub(crate) mod config;
pub(crate) mod document;
