//! Canvas surfaces, frame selection, cover-fit drawing and view composition.

pub(crate) mod compose;
pub(crate) mod cover;
pub(crate) mod draw;
pub(crate) mod select;
pub(crate) mod surface;
