//! Easing, keyframe interpolation and spring smoothing.

pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod smoother;
pub(crate) mod spring;
