use crate::animation::interpolate::Keyframes;
use crate::foundation::error::ScrollSeqResult;

/// Title fade/scale curves keyed by smoothed progress.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleEffect {
    opacity: Keyframes<f64>,
    scale: Keyframes<f64>,
}

impl TitleEffect {
    /// Custom curves.
    pub fn new(opacity: Keyframes<f64>, scale: Keyframes<f64>) -> Self {
        Self { opacity, scale }
    }

    /// Fade in, then out while growing, over breakpoints `[0, h/16, h/8]` for a section `h`
    /// viewport heights tall (a 400vh section uses `[0, 0.25, 0.5]`, a 200vh section
    /// `[0, 0.125, 0.25]`).
    pub fn showcase(height_screens: f64) -> ScrollSeqResult<Self> {
        let breakpoints = showcase_breakpoints(height_screens);
        Ok(Self {
            opacity: Keyframes::linear(&breakpoints, &[0.0, 1.0, 0.0])?,
            scale: Keyframes::linear(&breakpoints, &[0.95, 1.0, 1.2])?,
        })
    }

    /// Style at `progress`. The progress bar tracks `progress` directly.
    pub fn style(&self, progress: f64) -> OverlayStyle {
        OverlayStyle {
            title_opacity: self.opacity.sample(progress),
            title_scale: self.scale.sample(progress),
            progress_bar_scale_x: progress,
        }
    }

    /// Opacity curve.
    pub fn opacity(&self) -> &Keyframes<f64> {
        &self.opacity
    }

    /// Scale curve.
    pub fn scale(&self) -> &Keyframes<f64> {
        &self.scale
    }
}

/// Breakpoints of the showcase title curves for a section `height_screens` tall.
pub fn showcase_breakpoints(height_screens: f64) -> [f64; 3] {
    [0.0, height_screens / 16.0, height_screens / 8.0]
}

/// Overlay values derived from smoothed progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OverlayStyle {
    /// Title opacity in `[0, 1]`.
    pub title_opacity: f64,
    /// Uniform title scale.
    pub title_scale: f64,
    /// Horizontal scale of the progress bar (its origin is the left edge).
    pub progress_bar_scale_x: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/section/overlay.rs"]
mod tests;
