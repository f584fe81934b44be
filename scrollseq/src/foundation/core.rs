use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

pub use kurbo::Affine;

/// Absolute 0-based index of an output frame produced by a playback session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ScrollSeqResult<Self> {
        if den == 0 {
            return Err(ScrollSeqError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ScrollSeqError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds. This is the spring tick `dt` during playback.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert seconds to frame count using ceil semantics.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Viewport dimensions in pixels.
///
/// Canvas surfaces are always sized to the viewport, so this type doubles as the surface size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a validated, non-empty viewport.
    pub fn new(width: u32, height: u32) -> ScrollSeqResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrollSeqError::validation("viewport must be non-empty"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(ScrollSeqError::validation(
                "viewport dimensions must fit in u16",
            ));
        }
        Ok(Self { width, height })
    }

    /// Height as `f64`, the unit of `vh`-based section heights.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Parse `WIDTHxHEIGHT` (for example `1280x720`).
impl std::str::FromStr for Viewport {
    type Err = ScrollSeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| ScrollSeqError::validation(format!("viewport '{s}' is not WxH")))?;
        let w: u32 = w
            .trim()
            .parse()
            .map_err(|e| ScrollSeqError::validation(format!("viewport width '{w}': {e}")))?;
        let h: u32 = h
            .trim()
            .parse()
            .map_err(|e| ScrollSeqError::validation(format!("viewport height '{h}': {e}")))?;
        Self::new(w, h)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque white, the progress bar color.
    pub fn white() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
