use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

/// Easing curve applied to a keyframe segment before interpolation.
///
/// The named curves follow the usual CSS definitions; `CubicBezier` takes the four control
/// coordinates `[x1, y1, x2, y2]` of a `cubic-bezier()` timing function.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Quarter-circle acceleration.
    CircIn,
    /// Quarter-circle deceleration.
    CircOut,
    /// Custom `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier([f64; 4]),
}

impl Ease {
    /// Reject bezier control points whose x coordinates leave `[0, 1]`.
    pub fn validate(self) -> ScrollSeqResult<()> {
        if let Self::CubicBezier(points) = self {
            if points.iter().any(|v| !v.is_finite()) {
                return Err(ScrollSeqError::validation(
                    "cubic-bezier control points must be finite",
                ));
            }
            let [x1, _, x2, _] = points;
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(ScrollSeqError::validation(format!(
                    "cubic-bezier x coordinates must be in [0, 1] (got {x1}, {x2})"
                )));
            }
        }
        Ok(())
    }

    /// Map normalized segment time `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Self::CircOut => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
            Self::CubicBezier([x1, y1, x2, y2]) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 32;

fn bezier_axis(t: f64, a1: f64, a2: f64) -> f64 {
    // B(t) for control values 0, a1, a2, 1.
    (((1.0 - 3.0 * a2 + 3.0 * a1) * t + (3.0 * a2 - 6.0 * a1)) * t + 3.0 * a1) * t
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x1 == y1 && x2 == y2 {
        return x;
    }
    if x <= 0.0 || x >= 1.0 {
        return x;
    }

    // Binary subdivision on the x curve; x(t) is monotonic for x1, x2 in [0, 1].
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut t = x;
    for _ in 0..SUBDIVISION_MAX_ITERATIONS {
        t = lo + (hi - lo) / 2.0;
        let dx = bezier_axis(t, x1, x2) - x;
        if dx.abs() <= SUBDIVISION_PRECISION {
            break;
        }
        if dx > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
    }
    bezier_axis(t, y1, y2)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
