use crate::{
    animation::ease::Ease,
    foundation::error::{ScrollSeqError, ScrollSeqResult},
    foundation::math::{self, progress_between},
};

/// Interpolation contract for values driven by a progress signal.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        math::lerp(*a, *b, t)
    }
}

/// One control point of a piecewise mapping: at input `at` the output is `value`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Input position (usually smoothed progress).
    pub at: f64,
    /// Output at `at`.
    pub value: T,
    /// Easing applied toward the next keyframe.
    #[serde(default)]
    pub ease: Ease,
}

impl<T> Keyframe<T> {
    /// Linear keyframe.
    pub fn new(at: f64, value: T) -> Self {
        Self {
            at,
            value,
            ease: Ease::Linear,
        }
    }
}

/// Piecewise mapping from an input scalar to an output value over sorted keyframes.
///
/// Outside the keyframe span the output holds the end values.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes<T> {
    keys: Vec<Keyframe<T>>, // sorted by `at`
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Build a validated mapping from keyframes sorted by input.
    pub fn new(keys: Vec<Keyframe<T>>) -> ScrollSeqResult<Self> {
        if keys.is_empty() {
            return Err(ScrollSeqError::validation(
                "keyframes must contain at least one key",
            ));
        }
        if keys.iter().any(|k| !k.at.is_finite()) {
            return Err(ScrollSeqError::validation("keyframe inputs must be finite"));
        }
        for k in &keys {
            k.ease.validate()?;
        }
        if !keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(ScrollSeqError::validation(
                "keyframe inputs must be sorted ascending",
            ));
        }
        Ok(Self { keys })
    }

    /// Build a linear mapping from parallel input and output lists.
    pub fn linear(inputs: &[f64], outputs: &[T]) -> ScrollSeqResult<Self> {
        if inputs.len() != outputs.len() {
            return Err(ScrollSeqError::validation(format!(
                "keyframe input and output lengths differ ({} vs {})",
                inputs.len(),
                outputs.len()
            )));
        }
        Self::new(
            inputs
                .iter()
                .zip(outputs)
                .map(|(&at, value)| Keyframe::new(at, value.clone()))
                .collect(),
        )
    }

    /// Borrow the keyframes.
    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    /// Sample the mapping at input `x`.
    pub fn sample(&self, x: f64) -> T {
        let first = &self.keys[0];
        let last = &self.keys[self.keys.len() - 1];
        if self.keys.len() == 1 {
            return first.value.clone();
        }

        if x <= first.at {
            return first.value.clone();
        }
        if x >= last.at {
            return last.value.clone();
        }

        let idx = self
            .keys
            .partition_point(|k| k.at <= x)
            .clamp(1, self.keys.len() - 1);
        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        if b.at == a.at {
            return b.value.clone();
        }

        let t = progress_between(a.at, b.at, x);
        T::lerp(&a.value, &b.value, a.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
