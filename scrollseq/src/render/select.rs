use crate::foundation::math::round_half_up;

/// Map progress to a frame position: `clamp(round(len × progress), 0, len − 1)`.
///
/// Returns `None` for an empty sequence. Non-finite progress selects the first frame.
pub fn select_index(progress: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let max = (len - 1) as f64;
    let raw = round_half_up(len as f64 * progress);
    if !raw.is_finite() {
        return Some(if raw == f64::INFINITY { len - 1 } else { 0 });
    }
    Some(raw.clamp(0.0, max) as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/render/select.rs"]
mod tests;
