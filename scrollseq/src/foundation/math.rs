/// Round to the nearest integer with ties going toward positive infinity.
///
/// `f64::round` sends ties away from zero, which differs for negative halves (`-0.5 -> -1`).
/// Frame selection uses half-up rounding so that transient negative progress lands on `0`.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fraction of `x` between `a` and `b`. Returns `0` for an empty span.
pub(crate) fn progress_between(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span == 0.0 { 0.0 } else { (x - a) / span }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
