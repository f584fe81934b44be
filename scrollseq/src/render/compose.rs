use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::mul_div255_u8;
use crate::render::surface::FrameRGBA;

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels with an extra opacity multiplier.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite `src` (premultiplied, `src_w × src_h`) over `dst` with its top-left at
/// `(0, dst_y)`. Rows falling outside `dst` are skipped.
pub(crate) fn blit_over(dst: &mut FrameRGBA, src: &[u8], src_w: u32, src_h: u32, dst_y: i64) {
    let w = src_w.min(dst.width) as usize;
    for sy in 0..src_h as i64 {
        let dy = dst_y + sy;
        if dy < 0 || dy >= i64::from(dst.height) {
            continue;
        }
        let s_row = (sy as usize) * (src_w as usize) * 4;
        let d_row = (dy as usize) * (dst.width as usize) * 4;
        for x in 0..w {
            let s = s_row + x * 4;
            let d = d_row + x * 4;
            let out = over(
                [dst.data[d], dst.data[d + 1], dst.data[d + 2], dst.data[d + 3]],
                [src[s], src[s + 1], src[s + 2], src[s + 3]],
                1.0,
            );
            dst.data[d..d + 4].copy_from_slice(&out);
        }
    }
}

/// Fill the clipped rectangle `[x0, x1) × [y0, y1)` with `color` using source-over.
pub(crate) fn fill_rect_over(
    dst: &mut FrameRGBA,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    color: Rgba8Premul,
) {
    let cx0 = x0.clamp(0, i64::from(dst.width)) as usize;
    let cx1 = x1.clamp(0, i64::from(dst.width)) as usize;
    let cy0 = y0.clamp(0, i64::from(dst.height)) as usize;
    let cy1 = y1.clamp(0, i64::from(dst.height)) as usize;
    let src = color.to_array();
    for y in cy0..cy1 {
        let row = y * (dst.width as usize) * 4;
        for x in cx0..cx1 {
            let d = row + x * 4;
            let out = over(
                [dst.data[d], dst.data[d + 1], dst.data[d + 2], dst.data[d + 3]],
                src,
                1.0,
            );
            dst.data[d..d + 4].copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
