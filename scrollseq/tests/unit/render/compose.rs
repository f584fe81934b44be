use super::*;
use crate::foundation::core::Viewport;

#[test]
fn over_opaque_replaces_and_transparent_keeps() {
    assert_eq!(over([1, 2, 3, 255], [9, 8, 7, 255], 1.0), [9, 8, 7, 255]);
    assert_eq!(over([1, 2, 3, 255], [9, 8, 7, 0], 1.0), [1, 2, 3, 255]);
    assert_eq!(over([1, 2, 3, 255], [9, 8, 7, 255], 0.0), [1, 2, 3, 255]);
}

#[test]
fn over_half_alpha_blends() {
    let out = over([0, 0, 0, 255], [128, 128, 128, 128], 1.0);
    assert_eq!(out, [128, 128, 128, 255]);
}

#[test]
fn blit_clips_rows_outside_destination() {
    let mut dst = FrameRGBA::filled(Viewport::new(2, 3).unwrap(), [0, 0, 0, 255]);
    let src = [[255, 0, 0, 255]; 4].concat(); // 2x2 red
    blit_over(&mut dst, &src, 2, 2, -1);
    assert_eq!(dst.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 0), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));

    blit_over(&mut dst, &src, 2, 2, 2);
    assert_eq!(dst.pixel(1, 2), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 255]));
}

#[test]
fn fill_rect_is_clipped() {
    let mut dst = FrameRGBA::filled(Viewport::new(4, 4).unwrap(), [0, 0, 0, 255]);
    fill_rect_over(&mut dst, -5, -5, 2, 1, Rgba8Premul::white());
    assert_eq!(dst.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(1, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(2, 0), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));

    fill_rect_over(&mut dst, 10, 10, 20, 20, Rgba8Premul::white());
    assert_eq!(dst.pixel(3, 3), Some([0, 0, 0, 255]));
}
