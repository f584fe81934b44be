use crate::assets::frames::Frame;
use crate::foundation::core::Affine;
use crate::foundation::error::ScrollSeqResult;
use crate::render::draw::DrawFrame;
use crate::render::surface::Surface;

/// Placement of a source image scaled to cover a destination rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale factor.
    pub scale: f64,
    /// Left edge of the drawn image (may be negative when cropped).
    pub x: f64,
    /// Top edge of the drawn image (may be negative when cropped).
    pub y: f64,
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
}

impl CoverFit {
    /// Source-to-destination transform: scale about the origin, then translate.
    pub fn transform(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::scale(self.scale)
    }
}

/// Compute the cover-fit placement of a `src_w × src_h` image in a `dst_w × dst_h` rectangle.
///
/// `scale = max(dst_w / src_w, dst_h / src_h)`, centered on both axes. Returns `None` if either
/// rectangle is empty.
pub fn cover_fit(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Option<CoverFit> {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return None;
    }
    let (sw, sh) = (f64::from(src_w), f64::from(src_h));
    let (dw, dh) = (f64::from(dst_w), f64::from(dst_h));
    let scale = (dw / sw).max(dh / sh);
    let width = sw * scale;
    let height = sh * scale;
    Some(CoverFit {
        scale,
        x: (dw - width) / 2.0,
        y: (dh - height) / 2.0,
        width,
        height,
    })
}

/// Default drawer: clears the surface and paints the frame with [`cover_fit`].
///
/// Keeps one `vello_cpu` render context alive across draws and rebuilds it only when the surface
/// size changes.
#[derive(Default)]
pub struct CoverFitDrawer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl CoverFitDrawer {
    /// Fresh drawer.
    pub fn new() -> Self {
        Self::default()
    }

    fn take_ctx(&mut self, width: u16, height: u16) -> vello_cpu::RenderContext {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx
    }
}

impl std::fmt::Debug for CoverFitDrawer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverFitDrawer")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl DrawFrame for CoverFitDrawer {
    fn draw(&mut self, frame: &Frame, surface: &mut Surface) -> ScrollSeqResult<()> {
        surface.clear();
        let Some(fit) = cover_fit(
            frame.width(),
            frame.height(),
            surface.width(),
            surface.height(),
        ) else {
            return Ok(());
        };

        let mut ctx = self.take_ctx(surface.width() as u16, surface.height() as u16);
        ctx.set_transform(affine_to_cpu(fit.transform()));
        ctx.set_paint(frame.paint());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(frame.width()),
            f64::from(frame.height()),
        ));
        ctx.flush();
        ctx.render_to_pixmap(surface.pixmap_mut());
        self.ctx = Some(ctx);
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cover.rs"]
mod tests;
