use crate::assets::frames::Frame;
use crate::foundation::error::ScrollSeqResult;
use crate::render::surface::Surface;

/// Paints one frame onto a surface.
///
/// The built-in implementation is [`crate::CoverFitDrawer`]. Any
/// `FnMut(&Frame, &mut Surface) -> ScrollSeqResult<()>` closure can stand in for it.
pub trait DrawFrame {
    /// Draw `frame` onto `surface`, replacing its content.
    fn draw(&mut self, frame: &Frame, surface: &mut Surface) -> ScrollSeqResult<()>;
}

impl<F> DrawFrame for F
where
    F: FnMut(&Frame, &mut Surface) -> ScrollSeqResult<()>,
{
    fn draw(&mut self, frame: &Frame, surface: &mut Surface) -> ScrollSeqResult<()> {
        self(frame, surface)
    }
}
