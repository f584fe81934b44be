use std::sync::Arc;

use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

/// Decoded, immutable raster frame in premultiplied RGBA8.
///
/// The pixels are stored as a `vello_cpu` pixmap so the cover-fit drawer can paint them without a
/// per-draw conversion.
#[derive(Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Frame {
    /// Build a frame from tightly packed premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: &[u8]) -> ScrollSeqResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ScrollSeqError::asset("frame width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ScrollSeqError::asset("frame height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(ScrollSeqError::asset("frame must be non-empty"));
        }
        if bytes.len()
            != (width as usize)
                .saturating_mul(height as usize)
                .saturating_mul(4)
        {
            return Err(ScrollSeqError::asset("frame byte len mismatch"));
        }

        let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
            (width as usize) * (height as usize),
        );
        for px in bytes.chunks_exact(4) {
            pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
                px[0], px[1], px[2], px[3],
            ]));
        }
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
        Ok(Self {
            width,
            height,
            pixmap: Arc::new(pixmap),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(self.pixmap.clone()),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }
}

/// Load state of one position in a [`FrameSequence`].
#[derive(Clone, Debug, Default)]
pub enum FrameSlot {
    /// Requested but not yet delivered.
    #[default]
    Pending,
    /// Decoded and drawable.
    Ready(Arc<Frame>),
    /// Fetch or decode failed; the position draws nothing.
    Failed,
}

/// Fixed-length, ordered frame sequence whose slots fill in as loads complete.
#[derive(Clone, Debug, Default)]
pub struct FrameSequence {
    slots: Vec<FrameSlot>,
}

impl FrameSequence {
    /// Sequence of `len` pending slots.
    pub fn pending(len: usize) -> Self {
        Self {
            slots: vec![FrameSlot::Pending; len],
        }
    }

    /// Sequence where every frame is already decoded.
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            slots: frames
                .into_iter()
                .map(|f| FrameSlot::Ready(Arc::new(f)))
                .collect(),
        }
    }

    /// Number of positions (loaded or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` for a zero-length sequence.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Borrow the slot at `index`.
    pub fn slot(&self, index: usize) -> Option<&FrameSlot> {
        self.slots.get(index)
    }

    /// Return the frame at `index` if it is loaded.
    pub fn get(&self, index: usize) -> Option<&Arc<Frame>> {
        match self.slots.get(index) {
            Some(FrameSlot::Ready(frame)) => Some(frame),
            _ => None,
        }
    }

    /// Number of slots that hold a decoded frame.
    pub fn loaded_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, FrameSlot::Ready(_)))
            .count()
    }

    /// Number of slots whose load failed.
    pub fn failed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, FrameSlot::Failed))
            .count()
    }

    /// Store a decoded frame. Out-of-range indices are rejected.
    pub fn set_loaded(&mut self, index: usize, frame: Arc<Frame>) -> ScrollSeqResult<()> {
        let slot = self.slot_mut(index)?;
        *slot = FrameSlot::Ready(frame);
        Ok(())
    }

    /// Mark a position as permanently failed.
    pub fn set_failed(&mut self, index: usize) -> ScrollSeqResult<()> {
        let slot = self.slot_mut(index)?;
        *slot = FrameSlot::Failed;
        Ok(())
    }

    /// Drop every decoded frame, returning all slots to pending.
    pub fn release(&mut self) {
        for slot in &mut self.slots {
            *slot = FrameSlot::Pending;
        }
    }

    fn slot_mut(&mut self, index: usize) -> ScrollSeqResult<&mut FrameSlot> {
        let len = self.slots.len();
        self.slots.get_mut(index).ok_or_else(|| {
            ScrollSeqError::asset(format!("frame index {index} out of range (len {len})"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frames.rs"]
mod tests;
