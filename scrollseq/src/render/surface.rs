use crate::foundation::core::Viewport;
use crate::foundation::error::ScrollSeqResult;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag keeps that explicit at API
/// boundaries such as PNG sinks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Opaque frame filled with `rgba` (premultiplied).
    pub fn filled(viewport: Viewport, rgba: [u8; 4]) -> Self {
        let data = std::iter::repeat_n(rgba, (viewport.width as usize) * (viewport.height as usize))
            .flatten()
            .collect();
        Self {
            width: viewport.width,
            height: viewport.height,
            data,
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Convert to straight alpha in place (no-op when already straight).
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }
}

/// Canvas backing store sized to the viewport.
///
/// Like a browser canvas, resizing reallocates (and therefore clears) the backing store. Every
/// pixel mutation bumps a write counter so callers can assert that nothing drew after teardown.
pub struct Surface {
    viewport: Viewport,
    pixmap: vello_cpu::Pixmap,
    writes: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("viewport", &self.viewport)
            .field("writes", &self.writes)
            .finish()
    }
}

impl Surface {
    /// Transparent surface of `viewport` size.
    pub fn new(viewport: Viewport) -> ScrollSeqResult<Self> {
        let viewport = Viewport::new(viewport.width, viewport.height)?;
        Ok(Self {
            viewport,
            pixmap: vello_cpu::Pixmap::new(viewport.width as u16, viewport.height as u16),
            writes: 0,
        })
    }

    /// Current pixel size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    /// Reallocate to `viewport`, clearing all content. No-op if the size is unchanged.
    pub fn resize(&mut self, viewport: Viewport) -> ScrollSeqResult<bool> {
        let viewport = Viewport::new(viewport.width, viewport.height)?;
        if viewport == self.viewport {
            return Ok(false);
        }
        self.viewport = viewport;
        self.pixmap = vello_cpu::Pixmap::new(viewport.width as u16, viewport.height as u16);
        self.writes += 1;
        Ok(true)
    }

    /// Clear every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.writes += 1;
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Mutable pixels for custom drawers. Counts as a write.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        self.writes += 1;
        self.pixmap.data_as_u8_slice_mut()
    }

    /// Number of mutations so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Copy out the current content.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: self.pixels().to_vec(),
            premultiplied: true,
        }
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        self.writes += 1;
        &mut self.pixmap
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
