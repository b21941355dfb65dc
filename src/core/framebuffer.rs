use crate::core::color::BYTES_PER_PIXEL;
use crate::error::{RenderError, Result};

/// A BGRA32 color target with an explicit row stride.
///
/// All writes are bounds-checked; anything outside `width x height` is dropped.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// Bytes per row. At least `width * 4`.
    pub stride: usize,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    /// Creates a tightly packed buffer, cleared to transparent black.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            stride,
            bytes: vec![0; stride * height],
        }
    }

    /// Creates a buffer whose rows are padded to `stride` bytes.
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Result<Self> {
        if stride < width * BYTES_PER_PIXEL {
            return Err(RenderError::InvalidStride { stride, width });
        }
        Ok(Self {
            width,
            height,
            stride,
            bytes: vec![0; stride * height],
        })
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * BYTES_PER_PIXEL
    }

    /// Writes one opaque pixel. Out-of-bounds coordinates are a no-op.
    ///
    /// The rasterizer writes through `row_mut` on pre-clamped spans instead.
    #[cfg(test)]
    pub(crate) fn write_pixel(&mut self, x: usize, y: usize, color: nalgebra::Vector3<f32>) {
        if self.in_bounds(x, y) {
            let offset = self.offset(x, y);
            let bgra = crate::core::color::to_bgra(color);
            self.bytes[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&bgra);
        }
    }

    /// The visible bytes of row `y` (stride padding excluded).
    ///
    /// Callers that already clamped their span to `0..width` can index this
    /// slice directly instead of paying a bounds test per pixel.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.bytes[start..start + self.width * BYTES_PER_PIXEL]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let offset = self.offset(x, y);
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.bytes[offset..offset + BYTES_PER_PIXEL]);
        Some(out)
    }

    /// Raw bytes including row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Per-pixel nearest depth for one frame.
///
/// Every cell starts at `f32::INFINITY`, so the first candidate always passes.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    pub width: usize,
    pub height: usize,
    values: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![f32::INFINITY; width * height],
        }
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.values[y * self.width + x])
        } else {
            None
        }
    }

    /// Depth test with "closer or equal wins": the candidate passes unless it is
    /// strictly farther than the stored value. A passing candidate is stored.
    #[cfg(test)]
    pub(crate) fn test_and_set(&mut self, x: usize, y: usize, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let width = self.width;
        Self::test_cell(&mut self.values[y * width + x], depth)
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.width;
        &mut self.values[start..start + self.width]
    }

    #[inline(always)]
    pub(crate) fn test_cell(stored: &mut f32, depth: f32) -> bool {
        if !depth.is_finite() || depth > *stored {
            return false;
        }
        *stored = depth;
        true
    }
}
