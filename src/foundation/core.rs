use crate::foundation::error::{SubtitleError, SubtitleResult};

/// Integer pixel rectangle, used for strip source/destination regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StripRect {
    /// Left edge.
    pub x: u32,
    /// Top edge. May be negative for source rects that start above the image.
    pub y: i64,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl StripRect {
    /// Construct a rect from its origin and size.
    pub fn new(x: u32, y: i64, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        self.y + i64::from(self.h)
    }
}

/// Straight (non-premultiplied) RGBA8 canvas produced by a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRaster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major, tightly packed RGBA8.
    pub data: Vec<u8>,
}

impl OutputRaster {
    /// Allocate a fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> SubtitleResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SubtitleError::validation("raster size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Borrow the rows `y0..y1` as one contiguous slice.
    pub fn rows(&self, y0: u32, y1: u32) -> &[u8] {
        let stride = self.stride();
        &self.data[y0 as usize * stride..y1 as usize * stride]
    }

    /// Read one pixel. Returns `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
