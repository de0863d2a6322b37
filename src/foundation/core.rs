use crate::foundation::error::{XfadeError, XfadeResult};

/// Pixel resolution shared by every buffer in one prepared sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of bytes an RGBA8 buffer of this size occupies, `None` on overflow.
    pub fn byte_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
    }

    /// Whether either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight (non-premultiplied) RGBA8 pixels, row-major, tightly packed.
///
/// Invariant: `data.len() == width * height * 4`. Buffers are immutable once constructed; the
/// pipeline shares them behind `Arc` instead of copying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, rejecting lengths that disagree with the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> XfadeResult<Self> {
        let canvas = Canvas { width, height };
        let expected = canvas
            .byte_len()
            .ok_or_else(|| XfadeError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(XfadeError::validation(format!(
                "pixel buffer for {width}x{height} must hold {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A fully transparent buffer (all channels zero).
    pub fn transparent(canvas: Canvas) -> XfadeResult<Self> {
        let len = canvas
            .byte_len()
            .ok_or_else(|| XfadeError::validation("pixel buffer size overflow"))?;
        Self::new(canvas.width, canvas.height, vec![0; len])
    }

    /// A buffer where every pixel is `rgba`.
    pub fn filled(canvas: Canvas, rgba: [u8; 4]) -> XfadeResult<Self> {
        let len = canvas
            .byte_len()
            .ok_or_else(|| XfadeError::validation("pixel buffer size overflow"))?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Self::new(canvas.width, canvas.height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resolution of this buffer.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Borrow the raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the raw RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of the pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}
