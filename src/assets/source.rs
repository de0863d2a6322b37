use std::sync::Arc;

use image::imageops::FilterType;

use crate::foundation::core::{Canvas, PixelBuffer};
use crate::foundation::error::{XfadeError, XfadeResult};

/// A decoded input image at its natural size.
///
/// Read-only once decoded; the bytes are shared so sampling never copies the source twice.
#[derive(Clone, Debug)]
pub struct ImageSource {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Straight RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

impl ImageSource {
    /// Wrap already-decoded straight RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> XfadeResult<Self> {
        let src = Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        };
        src.validate()?;
        Ok(src)
    }

    /// Natural resolution.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Check that the bytes cover exactly `width * height` pixels.
    pub fn validate(&self) -> XfadeResult<()> {
        let expected = self
            .canvas()
            .byte_len()
            .ok_or_else(|| XfadeError::validation("image size overflow"))?;
        if self.rgba8.len() != expected {
            return Err(XfadeError::validation(format!(
                "image {}x{} must hold {expected} bytes, got {}",
                self.width,
                self.height,
                self.rgba8.len()
            )));
        }
        Ok(())
    }
}

/// Turns an [`ImageSource`] into a pixel buffer of an arbitrary target size.
pub trait PixelSampler {
    /// Produce a buffer of exactly `target` resolution from `src`.
    fn sample(&self, src: &ImageSource, target: Canvas) -> XfadeResult<PixelBuffer>;
}

/// Resolution equalization policy, applied uniformly to every image of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Copy at natural size into the top-left corner; uncovered area stays transparent.
    #[default]
    Raster,
    /// Resample to fill the target exactly, ignoring aspect ratio.
    Stretch,
}

impl PixelSampler for FitMode {
    fn sample(&self, src: &ImageSource, target: Canvas) -> XfadeResult<PixelBuffer> {
        if target.is_empty() {
            return Err(XfadeError::validation("sample target must be non-empty"));
        }
        src.validate()?;
        match self {
            FitMode::Raster => sample_raster(src, target),
            FitMode::Stretch => sample_stretch(src, target),
        }
    }
}

fn sample_raster(src: &ImageSource, target: Canvas) -> XfadeResult<PixelBuffer> {
    let len = target
        .byte_len()
        .ok_or_else(|| XfadeError::validation("sample target size overflow"))?;
    let mut out = vec![0u8; len];

    let copy_w = src.width.min(target.width) as usize;
    let copy_h = src.height.min(target.height) as usize;
    let src_stride = src.width as usize * 4;
    let dst_stride = target.width as usize * 4;
    let row_bytes = copy_w * 4;

    for y in 0..copy_h {
        let s = y * src_stride;
        let d = y * dst_stride;
        out[d..d + row_bytes].copy_from_slice(&src.rgba8[s..s + row_bytes]);
    }

    PixelBuffer::new(target.width, target.height, out)
}

fn sample_stretch(src: &ImageSource, target: Canvas) -> XfadeResult<PixelBuffer> {
    if src.canvas() == target {
        return PixelBuffer::new(target.width, target.height, src.rgba8.as_ref().clone());
    }
    if src.canvas().is_empty() {
        return PixelBuffer::transparent(target);
    }

    let img = image::RgbaImage::from_raw(src.width, src.height, src.rgba8.as_ref().clone())
        .ok_or_else(|| XfadeError::validation("image bytes do not match its dimensions"))?;
    let scaled = image::imageops::resize(&img, target.width, target.height, FilterType::Triangle);
    PixelBuffer::new(target.width, target.height, scaled.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
