use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::source::ImageSource,
    foundation::error::{XfadeError, XfadeResult},
};

/// Converts raw file bytes into an [`ImageSource`].
pub trait ImageDecoder {
    /// Decode one encoded image.
    fn decode(&self, bytes: &[u8]) -> XfadeResult<ImageSource>;
}

/// Decoder backed by the `image` crate (PNG, JPEG, GIF, WebP, ... as enabled there).
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> XfadeResult<ImageSource> {
        decode_image(bytes)
    }
}

/// Decode encoded bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> XfadeResult<ImageSource> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    ImageSource::from_rgba8(width, height, rgba.into_raw())
}

/// Decode every input in order, one after the other.
///
/// Input `i + 1` is not touched until input `i` has produced its source. The first failure aborts
/// the whole batch with [`XfadeError::Decode`] carrying the failing position.
#[tracing::instrument(skip_all, fields(inputs = inputs.len()))]
pub fn load_sources<D, B>(decoder: &D, inputs: &[B]) -> XfadeResult<Vec<ImageSource>>
where
    D: ImageDecoder + ?Sized,
    B: AsRef<[u8]>,
{
    if inputs.is_empty() {
        return Err(XfadeError::EmptyInput);
    }

    let mut out = Vec::with_capacity(inputs.len());
    for (index, bytes) in inputs.iter().enumerate() {
        let src = decoder.decode(bytes.as_ref()).map_err(|e| match e {
            XfadeError::Decode { reason, .. } => XfadeError::decode(index, reason),
            other => XfadeError::decode(index, format!("{other:#}")),
        })?;
        tracing::debug!(index, width = src.width, height = src.height, "decoded input");
        out.push(src);
    }
    Ok(out)
}

/// Read input files into memory, preserving order.
pub fn read_inputs(paths: &[PathBuf]) -> XfadeResult<Vec<Vec<u8>>> {
    paths.iter().map(|p| read_input(p)).collect()
}

fn read_input(path: &Path) -> XfadeResult<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
