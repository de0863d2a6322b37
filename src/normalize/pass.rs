use std::sync::Arc;

use crate::{
    assets::source::{ImageSource, PixelSampler},
    foundation::core::{Canvas, PixelBuffer},
    foundation::error::{XfadeError, XfadeResult},
};

/// Input images brought to one shared resolution.
///
/// Always holds at least two frames: a single input is paired with itself so that downstream
/// stages see at least one segment.
#[derive(Clone, Debug)]
pub struct NormalizedImages {
    /// Shared resolution of every frame.
    pub canvas: Canvas,
    /// Frames in input order.
    pub frames: Vec<Arc<PixelBuffer>>,
}

impl NormalizedImages {
    /// Number of adjacent pairs (`frames.len() - 1`).
    pub fn segment_count(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }
}

/// Largest width and largest height across `sources`, each at least 1.
pub fn target_resolution(sources: &[ImageSource]) -> Canvas {
    let width = sources.iter().map(|s| s.width).max().unwrap_or(0).max(1);
    let height = sources.iter().map(|s| s.height).max().unwrap_or(0).max(1);
    Canvas { width, height }
}

/// Sample every source at the common target resolution with one policy.
#[tracing::instrument(skip_all, fields(sources = sources.len()))]
pub fn normalize<S>(sources: &[ImageSource], sampler: &S) -> XfadeResult<NormalizedImages>
where
    S: PixelSampler + ?Sized,
{
    if sources.is_empty() {
        return Err(XfadeError::EmptyInput);
    }

    let canvas = target_resolution(sources);
    let mut frames = Vec::with_capacity(sources.len().max(2));
    for src in sources {
        let buf = sampler.sample(src, canvas)?;
        debug_assert_eq!(buf.canvas(), canvas);
        frames.push(Arc::new(buf));
    }

    if frames.len() == 1 {
        let only = Arc::clone(&frames[0]);
        frames.push(only);
    }

    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        frames = frames.len(),
        "normalized inputs"
    );
    Ok(NormalizedImages { canvas, frames })
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
