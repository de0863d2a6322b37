use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{XfadeError, XfadeResult};
use crate::transition::synth::TransitionUnit;

/// Present capability: draws one unit to the visible output, synchronously.
///
/// Ordering contract: within one playback run, `present` is called with the initial unit first
/// and then with every unit in sequence order, each exactly once.
pub trait Presenter {
    /// Draw `unit` at `canvas` resolution.
    fn present(&mut self, unit: &TransitionUnit, canvas: Canvas) -> XfadeResult<()>;
}

fn ensure_canvas(unit: &TransitionUnit, canvas: Canvas) -> XfadeResult<()> {
    if unit.canvas() != canvas {
        return Err(XfadeError::DimensionMismatch {
            from: unit.canvas(),
            to: canvas,
        });
    }
    Ok(())
}

/// In-memory presenter for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryPresenter {
    canvas: Option<Canvas>,
    pub(crate) presented: Vec<TransitionUnit>,
}

impl InMemoryPresenter {
    /// Create a new in-memory presenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolution of the most recent `present` call, if any.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Borrow the presented units, in presentation order.
    pub fn presented(&self) -> &[TransitionUnit] {
        &self.presented
    }

    /// Forget everything presented so far.
    pub fn clear(&mut self) {
        self.presented.clear();
        self.canvas = None;
    }
}

impl Presenter for InMemoryPresenter {
    fn present(&mut self, unit: &TransitionUnit, canvas: Canvas) -> XfadeResult<()> {
        ensure_canvas(unit, canvas)?;
        self.canvas = Some(canvas);
        self.presented.push(unit.clone());
        Ok(())
    }
}

/// Writes every presented unit as a numbered PNG (`frame_00000.png`, `frame_00001.png`, ...).
///
/// Blend units are composited before encoding.
#[derive(Debug)]
pub struct PngSequencePresenter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequencePresenter {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> XfadeResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in presentation order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Presenter for PngSequencePresenter {
    fn present(&mut self, unit: &TransitionUnit, canvas: Canvas) -> XfadeResult<()> {
        ensure_canvas(unit, canvas)?;
        let pixels = unit.to_pixels()?;
        let path = self
            .dir
            .join(format!("frame_{:05}.png", self.written.len()));

        image::save_buffer_with_format(
            &path,
            pixels.data(),
            canvas.width,
            canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;

        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/sink.rs"]
mod tests;
