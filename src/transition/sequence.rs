use std::sync::Arc;

use crate::{
    assets::source::{FitMode, ImageSource},
    foundation::core::Canvas,
    foundation::error::{XfadeError, XfadeResult},
    foundation::settings::TransitionSettings,
    normalize::pass::{NormalizedImages, normalize},
    transition::plan::{TransitionPlan, plan_from_settings},
    transition::synth::{SynthMode, TransitionUnit, synthesize_segment},
};

/// Options controlling how a sequence is built.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SequenceOpts {
    /// Duration and frame rate.
    pub settings: TransitionSettings,
    /// Pixel frames or deferred blend pairs.
    pub mode: SynthMode,
    /// Resolution equalization policy.
    pub fit: FitMode,
    /// Synthesize the frames of each segment on the rayon pool.
    pub parallel: bool,
}

/// Every presentable step of one prepared run, fully materialized before playback.
///
/// Immutable once built. A new preparation produces a new sequence instead of editing this one.
#[derive(Clone, Debug)]
pub struct TransitionSequence {
    /// Shared resolution of every unit.
    pub canvas: Canvas,
    /// Segment/step layout the units were built from.
    pub plan: TransitionPlan,
    /// Shown before any unit plays: the first normalized image, unmodified.
    pub initial: TransitionUnit,
    /// Units in segment order, ascending step within each segment.
    pub units: Vec<TransitionUnit>,
}

impl TransitionSequence {
    /// Number of units after the initial one.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether there are no units after the initial one.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Normalize `sources` and synthesize the whole transition.
#[tracing::instrument(skip(sources), fields(sources = sources.len()))]
pub fn build_sequence(
    sources: &[ImageSource],
    opts: &SequenceOpts,
) -> XfadeResult<TransitionSequence> {
    opts.settings.validate()?;
    if sources.is_empty() {
        return Err(XfadeError::EmptyInput);
    }
    let norm = normalize(sources, &opts.fit)?;
    build_from_normalized(&norm, opts)
}

/// Synthesize the whole transition for already-normalized images.
pub fn build_from_normalized(
    norm: &NormalizedImages,
    opts: &SequenceOpts,
) -> XfadeResult<TransitionSequence> {
    let first = norm.frames.first().ok_or(XfadeError::EmptyInput)?;
    if norm.segment_count() == 0 {
        return Err(XfadeError::validation(
            "normalized images must form at least one segment",
        ));
    }

    let plan = plan_from_settings(&opts.settings, norm.segment_count());
    let total = usize::try_from(plan.total_units())
        .map_err(|_| XfadeError::validation("transition has too many units"))?;

    let mut units = Vec::with_capacity(total);
    for (i, pair) in norm.frames.windows(2).enumerate() {
        let segment = synthesize_segment(opts.mode, &pair[0], &pair[1], plan, opts.parallel)?;
        tracing::debug!(
            segment = i,
            units = segment.len(),
            mode = ?opts.mode,
            "synthesized segment"
        );
        units.extend(segment);
    }
    debug_assert_eq!(units.len(), total);

    Ok(TransitionSequence {
        canvas: norm.canvas,
        plan,
        initial: TransitionUnit::Frame(Arc::clone(first)),
        units,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transition/sequence.rs"]
mod tests;
