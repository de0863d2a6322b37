use std::sync::Arc;

use crate::{
    assets::decode::{ImageDecoder, load_sources},
    assets::source::ImageSource,
    foundation::error::{XfadeError, XfadeResult},
    playback::scheduler::{
        Generation, PlaybackHandle, PlaybackReport, PlaybackScheduler, PlaybackState, TickOutcome,
    },
    playback::ticker::TickSource,
    present::sink::Presenter,
    transition::sequence::{SequenceOpts, TransitionSequence, build_sequence},
};

/// Owns one prepare/play cycle: the options, the current sequence and the playback state.
///
/// Every `prepare` replaces the sequence wholesale and invalidates all outstanding playback
/// handles, so a stale run can never present units of the new sequence.
pub struct TransitionSession {
    opts: SequenceOpts,
    sequence: Option<Arc<TransitionSequence>>,
    scheduler: PlaybackScheduler,
}

impl TransitionSession {
    /// Create a session with validated options and nothing prepared.
    pub fn new(opts: SequenceOpts) -> XfadeResult<Self> {
        opts.settings.validate()?;
        Ok(Self {
            opts,
            sequence: None,
            scheduler: PlaybackScheduler::new(),
        })
    }

    /// Options used by the next `prepare`.
    pub fn opts(&self) -> &SequenceOpts {
        &self.opts
    }

    /// Replace the options; the current sequence is untouched until the next `prepare`.
    pub fn set_opts(&mut self, opts: SequenceOpts) -> XfadeResult<()> {
        opts.settings.validate()?;
        self.opts = opts;
        Ok(())
    }

    /// The prepared sequence, if the last `prepare` succeeded.
    pub fn sequence(&self) -> Option<&Arc<TransitionSequence>> {
        self.sequence.as_ref()
    }

    /// Current playback state.
    pub fn playback_state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    /// Latest playback generation.
    pub fn generation(&self) -> Generation {
        self.scheduler.generation()
    }

    /// Number of playback runs that reached their last unit.
    pub fn completed_runs(&self) -> u64 {
        self.scheduler.completed_runs()
    }

    /// Decode `inputs` in order and build a new sequence from them.
    ///
    /// The previous sequence and any running playback are dropped first. On failure the session
    /// is left with nothing prepared and playback cannot start.
    #[tracing::instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn prepare<D, B>(
        &mut self,
        decoder: &D,
        inputs: &[B],
    ) -> XfadeResult<Arc<TransitionSequence>>
    where
        D: ImageDecoder + ?Sized,
        B: AsRef<[u8]>,
    {
        self.detach();
        let sources = load_sources(decoder, inputs)?;
        self.build(&sources)
    }

    /// Build a new sequence from already-decoded sources.
    pub fn prepare_sources(
        &mut self,
        sources: &[ImageSource],
    ) -> XfadeResult<Arc<TransitionSequence>> {
        self.detach();
        self.build(sources)
    }

    /// Expects playback to be detached already.
    fn build(&mut self, sources: &[ImageSource]) -> XfadeResult<Arc<TransitionSequence>> {
        let seq = Arc::new(build_sequence(sources, &self.opts)?);
        tracing::info!(
            units = seq.len(),
            frames_per_segment = seq.plan.frames_per_segment,
            segments = seq.plan.segment_count,
            width = seq.canvas.width,
            height = seq.canvas.height,
            "sequence prepared"
        );
        self.sequence = Some(Arc::clone(&seq));
        Ok(seq)
    }

    /// Present the initial unit and arm playback of the prepared sequence.
    pub fn start_playback(
        &mut self,
        presenter: &mut dyn Presenter,
    ) -> XfadeResult<PlaybackHandle> {
        let seq = self.prepared()?;
        self.scheduler.start(seq, presenter)
    }

    /// Advance the run `handle` belongs to by one unit.
    pub fn tick(
        &mut self,
        handle: PlaybackHandle,
        presenter: &mut dyn Presenter,
    ) -> XfadeResult<TickOutcome> {
        self.scheduler.tick(handle, presenter)
    }

    /// Play the prepared sequence to the end, one unit per tick.
    pub fn play(
        &mut self,
        ticks: &mut dyn TickSource,
        presenter: &mut dyn Presenter,
    ) -> XfadeResult<PlaybackReport> {
        let seq = self.prepared()?;
        self.scheduler.run(seq, ticks, presenter)
    }

    /// Stop playback without a completion.
    pub fn stop(&mut self) -> bool {
        self.scheduler.stop()
    }

    fn prepared(&self) -> XfadeResult<Arc<TransitionSequence>> {
        self.sequence
            .clone()
            .ok_or_else(|| XfadeError::playback("no prepared sequence"))
    }

    fn detach(&mut self) {
        self.scheduler.stop();
        self.sequence = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/transition_session.rs"]
mod tests;
