use std::sync::Arc;

use crate::{
    foundation::error::{XfadeError, XfadeResult},
    playback::ticker::TickSource,
    present::sink::Presenter,
    transition::sequence::TransitionSequence,
};

/// Monotonic run identifier. Every start/stop moves it forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Ticket for driving one playback run.
///
/// A handle from an older generation is stale: ticks carrying it do nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackHandle {
    generation: Generation,
}

impl PlaybackHandle {
    /// Run this handle belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Observable scheduler state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No run in progress.
    Idle,
    /// A run is presenting units.
    Running {
        /// Run identifier.
        generation: Generation,
        /// Index of the unit the next tick presents.
        next: usize,
    },
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Unit `index` was presented; more remain.
    Presented {
        /// Position in the sequence's units.
        index: usize,
    },
    /// Unit `index` was the last one; the run completed and the scheduler is idle.
    Finished {
        /// Position in the sequence's units.
        index: usize,
    },
    /// The handle belongs to a superseded or finished run; nothing happened.
    Stale,
}

/// Summary of a run driven by [`PlaybackScheduler::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Run identifier.
    pub generation: Generation,
    /// Units presented after the initial one.
    pub presented: usize,
    /// Whether the run reached its last unit.
    pub completed: bool,
}

struct ActiveRun {
    generation: Generation,
    sequence: Arc<TransitionSequence>,
    next: usize,
}

/// Presents a prepared sequence one unit per tick.
///
/// `Idle -> start -> Running -> (last unit presented) -> Idle`. At most one run exists at a
/// time; starting again replaces the current run without a completion for the replaced one.
#[derive(Default)]
pub struct PlaybackScheduler {
    generation: Generation,
    run: Option<ActiveRun>,
    completed_runs: u64,
}

impl PlaybackScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        match &self.run {
            None => PlaybackState::Idle,
            Some(run) => PlaybackState::Running {
                generation: run.generation,
                next: run.next,
            },
        }
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Number of runs that reached their last unit.
    pub fn completed_runs(&self) -> u64 {
        self.completed_runs
    }

    /// Abandon the current run (if any) and invalidate every outstanding handle.
    ///
    /// Returns whether a run was in progress. No completion is emitted for it.
    pub fn stop(&mut self) -> bool {
        self.generation = Generation(self.generation.0.saturating_add(1));
        match self.run.take() {
            Some(run) => {
                tracing::debug!(
                    generation = run.generation.0,
                    next = run.next,
                    "playback stopped"
                );
                true
            }
            None => false,
        }
    }

    /// Present the initial unit now and arm a new run for `sequence`.
    ///
    /// Any run already in progress is stopped first.
    pub fn start(
        &mut self,
        sequence: Arc<TransitionSequence>,
        presenter: &mut dyn Presenter,
    ) -> XfadeResult<PlaybackHandle> {
        self.stop();
        let generation = self.generation;

        presenter.present(&sequence.initial, sequence.canvas)?;
        tracing::debug!(
            generation = generation.0,
            units = sequence.len(),
            "playback started"
        );

        if sequence.is_empty() {
            self.complete(generation);
        } else {
            self.run = Some(ActiveRun {
                generation,
                sequence,
                next: 0,
            });
        }
        Ok(PlaybackHandle { generation })
    }

    /// Present the next unit of the run `handle` belongs to.
    ///
    /// A failing presenter aborts the run without a completion.
    pub fn tick(
        &mut self,
        handle: PlaybackHandle,
        presenter: &mut dyn Presenter,
    ) -> XfadeResult<TickOutcome> {
        let Some(run) = self.run.as_mut() else {
            tracing::debug!(generation = handle.generation.0, "tick while idle ignored");
            return Ok(TickOutcome::Stale);
        };
        if run.generation != handle.generation {
            tracing::debug!(
                generation = handle.generation.0,
                current = run.generation.0,
                "stale tick ignored"
            );
            return Ok(TickOutcome::Stale);
        }

        let index = run.next;
        let unit = run
            .sequence
            .units
            .get(index)
            .ok_or_else(|| XfadeError::playback("run advanced past its last unit"))?;

        if let Err(e) = presenter.present(unit, run.sequence.canvas) {
            tracing::warn!(generation = handle.generation.0, index, "present failed: {e}");
            self.run = None;
            return Err(e);
        }
        run.next += 1;

        if run.next == run.sequence.units.len() {
            self.run = None;
            self.complete(handle.generation);
            return Ok(TickOutcome::Finished { index });
        }
        Ok(TickOutcome::Presented { index })
    }

    /// Start `sequence` and present one unit per tick until the run ends.
    ///
    /// Errors from the tick source or the presenter abort the run.
    pub fn run(
        &mut self,
        sequence: Arc<TransitionSequence>,
        ticks: &mut dyn TickSource,
        presenter: &mut dyn Presenter,
    ) -> XfadeResult<PlaybackReport> {
        let handle = self.start(sequence, presenter)?;
        let mut report = PlaybackReport {
            generation: handle.generation,
            presented: 0,
            completed: !self.is_running(),
        };

        while self.is_running() {
            if let Err(e) = ticks.wait_tick() {
                self.stop();
                return Err(e);
            }
            match self.tick(handle, presenter)? {
                TickOutcome::Presented { .. } => report.presented += 1,
                TickOutcome::Finished { .. } => {
                    report.presented += 1;
                    report.completed = true;
                    break;
                }
                TickOutcome::Stale => break,
            }
        }
        Ok(report)
    }

    fn complete(&mut self, generation: Generation) {
        self.completed_runs = self.completed_runs.saturating_add(1);
        tracing::info!(generation = generation.0, "finished");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
