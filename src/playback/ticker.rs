use std::time::{Duration, Instant};

use crate::foundation::error::{XfadeError, XfadeResult};

/// Tick capability: blocks until the output is ready for the next visual frame.
///
/// Each call is a single-shot request; the scheduler asks again for every unit.
pub trait TickSource {
    /// Wait for the next display-ready opportunity.
    fn wait_tick(&mut self) -> XfadeResult<()>;
}

/// Never waits. Used for offline rendering and tests.
#[derive(Debug, Default)]
pub struct ImmediateTicker {
    ticks: u64,
}

impl ImmediateTicker {
    /// Create a new immediate ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks delivered so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl TickSource for ImmediateTicker {
    fn wait_tick(&mut self) -> XfadeResult<()> {
        self.ticks = self.ticks.saturating_add(1);
        Ok(())
    }
}

/// Paces ticks on the wall clock at a fixed interval.
///
/// When a tick is observed more than one interval late, the schedule re-anchors on the current
/// time instead of firing a burst of catch-up ticks.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl IntervalTicker {
    /// Tick every `interval`; the first tick arrives one interval after the first wait.
    pub fn new(interval: Duration) -> XfadeResult<Self> {
        if interval.is_zero() {
            return Err(XfadeError::validation("tick interval must be > 0"));
        }
        Ok(Self {
            interval,
            next_deadline: None,
        })
    }

    /// Tick at `hz` ticks per second.
    pub fn from_hz(hz: f64) -> XfadeResult<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(XfadeError::validation("tick rate must be finite and > 0"));
        }
        let interval = Duration::try_from_secs_f64(1.0 / hz)
            .map_err(|e| XfadeError::validation(format!("tick interval: {e}")))?;
        Self::new(interval)
    }

    /// Interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl TickSource for IntervalTicker {
    fn wait_tick(&mut self) -> XfadeResult<()> {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now + self.interval);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }

        let after = Instant::now();
        let base = if after.saturating_duration_since(deadline) > self.interval {
            after
        } else {
            deadline
        };
        self.next_deadline = Some(base + self.interval);
        Ok(())
    }
}
