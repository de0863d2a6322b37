use crate::foundation::settings::TransitionSettings;

/// How many units each segment gets, and how many segments there are.
///
/// Invariant: both counts are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Units synthesized per adjacent image pair.
    pub frames_per_segment: u32,
    /// Number of adjacent image pairs.
    pub segment_count: u32,
}

impl TransitionPlan {
    /// `frames_per_segment * segment_count`.
    pub fn total_units(self) -> u64 {
        u64::from(self.frames_per_segment) * u64::from(self.segment_count)
    }

    /// Interpolation fraction `k / frames_per_segment` for step `k` in `1..=frames_per_segment`.
    pub fn fraction(self, k: u32) -> f64 {
        f64::from(k) / f64::from(self.frames_per_segment)
    }

    /// Step indices of one segment, in presentation order.
    pub fn steps(self) -> std::ops::RangeInclusive<u32> {
        1..=self.frames_per_segment
    }
}

/// Split a transition duration across segments at a given frame duration.
///
/// `frames_per_segment = round(transition_ms / frame_ms / segment_count)`, with ties rounded to
/// even and the result clamped to at least 1. Degenerate inputs (zero segments, non-finite or
/// non-positive durations) are clamped, never rejected.
pub fn plan_transition(transition_ms: f64, frame_ms: f64, segment_count: usize) -> TransitionPlan {
    let segment_count = u32::try_from(segment_count).unwrap_or(u32::MAX).max(1);
    let per_segment = transition_ms / frame_ms / f64::from(segment_count);

    // `as` saturates and maps NaN to 0.
    let frames_per_segment = (per_segment.round_ties_even() as u32).max(1);

    TransitionPlan {
        frames_per_segment,
        segment_count,
    }
}

/// [`plan_transition`] driven by user settings.
pub fn plan_from_settings(settings: &TransitionSettings, segment_count: usize) -> TransitionPlan {
    plan_transition(
        settings.transition_duration_ms(),
        settings.frame_duration_ms(),
        segment_count,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/transition/plan.rs"]
mod tests;
