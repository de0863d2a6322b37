use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{XfadeError, XfadeResult};

/// User-facing transition configuration.
///
/// Missing JSON fields fall back to [`TransitionSettings::default`] (1 second at 60 Hz).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Total duration of the whole transition run, in seconds.
    pub transition_duration_secs: f64,
    /// Nominal display rate the frames are planned for, in hertz.
    pub frame_rate_hz: f64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            transition_duration_secs: 1.0,
            frame_rate_hz: 60.0,
        }
    }
}

impl TransitionSettings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json_str(s: &str) -> XfadeResult<Self> {
        let settings: Self =
            serde_json::from_str(s).map_err(|e| XfadeError::serde(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings JSON file.
    pub fn from_json_file(path: &Path) -> XfadeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Both values must be finite and strictly positive.
    pub fn validate(&self) -> XfadeResult<()> {
        if !self.transition_duration_secs.is_finite() || self.transition_duration_secs <= 0.0 {
            return Err(XfadeError::validation(
                "transition_duration_secs must be finite and > 0",
            ));
        }
        if !self.frame_rate_hz.is_finite() || self.frame_rate_hz <= 0.0 {
            return Err(XfadeError::validation(
                "frame_rate_hz must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Transition duration in milliseconds.
    pub fn transition_duration_ms(&self) -> f64 {
        self.transition_duration_secs * 1000.0
    }

    /// Duration of one display frame in milliseconds (`1000 / hz`).
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.frame_rate_hz
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;
