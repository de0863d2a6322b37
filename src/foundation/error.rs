use crate::foundation::core::Canvas;

/// Convenience result type used across xfade.
pub type XfadeResult<T> = Result<T, XfadeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum XfadeError {
    /// Invalid user-provided settings or malformed buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Pixel interpolation was asked to blend buffers of different resolution.
    ///
    /// Unreachable downstream of normalization; seeing it means an internal invariant broke.
    #[error(
        "dimension mismatch: {}x{} vs {}x{}",
        .from.width,
        .from.height,
        .to.width,
        .to.height
    )]
    DimensionMismatch {
        /// Resolution of the segment's source buffer.
        from: Canvas,
        /// Resolution of the segment's destination buffer.
        to: Canvas,
    },

    /// No images were supplied.
    #[error("empty input: at least one image is required")]
    EmptyInput,

    /// An input could not be decoded; the whole batch is abandoned.
    #[error("decode error: input #{index}: {reason}")]
    Decode {
        /// Position of the failing input in the caller-supplied order.
        index: usize,
        /// Decoder-provided reason.
        reason: String,
    },

    /// Playback was driven in a state that does not allow it.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl XfadeError {
    /// Build a [`XfadeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`XfadeError::Decode`] value.
    pub fn decode(index: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            index,
            reason: reason.into(),
        }
    }

    /// Build a [`XfadeError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`XfadeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
