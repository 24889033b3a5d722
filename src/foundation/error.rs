/// Convenience result type used across padframe.
pub type PadframeResult<T> = Result<T, PadframeError>;

/// Top-level error taxonomy used by the compositor, batch and packaging APIs.
///
/// `Decode`, `Render` and `Encode` are scoped to a single (file, format) pair; the batch
/// orchestrator records them on the file and keeps going.
#[derive(thiserror::Error, Debug)]
pub enum PadframeError {
    /// Invalid user-provided configuration or queue operation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Source bytes could not be decoded as a raster image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Canvas allocation or pixel compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// JPEG encoding of a composited canvas failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Archive writer failed to produce the combined buffer.
    #[error("archive error: {0}")]
    Archive(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PadframeError {
    /// Build a [`PadframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PadframeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PadframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PadframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PadframeError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Build a [`PadframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
