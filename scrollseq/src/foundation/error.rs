/// Convenience result type used across scrollseq.
pub type ScrollSeqResult<T> = Result<T, ScrollSeqError>;

/// Top-level error taxonomy used by configuration, asset and rendering APIs.
///
/// The per-frame render path is best-effort and never surfaces these to the page; they are
/// returned from construction-time APIs and logged when a draw is skipped.
#[derive(thiserror::Error, Debug)]
pub enum ScrollSeqError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while resolving, reading or decoding frame images.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while rasterizing into a surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollSeqError {
    /// Build a [`ScrollSeqError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollSeqError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScrollSeqError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrollSeqError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
