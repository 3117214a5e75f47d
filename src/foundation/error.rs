/// Convenience result type used across Sketchify.
pub type SketchResult<T> = Result<T, SketchError>;

/// Top-level error taxonomy used by the conversion APIs.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// Invalid user-provided settings, selections or records.
    #[error("validation error: {0}")]
    Validation(String),

    /// Input bytes could not be decoded into a bitmap.
    #[error("decode error: {0}")]
    Decode(String),

    /// A bitmap could not be encoded into an output format.
    #[error("encode error: {0}")]
    Encode(String),

    /// A drawing surface could not be acquired for the requested dimensions.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors while rasterizing or compositing pixel buffers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SketchError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SketchError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SketchError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`SketchError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SketchError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
