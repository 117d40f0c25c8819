/// Convenience result type used across spansort.
pub type SortResult<T> = Result<T, SortError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SortError {
    /// Invalid user-provided configuration or mismatched inputs.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image or mask data could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// WAV input is malformed or unsupported.
    #[error("audio error: {0}")]
    Audio(String),

    /// Output frames or files could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SortError {
    /// Build a [`SortError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SortError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SortError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`SortError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
