/// Convenience result type used across subtitle-stitch.
pub type SubtitleResult<T> = Result<T, SubtitleError>;

/// Top-level error taxonomy used by the session, compositor and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum SubtitleError {
    /// The uploaded file is not an image.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// A render or export was requested before any image was uploaded.
    #[error("no image loaded: upload an image first")]
    NoImageLoaded,

    /// Export was requested while nothing is displayed.
    #[error("nothing to export: render an image first")]
    NothingToExport,

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Text layout or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SubtitleError {
    /// Build a [`SubtitleError::InvalidUpload`] value.
    pub fn invalid_upload(msg: impl Into<String>) -> Self {
        Self::InvalidUpload(msg.into())
    }

    /// Build a [`SubtitleError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SubtitleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SubtitleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
