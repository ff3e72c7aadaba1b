//! Error types for scrawl-recog

use thiserror::Error;

/// Errors that can occur during recognition operations
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scrawl_core::Error),

    /// Normalization error
    #[error("normalization error: {0}")]
    Color(#[from] scrawl_color::ColorError),

    /// The input holds no ink to recognize
    #[error("empty image: no ink pixels")]
    EmptyImage,

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A glyph without a label was offered as a sample
    #[error("sample glyph has no label")]
    UnlabeledSample,

    /// Recognition was attempted without a sample base source
    #[error("no sample base configured")]
    MissingSampleBase,

    /// A sample base or dictionary loader failed
    #[error("load failed: {0}")]
    Load(String),
}

impl RecogError {
    /// True for an empty-image condition, whichever stage reported it.
    pub fn is_empty_image(&self) -> bool {
        matches!(
            self,
            RecogError::EmptyImage
                | RecogError::Core(scrawl_core::Error::EmptyImage)
                | RecogError::Color(scrawl_color::ColorError::EmptyImage)
        )
    }
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
