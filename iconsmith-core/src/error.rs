//! Core error types for `iconsmith`.

use thiserror::Error;

/// Core error type for model validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid variant or generator configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type for turning a vector source into a raster image.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The source could not be parsed as SVG markup.
    #[error("Invalid SVG: {0}")]
    InvalidSource(String),

    /// Requested output size is zero or above [`crate::MAX_RASTER_SIZE`].
    #[error("Invalid raster size: {0}")]
    InvalidSize(u32),

    /// No drawing surface could be obtained. Fatal for the whole pass.
    #[error("Rasterizer unavailable: {0}")]
    RasterizerUnavailable(String),

    /// Well-formed markup that failed to decode or draw.
    #[error("Render failed: {0}")]
    Render(String),

    /// The rendered surface could not be encoded as PNG.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl RasterError {
    /// Returns true when no further rendering can succeed in this environment.
    pub fn is_environment_fatal(&self) -> bool {
        matches!(self, RasterError::RasterizerUnavailable(_))
    }
}
