//! Pipeline error types.

use iconsmith_core::{CoreError, RasterError};
use iconsmith_ico::IcoError;
use thiserror::Error;

// ============================================================================
// Generate Error
// ============================================================================

/// Error type for a generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Rasterizing one of the required sizes failed. Aborts the pass.
    #[error("Rasterization failed at {size}px: {source}")]
    Raster {
        /// The size being rendered.
        size: u32,
        /// The underlying rasterizer error.
        #[source]
        source: RasterError,
    },

    /// Building the ICO container failed.
    #[error("Icon container failed: {0}")]
    Container(#[from] IcoError),

    /// A variant needs a size that was never rasterized.
    #[error("No raster cached for {0}px")]
    MissingRaster(u32),

    /// The variant set or generator settings are invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] CoreError),

    /// A newer pass superseded this one, or the caller cancelled it.
    #[error("Generation cancelled")]
    Cancelled,
}

impl GenerateError {
    /// Returns true if the pass was cancelled rather than failing.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenerateError::Cancelled)
    }

    /// Returns the rasterizer error, if this failure came from rendering.
    pub fn raster_error(&self) -> Option<&RasterError> {
        match self {
            GenerateError::Raster { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Config Error
// ============================================================================

/// Error type for loading and saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}
