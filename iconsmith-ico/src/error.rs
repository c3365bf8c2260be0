//! ICO error types.

use thiserror::Error;

/// Error type for building or reading an icon container.
#[derive(Debug, Error)]
pub enum IcoError {
    /// No images were supplied.
    #[error("Cannot build an icon container from zero images")]
    EmptyInput,

    /// A payload is too short to hold the PNG header width field.
    #[error("Cannot read dimensions of image {index}: payload is {len} bytes, need at least {needed}")]
    UnreadableDimensions {
        /// Position of the image in the input.
        index: usize,
        /// Actual payload length.
        len: usize,
        /// Minimum length required.
        needed: usize,
    },

    /// The count field is 16 bits wide.
    #[error("Too many images for an icon container: {0}")]
    TooManyImages(usize),

    /// Offsets and lengths are 32 bits wide.
    #[error("Icon container would exceed 4 GiB ({0} bytes)")]
    PayloadTooLarge(u64),

    /// The bytes being read are not a well-formed ICO directory.
    #[error("Malformed icon container: {0}")]
    Malformed(String),
}
