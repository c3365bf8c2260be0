//! Raster image output.

use std::fmt;
use std::sync::Arc;

/// A PNG encoding of an exact `size × size` pixel grid with alpha.
///
/// Immutable once produced. The payload is shared, so handing the same image
/// to both the asset list and the icon container encoder does not copy it.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    size: u32,
    bytes: Arc<[u8]>,
}

impl RasterImage {
    /// Creates a raster image from its requested size and PNG payload.
    pub fn new(size: u32, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            size,
            bytes: bytes.into(),
        }
    }

    /// The size this image was requested at (width == height).
    ///
    /// This is metadata tracked alongside the payload. The container encoder
    /// reads the authoritative width from the PNG header instead.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The encoded PNG payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A shared handle to the payload.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("size", &self.size)
            .field("len", &self.bytes.len())
            .finish()
    }
}
