//! Trait definitions for iconsmith.

use async_trait::async_trait;

use crate::error::RasterError;
use crate::models::{RasterImage, VectorSource};

/// Turns vector markup into a PNG of an exact pixel size.
///
/// Implementors are responsible for:
/// - Normalizing the source so its content fills the full frame
/// - Rendering into a `size × size` surface
/// - Encoding the surface as PNG with alpha
///
/// The returned image's PNG header must declare `size` as its width, since the
/// icon container encoder recovers dimensions from those bytes.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Rasterizes `source` into a `size × size` PNG.
    async fn rasterize(&self, source: &VectorSource, size: u32) -> Result<RasterImage, RasterError>;
}
