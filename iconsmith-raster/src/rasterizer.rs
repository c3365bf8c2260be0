//! resvg-backed [`Rasterizer`] implementation.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use iconsmith_core::{RasterError, RasterImage, Rasterizer, VectorSource, MAX_RASTER_SIZE};
use resvg::usvg;
use tracing::{debug, instrument};

use crate::encode::encode_png;
use crate::normalize::normalize_svg;
use crate::options::RasterOptions;
use crate::render::render_pixmap;

// ============================================================================
// SVG Rasterizer
// ============================================================================

/// Rasterizes SVG sources with resvg.
///
/// Rendering is CPU-bound, so the async entry point moves each render onto
/// tokio's blocking pool. The normalized markup and pixmap live only inside
/// that closure and are dropped on every exit path.
#[derive(Clone)]
pub struct SvgRasterizer {
    options: Arc<usvg::Options<'static>>,
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRasterizer {
    /// Creates a rasterizer with default settings.
    pub fn new() -> Self {
        Self::with_options(&RasterOptions::default())
    }

    /// Creates a rasterizer with custom settings.
    pub fn with_options(options: &RasterOptions) -> Self {
        Self {
            options: Arc::new(options.to_usvg_options()),
        }
    }

    /// Rasterizes on the current thread.
    pub fn rasterize_blocking(&self, source: &str, size: u32) -> Result<RasterImage, RasterError> {
        rasterize_with(source, size, &self.options).map(|png| RasterImage::new(size, png))
    }
}

#[async_trait]
impl Rasterizer for SvgRasterizer {
    fn name(&self) -> &str {
        "resvg"
    }

    #[instrument(skip(self, source), fields(source_len = source.len()))]
    async fn rasterize(&self, source: &VectorSource, size: u32) -> Result<RasterImage, RasterError> {
        check_size(size)?;

        let start = Instant::now();
        let source = source.clone();
        let options = Arc::clone(&self.options);

        let png = tokio::task::spawn_blocking(move || rasterize_with(source.as_str(), size, &options))
            .await
            .map_err(|e| RasterError::Render(format!("render task failed: {e}")))??;

        debug!(size, bytes = png.len(), duration = ?start.elapsed(), "Rasterized");
        Ok(RasterImage::new(size, png))
    }
}

fn check_size(size: u32) -> Result<(), RasterError> {
    if size == 0 || size > MAX_RASTER_SIZE {
        return Err(RasterError::InvalidSize(size));
    }
    Ok(())
}

fn rasterize_with(
    source: &str,
    size: u32,
    options: &usvg::Options<'_>,
) -> Result<Vec<u8>, RasterError> {
    check_size(size)?;
    let normalized = normalize_svg(source, size)?;
    let pixmap = render_pixmap(&normalized, size, options)?;
    encode_png(&pixmap)
}

// ============================================================================
// Tests
// ============================================================================
