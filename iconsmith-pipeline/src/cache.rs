//! Pass-scoped raster cache.

use std::collections::BTreeMap;

use iconsmith_core::RasterImage;

use crate::error::GenerateError;

/// Rasters produced during one pass, keyed by pixel size.
///
/// Owned by the pass that fills it and dropped with it, so nothing leaks into
/// the next pass.
#[derive(Debug, Default, Clone)]
pub struct RasterCache {
    images: BTreeMap<u32, RasterImage>,
}

impl RasterCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an image under its requested size.
    pub fn insert(&mut self, image: RasterImage) {
        self.images.insert(image.size(), image);
    }

    /// Returns the image for `size`, if rendered.
    pub fn get(&self, size: u32) -> Option<&RasterImage> {
        self.images.get(&size)
    }

    /// Returns the image for `size`, or [`GenerateError::MissingRaster`].
    pub fn require(&self, size: u32) -> Result<&RasterImage, GenerateError> {
        self.get(size).ok_or(GenerateError::MissingRaster(size))
    }

    /// Returns clones of the images for `sizes`, in the given order.
    pub fn collect(&self, sizes: &[u32]) -> Result<Vec<RasterImage>, GenerateError> {
        sizes.iter().map(|&size| self.require(size).cloned()).collect()
    }

    /// Cached sizes, ascending.
    pub fn sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.images.keys().copied()
    }

    /// Number of cached sizes.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
