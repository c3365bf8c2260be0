//! Domain models for iconsmith.
//!
//! ## Submodules
//!
//! - [`source`] - Vector input (VectorSource)
//! - [`raster`] - Raster output (RasterImage)
//! - [`variant`] - Requested outputs (VariantSpec, AssetFormat, ColorVariant)
//! - [`asset`] - Finished outputs (GeneratedAsset)

mod asset;
mod raster;
mod source;
mod variant;

pub use asset::GeneratedAsset;
pub use raster::RasterImage;
pub use source::VectorSource;
pub use variant::{AssetFormat, ColorVariant, VariantSpec, MAX_RASTER_SIZE};
#[cfg(test)]
mod serde_tests;
