// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `iconsmith` Core
//!
//! Core types, models, and traits shared by every `iconsmith` crate.
//!
//! - Domain models (vector sources, raster images, favicon variants)
//! - Error types
//! - The [`Rasterizer`] trait implemented by the raster backend
//!
//! ## Key Types
//!
//! ### Inputs
//! - [`VectorSource`] - Raw SVG markup supplied by the caller
//! - [`VariantSpec`] - One requested output file (size, format, color)
//!
//! ### Outputs
//! - [`RasterImage`] - PNG payload of an exact `size × size` grid
//! - [`GeneratedAsset`] - A finished `(filename, bytes)` pair

pub mod error;
pub mod models;
pub mod traits;

pub use error::{CoreError, RasterError};

pub use models::{
    // Inputs
    AssetFormat,
    ColorVariant,
    VariantSpec,
    VectorSource,
    // Outputs
    GeneratedAsset,
    RasterImage,
    MAX_RASTER_SIZE,
};

pub use traits::Rasterizer;
