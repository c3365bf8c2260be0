// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # iconsmith Raster
//!
//! Turns SVG markup into PNGs of an exact pixel size.
//!
//! Rasterizing happens in three steps:
//!
//! - [`normalize`] - rewrites the root `<svg>` so its content fills the frame
//! - [`render`] - draws the normalized markup with resvg into a tiny-skia pixmap
//! - [`encode`] - un-premultiplies the pixmap and writes a PNG
//!
//! [`SvgRasterizer`] ties them together behind the async
//! [`iconsmith_core::Rasterizer`] trait.
//!
//! ## Example
//!
//! ```ignore
//! use iconsmith_core::{Rasterizer, VectorSource};
//! use iconsmith_raster::SvgRasterizer;
//!
//! let rasterizer = SvgRasterizer::new();
//! let source = VectorSource::from(r#"<svg width="24" height="24">...</svg>"#);
//! let image = rasterizer.rasterize(&source, 64).await?;
//! assert_eq!(image.size(), 64);
//! ```

pub mod encode;
pub mod normalize;
pub mod options;
pub mod rasterizer;
pub mod render;

pub use encode::{encode_png, encode_rgba};
pub use normalize::normalize_svg;
pub use options::RasterOptions;
pub use rasterizer::SvgRasterizer;
pub use render::render_pixmap;
