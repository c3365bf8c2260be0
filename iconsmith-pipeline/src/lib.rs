// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # iconsmith Pipeline
//!
//! Turns a vector source into a full favicon set.
//!
//! ## Generation Pass
//!
//! - [`pass::required_sizes`] - Distinct sizes a set of variants needs
//! - [`pass::GenerationPass`] - Rasterizes each size once, then encodes the ICO
//! - [`cache::RasterCache`] - Size-keyed rasters owned by one pass
//!
//! ## Controller
//!
//! - [`generator::Generator`] - Supersedes in-flight passes and keeps the
//!   last good [`generator::FaviconSet`]
//! - [`config::GeneratorConfig`] - Persisted variants and rasterizer settings
//! - [`presets`] - Built-in light and dark variant lists
//!
//! ## Example
//!
//! ```ignore
//! use iconsmith_pipeline::{Generator, GeneratorConfig};
//! use iconsmith_core::VectorSource;
//!
//! let config = GeneratorConfig::load()?;
//! let generator = Generator::from_config(&config);
//!
//! let set = generator.generate(VectorSource::from(svg), None).await?;
//! for asset in set.all() {
//!     let (name, bytes) = asset.as_file();
//!     std::fs::write(out.join(name), bytes)?;
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod pass;
pub mod presets;

pub use cache::RasterCache;
pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerateError};
pub use generator::{FaviconSet, Generator, GeneratorState};
pub use pass::{GenerationPass, PassOutcome, RasterAttempt, required_sizes};
pub use presets::{CONTAINER_SIZES, dark_variants, light_variants};

pub use tokio_util::sync::CancellationToken;
