// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # iconsmith ICO
//!
//! Encodes PNG raster images into the legacy multi-resolution ICO container
//! read by operating system shells and browsers.
//!
//! ## Layout
//!
//! ```text
//! offset 0   ICONDIR       reserved=0 (u16) type=1 (u16) count (u16)
//! offset 6   ICONDIRENTRY  16 bytes per image, in input order
//! ...        payloads      the PNG bytes of each image, verbatim
//! ```
//!
//! All integers are little-endian. Payloads are never re-encoded.
//!
//! - [`encode_icon_container`] - builds the container from raster images
//! - [`parse_icon_directory`] - reads the directory back out of ICO bytes
//! - [`png_width`] - recovers a PNG's width from its IHDR chunk

pub mod container;
pub mod directory;
pub mod error;
pub mod header;

pub use container::{IconContainer, IconDirEntry, encode_icon_container};
pub use directory::parse_icon_directory;
pub use error::IcoError;
pub use header::png_width;
