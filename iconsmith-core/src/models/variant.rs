//! Requested output variants.
//!
//! This module contains the types describing what a generation pass produces:
//! - [`AssetFormat`] - PNG, ICO container, or SVG passthrough
//! - [`ColorVariant`] - Light or dark source
//! - [`VariantSpec`] - One output file

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

// ============================================================================
// Asset Format
// ============================================================================

/// Output encoding of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    /// Single-resolution PNG rendered from the source.
    Png,
    /// Multi-resolution ICO container.
    Ico,
    /// The original SVG markup, passed through untouched.
    Svg,
}

impl AssetFormat {
    /// Returns the MIME type for files of this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Ico => "image/x-icon",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Returns the conventional file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Ico => "ico",
            Self::Svg => "svg",
        }
    }

    /// Returns all formats.
    pub fn all() -> &'static [AssetFormat] {
        &[Self::Png, Self::Ico, Self::Svg]
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// Color Variant
// ============================================================================

/// Which source a variant is generated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorVariant {
    /// Rendered from the light (default) source.
    #[default]
    Light,
    /// Rendered from the optional dark source.
    Dark,
}

impl ColorVariant {
    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    /// Returns the lowercase name used on the command line and in config.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

// ============================================================================
// Variant Spec
// ============================================================================

/// Largest PNG edge a variant may request.
///
/// A square RGBA surface of this size takes 64 MiB before encoding.
pub const MAX_RASTER_SIZE: u32 = 4096;

/// One output file requested from a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Stable identifier, e.g. `png-16` or `dark-ico`.
    pub id: String,
    /// File name handed to the packaging layer.
    pub filename: String,
    /// Pixel size for PNG variants. Informational for ICO and SVG.
    pub size: u32,
    /// Human readable label.
    #[serde(default)]
    pub label: String,
    /// Output encoding.
    pub format: AssetFormat,
    /// Which source the variant is rendered from.
    #[serde(default)]
    pub color: ColorVariant,
}

impl VariantSpec {
    /// Creates a variant.
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        size: u32,
        format: AssetFormat,
        color: ColorVariant,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            size,
            label: String::new(),
            format,
            color,
        }
    }

    /// Creates a PNG variant.
    pub fn png(
        id: impl Into<String>,
        filename: impl Into<String>,
        size: u32,
        color: ColorVariant,
    ) -> Self {
        Self::new(id, filename, size, AssetFormat::Png, color)
    }

    /// Creates an ICO container variant.
    pub fn ico(id: impl Into<String>, filename: impl Into<String>, color: ColorVariant) -> Self {
        Self::new(id, filename, 48, AssetFormat::Ico, color)
    }

    /// Creates an SVG passthrough variant.
    pub fn svg(id: impl Into<String>, filename: impl Into<String>, color: ColorVariant) -> Self {
        Self::new(id, filename, 0, AssetFormat::Svg, color)
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns true if this variant is the ICO container.
    pub fn is_container_format(&self) -> bool {
        self.format == AssetFormat::Ico
    }

    /// Returns true if this variant is the untouched SVG source.
    pub fn is_vector_passthrough(&self) -> bool {
        self.format == AssetFormat::Svg
    }

    /// Returns the raster size this variant needs, if any.
    pub fn raster_size(&self) -> Option<u32> {
        match self.format {
            AssetFormat::Png => Some(self.size),
            AssetFormat::Ico | AssetFormat::Svg => None,
        }
    }

    /// Validates the variant.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidConfig("variant id is empty".to_string()));
        }
        if self.filename.trim().is_empty() {
            return Err(CoreError::InvalidConfig(format!(
                "variant {} has an empty filename",
                self.id
            )));
        }
        if self.filename.contains(['/', '\\']) {
            return Err(CoreError::InvalidConfig(format!(
                "variant {} filename must not contain path separators: {}",
                self.id, self.filename
            )));
        }
        if self.format == AssetFormat::Png && self.size == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "variant {} must have a positive size",
                self.id
            )));
        }
        if self.format == AssetFormat::Png && self.size > MAX_RASTER_SIZE {
            return Err(CoreError::InvalidConfig(format!(
                "variant {} size {} exceeds the {MAX_RASTER_SIZE}px limit",
                self.id, self.size
            )));
        }
        Ok(())
    }
}
