//! Generator configuration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use iconsmith_core::{ColorVariant, VariantSpec};
use iconsmith_raster::RasterOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::pass::MAX_CONTAINER_SIZE;
use crate::presets::{CONTAINER_SIZES, dark_variants, light_variants};

/// Persisted settings for favicon generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sizes embedded in ICO containers, in directory order.
    #[serde(default = "default_container_sizes")]
    pub container_sizes: Vec<u32>,
    /// Variants generated from the light source.
    #[serde(default = "light_variants")]
    pub light: Vec<VariantSpec>,
    /// Variants generated from the dark source, when one is given.
    #[serde(default = "dark_variants")]
    pub dark: Vec<VariantSpec>,
    /// Rasterizer settings.
    #[serde(default)]
    pub raster: RasterOptions,
    /// Render distinct sizes concurrently.
    #[serde(default)]
    pub concurrent: bool,
}

fn default_container_sizes() -> Vec<u32> {
    CONTAINER_SIZES.to_vec()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            container_sizes: default_container_sizes(),
            light: light_variants(),
            dark: dark_variants(),
            raster: RasterOptions::default(),
            concurrent: false,
        }
    }
}

impl GeneratorConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iconsmith")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults. A present file must parse and
    /// validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path())
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Variants for one color.
    pub fn variants(&self, color: ColorVariant) -> &[VariantSpec] {
        match color {
            ColorVariant::Light => &self.light,
            ColorVariant::Dark => &self.dark,
        }
    }

    /// Checks container sizes, each variant, and that ids and filenames are
    /// unique across both colors. Files from both colors share one output
    /// directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.container_sizes.is_empty() {
            return Err(ConfigError::Invalid("container_sizes is empty".to_string()));
        }
        for &size in &self.container_sizes {
            if size == 0 || size > MAX_CONTAINER_SIZE {
                return Err(ConfigError::Invalid(format!(
                    "container size {size} outside 1..={MAX_CONTAINER_SIZE}"
                )));
            }
        }

        let mut ids = HashSet::new();
        let mut filenames = HashSet::new();
        for (color, variant) in self
            .light
            .iter()
            .map(|v| (ColorVariant::Light, v))
            .chain(self.dark.iter().map(|v| (ColorVariant::Dark, v)))
        {
            variant.validate()?;
            if variant.color != color {
                return Err(ConfigError::Invalid(format!(
                    "variant '{}' is {} but listed under {}",
                    variant.id, variant.color, color
                )));
            }
            if !ids.insert(variant.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate variant id '{}'", variant.id)));
            }
            if !filenames.insert(variant.filename.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate filename '{}'",
                    variant.filename
                )));
            }
        }
        Ok(())
    }
}
