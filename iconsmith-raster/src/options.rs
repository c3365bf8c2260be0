//! Rasterizer settings.

use std::sync::Arc;

use resvg::usvg;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User-facing rasterizer settings.
///
/// Defaults keep output deterministic across machines: no system fonts are
/// loaded, so `<text>` without embedded glyph outlines renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterOptions {
    /// Load the host's installed fonts for `<text>` elements.
    #[serde(default)]
    pub load_system_fonts: bool,
    /// Font family used when an element names none.
    #[serde(default)]
    pub default_font_family: Option<String>,
}

impl RasterOptions {
    /// Enables system font loading.
    #[must_use]
    pub fn with_system_fonts(mut self) -> Self {
        self.load_system_fonts = true;
        self
    }

    /// Builds the usvg parse options.
    pub fn to_usvg_options(&self) -> usvg::Options<'static> {
        let mut options = usvg::Options::default();

        if let Some(family) = &self.default_font_family {
            options.font_family.clone_from(family);
        }

        if self.load_system_fonts {
            let mut fontdb = usvg::fontdb::Database::new();
            fontdb.load_system_fonts();
            debug!(faces = fontdb.len(), "Loaded system fonts");
            options.fontdb = Arc::new(fontdb);
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_skip_system_fonts() {
        let options = RasterOptions::default();
        assert!(!options.load_system_fonts);
        assert!(options.to_usvg_options().fontdb.is_empty());
    }

    #[test]
    fn test_with_system_fonts_keeps_family() {
        let options = RasterOptions {
            default_font_family: Some("Inter".to_string()),
            ..RasterOptions::default()
        }
        .with_system_fonts();

        assert!(options.load_system_fonts);
        assert_eq!(options.to_usvg_options().font_family, "Inter");
    }
}
