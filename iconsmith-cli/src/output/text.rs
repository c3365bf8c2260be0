//! Text output formatting with colors.

use std::path::Path;

use iconsmith_core::{AssetFormat, ColorVariant, GeneratedAsset, VariantSpec};
use iconsmith_pipeline::FaviconSet;

use super::json::InspectOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ========================================================================
    // Generate
    // ========================================================================

    /// Formats one written file: "✓ favicon-32x32.png   32×32   1.2 KB".
    pub fn format_asset(&self, asset: &GeneratedAsset, path: &Path) -> String {
        let dims = match asset.spec.raster_size() {
            Some(size) => format!("{size}×{size}"),
            None => asset.format().extension().to_uppercase(),
        };

        format!(
            "{} {:<32} {:<9} {:>9}  {}",
            self.green("✓"),
            asset.filename(),
            dims,
            self.format_bytes(asset.len()),
            self.dim(&path.display().to_string())
        )
    }

    /// Formats the closing summary of a generate run.
    pub fn format_generate_summary(&self, set: &FaviconSet, out: &Path) -> String {
        let mut sizes: Vec<u32> = set.attempts.iter().map(|a| a.size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        let sizes = sizes
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let colors = if set.dark.is_some() {
            "light + dark"
        } else {
            "light"
        };

        format!(
            "{} {} files ({}) in {}, {} total, rendered {} in {} ms",
            self.bold("Done:"),
            set.len(),
            colors,
            self.cyan(&out.display().to_string()),
            self.format_bytes(set.total_bytes()),
            sizes,
            set.duration.as_millis()
        )
    }

    // ========================================================================
    // Variants
    // ========================================================================

    /// Formats the variant list header.
    pub fn format_variants_header(&self) -> String {
        format!(
            "{:<14} {:<34} {:<6} {:<6} {}",
            self.bold("Id"),
            self.bold("File"),
            self.bold("Format"),
            self.bold("Size"),
            self.bold("Color")
        )
    }

    /// Formats one variant line.
    pub fn format_variant_line(&self, variant: &VariantSpec) -> String {
        let size = variant
            .raster_size()
            .map_or_else(|| "−".to_string(), |s| s.to_string());

        let color = match variant.color {
            ColorVariant::Light => variant.color.display_name().to_string(),
            ColorVariant::Dark => self.dim(variant.color.display_name()),
        };

        format!(
            "{:<14} {:<34} {:<6} {:<6} {}",
            variant.id,
            variant.filename,
            format_name(variant.format),
            size,
            color
        )
    }

    // ========================================================================
    // Inspect
    // ========================================================================

    /// Formats an ICO directory listing.
    pub fn format_inspect(&self, output: &InspectOutput) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} ({} images, {})",
            self.bold(&output.file),
            output.images,
            self.format_bytes(output.file_bytes)
        ));
        lines.push("─".repeat(60));
        lines.push(format!(
            "{:>3}  {:<9} {:>4} {:>10} {:>10}  {}",
            "#", "Size", "Bits", "Bytes", "Offset", "PNG"
        ));

        for entry in &output.entries {
            let png = match entry.png_width {
                Some(w) if w == entry.width => self.green("✓"),
                Some(w) => self.yellow(&format!("width {w}")),
                None => self.dim("−"),
            };
            lines.push(format!(
                "{:>3}  {:<9} {:>4} {:>10} {:>10}  {}",
                entry.index,
                format!("{}×{}", entry.width, entry.height),
                entry.bit_count,
                entry.bytes,
                entry.offset,
                png
            ));
        }

        lines.join("\n")
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Formats a byte count: "980 B", "4.2 KB", "1.3 MB".
    #[allow(clippy::cast_precision_loss)]
    pub fn format_bytes(&self, n: usize) -> String {
        if n >= 1024 * 1024 {
            format!("{:.1} MB", n as f64 / (1024.0 * 1024.0))
        } else if n >= 1024 {
            format!("{:.1} KB", n as f64 / 1024.0)
        } else {
            format!("{n} B")
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

fn format_name(format: AssetFormat) -> &'static str {
    match format {
        AssetFormat::Png => "PNG",
        AssetFormat::Ico => "ICO",
        AssetFormat::Svg => "SVG",
    }
}

// ============================================================================
// Tests
// ============================================================================
