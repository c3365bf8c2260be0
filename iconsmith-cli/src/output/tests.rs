//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use iconsmith_core::{ColorVariant, GeneratedAsset, VariantSpec};
use iconsmith_ico::IconDirEntry;
use iconsmith_pipeline::{FaviconSet, RasterAttempt};

use super::json::{GenerateOutput, InspectOutput, VariantOutput};
use super::text::TextFormatter;

fn fake_png(size: u32, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    bytes[16..20].copy_from_slice(&size.to_be_bytes());
    bytes
}

fn sample_set() -> FaviconSet {
    FaviconSet {
        light: vec![
            GeneratedAsset::new(
                VariantSpec::png("png-32", "favicon-32x32.png", 32, ColorVariant::Light),
                fake_png(32, 1200),
            ),
            GeneratedAsset::new(
                VariantSpec::svg("svg", "favicon.svg", ColorVariant::Light),
                b"<svg/>".to_vec(),
            ),
        ],
        dark: Some(vec![GeneratedAsset::new(
            VariantSpec::png("dark-png-32", "favicon-dark-32x32.png", 32, ColorVariant::Dark),
            fake_png(32, 900),
        )]),
        attempts: vec![
            RasterAttempt::success(16, Duration::from_millis(3)),
            RasterAttempt::success(32, Duration::from_millis(4)),
            RasterAttempt::success(32, Duration::from_millis(4)),
        ],
        duration: Duration::from_millis(42),
        generated_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
    }
}

/// An ICO with entries for 16 and 256 whose payloads are fake PNG headers.
fn sample_ico() -> (Vec<u8>, Vec<IconDirEntry>) {
    let small = fake_png(16, 30);
    let large = fake_png(99, 40);
    let first = IconDirEntry::for_png(16, 30, 38);
    let second = IconDirEntry::for_png(256, 40, 68);

    let mut bytes = vec![0, 0, 1, 0, 2, 0];
    bytes.extend_from_slice(&first.to_bytes());
    bytes.extend_from_slice(&second.to_bytes());
    bytes.extend_from_slice(&small);
    bytes.extend_from_slice(&large);
    (bytes, vec![first, second])
}

mod text_formatter_tests {
    use super::*;

    #[test]
    fn test_asset_line() {
        let formatter = TextFormatter::new(false);
        let set = sample_set();
        let line = formatter.format_asset(&set.light[0], Path::new("out/favicon-32x32.png"));

        assert!(line.starts_with("✓ favicon-32x32.png"));
        assert!(line.contains("32×32"));
        assert!(line.contains("1.2 KB"));
        assert!(line.ends_with("out/favicon-32x32.png"));
    }

    #[test]
    fn test_svg_line_shows_format() {
        let formatter = TextFormatter::new(false);
        let set = sample_set();
        let line = formatter.format_asset(&set.light[1], Path::new("favicon.svg"));
        assert!(line.contains("SVG"));
        assert!(line.contains("6 B"));
    }

    #[test]
    fn test_generate_summary() {
        let formatter = TextFormatter::new(false);
        let summary = formatter.format_generate_summary(&sample_set(), Path::new("icons"));

        assert!(summary.contains("3 files"));
        assert!(summary.contains("light + dark"));
        assert!(summary.contains("rendered 16, 32"));
        assert!(summary.contains("42 ms"));
    }

    #[test]
    fn test_variant_line_columns() {
        let formatter = TextFormatter::new(false);
        let ico = VariantSpec::ico("ico", "favicon.ico", ColorVariant::Light);
        let line = formatter.format_variant_line(&ico);

        assert!(line.starts_with("ico "));
        assert!(line.contains("favicon.ico"));
        assert!(line.contains("ICO"));
        assert!(line.contains('−'));
        assert!(line.ends_with("Light"));
    }

    #[test]
    fn test_inspect_listing() {
        let formatter = TextFormatter::new(false);
        let (bytes, entries) = sample_ico();
        let output = InspectOutput::new(Path::new("favicon.ico"), &bytes, &entries);
        let text = formatter.format_inspect(&output);

        assert!(text.starts_with("favicon.ico (2 images, 108 B)"));
        assert!(text.contains("16×16"));
        assert!(text.contains("256×256"));
        // The 256 entry's payload declares 99, which is flagged.
        assert!(text.contains("width 99"));
    }

    #[test]
    fn test_no_escape_codes_without_color() {
        let formatter = TextFormatter::new(false);
        let header = formatter.format_variants_header();
        assert!(!header.contains('\x1b'));
        assert!(TextFormatter::new(true).format_variants_header().contains("\x1b[1m"));
    }
}

mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use super::*;

    #[test]
    fn test_generate_output_shape() {
        let set = sample_set();
        let written: Vec<PathBuf> = set
            .all()
            .map(|a| Path::new("icons").join(a.filename()))
            .collect();
        let output = GenerateOutput::new(&set, Path::new("icons"), &written);

        let json = JsonFormatter::new(false).format(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["outDir"], "icons");
        assert_eq!(parsed["assets"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["assets"][0]["mediaType"], "image/png");
        assert_eq!(parsed["assets"][0]["size"], 32);
        assert!(parsed["assets"][1].get("size").is_none());
        assert_eq!(parsed["assets"][2]["color"], "dark");
        assert_eq!(parsed["totalBytes"], 2106);
        assert_eq!(parsed["durationMs"], 42);
        assert_eq!(parsed["generatedAt"], "2026-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_variant_output() {
        let spec = VariantSpec::png("png-16", "favicon-16x16.png", 16, ColorVariant::Light)
            .with_label("16×16");
        let json = JsonFormatter::new(false)
            .format(&VariantOutput::from(&spec))
            .unwrap();
        assert_eq!(
            json,
            r#"{"id":"png-16","filename":"favicon-16x16.png","format":"png","color":"light","size":16,"label":"16×16"}"#
        );
    }

    #[test]
    fn test_inspect_output() {
        let (bytes, entries) = sample_ico();
        let output = InspectOutput::new(Path::new("favicon.ico"), &bytes, &entries);
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonFormatter::new(true).format(&output).unwrap()).unwrap();

        assert_eq!(parsed["images"], 2);
        assert_eq!(parsed["entries"][0]["width"], 16);
        assert_eq!(parsed["entries"][0]["pngWidth"], 16);
        assert_eq!(parsed["entries"][1]["width"], 256);
        assert_eq!(parsed["entries"][1]["offset"], 68);
        assert_eq!(parsed["entries"][1]["bitCount"], 32);
    }
}
