//! Serde serialization/deserialization tests for core types.
//!
//! Variant specs are read from user configuration files, so the wire names
//! matter more than the round-trip.

use crate::{AssetFormat, ColorVariant, VariantSpec};

// ============================================================================
// AssetFormat Serde Tests
// ============================================================================

#[test]
fn test_asset_format_serde_roundtrip_all_variants() {
    for format in AssetFormat::all() {
        let json = serde_json::to_string(format).unwrap();
        let deserialized: AssetFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(*format, deserialized, "Round-trip failed for {:?}", format);
    }
}

#[test]
fn test_asset_format_deserialize_lowercase() {
    let test_cases = vec![
        (r#""png""#, AssetFormat::Png),
        (r#""ico""#, AssetFormat::Ico),
        (r#""svg""#, AssetFormat::Svg),
    ];

    for (json, expected) in test_cases {
        let result: AssetFormat = serde_json::from_str(json).unwrap();
        assert_eq!(result, expected, "Failed for {}", json);
    }
}

#[test]
fn test_asset_format_invalid_deserialize() {
    let result: Result<AssetFormat, _> = serde_json::from_str(r#""webp""#);
    assert!(result.is_err());
}

// ============================================================================
// VariantSpec Serde Tests
// ============================================================================

#[test]
fn test_variant_spec_defaults() {
    // label and color are optional in config files
    let json = r#"{"id":"png-16","filename":"favicon-16x16.png","size":16,"format":"png"}"#;
    let spec: VariantSpec = serde_json::from_str(json).unwrap();

    assert_eq!(spec.id, "png-16");
    assert_eq!(spec.size, 16);
    assert_eq!(spec.format, AssetFormat::Png);
    assert_eq!(spec.color, ColorVariant::Light);
    assert!(spec.label.is_empty());
}

#[test]
fn test_variant_spec_dark() {
    let json = r#"{"id":"dark-ico","filename":"favicon-dark.ico","size":48,"format":"ico","color":"dark"}"#;
    let spec: VariantSpec = serde_json::from_str(json).unwrap();

    assert!(spec.is_container_format());
    assert_eq!(spec.color, ColorVariant::Dark);
}

#[test]
fn test_variant_spec_missing_format() {
    let json = r#"{"id":"png-16","filename":"favicon-16x16.png","size":16}"#;
    let result: Result<VariantSpec, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_variant_spec_serializes_lowercase_enums() {
    let spec = VariantSpec::png("dark-png-32", "favicon-dark-32x32.png", 32, ColorVariant::Dark)
        .with_label("32×32");
    let value = serde_json::to_value(&spec).unwrap();

    assert_eq!(value["format"], "png");
    assert_eq!(value["color"], "dark");
    assert_eq!(value["label"], "32×32");
}
