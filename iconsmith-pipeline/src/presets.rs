//! Built-in favicon variant sets.
//!
//! The light set covers what browsers, iOS home screens, and Android
//! launchers request. The dark set mirrors the browser-tab sizes so a page
//! can switch icons with `prefers-color-scheme`.

use iconsmith_core::{ColorVariant, VariantSpec};

/// Sizes embedded in every ICO container.
pub const CONTAINER_SIZES: [u32; 3] = [16, 32, 48];

/// Browser tab PNG sizes generated for both color variants.
pub const TAB_SIZES: [u32; 6] = [16, 32, 48, 64, 96, 128];

/// Apple touch icon size.
pub const APPLE_TOUCH_SIZE: u32 = 180;

/// Android home screen icon sizes.
pub const ANDROID_SIZES: [u32; 2] = [192, 512];

/// Variants generated from the light source.
pub fn light_variants() -> Vec<VariantSpec> {
    let mut variants = vec![
        VariantSpec::ico("ico", "favicon.ico", ColorVariant::Light).with_label("ICO (16, 32, 48)"),
        VariantSpec::svg("svg", "favicon.svg", ColorVariant::Light).with_label("SVG"),
    ];

    variants.extend(TAB_SIZES.iter().map(|&size| {
        VariantSpec::png(
            format!("png-{size}"),
            format!("favicon-{size}x{size}.png"),
            size,
            ColorVariant::Light,
        )
        .with_label(format!("{size}×{size}"))
    }));

    variants.push(
        VariantSpec::png(
            "apple-touch",
            "apple-touch-icon.png",
            APPLE_TOUCH_SIZE,
            ColorVariant::Light,
        )
        .with_label("Apple Touch 180×180"),
    );

    variants.extend(ANDROID_SIZES.iter().map(|&size| {
        VariantSpec::png(
            format!("android-{size}"),
            format!("android-chrome-{size}x{size}.png"),
            size,
            ColorVariant::Light,
        )
        .with_label(format!("Android {size}×{size}"))
    }));

    variants
}

/// Variants generated from the optional dark source.
pub fn dark_variants() -> Vec<VariantSpec> {
    let mut variants = vec![
        VariantSpec::ico("dark-ico", "favicon-dark.ico", ColorVariant::Dark)
            .with_label("Dark ICO (16, 32, 48)"),
        VariantSpec::svg("dark-svg", "favicon-dark.svg", ColorVariant::Dark).with_label("Dark SVG"),
    ];

    variants.extend(TAB_SIZES.iter().map(|&size| {
        VariantSpec::png(
            format!("dark-png-{size}"),
            format!("favicon-dark-{size}x{size}.png"),
            size,
            ColorVariant::Dark,
        )
        .with_label(format!("Dark {size}×{size}"))
    }));

    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_and_filenames_unique() {
        let all: Vec<_> = light_variants().into_iter().chain(dark_variants()).collect();

        let ids: HashSet<_> = all.iter().map(|v| v.id.as_str()).collect();
        let files: HashSet<_> = all.iter().map(|v| v.filename.as_str()).collect();
        assert_eq!(ids.len(), all.len());
        assert_eq!(files.len(), all.len());
    }

    #[test]
    fn test_presets_validate() {
        for variant in light_variants().iter().chain(dark_variants().iter()) {
            assert!(variant.validate().is_ok(), "{:?}", variant);
        }
    }

    #[test]
    fn test_colors_match_set() {
        assert!(light_variants().iter().all(|v| v.color == ColorVariant::Light));
        assert!(dark_variants().iter().all(|v| v.color == ColorVariant::Dark));
    }

    #[test]
    fn test_known_filenames() {
        let light = light_variants();
        let find = |id: &str| light.iter().find(|v| v.id == id).map(|v| v.filename.clone());

        assert_eq!(find("png-16").as_deref(), Some("favicon-16x16.png"));
        assert_eq!(find("apple-touch").as_deref(), Some("apple-touch-icon.png"));
        assert_eq!(find("android-512").as_deref(), Some("android-chrome-512x512.png"));
        assert_eq!(find("ico").as_deref(), Some("favicon.ico"));
    }
}
