//! End-to-end generation with the resvg rasterizer.

use std::sync::Arc;

use iconsmith_core::{AssetFormat, ColorVariant, RasterError, VariantSpec, VectorSource};
use iconsmith_ico::{parse_icon_directory, png_width};
use iconsmith_pipeline::{
    CancellationToken, GenerateError, GenerationPass, Generator, GeneratorConfig, GeneratorState,
};
use iconsmith_raster::SvgRasterizer;

const LOGO: &str = r##"<svg width="24" height="24"><rect x="2" y="2" width="20" height="20" rx="4" fill="#2563eb"/></svg>"##;

#[tokio::test]
async fn default_set_has_expected_dimensions() {
    let generator = Generator::from_config(&GeneratorConfig::default());
    let set = generator
        .generate(VectorSource::from(LOGO), Some(VectorSource::from(LOGO)))
        .await
        .unwrap();

    for asset in set.all() {
        match asset.format() {
            AssetFormat::Png => {
                assert_eq!(png_width(asset.as_file().1), Some(asset.spec.size), "{}", asset.id());
            }
            AssetFormat::Ico => {
                let entries = parse_icon_directory(asset.as_file().1).unwrap();
                let widths: Vec<u32> = entries.iter().map(|e| e.pixel_width()).collect();
                assert_eq!(widths, vec![16, 32, 48]);
            }
            AssetFormat::Svg => assert_eq!(asset.as_file().1, LOGO.as_bytes()),
        }
    }

    let apple = set.find("apple-touch").unwrap();
    assert_eq!(apple.filename(), "apple-touch-icon.png");
    assert_eq!(png_width(apple.as_file().1), Some(180));
}

#[tokio::test]
async fn malformed_source_yields_no_assets() {
    let pass = GenerationPass::new(Arc::new(SvgRasterizer::new()));
    let variants = GeneratorConfig::default().light;

    let outcome = pass
        .run(&VectorSource::from("<svg><g></svg>"), &variants, &CancellationToken::new())
        .await;

    assert!(matches!(
        outcome.result.as_ref().err().and_then(GenerateError::raster_error),
        Some(RasterError::InvalidSource(_))
    ));
    assert!(outcome.salvaged.is_empty());
    assert_eq!(outcome.attempts.iter().filter(|a| a.success).count(), 0);
}

#[tokio::test]
async fn failed_request_reports_state() {
    let generator = Generator::from_config(&GeneratorConfig::default());
    let mut rx = generator.subscribe();

    let err = generator
        .generate(VectorSource::from("plain text"), None)
        .await
        .unwrap_err();

    assert!(err.raster_error().is_some());
    rx.changed().await.unwrap();
    assert!(matches!(&*rx.borrow(), GeneratorState::Failed(msg) if msg.contains("16px")));
}

#[tokio::test]
async fn custom_container_sizes_with_256() {
    let config = GeneratorConfig {
        container_sizes: vec![16, 256],
        ..GeneratorConfig::default()
    };
    let generator = Generator::from_config(&config).with_variants(
        vec![VariantSpec::ico("ico", "favicon.ico", ColorVariant::Light)],
        Vec::new(),
    );

    let set = generator.generate(VectorSource::from(LOGO), None).await.unwrap();
    let ico = set.find("ico").unwrap().as_file().1;

    // Directory width/height bytes for the 256 entry are zero.
    assert_eq!(&ico[22..24], &[0, 0]);
    let entries = parse_icon_directory(ico).unwrap();
    assert_eq!(entries[1].pixel_width(), 256);
}
