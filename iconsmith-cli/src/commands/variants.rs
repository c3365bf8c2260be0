//! Variants command - list configured variants.

use anyhow::Result;
use clap::{Args, ValueEnum};
use iconsmith_core::{ColorVariant, VariantSpec};

use crate::output::{JsonFormatter, TextFormatter, VariantOutput};
use crate::{Cli, OutputFormat};

/// Which variant lists to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ColorFilter {
    /// Light and dark.
    #[default]
    All,
    /// Light only.
    Light,
    /// Dark only.
    Dark,
}

impl ColorFilter {
    fn colors(self) -> &'static [ColorVariant] {
        match self {
            ColorFilter::All => &[ColorVariant::Light, ColorVariant::Dark],
            ColorFilter::Light => &[ColorVariant::Light],
            ColorFilter::Dark => &[ColorVariant::Dark],
        }
    }
}

/// Arguments for the variants command.
#[derive(Args, Debug, Default)]
pub struct VariantsArgs {
    /// Restrict to one color.
    #[arg(long, default_value = "all")]
    pub color: ColorFilter,
}

/// Runs the variants command.
pub fn run(args: &VariantsArgs, cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let variants: Vec<&VariantSpec> = args
        .color
        .colors()
        .iter()
        .flat_map(|&color| config.variants(color))
        .collect();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_variants_header());
            println!("{}", "─".repeat(70));
            for variant in &variants {
                println!("{}", formatter.format_variant_line(variant));
            }
            println!();
            println!(
                "Total: {} variants, ICO sizes {:?}",
                variants.len(),
                config.container_sizes
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output: Vec<VariantOutput> =
                variants.into_iter().map(VariantOutput::from).collect();
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}
