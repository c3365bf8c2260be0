//! Generate command - render a favicon set to disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use iconsmith_core::VectorSource;
use iconsmith_pipeline::{FaviconSet, GenerateError, Generator, GeneratorConfig};
use tracing::{debug, info};

use crate::output::{GenerateOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the generate command.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// SVG for the light (default) variants.
    pub light: PathBuf,

    /// SVG for the dark variants.
    #[arg(long, short)]
    pub dark: Option<PathBuf>,

    /// Directory to write files into.
    #[arg(long, short, default_value = ".")]
    pub out: PathBuf,

    /// Only generate these variant ids (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Render sizes concurrently.
    #[arg(long)]
    pub concurrent: bool,

    /// Load installed fonts for `<text>` elements.
    #[arg(long)]
    pub system_fonts: bool,
}

/// Runs the generate command.
pub async fn run(args: &GenerateArgs, cli: &Cli) -> Result<()> {
    let mut config = cli.load_config()?;
    config.concurrent |= args.concurrent;
    if args.system_fonts {
        config.raster = std::mem::take(&mut config.raster).with_system_fonts();
    }
    select_variants(&mut config, &args.only, args.dark.is_some())?;

    let light = read_source(&args.light).await?;
    let dark = match &args.dark {
        Some(path) => Some(read_source(path).await?),
        None => None,
    };

    info!(light = %args.light.display(), dark = args.dark.is_some(), "Generating favicon set");

    let generator = Generator::from_config(&config);
    let set = tokio::select! {
        result = generator.generate(light, dark) => result?,
        _ = tokio::signal::ctrl_c() => {
            debug!("Interrupted");
            return Err(GenerateError::Cancelled.into());
        }
    };

    let written = write_set(&set, &args.out).await?;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new(!cli.no_color);
                for (asset, path) in set.all().zip(&written) {
                    println!("{}", formatter.format_asset(asset, path));
                }
                println!();
                println!("{}", formatter.format_generate_summary(&set, &args.out));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = GenerateOutput::new(&set, &args.out, &written);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

/// Keeps only the variants named in `only`. Empty keeps everything.
pub fn restrict_variants(config: &mut GeneratorConfig, only: &[String]) -> Result<()> {
    if only.is_empty() {
        return Ok(());
    }

    let known: HashSet<&str> = config
        .light
        .iter()
        .chain(&config.dark)
        .map(|v| v.id.as_str())
        .collect();
    let unknown: Vec<&str> = only
        .iter()
        .map(String::as_str)
        .filter(|id| !known.contains(id))
        .collect();
    if !unknown.is_empty() {
        anyhow::bail!(
            "Unknown variant id(s): {}. Run `iconsmith variants` to list them",
            unknown.join(", ")
        );
    }

    config.light.retain(|v| only.contains(&v.id));
    config.dark.retain(|v| only.contains(&v.id));
    Ok(())
}

/// Applies `--only` and drops dark variants when no dark source was given.
/// Fails when nothing is left to write.
pub fn select_variants(config: &mut GeneratorConfig, only: &[String], has_dark: bool) -> Result<()> {
    restrict_variants(config, only)?;
    if !has_dark {
        config.dark.clear();
    }
    if config.light.is_empty() && config.dark.is_empty() {
        anyhow::bail!("No variants selected; dark variants need a --dark source");
    }
    Ok(())
}

async fn read_source(path: &Path) -> Result<VectorSource> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(VectorSource::from(text))
}

/// Writes every asset into `out` and returns the paths in set order.
async fn write_set(set: &FaviconSet, out: &Path) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(out)
        .await
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let mut written = Vec::with_capacity(set.len());
    for asset in set.all() {
        let (filename, bytes) = asset.as_file();
        let path = out.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Wrote asset");
        written.push(path);
    }

    Ok(written)
}
