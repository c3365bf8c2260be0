//! Inspect command - print an ICO directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use iconsmith_ico::parse_icon_directory;
use tracing::info;

use crate::output::{InspectOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the inspect command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// ICO file to read.
    pub path: PathBuf,
}

/// Runs the inspect command.
pub async fn run(args: &InspectArgs, cli: &Cli) -> Result<()> {
    let bytes = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let entries = parse_icon_directory(&bytes)
        .with_context(|| format!("{} is not a valid ICO file", args.path.display()))?;

    info!(path = %args.path.display(), images = entries.len(), "Parsed icon directory");
    let output = InspectOutput::new(&args.path, &bytes, &entries);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_inspect(&output));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}
