//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use iconsmith_pipeline::GeneratorConfig;
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the configuration in effect.
    Show,

    /// Show the configuration path.
    Path,

    /// Write the default configuration.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_path(cli),
        ConfigAction::Init { force } => init_config(*force, cli),
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;

    match cli.format {
        OutputFormat::Text => {
            println!("iconsmith Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("File:            {}", cli.config_path().display());
            println!("ICO sizes:       {:?}", config.container_sizes);
            println!("Light variants:  {}", config.light.len());
            println!("Dark variants:   {}", config.dark.len());
            println!("Concurrent:      {}", config.concurrent);
            println!("System fonts:    {}", config.raster.load_system_fonts);
            if let Some(family) = &config.raster.default_font_family {
                println!("Font family:     {family}");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = cli.config_path();

    match cli.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_file": path.display().to_string(),
                "exists": path.exists(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = cli.config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = GeneratorConfig::default();
    match &cli.config {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    info!(path = %path.display(), "Wrote default configuration");
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
