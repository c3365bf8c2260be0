// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! iconsmith CLI - favicon sets from a single SVG.
//!
//! # Examples
//!
//! ```bash
//! # Full light set into ./icons
//! iconsmith generate logo.svg --out icons
//!
//! # Light and dark sets
//! iconsmith generate logo.svg --dark logo-dark.svg --out icons
//!
//! # Only the ICO and apple touch icon
//! iconsmith generate logo.svg --only ico,apple-touch
//!
//! # List configured variants
//! iconsmith variants
//!
//! # Show the directory of an ICO file
//! iconsmith inspect icons/favicon.ico --format json --pretty
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use iconsmith_core::RasterError;
use iconsmith_pipeline::{ConfigError, GenerateError, GeneratorConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, generate, inspect, variants};

// ============================================================================
// CLI Definition
// ============================================================================

/// iconsmith CLI - favicon generation.
#[derive(Parser)]
#[command(name = "iconsmith")]
#[command(about = "Generate favicon sets from SVG")]
#[command(long_about = r#"
iconsmith renders an SVG into every favicon size browsers and home screens
ask for, plus a multi-resolution favicon.ico.

Default light set:
  • favicon.ico (16, 32, 48)
  • favicon.svg
  • favicon-{16,32,48,64,96,128}.png
  • apple-touch-icon.png (180)
  • android-chrome-{192,512}.png

Passing --dark adds favicon-dark.ico, favicon-dark.svg and dark PNGs.

Examples:
  iconsmith generate logo.svg                    # Into the current directory
  iconsmith generate logo.svg --dark night.svg   # Light and dark sets
  iconsmith variants --color dark                # What --dark produces
  iconsmith inspect favicon.ico                  # ICO directory
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Path of the configuration file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(GeneratorConfig::default_path)
    }

    /// Loads the configuration in effect.
    pub fn load_config(&self) -> Result<GeneratorConfig, ConfigError> {
        GeneratorConfig::load_from(&self.config_path())
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Render a favicon set.
    #[command(visible_alias = "g")]
    Generate(generate::GenerateArgs),

    /// List the configured variants.
    #[command(visible_alias = "v")]
    Variants(variants::VariantsArgs),

    /// Print the directory of an ICO file.
    #[command(visible_alias = "i")]
    Inspect(inspect::InspectArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The SVG could not be parsed.
    InvalidSource = 2,
    /// Configuration could not be loaded or is invalid.
    ConfigError = 3,
    /// Interrupted before finishing.
    Cancelled = 4,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        if let Some(generate) = error.downcast_ref::<GenerateError>() {
            return match generate {
                GenerateError::Cancelled => ExitCode::Cancelled,
                GenerateError::Config(_) => ExitCode::ConfigError,
                GenerateError::Raster {
                    source: RasterError::InvalidSource(_),
                    ..
                } => ExitCode::InvalidSource,
                _ => ExitCode::Error,
            };
        }
        if error.downcast_ref::<ConfigError>().is_some() {
            return ExitCode::ConfigError;
        }
        ExitCode::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("iconsmith=debug,iconsmith_pipeline=debug,iconsmith_raster=debug,iconsmith_ico=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Generate(args) => generate::run(args, &cli).await,
        Commands::Variants(args) => variants::run(args, &cli),
        Commands::Inspect(args) => inspect::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
