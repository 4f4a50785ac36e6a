//! webmark CLI - HTML to Markdown.
//!
//! Provides commands for:
//! - `convert`: Convert a page, or one element of it, to Markdown
//! - `tables`: List the data tables of a page or convert one of them
//! - `package`: Convert and bundle the Markdown with its images into a ZIP

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, PackageArgs, TablesArgs};
use error::CliError;

/// webmark - HTML to Markdown with image packaging.
#[derive(Parser)]
#[command(name = "webmark", version, about)]
struct Cli {
    /// Path to a webmark.toml configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (info-level logs on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HTML to Markdown.
    Convert(ConvertArgs),
    /// List detected tables or convert one of them.
    Tables(TablesArgs),
    /// Convert and package the Markdown with its images.
    Package(PackageArgs),
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Tables(args) => args.execute(),
        Commands::Package(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(args.execute(cli.config.as_deref()))
        }
    }
}
