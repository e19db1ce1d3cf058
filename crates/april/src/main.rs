//! April CLI - Composable HTML report builder.
//!
//! Provides commands for:
//! - `render`: Render a page manifest to HTML
//! - `copy-assets`: Copy the bundled stylesheets next to rendered pages

mod commands;
mod error;
mod manifest;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CopyAssetsArgs, RenderArgs};
use output::Output;

/// April - Composable HTML report builder.
#[derive(Parser)]
#[command(name = "april", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page manifest to HTML.
    Render(RenderArgs),
    /// Copy bundled assets into a directory.
    CopyAssets(CopyAssetsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::CopyAssets(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::CopyAssets(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
