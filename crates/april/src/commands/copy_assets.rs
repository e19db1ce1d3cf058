//! `april copy-assets` command implementation.

use std::path::PathBuf;

use april_config::{CliSettings, Config};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy-assets command.
#[derive(Args)]
pub(crate) struct CopyAssetsArgs {
    /// Directory to copy the assets into (overrides config).
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Name of the directory created under the destination (overrides config).
    #[arg(short, long)]
    name: Option<String>,

    /// Path to configuration file (default: auto-discover april.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CopyAssetsArgs {
    /// Execute the copy-assets command.
    ///
    /// # Errors
    ///
    /// Returns an error if no destination is configured, the output directory
    /// already exists, or copying fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            asset_dest_dir: self.dest,
            asset_output_dir_name: self.name,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.validate()?;

        let assets = &config.assets_resolved;
        let dest = assets.resolve_dest_dir(None)?;
        let target = april_assets::copy_assets(&dest, assets.resolve_output_dir_name(None))?;

        output.success(&format!("Copied assets to {}", target.display()));
        if let Some(prefix) = &assets.prefix {
            output.info(&format!("Pages reference them under {prefix}"));
        }
        Ok(())
    }
}
