//! `april render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use april_config::{AssetsConfig, CliSettings, Config};
use april_templates::{TemplateEngine, TemplateError, Templates};
use april_tree::Node;
use clap::Args;

use crate::error::CliError;
use crate::manifest::Manifest;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page manifest (TOML).
    manifest: PathBuf,

    /// Write the page to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// URL prefix for page assets (overrides manifest and config).
    #[arg(long, env = "APRIL_ASSET_PREFIX")]
    asset_prefix: Option<String>,

    /// Directory of templates overriding the built-in ones (overrides config).
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover april.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, manifest loading, or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            templates_dir: self.templates,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let templates = load_templates(config.templates_resolved.dir.as_deref())?;

        let html = render_page(
            &self.manifest,
            self.asset_prefix.as_deref(),
            &config.assets_resolved,
            &templates,
        )?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!("Rendered page to {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Built-in templates, overridden by `dir` when given.
fn load_templates(dir: Option<&Path>) -> Result<Templates, TemplateError> {
    match dir {
        Some(dir) => Templates::with_dir(dir),
        None => Templates::new(),
    }
}

/// Load a manifest, build its tree and render it.
///
/// The asset prefix is taken from `prefix_override`, then the manifest, then
/// `assets`.
fn render_page(
    manifest_path: &Path,
    prefix_override: Option<&str>,
    assets: &AssetsConfig,
    templates: &dyn TemplateEngine,
) -> Result<String, CliError> {
    let manifest = Manifest::load(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or(Path::new("."));

    let mut builder = manifest.into_builder(base_dir)?;
    if let Some(prefix) = prefix_override {
        builder = builder.asset_prefix(prefix);
    }
    let page = builder.build(assets)?;

    tracing::info!(
        manifest = %manifest_path.display(),
        children = page.children().len(),
        "Rendering page"
    );
    Ok(page.render(templates)?)
}
