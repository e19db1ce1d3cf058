//! CLI error types.

use april_assets::AssetError;
use april_config::ConfigError;
use april_templates::TemplateError;
use april_tree::RenderError;

use crate::manifest::ManifestError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Templates(#[from] TemplateError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Assets(#[from] AssetError),
}
