//! Template rendering service for April document trees.
//!
//! Nodes never format their own page structure: they hand a template name
//! and a flat [`TemplateParams`] mapping to a [`TemplateEngine`] and splice
//! the returned markup into their parent. This crate provides:
//!
//! - [`TemplateEngine`] trait, the seam nodes render through
//! - [`Templates`], a minijinja engine with the built-in templates
//! - [`MockTemplates`] for testing (behind `mock` feature flag)
//!
//! # Built-in templates
//!
//! | Name | Parameters |
//! |---|---|
//! | [`SKELETON`] | `title`, `head`, `corner`, `asset_prefix`, `body`, `nav_entries`, `related` |
//! | [`SECTION`] | `title`, `subtitle`, `id`, `body` |
//! | [`SIDE_BY_SIDE`] | `left`, `right` |
//! | [`TABLE`] | `field_names`, `rows` |

mod engine;
#[cfg(feature = "mock")]
mod mock;
mod params;

use std::path::PathBuf;

pub use engine::Templates;
#[cfg(feature = "mock")]
pub use mock::{MockTemplates, TemplateCall};
pub use params::{ParamValue, Record, TemplateParams};

/// Page skeleton template.
pub const SKELETON: &str = "skeleton.html";
/// Section template.
pub const SECTION: &str = "section.html";
/// Two-column layout template.
pub const SIDE_BY_SIDE: &str = "side_by_side.html";
/// Table template.
pub const TABLE: &str = "table.html";

/// Renders a named template with a parameter mapping.
pub trait TemplateEngine: Send + Sync {
    /// Render `name` with `params`.
    ///
    /// Fails with [`TemplateError::NotFound`] when no template is registered
    /// under `name`. There is no fallback template.
    fn render(&self, name: &str, params: &TemplateParams) -> Result<String, TemplateError>;
}

/// Error returned by a [`TemplateEngine`].
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No template registered under this name.
    #[error("Template not found: {0}")]
    NotFound(String),
    /// The template failed to compile or render.
    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
    /// A template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
