//! Error types for building and rendering trees.

use std::path::PathBuf;

use april_templates::TemplateError;

/// Error returned when rendering a node fails.
///
/// Nothing is recovered inside the tree: the first failure aborts the whole
/// render and no partial markup is returned.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The node type does not provide a render implementation.
    #[error("{0} does not implement render")]
    Unimplemented(&'static str),
    /// The template engine failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// A table source file could not be read or decoded.
    #[error("Failed to read table source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Table data could not be parsed.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Error returned when delimited table data cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Invalid table data: {0}")]
    Csv(#[from] csv::Error),
}
