//! TOML page manifests.
//!
//! A manifest describes one page: the skeleton fields plus a body of nodes.
//!
//! ```toml
//! title = "Quarterly report"
//! corner = "Analytics"
//!
//! [[related]]
//! href = "https://example.com/archive"
//! label = "Archive"
//!
//! [[body]]
//! type = "section"
//! title = "Numbers"
//! id = "numbers"
//! body = [
//!     { type = "paragraph", text = "Totals by region." },
//!     { type = "table", path = "totals.csv" },
//! ]
//! ```
//!
//! Body entries are strings (emitted as-is), node tables tagged with `type`,
//! or nested arrays of either. Any other value fails to parse.

use std::path::{Path, PathBuf};

use april_tree::{
    CodeBlock, Content, Html, Image, Paragraph, Preformatted, RelatedLink, Section, SideBySide,
    Skeleton, SkeletonBuilder, Table,
};
use serde::Deserialize;

/// Error loading a manifest.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ManifestError {
    #[error("Failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

/// A parsed page manifest.
#[derive(Debug, Deserialize)]
pub(crate) struct Manifest {
    title: String,
    #[serde(default)]
    corner: String,
    #[serde(default)]
    head: String,
    asset_prefix: Option<String>,
    #[serde(default)]
    related: Vec<RelatedSpec>,
    #[serde(default)]
    body: BodySpec,
}

#[derive(Debug, Deserialize)]
struct RelatedSpec {
    href: String,
    label: String,
}

/// A body value: text, a node, or a list of further body values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BodySpec {
    Text(String),
    Node(Box<NodeSpec>),
    List(Vec<BodySpec>),
}

impl Default for BodySpec {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum NodeSpec {
    Section {
        title: String,
        #[serde(default)]
        subtitle: String,
        /// Menu label; defaults to the title.
        name: Option<String>,
        id: String,
        #[serde(default)]
        body: BodySpec,
    },
    Html {
        markup: String,
    },
    SideBySide {
        #[serde(default)]
        left: BodySpec,
        #[serde(default)]
        right: BodySpec,
    },
    Image {
        src: String,
        link: Option<String>,
        #[serde(default)]
        full_width: bool,
        #[serde(default)]
        center: bool,
    },
    Paragraph {
        text: String,
    },
    Table {
        path: Option<PathBuf>,
        data: Option<String>,
        delimiter: Option<char>,
    },
    Pre {
        text: String,
    },
    Code {
        code: String,
        language: Option<String>,
    },
}

impl Manifest {
    /// Read and parse a manifest file.
    pub(crate) fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub(crate) fn parse(text: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(text)?)
    }

    /// Build the page tree. Relative table paths resolve against `base_dir`.
    pub(crate) fn into_builder(self, base_dir: &Path) -> Result<SkeletonBuilder, ManifestError> {
        let mut builder = Skeleton::builder(self.title)
            .corner(self.corner)
            .head(self.head)
            .related(
                self.related
                    .into_iter()
                    .map(|link| RelatedLink::new(link.href, link.label)),
            )
            .body(self.body.into_content(base_dir)?);
        if let Some(prefix) = self.asset_prefix {
            builder = builder.asset_prefix(prefix);
        }
        Ok(builder)
    }
}

impl BodySpec {
    fn into_content(self, base_dir: &Path) -> Result<Content, ManifestError> {
        Ok(match self {
            Self::Text(text) => Content::Text(text),
            Self::Node(node) => (*node).into_content(base_dir)?,
            Self::List(items) => Content::List(
                items
                    .into_iter()
                    .map(|item| item.into_content(base_dir))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl NodeSpec {
    fn into_content(self, base_dir: &Path) -> Result<Content, ManifestError> {
        Ok(match self {
            Self::Section {
                title,
                subtitle,
                name,
                id,
                body,
            } => {
                let name = name.unwrap_or_else(|| title.clone());
                Section::new(title, subtitle, name, id, body.into_content(base_dir)?).into()
            }
            Self::Html { markup } => Html::new(markup).into(),
            Self::SideBySide { left, right } => SideBySide::new(
                left.into_content(base_dir)?,
                right.into_content(base_dir)?,
            )
            .into(),
            Self::Image {
                src,
                link,
                full_width,
                center,
            } => {
                let mut image = Image::new(src).full_width(full_width).center(center);
                if let Some(href) = link {
                    image = image.link(href);
                }
                image.into()
            }
            Self::Paragraph { text } => Paragraph::new(text).into(),
            Self::Table {
                path,
                data,
                delimiter,
            } => {
                let table = match (path, data) {
                    (Some(path), None) => Table::from_path(base_dir.join(path)),
                    (None, Some(data)) => Table::inline(data),
                    _ => {
                        return Err(ManifestError::Invalid(
                            "table needs exactly one of `path` or `data`".to_owned(),
                        ));
                    }
                };
                let table = match delimiter {
                    Some(delimiter) => table.with_delimiter(ascii_delimiter(delimiter)?),
                    None => table,
                };
                table.into()
            }
            Self::Pre { text } => Preformatted::new(text).into(),
            Self::Code { code, language } => {
                let block = CodeBlock::new(code);
                let block = match language {
                    Some(language) => block.with_language(language),
                    None => block,
                };
                block.into()
            }
        })
    }
}

fn ascii_delimiter(delimiter: char) -> Result<u8, ManifestError> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            ManifestError::Invalid(format!(
                "table delimiter must be a single ASCII character, got {delimiter:?}"
            ))
        })
}
