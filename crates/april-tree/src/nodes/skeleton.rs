//! Page skeleton, the root of a document tree.

use std::sync::Arc;

use april_config::{AssetsConfig, ConfigError};
use april_templates::{SKELETON, TemplateEngine, TemplateParams};

use crate::content::{Content, coerce_to_text};
use crate::error::RenderError;
use crate::node::{Children, NavEntry, Node};

/// A link in the page's related-links menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedLink {
    pub href: String,
    pub label: String,
}

impl RelatedLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// A complete HTML page.
///
/// Renders its body and a navigation menu built from every navigation entry
/// in the tree. Entries with an empty id or name are left out of the menu.
///
/// # Example
///
/// ```
/// use april_config::AssetsConfig;
/// use april_templates::Templates;
/// use april_tree::{Node, Paragraph, Section, Skeleton};
///
/// let page = Skeleton::builder("Report")
///     .corner("Team")
///     .body(vec![Section::new("Intro", "", "Intro", "intro", Paragraph::new("hello"))])
///     .build(&AssetsConfig::with_prefix("/static"))
///     .unwrap();
///
/// let html = page.render(&Templates::new().unwrap()).unwrap();
/// assert!(html.contains("<p>hello</p>"));
/// ```
#[derive(Debug)]
pub struct Skeleton {
    title: String,
    corner: String,
    head: String,
    body: Content,
    asset_prefix: String,
    related: Vec<RelatedLink>,
    children: Children,
}

impl Skeleton {
    pub fn builder(title: impl Into<String>) -> SkeletonBuilder {
        SkeletonBuilder {
            title: title.into(),
            corner: String::new(),
            head: String::new(),
            body: Content::default(),
            asset_prefix: None,
            related: Vec::new(),
        }
    }

    /// Resolved prefix under which the page loads its assets.
    pub fn asset_prefix(&self) -> &str {
        &self.asset_prefix
    }

    /// Navigation menu: the tree's entries minus incomplete ones.
    pub fn nav_menu(&self) -> Vec<NavEntry> {
        let (complete, dropped): (Vec<_>, Vec<_>) = self
            .nav_entries()
            .into_iter()
            .partition(NavEntry::is_complete);
        if !dropped.is_empty() {
            tracing::warn!(
                dropped = dropped.len(),
                "Navigation entries with an empty id or name left out of the menu"
            );
        }
        complete
    }
}

impl Node for Skeleton {
    fn render(&self, templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        let body = coerce_to_text(&self.body, templates)?;
        let nav_entries: Vec<(String, String)> =
            self.nav_menu().into_iter().map(Into::into).collect();
        let related: Vec<(String, String)> = self
            .related
            .iter()
            .map(|link| (link.href.clone(), link.label.clone()))
            .collect();

        let params = TemplateParams::new()
            .with("title", self.title.as_str())
            .with("head", self.head.as_str())
            .with("corner", self.corner.as_str())
            .with("asset_prefix", self.asset_prefix.as_str())
            .with("body", body)
            .with("nav_entries", nav_entries)
            .with("related", related);
        Ok(templates.render(SKELETON, &params)?)
    }

    fn children(&self) -> &[Arc<dyn Node>] {
        self.children.as_slice()
    }
}

/// Builder for [`Skeleton`].
#[derive(Debug)]
#[must_use]
pub struct SkeletonBuilder {
    title: String,
    corner: String,
    head: String,
    body: Content,
    asset_prefix: Option<String>,
    related: Vec<RelatedLink>,
}

impl SkeletonBuilder {
    /// Text shown in the navigation bar corner.
    pub fn corner(mut self, corner: impl Into<String>) -> Self {
        self.corner = corner.into();
        self
    }

    /// Extra markup placed in `<head>`.
    pub fn head(mut self, head: impl Into<String>) -> Self {
        self.head = head.into();
        self
    }

    pub fn body(mut self, body: impl Into<Content>) -> Self {
        self.body = body.into();
        self
    }

    /// Asset prefix for this page, overriding the configured default.
    pub fn asset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.asset_prefix = Some(prefix.into());
        self
    }

    pub fn related(mut self, links: impl IntoIterator<Item = RelatedLink>) -> Self {
        self.related.extend(links);
        self
    }

    pub fn related_link(mut self, href: impl Into<String>, label: impl Into<String>) -> Self {
        self.related.push(RelatedLink::new(href, label));
        self
    }

    /// Build the page, resolving the asset prefix against `defaults`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when no prefix was set on the builder
    /// and `defaults` has none either.
    pub fn build(self, defaults: &AssetsConfig) -> Result<Skeleton, ConfigError> {
        let asset_prefix = defaults.resolve_prefix(self.asset_prefix.as_deref())?;
        let mut children = Children::new();
        children.add_possible_children(&self.body);
        Ok(Skeleton {
            title: self.title,
            corner: self.corner,
            head: self.head,
            body: self.body,
            asset_prefix,
            related: self.related,
            children,
        })
    }
}
