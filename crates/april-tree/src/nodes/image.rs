//! Image node.

use april_templates::TemplateEngine;

use crate::error::RenderError;
use crate::node::Node;

/// Style attribute for full-width images.
pub const FULL_WIDTH_STYLE: &str = "width: 100%";
/// Style attribute for centered images.
pub const CENTER_STYLE: &str = "display: block; margin-left: auto; margin-right: auto";

/// An `<img>` tag, wrapped in `<a>` when a link is set.
///
/// Full width takes precedence over centering when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    src: String,
    link: Option<String>,
    full_width: bool,
    center: bool,
}

impl Image {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            link: None,
            full_width: false,
            center: false,
        }
    }

    #[must_use]
    pub fn link(mut self, href: impl Into<String>) -> Self {
        self.link = Some(href.into());
        self
    }

    #[must_use]
    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    #[must_use]
    pub fn center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    fn style(&self) -> Option<&'static str> {
        if self.full_width {
            Some(FULL_WIDTH_STYLE)
        } else if self.center {
            Some(CENTER_STYLE)
        } else {
            None
        }
    }
}

impl Node for Image {
    fn render(&self, _templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        let img = match self.style() {
            Some(style) => format!("<img src=\"{}\" style=\"{style}\" />", self.src),
            None => format!("<img src=\"{}\" />", self.src),
        };
        Ok(match &self.link {
            Some(href) => format!("<a href=\"{href}\">{img}</a>"),
            None => img,
        })
    }
}
