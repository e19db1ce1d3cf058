//! Leaf nodes that wrap text. None of them escape their input.

use april_templates::TemplateEngine;

use crate::error::RenderError;
use crate::node::Node;

/// Raw markup passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html {
    markup: String,
}

impl Html {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

impl Node for Html {
    fn render(&self, _templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        Ok(self.markup.clone())
    }
}

/// A `<p>` paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Node for Paragraph {
    fn render(&self, _templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        Ok(format!("<p>{}</p>", self.text))
    }
}

/// A `<pre>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preformatted {
    text: String,
}

impl Preformatted {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Node for Preformatted {
    fn render(&self, _templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        Ok(format!("<pre>{}</pre>", self.text))
    }
}

/// Language class used when none is given.
pub const DEFAULT_CODE_LANGUAGE: &str = "sql";

/// A `<pre>` block marked up for the prettify highlighter, with line numbers.
///
/// The code is not validated or escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    code: String,
    language: String,
}

impl CodeBlock {
    /// A code block highlighted as SQL.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: DEFAULT_CODE_LANGUAGE.to_owned(),
        }
    }

    /// Highlight as `language` instead (e.g. `rust`, `py`).
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Node for CodeBlock {
    fn render(&self, _templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        Ok(format!(
            "<pre class=\"prettyprint linenums lang-{}\">{}</pre>",
            self.language, self.code
        ))
    }
}
