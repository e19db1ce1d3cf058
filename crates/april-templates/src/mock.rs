//! Mock template engine for testing.
//!
//! Provides [`MockTemplates`] for observing template calls without real
//! template files.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::RwLock;

use crate::{ParamValue, TemplateEngine, TemplateError, TemplateParams};

/// A recorded template call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCall {
    /// Template name.
    pub name: String,
    /// Parameters submitted with the call.
    pub params: TemplateParams,
}

/// Mock template engine for testing.
///
/// Records every call and renders a deterministic trace of the form
/// `<name key="value" ...>` followed by the `body`, `left`/`right` text
/// parameters and a closing `</name>`, so nested output stays inspectable.
///
/// # Example
///
/// ```ignore
/// use april_templates::{MockTemplates, TemplateEngine, TemplateParams};
///
/// let templates = MockTemplates::new().with_missing("section.html");
/// assert!(templates.render("section.html", &TemplateParams::new()).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockTemplates {
    calls: RwLock<Vec<TemplateCall>>,
    missing: HashSet<String>,
}

impl MockTemplates {
    /// Create a mock that knows every template name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `name` as unknown: rendering it fails with [`TemplateError::NotFound`].
    #[must_use]
    pub fn with_missing(mut self, name: impl Into<String>) -> Self {
        self.missing.insert(name.into());
        self
    }

    /// All recorded calls, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self) -> Vec<TemplateCall> {
        self.calls.read().unwrap().clone()
    }

    /// Recorded calls for a single template name.
    pub fn calls_to(&self, name: &str) -> Vec<TemplateCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.name == name)
            .collect()
    }
}

/// Parameters rendered between the opening and closing trace tags.
const CONTENT_KEYS: &[&str] = &["body", "left", "right"];

impl TemplateEngine for MockTemplates {
    fn render(&self, name: &str, params: &TemplateParams) -> Result<String, TemplateError> {
        if self.missing.contains(name) {
            return Err(TemplateError::NotFound(name.to_owned()));
        }
        self.calls.write().unwrap().push(TemplateCall {
            name: name.to_owned(),
            params: params.clone(),
        });

        let mut out = format!("<{name}");
        for (key, value) in params.iter().filter(|(k, _)| !CONTENT_KEYS.contains(k)) {
            let _ = write!(out, " {key}=\"{}\"", flatten(value));
        }
        out.push('>');
        for (_, value) in params.iter().filter(|(k, _)| CONTENT_KEYS.contains(k)) {
            out.push_str(&flatten(value));
        }
        let _ = write!(out, "</{name}>");
        Ok(out)
    }
}

fn flatten(value: &ParamValue) -> String {
    match value {
        ParamValue::Text(text) => text.clone(),
        ParamValue::Pairs(pairs) => pairs
            .iter()
            .map(|(a, b)| format!("({a},{b})"))
            .collect(),
        ParamValue::List(items) => items.join("|"),
        ParamValue::Records(records) => records
            .iter()
            .map(|record| {
                let cells: Vec<_> = record
                    .cells()
                    .iter()
                    .map(|(f, v)| format!("{f}:{v}"))
                    .collect();
                format!("{{{}}}", cells.join(","))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mock_records_calls_in_order() {
        let templates = MockTemplates::new();
        let params = TemplateParams::new().with("left", "L").with("right", "R");

        templates.render("first.html", &params).unwrap();
        templates.render("second.html", &TemplateParams::new()).unwrap();

        let names: Vec<_> = templates.calls().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["first.html", "second.html"]);
        assert_eq!(templates.calls_to("first.html")[0].params, params);
    }

    #[test]
    fn test_mock_trace_format() {
        let params = TemplateParams::new()
            .with("id", "sec1")
            .with("body", "<p>x</p>")
            .with("pairs", vec![("a".to_owned(), "b".to_owned())]);

        let out = MockTemplates::new().render("section.html", &params).unwrap();

        assert_eq!(
            out,
            "<section.html id=\"sec1\" pairs=\"(a,b)\"><p>x</p></section.html>"
        );
    }

    #[test]
    fn test_mock_missing_template() {
        let templates = MockTemplates::new().with_missing("gone.html");

        let err = templates
            .render("gone.html", &TemplateParams::new())
            .unwrap_err();

        assert!(matches!(err, TemplateError::NotFound(_)));
        assert!(templates.calls().is_empty());
    }
}
