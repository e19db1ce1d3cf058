//! Container nodes rendered through templates.

use std::sync::Arc;

use april_templates::{SECTION, SIDE_BY_SIDE, TemplateEngine, TemplateParams};

use crate::content::{Content, coerce_to_text};
use crate::error::RenderError;
use crate::node::{Children, NavEntry, Node};

/// A titled page section with an anchor.
///
/// Contributes one navigation entry, `(id, name)`.
#[derive(Debug)]
pub struct Section {
    title: String,
    subtitle: String,
    name: String,
    id: String,
    body: Content,
    children: Children,
}

impl Section {
    /// Create a section.
    ///
    /// `name` is the label shown in the navigation menu, `id` the anchor the
    /// menu links to.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        name: impl Into<String>,
        id: impl Into<String>,
        body: impl Into<Content>,
    ) -> Self {
        let body = body.into();
        let mut children = Children::new();
        children.add_possible_children(&body);
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            name: name.into(),
            id: id.into(),
            body,
            children,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Node for Section {
    fn render(&self, templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        let params = TemplateParams::new()
            .with("title", self.title.as_str())
            .with("subtitle", self.subtitle.as_str())
            .with("id", self.id.as_str())
            .with("body", coerce_to_text(&self.body, templates)?);
        Ok(templates.render(SECTION, &params)?)
    }

    fn children(&self) -> &[Arc<dyn Node>] {
        self.children.as_slice()
    }

    fn own_nav_entries(&self) -> Vec<NavEntry> {
        vec![NavEntry::new(self.id.as_str(), self.name.as_str())]
    }
}

/// Two columns rendered next to each other.
#[derive(Debug)]
pub struct SideBySide {
    left: Content,
    right: Content,
    children: Children,
}

impl SideBySide {
    /// Create a two-column layout. Children are the left column's nodes
    /// followed by the right column's.
    pub fn new(left: impl Into<Content>, right: impl Into<Content>) -> Self {
        let left = left.into();
        let right = right.into();
        let mut children = Children::new();
        children.add_possible_children(&left);
        children.add_possible_children(&right);
        Self {
            left,
            right,
            children,
        }
    }
}

impl Node for SideBySide {
    fn render(&self, templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        let params = TemplateParams::new()
            .with("left", coerce_to_text(&self.left, templates)?)
            .with("right", coerce_to_text(&self.right, templates)?);
        Ok(templates.render(SIDE_BY_SIDE, &params)?)
    }

    fn children(&self) -> &[Arc<dyn Node>] {
        self.children.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Html, Paragraph};
    use april_templates::{MockTemplates, TemplateError, Templates};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_submits_fields() {
        let templates = MockTemplates::new();
        let section = Section::new(
            "foo",
            "bar",
            "Foo",
            "foo-id",
            vec![Html::new("<p class='what'>snooze</p>")],
        );

        let html = section.render(&templates).unwrap();

        let call = &templates.calls_to(SECTION)[0];
        assert_eq!(call.params.text("title"), Some("foo"));
        assert_eq!(call.params.text("subtitle"), Some("bar"));
        assert_eq!(call.params.text("id"), Some("foo-id"));
        assert_eq!(
            call.params.text("body"),
            Some("<p class='what'>snooze</p>")
        );
        assert!(html.contains("snooze"));
    }

    #[test]
    fn test_section_with_builtin_template() {
        let section = Section::new(
            "foo",
            "bar",
            "foo",
            "foo",
            vec![Html::new("<p class='what'>snooze</p>")],
        );

        let html = section.render(&Templates::new().unwrap()).unwrap();

        assert_eq!(html.matches("<section").count(), 1);
        assert_eq!(html.matches("class='what'").count(), 1);
    }

    #[test]
    fn test_section_nav_entry() {
        let section = Section::new("Title", "", "Section 1", "sec1", "text");
        assert_eq!(section.own_nav_entries(), vec![NavEntry::new("sec1", "Section 1")]);
        assert_eq!(section.nav_entries(), vec![NavEntry::new("sec1", "Section 1")]);
    }

    #[test]
    fn test_nested_sections_list_children_first() {
        let inner = Section::new("Inner", "", "Inner", "inner", Paragraph::new("x"));
        let outer = Section::new("Outer", "", "Outer", "outer", vec![inner]);

        assert_eq!(
            outer.nav_entries(),
            vec![
                NavEntry::new("inner", "Inner"),
                NavEntry::new("outer", "Outer")
            ]
        );
    }

    #[test]
    fn test_section_children_from_body() {
        let section = Section::new(
            "t",
            "s",
            "n",
            "i",
            vec![
                Content::from(Paragraph::new("a")),
                "plain".into(),
                vec![Content::from(Paragraph::new("nested"))].into(),
                Paragraph::new("b").into(),
            ],
        );

        assert_eq!(section.children().len(), 2);
    }

    #[test]
    fn test_section_text_body_has_no_children() {
        let section = Section::new("t", "s", "n", "i", "<p>raw</p>");
        assert!(section.children().is_empty());
    }

    #[test]
    fn test_section_missing_template_propagates() {
        let templates = MockTemplates::new().with_missing(SECTION);
        let section = Section::new("t", "s", "n", "i", "");

        let err = section.render(&templates).unwrap_err();

        assert!(matches!(err, RenderError::Template(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_side_by_side_renders_each_side() {
        let templates = MockTemplates::new();
        let layout = SideBySide::new(Html::new("foo"), Html::new("bar"));

        let html = layout.render(&templates).unwrap();

        let call = &templates.calls_to(SIDE_BY_SIDE)[0];
        assert_eq!(call.params.text("left"), Some("foo"));
        assert_eq!(call.params.text("right"), Some("bar"));
        assert_eq!(html, "<side_by_side.html>foobar</side_by_side.html>");
    }

    #[test]
    fn test_side_by_side_empty_sides() {
        let layout = SideBySide::new(Content::empty(), Content::empty());

        let html = layout.render(&Templates::new().unwrap()).unwrap();

        assert_eq!(html.matches("class=\"row\"").count(), 1);
        assert!(layout.children().is_empty());
    }

    #[test]
    fn test_side_by_side_children_left_then_right() {
        let layout = SideBySide::new(
            Section::new("L", "", "Left", "left", ""),
            vec![
                Section::new("R1", "", "Right 1", "r1", ""),
                Section::new("R2", "", "Right 2", "r2", ""),
            ],
        );

        let ids: Vec<_> = layout.nav_entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["left", "r1", "r2"]);
    }

    #[test]
    fn test_nested_containers_list_each_section_once() {
        let page = Section::new(
            "Top",
            "",
            "Top",
            "top",
            SideBySide::new(
                Section::new("A", "", "A", "a", Paragraph::new("x")),
                Section::new("B", "", "B", "b", ""),
            ),
        );

        let ids: Vec<_> = page.nav_entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b", "top"]);

        let layout = &page.children()[0];
        assert_eq!(Arc::strong_count(layout), 2);
        for column in layout.children() {
            assert_eq!(Arc::strong_count(column), 2);
        }
    }
}
