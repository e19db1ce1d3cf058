//! Table node.

use std::path::PathBuf;

use april_templates::TemplateEngine;

use crate::error::RenderError;
use crate::node::Node;
use crate::table::{DEFAULT_DELIMITER, TableSource, table_to_markup};

/// A table generated from delimited text with a header row.
///
/// A file source is read on every render, so the page reflects the file's
/// contents at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    source: TableSource,
    delimiter: u8,
}

impl Table {
    /// Table read from a file when rendered.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(TableSource::Path(path.into()))
    }

    /// Table built from text held in memory.
    pub fn inline(text: impl Into<String>) -> Self {
        Self::new(TableSource::Inline(text.into()))
    }

    pub fn new(source: TableSource) -> Self {
        Self {
            source,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Split fields on `delimiter` instead of a comma.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }
}

impl Node for Table {
    fn render(&self, templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        let text = self.source.read()?;
        table_to_markup(&text, self.delimiter, templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use april_templates::{MockTemplates, ParamValue, TABLE, Templates};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_table_submits_fields_and_rows() {
        let templates = MockTemplates::new();

        Table::inline("a,b\n1,2\n3,4\n").render(&templates).unwrap();

        let params = &templates.calls_to(TABLE)[0].params;
        assert_eq!(
            params.get("field_names"),
            Some(&ParamValue::List(vec!["a".to_owned(), "b".to_owned()]))
        );
        match params.get("rows") {
            Some(ParamValue::Records(rows)) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1].get("b"), Some("4"));
            }
            other => panic!("rows should be records, got {other:?}"),
        }
    }

    #[test]
    fn test_file_table_with_builtin_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "x,y\n1,2\n3,4\n5,6\n7,8\n").unwrap();

        let html = Table::from_path(&path).render(&Templates::new().unwrap()).unwrap();

        assert_eq!(html.matches("<tr>").count(), 5);
        assert_eq!(html.matches("<th>").count(), 2);
    }

    #[test]
    fn test_file_is_read_at_render_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "x\n1\n").unwrap();
        let table = Table::from_path(&path);
        let templates = Templates::new().unwrap();

        let before = table.render(&templates).unwrap();
        std::fs::write(&path, "x\n1\n2\n").unwrap();
        let after = table.render(&templates).unwrap();

        assert_eq!(before.matches("<tr>").count(), 2);
        assert_eq!(after.matches("<tr>").count(), 3);
    }

    #[test]
    fn test_custom_delimiter() {
        let templates = MockTemplates::new();

        Table::inline("a;b\n1;2\n")
            .with_delimiter(b';')
            .render(&templates)
            .unwrap();

        let params = &templates.calls_to(TABLE)[0].params;
        assert_eq!(
            params.get("field_names"),
            Some(&ParamValue::List(vec!["a".to_owned(), "b".to_owned()]))
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Table::from_path("/nonexistent/t.csv")
            .render(&MockTemplates::new())
            .unwrap_err();

        assert!(matches!(err, RenderError::Io { .. }));
    }

    #[test]
    fn test_table_has_no_children() {
        assert!(Table::inline("a\n1\n").children().is_empty());
    }
}
