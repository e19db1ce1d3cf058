//! Template parameters.
//!
//! A template call carries a flat, ordered mapping from parameter name to
//! [`ParamValue`]. Values are plain text (which may itself be rendered
//! markup), ordered pairs, string lists or table records.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A single template parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Text or already-rendered markup, inserted verbatim.
    Text(String),
    /// Ordered pairs, e.g. navigation `(id, name)` entries.
    Pairs(Vec<(String, String)>),
    /// Ordered list of strings, e.g. table field names.
    List(Vec<String>),
    /// Table records keyed by field name.
    Records(Vec<Record>),
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<(String, String)>> for ParamValue {
    fn from(value: Vec<(String, String)>) -> Self {
        Self::Pairs(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<Record>> for ParamValue {
    fn from(value: Vec<Record>) -> Self {
        Self::Records(value)
    }
}

/// One table row: cells in column order, addressable by field name.
///
/// Serializes as a map so templates can write `row[field]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. A repeated field keeps its first position and takes the new value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(f, _)| *f == field) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((field, value)),
        }
    }

    /// Look up a cell by field name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Cells in column order.
    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (field, value) in &self.cells {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Flat parameter mapping submitted with a template name.
///
/// Keys keep insertion order; setting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParams {
    entries: Vec<(&'static str, ParamValue)>,
}

impl TemplateParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Text value of `key`, if it is a [`ParamValue::Text`].
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ParamValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TemplateParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_replaces_existing_key_in_place() {
        let params = TemplateParams::new()
            .with("title", "first")
            .with("body", "<p>x</p>")
            .with("title", "second");

        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "body"]);
        assert_eq!(params.text("title"), Some("second"));
    }

    #[test]
    fn test_text_ignores_non_text_values() {
        let params = TemplateParams::new().with("fields", vec!["a".to_owned()]);
        assert_eq!(params.text("fields"), None);
        assert_eq!(params.text("missing"), None);
    }

    #[test]
    fn test_record_preserves_column_order() {
        let record: Record = [("name", "a"), ("score", "1")].into_iter().collect();

        assert_eq!(
            record.cells(),
            &[
                ("name".to_owned(), "a".to_owned()),
                ("score".to_owned(), "1".to_owned())
            ]
        );
        assert_eq!(record.get("score"), Some("1"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_record_repeated_field_keeps_position() {
        let mut record = Record::new();
        record.insert("a", "1");
        record.insert("b", "2");
        record.insert("a", "3");

        assert_eq!(record.len(), 2);
        assert_eq!(record.cells()[0], ("a".to_owned(), "3".to_owned()));
    }

    #[test]
    fn test_params_serialize_as_ordered_map() {
        let params = TemplateParams::new()
            .with("title", "T")
            .with("nav_entries", vec![("a".to_owned(), "A".to_owned())])
            .with("field_names", vec!["x".to_owned()])
            .with("rows", vec![[("x", "1")].into_iter().collect::<Record>()]);

        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"title":"T","nav_entries":[["a","A"]],"field_names":["x"],"rows":[{"x":"1"}]}"#
        );
    }
}
