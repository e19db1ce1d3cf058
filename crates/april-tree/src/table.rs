//! Delimited text to HTML table conversion.
//!
//! The first line is a header naming the columns. Every following record
//! becomes a [`Record`] mapping column name to the raw cell string; there is
//! no type inference. Fields containing the delimiter must be quoted.

use std::borrow::Cow;
use std::path::PathBuf;

use april_templates::{Record, TABLE, TemplateEngine, TemplateParams};

use crate::error::{RenderError, TableError};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Parsed table: column names and rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub field_names: Vec<String>,
    pub rows: Vec<Record>,
}

impl TableData {
    /// Parameters for the table template.
    pub fn to_params(&self) -> TemplateParams {
        TemplateParams::new()
            .with("field_names", self.field_names.clone())
            .with("rows", self.rows.clone())
    }
}

/// Parse delimited text with a header row.
///
/// Records shorter than the header map only the columns they have; cells
/// beyond the header are dropped.
pub fn parse_table(text: &str, delimiter: u8) -> Result<TableData, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let field_names: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            field_names
                .iter()
                .zip(record.iter())
                .map(|(field, value)| (field.as_str(), value))
                .collect::<Record>(),
        );
    }

    tracing::debug!(
        fields = field_names.len(),
        rows = rows.len(),
        "Parsed table"
    );
    Ok(TableData { field_names, rows })
}

/// Convert delimited text to table markup via the [`TABLE`] template.
pub fn table_to_markup(
    text: &str,
    delimiter: u8,
    templates: &dyn TemplateEngine,
) -> Result<String, RenderError> {
    let table = parse_table(text, delimiter)?;
    Ok(templates.render(TABLE, &table.to_params())?)
}

/// Where a table node gets its delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A file read at render time.
    Path(PathBuf),
    /// Text held in memory.
    Inline(String),
}

impl TableSource {
    /// Load the delimited text.
    ///
    /// A missing file or one that is not valid UTF-8 fails with
    /// [`RenderError::Io`].
    pub fn read(&self) -> Result<Cow<'_, str>, RenderError> {
        match self {
            Self::Path(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| RenderError::Io {
                    path: path.clone(),
                    source,
                }),
            Self::Inline(text) => Ok(Cow::Borrowed(text)),
        }
    }
}
