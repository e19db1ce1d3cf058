//! Composable document trees for April.
//!
//! A page is a tree of [`Node`]s rooted at a [`Skeleton`]. Each node renders
//! itself to an HTML fragment, mostly by submitting parameters to a named
//! template through a [`TemplateEngine`](april_templates::TemplateEngine), and
//! reports the navigation entries of its subtree so the skeleton can build a
//! menu.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Node`] trait with `render()`, `children()` and `nav_entries()` methods
//! - [`Content`], the text/node/list union every body accepts
//! - [`extract_renderables`] and [`coerce_to_text`] for normalizing content
//! - The node catalog in [`nodes`], re-exported at the crate root
//! - [`parse_table`] and [`table_to_markup`] for delimited text
//!
//! Trees are immutable once built and can be rendered any number of times.
//!
//! # Example
//!
//! ```
//! use april_config::AssetsConfig;
//! use april_templates::Templates;
//! use april_tree::{Node, Paragraph, Section, SideBySide, Skeleton, Table};
//!
//! let page = Skeleton::builder("Quarterly report")
//!     .corner("Analytics")
//!     .body(vec![
//!         Section::new("Summary", "", "Summary", "summary", Paragraph::new("All good.")),
//!         Section::new(
//!             "Numbers",
//!             "by region",
//!             "Numbers",
//!             "numbers",
//!             SideBySide::new(Table::inline("region,total\nnorth,3\n"), Paragraph::new("Up.")),
//!         ),
//!     ])
//!     .build(&AssetsConfig::with_prefix("https://cdn.example.com/april"))
//!     .unwrap();
//!
//! assert_eq!(page.nav_menu().len(), 2);
//! let html = page.render(&Templates::new().unwrap()).unwrap();
//! assert!(html.contains("href=\"#numbers\""));
//! ```

mod content;
mod error;
mod node;
pub mod nodes;
mod table;

pub use content::{Content, OwnedNode, coerce_to_text, extract_renderables};
pub use error::{RenderError, TableError};
pub use node::{Children, NavEntry, Node};
pub use nodes::{
    CENTER_STYLE, CodeBlock, DEFAULT_CODE_LANGUAGE, FULL_WIDTH_STYLE, Html, Image, Paragraph,
    Preformatted, RelatedLink, Section, SideBySide, Skeleton, SkeletonBuilder, Table,
};
pub use table::{DEFAULT_DELIMITER, TableData, TableSource, parse_table, table_to_markup};
