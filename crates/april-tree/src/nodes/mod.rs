//! The node catalog.
//!
//! | Node | Output |
//! |---|---|
//! | [`Skeleton`] | Full page with navigation, through the skeleton template |
//! | [`Html`] | Its markup, unchanged |
//! | [`Section`] | Anchored section, through the section template |
//! | [`SideBySide`] | Two columns, through the side-by-side template |
//! | [`Image`] | `<img>`, optionally wrapped in a link |
//! | [`Paragraph`] | `<p>` |
//! | [`Table`] | Table generated from delimited text |
//! | [`Preformatted`] | `<pre>` |
//! | [`CodeBlock`] | `<pre>` with syntax highlighting classes |
//!
//! Only [`Section`] contributes a navigation entry.

mod image;
mod layout;
mod skeleton;
mod table;
mod text;

pub use image::{CENTER_STYLE, FULL_WIDTH_STYLE, Image};
pub use layout::{Section, SideBySide};
pub use skeleton::{RelatedLink, Skeleton, SkeletonBuilder};
pub use table::Table;
pub use text::{CodeBlock, DEFAULT_CODE_LANGUAGE, Html, Paragraph, Preformatted};

use crate::content::Content;

macro_rules! impl_into_content {
    ($($node:ty),* $(,)?) => {
        $(
            impl From<$node> for Content {
                fn from(node: $node) -> Self {
                    Content::node(node)
                }
            }
        )*
    };
}

impl_into_content!(
    Skeleton,
    Html,
    Section,
    SideBySide,
    Image,
    Paragraph,
    Table,
    Preformatted,
    CodeBlock,
);
