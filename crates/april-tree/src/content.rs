//! Mixed content accepted wherever a node expects a body.
//!
//! [`Content`] is text, a single node, or an ordered list of further content
//! nested to any depth. Two operations normalize it:
//!
//! - [`extract_renderables`] finds the nodes that become children. It only
//!   looks at the top level: a node inside a nested list is not a child.
//! - [`coerce_to_text`] renders everything, recursing through nested lists.
//!
//! Markup from a nested list reaches the output, but its nodes stay out of
//! the child list and contribute no navigation entries.

use std::ops::Deref;
use std::sync::Arc;

use april_templates::TemplateEngine;

use crate::error::RenderError;
use crate::node::Node;

/// Text, a node, or an ordered list of content.
///
/// Content owns its nodes and cannot be cloned, so a node placed in one
/// parent's body cannot be placed in another's:
///
/// ```compile_fail
/// use april_tree::{Content, Paragraph, Section};
///
/// let body = Content::from(Paragraph::new("x"));
/// let a = Section::new("A", "", "A", "a", body.clone());
/// let b = Section::new("B", "", "B", "b", body);
/// ```
///
/// Child handles returned by [`Node::children`] cannot be turned back into
/// content either:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use april_tree::{Content, Node, Paragraph, Section};
///
/// let a = Section::new("A", "", "A", "a", Paragraph::new("x"));
/// let handle: Arc<dyn Node> = Arc::clone(&a.children()[0]);
/// let b = Section::new("B", "", "B", "b", Content::from(handle));
/// ```
#[derive(Debug)]
pub enum Content {
    /// Literal text or markup, emitted unchanged.
    Text(String),
    /// A single node.
    Node(OwnedNode),
    /// An ordered sequence; elements may themselves be lists.
    List(Vec<Content>),
}

/// A node held by exactly one piece of content.
///
/// Only constructible from a node value. The containing node's child list
/// keeps a second handle to the same node; nothing else does.
#[derive(Debug)]
pub struct OwnedNode(Arc<dyn Node>);

impl OwnedNode {
    pub fn new(node: impl Node + 'static) -> Self {
        Self(Arc::new(node))
    }

    /// Handle for the owning parent's child list.
    pub(crate) fn child_handle(&self) -> Arc<dyn Node> {
        Arc::clone(&self.0)
    }
}

impl Deref for OwnedNode {
    type Target = dyn Node;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Content {
    /// Wrap a node.
    pub fn node(node: impl Node + 'static) -> Self {
        Self::Node(OwnedNode::new(node))
    }

    /// An empty list.
    pub fn empty() -> Self {
        Self::List(Vec::new())
    }

    /// Shorthand for [`extract_renderables`].
    pub fn renderables(&self) -> Vec<&dyn Node> {
        extract_renderables(self)
    }

    /// Shorthand for [`coerce_to_text`].
    pub fn to_markup(&self, templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        coerce_to_text(self, templates)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<OwnedNode> for Content {
    fn from(node: OwnedNode) -> Self {
        Self::Node(node)
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Nodes that become children of whatever owns `content`.
///
/// A single node yields itself; a list yields its direct node elements in
/// order, skipping text and nested lists; text yields nothing.
pub fn extract_renderables(content: &Content) -> Vec<&dyn Node> {
    direct_nodes(content).into_iter().map(|node| &**node).collect()
}

pub(crate) fn direct_nodes(content: &Content) -> Vec<&OwnedNode> {
    match content {
        Content::Node(node) => vec![node],
        Content::List(items) => items
            .iter()
            .filter_map(|item| match item {
                Content::Node(node) => Some(node),
                Content::Text(_) | Content::List(_) => None,
            })
            .collect(),
        Content::Text(_) => Vec::new(),
    }
}

/// Render `content` to markup.
///
/// Text is returned as-is, a node is rendered, and a list is rendered
/// element by element (recursively) and concatenated in order. An empty list
/// yields an empty string. The first render failure is returned.
pub fn coerce_to_text(
    content: &Content,
    templates: &dyn TemplateEngine,
) -> Result<String, RenderError> {
    match content {
        Content::Text(text) => Ok(text.clone()),
        Content::Node(node) => node.render(templates),
        Content::List(items) => {
            let mut out = String::new();
            for item in items {
                out.push_str(&coerce_to_text(item, templates)?);
            }
            Ok(out)
        }
    }
}
