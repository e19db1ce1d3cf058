//! The node capability shared by every tree element.
//!
//! A [`Node`] renders itself to markup and exposes its direct children.
//! Navigation entries are aggregated bottom-up: every node reports the
//! entries of its children (in child order, depth-first) followed by its own.

use std::fmt;
use std::sync::Arc;

use april_templates::TemplateEngine;

use crate::content::{Content, OwnedNode, direct_nodes};
use crate::error::RenderError;

/// An `(id, name)` pair shown in the page navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavEntry {
    /// Anchor id the entry links to.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl NavEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether both the id and the name are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty()
    }
}

impl From<NavEntry> for (String, String) {
    fn from(entry: NavEntry) -> Self {
        (entry.id, entry.name)
    }
}

/// A tree element that produces markup.
///
/// Trees are immutable once built: children are discovered by constructors
/// and never change afterwards, so rendering the same tree twice yields the
/// same output and a built tree can be rendered from several threads.
pub trait Node: fmt::Debug + Send + Sync {
    /// Render this node and its subtree.
    ///
    /// The default implementation fails with [`RenderError::Unimplemented`];
    /// every concrete node overrides it.
    fn render(&self, templates: &dyn TemplateEngine) -> Result<String, RenderError> {
        let _ = templates;
        Err(RenderError::Unimplemented(std::any::type_name::<Self>()))
    }

    /// Direct children in insertion order.
    fn children(&self) -> &[Arc<dyn Node>] {
        &[]
    }

    /// Navigation entries contributed by this node alone.
    fn own_nav_entries(&self) -> Vec<NavEntry> {
        Vec::new()
    }

    /// Navigation entries of the whole subtree: every child's entries in
    /// child order, then this node's own entries.
    fn nav_entries(&self) -> Vec<NavEntry> {
        let mut entries: Vec<NavEntry> = self
            .children()
            .iter()
            .flat_map(|child| child.nav_entries())
            .collect();
        entries.extend(self.own_nav_entries());
        entries
    }
}

/// The child list of a container node.
///
/// Only constructors append to it. Children are added by value or taken from
/// the node's own content, so every child has exactly one parent.
#[derive(Debug, Default)]
pub struct Children {
    nodes: Vec<Arc<dyn Node>>,
}

impl Children {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, child: impl Node + 'static) {
        self.nodes.push(Arc::new(child));
    }

    pub fn add_children(&mut self, children: impl IntoIterator<Item = Box<dyn Node>>) {
        self.nodes.extend(children.into_iter().map(Arc::from));
    }

    /// Register the nodes found directly in `content`.
    ///
    /// See [`extract_renderables`](crate::extract_renderables) for which
    /// nodes count. The content keeps owning them.
    pub fn add_possible_children(&mut self, content: &Content) {
        self.nodes
            .extend(direct_nodes(content).into_iter().map(OwnedNode::child_handle));
    }

    pub fn as_slice(&self) -> &[Arc<dyn Node>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use april_templates::MockTemplates;
    use pretty_assertions::assert_eq;

    /// Node that relies on every default method.
    #[derive(Debug)]
    struct Bare;

    impl Node for Bare {}

    /// Container with a fixed list of own entries.
    #[derive(Debug)]
    struct Tagged {
        own: Vec<NavEntry>,
        children: Children,
    }

    impl Node for Tagged {
        fn render(&self, _templates: &dyn TemplateEngine) -> Result<String, RenderError> {
            Ok(self
                .own
                .iter()
                .map(|entry| entry.id.as_str())
                .collect::<Vec<_>>()
                .join(","))
        }

        fn children(&self) -> &[Arc<dyn Node>] {
            self.children.as_slice()
        }

        fn own_nav_entries(&self) -> Vec<NavEntry> {
            self.own.clone()
        }
    }

    fn tagged(own: &[(&str, &str)], children: Vec<Box<dyn Node>>) -> Box<dyn Node> {
        let mut list = Children::new();
        list.add_children(children);
        Box::new(Tagged {
            own: own.iter().map(|(id, name)| NavEntry::new(*id, *name)).collect(),
            children: list,
        })
    }

    fn ids(entries: &[NavEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_default_render_is_unimplemented() {
        let err = Bare.render(&MockTemplates::new()).unwrap_err();
        assert!(matches!(err, RenderError::Unimplemented(name) if name.ends_with("Bare")));
    }

    #[test]
    fn test_default_node_has_no_children_or_entries() {
        assert!(Bare.children().is_empty());
        assert!(Bare.own_nav_entries().is_empty());
        assert!(Bare.nav_entries().is_empty());
    }

    #[test]
    fn test_nav_entries_children_before_self() {
        let tree = tagged(
            &[("root", "Root")],
            vec![
                tagged(&[("a", "A")], vec![]),
                tagged(&[("b", "B")], vec![]),
            ],
        );

        assert_eq!(ids(&tree.nav_entries()), vec!["a", "b", "root"]);
    }

    #[test]
    fn test_nav_entries_depth_first() {
        let tree = tagged(
            &[("root", "Root")],
            vec![
                tagged(
                    &[("a", "A")],
                    vec![
                        tagged(&[("a1", "A1")], vec![]),
                        tagged(&[("a2", "A2")], vec![]),
                    ],
                ),
                tagged(&[("b", "B")], vec![tagged(&[("b1", "B1")], vec![])]),
            ],
        );

        assert_eq!(
            ids(&tree.nav_entries()),
            vec!["a1", "a2", "a", "b1", "b", "root"]
        );
    }

    #[test]
    fn test_nav_entries_equals_concat_of_children_then_own() {
        let children = vec![
            tagged(&[("x", "X"), ("y", "Y")], vec![]),
            tagged(&[], vec![tagged(&[("z", "Z")], vec![])]),
        ];
        let expected: Vec<NavEntry> = children
            .iter()
            .flat_map(|c| c.nav_entries())
            .chain([NavEntry::new("own", "Own")])
            .collect();

        let tree = tagged(&[("own", "Own")], children);

        assert_eq!(tree.nav_entries(), expected);
    }

    #[test]
    fn test_nav_entries_keep_incomplete_entries() {
        let tree = tagged(&[("", "No id")], vec![tagged(&[("a", "")], vec![])]);

        let entries = tree.nav_entries();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.is_complete()));
    }

    #[test]
    fn test_children_preserve_insertion_order() {
        let templates = MockTemplates::new();
        let mut children = Children::new();

        children.add_child(Tagged {
            own: vec![NavEntry::new("first", "First")],
            children: Children::new(),
        });
        children.add_children([tagged(&[("second", "Second")], vec![])]);

        let rendered: Vec<_> = children
            .as_slice()
            .iter()
            .map(|child| child.render(&templates).unwrap())
            .collect();
        assert_eq!(rendered, vec!["first", "second"]);
    }

    #[test]
    fn test_content_children_are_held_by_content_and_list_only() {
        let body: Content = vec![Content::node(Bare), "text".into(), Content::node(Bare)].into();
        let mut children = Children::new();

        children.add_possible_children(&body);

        assert_eq!(children.len(), 2);
        for child in children.as_slice() {
            assert_eq!(Arc::strong_count(child), 2);
        }
        drop(body);
        for child in children.as_slice() {
            assert_eq!(Arc::strong_count(child), 1);
        }
    }

    #[test]
    fn test_nav_entry_into_pair() {
        let pair: (String, String) = NavEntry::new("sec1", "Section 1").into();
        assert_eq!(pair, ("sec1".to_owned(), "Section 1".to_owned()));
    }
}
