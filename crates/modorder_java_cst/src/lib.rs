//! CST node wrappers for Java syntax trees.
//!
//! Wraps tree-sitter nodes with source-aware accessors and classifies them
//! into the closed [`NodeKind`] set that rules dispatch on.

mod kind;

pub use kind::NodeKind;

use modorder_text_size::{TextRange, TextSize};
use tree_sitter::Node;

/// Convert a tree-sitter node range to a TextRange.
pub fn node_range(node: &Node) -> TextRange {
    let start = TextSize::try_from(node.start_byte()).unwrap_or_default();
    let end = TextSize::try_from(node.end_byte()).unwrap_or(start);
    TextRange::new(start, end)
}

/// Wrapper for traversing CST nodes.
#[derive(Debug, Clone, Copy)]
pub struct CstNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> CstNode<'a> {
    pub fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    /// The raw grammar kind, e.g. `"modifiers"` or `"public"`.
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// The classified kind used for rule dispatch.
    pub fn node_kind(&self) -> NodeKind {
        NodeKind::from_kind(self.node.kind())
    }

    pub fn range(&self) -> TextRange {
        node_range(&self.node)
    }

    pub fn text(&self) -> &'a str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// The full source text the tree was parsed from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn is_named(&self) -> bool {
        self.node.is_named()
    }

    pub fn is_error(&self) -> bool {
        self.node.is_error() || self.node.is_missing()
    }

    pub fn parent(&self) -> Option<CstNode<'a>> {
        self.node.parent().map(|n| CstNode::new(n, self.source))
    }

    /// Children in lexical order. The iterator can be recreated freely.
    pub fn children(&self) -> impl Iterator<Item = CstNode<'a>> + 'a {
        let source = self.source;
        let node = self.node;
        (0..node.child_count())
            .filter_map(move |i| node.child(i))
            .map(move |child| CstNode::new(child, source))
    }

    pub fn named_children(&self) -> impl Iterator<Item = CstNode<'a>> + 'a {
        self.children().filter(CstNode::is_named)
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<CstNode<'a>> {
        self.node
            .child_by_field_name(name)
            .map(|n| CstNode::new(n, self.source))
    }

    /// Get the raw tree-sitter node.
    pub fn inner(&self) -> Node<'a> {
        self.node
    }
}

/// Iterator for walking all nodes in a tree (pre-order traversal).
pub struct TreeWalker<'a> {
    cursor: tree_sitter::TreeCursor<'a>,
    source: &'a str,
    done: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: Node<'a>, source: &'a str) -> Self {
        Self {
            cursor: root.walk(),
            source,
            done: false,
        }
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = CstNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = CstNode::new(self.cursor.node(), self.source);

        if self.cursor.goto_first_child() || self.cursor.goto_next_sibling() {
            return Some(node);
        }

        // Climb until a sibling exists; the cursor cannot rise above the root.
        loop {
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
        }
    }
}
