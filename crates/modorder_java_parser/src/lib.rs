//! Java parser for modorder, built on tree-sitter-java.

use std::sync::Arc;

/// Result of parsing a Java source file.
pub struct ParseResult {
    pub tree: tree_sitter::Tree,
    pub source: Arc<str>,
}

impl ParseResult {
    /// Whether the parser had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Java parser wrapping tree-sitter.
pub struct JavaParser {
    parser: tree_sitter::Parser,
}

/// Return the tree-sitter Java language.
pub fn java_language() -> tree_sitter::Language {
    tree_sitter_java::LANGUAGE.into()
}

impl JavaParser {
    /// Create a new Java parser.
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&java_language())
            .expect("Failed to load Java grammar");
        Self { parser }
    }

    /// Parse Java source code into a syntax tree.
    ///
    /// Returns `None` only if tree-sitter gives up entirely; syntax errors
    /// still produce a tree containing `ERROR` nodes.
    pub fn parse(&mut self, source: &str) -> Option<ParseResult> {
        let tree = self.parser.parse(source, None)?;
        Some(ParseResult {
            tree,
            source: source.into(),
        })
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}
