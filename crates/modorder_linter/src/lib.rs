//! Java modifier-order linter.

pub mod linter;
pub mod registry;
pub mod rules;
pub mod suppression;

pub use linter::{LintError, LintResult, Linter, Message};
pub use registry::{FromConfig, Properties, RuleRegistry};
pub use suppression::{PlainTextCommentFilterConfig, SuppressionContext};

use modorder_diagnostics::Diagnostic;
use modorder_java_cst::{CstNode, NodeKind};
use modorder_source_file::{LineIndex, SourceCode};
use modorder_text_size::TextRange;

/// Context provided to rules during checking.
pub struct CheckContext<'a> {
    source: &'a str,
    line_index: LineIndex,
}

impl<'a> CheckContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            line_index: LineIndex::from_source_text(source),
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get the cached line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Get the source code helper for line/column info.
    pub fn source_code(&self) -> SourceCode<'a, '_> {
        SourceCode::new(self.source, &self.line_index)
    }

    /// Get text at a given range.
    pub fn text_at(&self, range: TextRange) -> &'a str {
        &self.source[range]
    }
}

/// Trait for lint rules.
pub trait Rule: Send + Sync {
    /// The rule's name (matching checkstyle module name).
    fn name(&self) -> &'static str;

    /// Node kinds this rule cares about. Empty means run on all nodes.
    fn relevant_kinds(&self) -> &'static [NodeKind] {
        &[]
    }

    /// Check a CST node for violations.
    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic>;

    /// Whether the engine should present `kind` to this rule.
    fn wants(&self, kind: NodeKind) -> bool {
        let kinds = self.relevant_kinds();
        kinds.is_empty() || kinds.contains(&kind)
    }
}
