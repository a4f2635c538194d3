//! Runs configured rules over a source file.
//!
//! The linter walks every node of the tree once, presents each node to the
//! rules registered for its [`NodeKind`](modorder_java_cst::NodeKind), drops
//! suppressed reports and resolves line/column positions.

use std::path::{Path, PathBuf};

use modorder_checkstyle::MergedConfig;
use modorder_diagnostics::{Diagnostic, Severity};
use modorder_java_cst::{CstNode, TreeWalker};
use modorder_java_parser::JavaParser;
use modorder_source_file::LineColumn;
use modorder_text_size::Ranged;
use thiserror::Error;
use tracing::{debug, warn};

use crate::rules::ModifierOrder;
use crate::{
    CheckContext, PlainTextCommentFilterConfig, Rule, RuleRegistry, SuppressionContext,
};

#[derive(Error, Debug)]
pub enum LintError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse source")]
    Parse,
}

/// A reported violation with its resolved position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Name of the rule that produced the report.
    pub rule: &'static str,
    pub severity: Severity,
    pub location: LineColumn,
    pub diagnostic: Diagnostic,
}

impl Message {
    pub fn body(&self) -> &str {
        &self.diagnostic.kind.body
    }
}

/// Result of linting a file.
#[derive(Debug, Default)]
pub struct LintResult {
    /// Reports sorted by position.
    pub messages: Vec<Message>,
    /// Whether the parser recovered from syntax errors.
    pub has_syntax_errors: bool,
}

impl LintResult {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Number of reports at `severity` or above.
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity >= severity)
            .count()
    }
}

struct ActiveRule {
    rule: Box<dyn Rule>,
    severity: Severity,
}

/// A set of rules plus the suppression filters that apply to them.
pub struct Linter {
    rules: Vec<ActiveRule>,
    filters: Vec<PlainTextCommentFilterConfig>,
}

impl Linter {
    /// A linter with no rules and the default `CHECKSTYLE:OFF` filter.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            filters: vec![PlainTextCommentFilterConfig::checkstyle_default()],
        }
    }

    /// The built-in rules with default settings.
    pub fn with_defaults() -> Self {
        let mut linter = Self::new();
        linter.add_rule(Box::new(ModifierOrder), Severity::default());
        linter
    }

    /// Build a linter from merged configuration.
    ///
    /// Unknown rules and unparsable severities are logged and skipped or
    /// defaulted rather than treated as errors.
    pub fn from_config(config: &MergedConfig, registry: &RuleRegistry) -> Self {
        let mut linter = Self::new();

        for configured in config.enabled_rules() {
            let Some(rule) = registry.create_rule(&configured.name, &configured.properties_ref())
            else {
                warn!(rule = %configured.name, "unknown rule, skipping");
                continue;
            };

            let severity = match configured.severity.as_deref().map(str::parse::<Severity>) {
                None => Severity::default(),
                Some(Ok(severity)) => severity,
                Some(Err(err)) => {
                    warn!(rule = %configured.name, "{err}, using error");
                    Severity::default()
                }
            };

            linter.add_rule(rule, severity);
        }

        for module in config.file_modules_named("SuppressWithPlainTextCommentFilter") {
            match PlainTextCommentFilterConfig::from_module(module) {
                Some(filter) => linter.add_filter(filter),
                None => warn!("invalid SuppressWithPlainTextCommentFilter pattern, skipping"),
            }
        }

        linter
    }

    /// Add a rule. Rules at [`Severity::Ignore`] are never run.
    pub fn add_rule(&mut self, rule: Box<dyn Rule>, severity: Severity) {
        debug!(rule = rule.name(), %severity, "enabled rule");
        self.rules.push(ActiveRule { rule, severity });
    }

    pub fn add_filter(&mut self, filter: PlainTextCommentFilterConfig) {
        self.filters.push(filter);
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|active| active.rule.name())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse and check Java source text.
    pub fn check_source(&self, source: &str) -> Result<LintResult, LintError> {
        let mut parser = JavaParser::new();
        let parsed = parser.parse(source).ok_or(LintError::Parse)?;

        let ctx = CheckContext::new(source);
        let root = CstNode::new(parsed.tree.root_node(), source);

        let mut suppressions = SuppressionContext::from_root(&root, &self.filters);
        suppressions.parse_suppress_warnings(&root);

        let active: Vec<&ActiveRule> = self
            .rules
            .iter()
            .filter(|active| !active.severity.is_ignore())
            .collect();

        let mut messages = Vec::new();
        for node in TreeWalker::new(root.inner(), source) {
            let kind = node.node_kind();
            for active in active.iter().filter(|active| active.rule.wants(kind)) {
                for diagnostic in active.rule.check(&ctx, &node) {
                    if suppressions.is_suppressed(active.rule.name(), diagnostic.start()) {
                        continue;
                    }
                    messages.push(Message {
                        rule: active.rule.name(),
                        severity: active.severity,
                        location: ctx.source_code().line_column(diagnostic.start()),
                        diagnostic,
                    });
                }
            }
        }

        messages.sort_by(|a, b| a.location.cmp(&b.location).then(a.rule.cmp(b.rule)));

        Ok(LintResult {
            messages,
            has_syntax_errors: parsed.has_errors(),
        })
    }

    /// Read and check a file.
    pub fn check_file(&self, path: &Path) -> Result<LintResult, LintError> {
        let source = std::fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let result = self.check_source(&source)?;
        if result.has_syntax_errors {
            warn!(path = %path.display(), "syntax errors, results may be incomplete");
        }
        debug!(path = %path.display(), violations = result.len(), "checked");
        Ok(result)
    }
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field("rules", &self.rule_names().collect::<Vec<_>>())
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
