//! Suppression support.
//!
//! Reports can be silenced the way checkstyle allows:
//! - `// CHECKSTYLE:OFF:RuleName` / `// CHECKSTYLE:ON:RuleName` comments
//! - `/* CHECKSTYLE:OFF:RuleName */` block comments
//! - custom comment pairs from `SuppressWithPlainTextCommentFilter`
//! - `@SuppressWarnings("checkstyle:RuleName")` annotations
//!
//! Comment markers are read from the comment nodes of the parsed tree, so
//! text inside string literals and text blocks never toggles a region.
//! Suppressions are byte ranges in which a rule (or every rule) is disabled.
//! Rule names are compared case-insensitively.

use lazy_static::lazy_static;
use modorder_checkstyle::Module;
use modorder_java_cst::{CstNode, TreeWalker};
use modorder_java_parser::JavaParser;
use modorder_text_size::{TextRange, TextSize};
use regex::Regex;
use std::collections::HashMap;

/// Key under which regions for all rules are stored.
const ALL_RULES: &str = "*";

lazy_static! {
    static ref CHECKSTYLE_DEFAULT: PlainTextCommentFilterConfig = PlainTextCommentFilterConfig::new(
        r"CHECKSTYLE:OFF:(\w+)",
        r"CHECKSTYLE:ON:(\w+)",
        Some("$1")
    )
    .expect("default suppression patterns are valid");
}

/// Configuration for a plain text comment filter.
#[derive(Debug, Clone)]
pub struct PlainTextCommentFilterConfig {
    /// Regex pattern for "off" comments.
    pub off_pattern: Regex,
    /// Regex pattern for "on" comments.
    pub on_pattern: Regex,
    /// Capture group holding the rule name (0 means the comment applies to every rule).
    pub check_format_group: usize,
}

impl PlainTextCommentFilterConfig {
    /// Create a new filter config from checkstyle properties.
    ///
    /// - `off_comment_format`: regex for off comments, e.g. `CHECKSTYLE\:OFF\:(\w+)`
    /// - `on_comment_format`: regex for on comments, e.g. `CHECKSTYLE\:ON\:(\w+)`
    /// - `check_format`: `$1` selects the first capture group as the rule name
    ///
    /// Returns `None` if either pattern is not a valid regex.
    pub fn new(
        off_comment_format: &str,
        on_comment_format: &str,
        check_format: Option<&str>,
    ) -> Option<Self> {
        let off_pattern = Regex::new(off_comment_format).ok()?;
        let on_pattern = Regex::new(on_comment_format).ok()?;

        let check_format_group = check_format
            .and_then(|fmt| fmt.strip_prefix('$').and_then(|s| s.parse::<usize>().ok()))
            .unwrap_or(0);

        Some(Self {
            off_pattern,
            on_pattern,
            check_format_group,
        })
    }

    /// The built-in `CHECKSTYLE:OFF:Rule` / `CHECKSTYLE:ON:Rule` filter.
    pub fn checkstyle_default() -> Self {
        CHECKSTYLE_DEFAULT.clone()
    }

    /// Build a filter from a `SuppressWithPlainTextCommentFilter` module.
    ///
    /// Missing formats fall back to checkstyle's defaults
    /// (`// CHECKSTYLE:OFF` and `// CHECKSTYLE:ON`).
    pub fn from_module(module: &Module) -> Option<Self> {
        let off_format = module
            .property("offCommentFormat")
            .unwrap_or(r"// CHECKSTYLE:OFF");
        let on_format = module
            .property("onCommentFormat")
            .unwrap_or(r"// CHECKSTYLE:ON");
        Self::new(off_format, on_format, module.property("checkFormat"))
    }

    fn rule_name(&self, captures: &regex::Captures) -> String {
        if self.check_format_group == 0 {
            return ALL_RULES.to_string();
        }
        captures
            .get(self.check_format_group)
            .map_or_else(|| ALL_RULES.to_string(), |m| m.as_str().to_lowercase())
    }
}

/// Manages suppressions for a source file.
#[derive(Debug, Default)]
pub struct SuppressionContext {
    /// Suppressed ranges keyed by lowercased rule name, or `*` for every rule.
    regions: HashMap<String, Vec<TextRange>>,
}

impl SuppressionContext {
    /// Create a new empty suppression context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse suppressions from source code using the given filter configs.
    ///
    /// The source is parsed so that only real comments are considered; text
    /// inside string literals and text blocks never opens a region.
    pub fn from_source(source: &str, filters: &[PlainTextCommentFilterConfig]) -> Self {
        let mut parser = JavaParser::new();
        let Some(parsed) = parser.parse(source) else {
            return Self::new();
        };
        Self::from_root(&CstNode::new(parsed.tree.root_node(), source), filters)
    }

    /// Parse suppressions from the comment nodes of an already parsed tree.
    pub fn from_root(root: &CstNode, filters: &[PlainTextCommentFilterConfig]) -> Self {
        let comments: Vec<_> = TreeWalker::new(root.inner(), root.source())
            .filter(|node| node.node_kind().is_comment())
            .map(|node| (node.range().start(), node.text()))
            .collect();
        let end = offset(root.source().len());

        let mut ctx = Self::new();
        for filter in filters {
            ctx.parse_with_filter(&comments, end, filter);
        }
        ctx
    }

    /// Match `comments` against the on/off pairs of `filter`.
    fn parse_with_filter(
        &mut self,
        comments: &[(TextSize, &str)],
        end: TextSize,
        filter: &PlainTextCommentFilterConfig,
    ) {
        let mut open: HashMap<String, TextSize> = HashMap::new();

        for &(start, comment) in comments {
            if let Some(captures) = filter.off_pattern.captures(comment) {
                open.entry(filter.rule_name(&captures)).or_insert(start);
            }

            if let Some(captures) = filter.on_pattern.captures(comment)
                && let Some((rule, off)) = open.remove_entry(&filter.rule_name(&captures))
            {
                self.add_region(rule, TextRange::new(off, start));
            }
        }

        // Unclosed regions run to the end of the file.
        for (rule, start) in open {
            self.add_region(rule, TextRange::new(start, end));
        }
    }

    fn add_region(&mut self, rule: String, range: TextRange) {
        self.regions.entry(rule).or_default().push(range);
    }

    /// Check if a report from `rule_name` at `pos` is suppressed.
    pub fn is_suppressed(&self, rule_name: &str, pos: TextSize) -> bool {
        let covers = |key: &str| {
            self.regions
                .get(key)
                .is_some_and(|ranges| ranges.iter().any(|r| r.contains(pos)))
        };
        covers(&rule_name.to_lowercase()) || covers(ALL_RULES)
    }

    /// Check if there are any suppressions.
    pub fn has_suppressions(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Register `@SuppressWarnings` annotations found on declarations.
    ///
    /// Recognized values are `"checkstyle:RuleName"` and `"checkstyle:all"`,
    /// either alone or in an array initializer.
    pub fn parse_suppress_warnings(&mut self, root: &CstNode) {
        for node in TreeWalker::new(root.inner(), root.source()) {
            if !node.node_kind().is_declaration() {
                continue;
            }

            let Some(modifiers) = node.children().find(|c| c.node_kind().is_modifiers()) else {
                continue;
            };

            for annotation in modifiers
                .children()
                .filter(|c| c.node_kind().is_any_annotation())
            {
                for rule in suppressed_rules(&annotation) {
                    self.add_region(rule, node.range());
                }
            }
        }
    }
}

/// Rule names listed by a `@SuppressWarnings` annotation.
fn suppressed_rules(annotation: &CstNode) -> Vec<String> {
    let name = annotation
        .child_by_field_name("name")
        .map_or("", |n| n.text());
    if name != "SuppressWarnings" && name != "java.lang.SuppressWarnings" {
        return vec![];
    }

    let Some(arguments) = annotation.child_by_field_name("arguments") else {
        return vec![];
    };

    let mut rules = vec![];
    collect_string_values(&arguments, &mut rules);
    rules
}

/// Recursively collect `checkstyle:` string values from annotation arguments.
fn collect_string_values(node: &CstNode, rules: &mut Vec<String>) {
    if node.kind() == "string_literal" {
        let value = node.text().trim_matches('"');
        if let Some(rule) = value.strip_prefix("checkstyle:") {
            let rule = rule.to_lowercase();
            rules.push(if rule == "all" { ALL_RULES.to_string() } else { rule });
        }
        return;
    }

    for child in node.named_children() {
        collect_string_values(&child, rules);
    }
}

fn offset(pos: usize) -> TextSize {
    TextSize::try_from(pos).unwrap_or(TextSize::new(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(source: &str, needle: &str) -> TextSize {
        TextSize::try_from(source.find(needle).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_line_comment_suppression() {
        let source = r#"
class Foo {
    // CHECKSTYLE:OFF:ModifierOrder
    static public void method() { }
    // CHECKSTYLE:ON:ModifierOrder
    static public void other() { }
}
"#;

        let filter = PlainTextCommentFilterConfig::checkstyle_default();
        let ctx = SuppressionContext::from_source(source, &[filter]);

        assert!(ctx.has_suppressions());
        assert!(ctx.is_suppressed("ModifierOrder", pos(source, "public void method")));
        assert!(!ctx.is_suppressed("ModifierOrder", pos(source, "public void other")));
        assert!(!ctx.is_suppressed("RedundantModifier", pos(source, "public void method")));
    }

    #[test]
    fn test_parse_block_comment_suppression() {
        let source = r#"
class Foo {
    /* CHECKSTYLE:OFF:ModifierOrder */
    final static int X = 1;
    /* CHECKSTYLE:ON:ModifierOrder */
}
"#;

        let filter = PlainTextCommentFilterConfig::checkstyle_default();
        let ctx = SuppressionContext::from_source(source, &[filter]);

        assert!(ctx.is_suppressed("modifierorder", pos(source, "static int")));
    }

    #[test]
    fn test_unclosed_suppression() {
        let source = r#"
class Foo {
    // CHECKSTYLE:OFF:ModifierOrder
    static public void method() { }
}
"#;

        let filter = PlainTextCommentFilterConfig::checkstyle_default();
        let ctx = SuppressionContext::from_source(source, &[filter]);

        assert!(ctx.is_suppressed("ModifierOrder", pos(source, "public void")));
        let near_end = TextSize::try_from(source.len() - 2).unwrap();
        assert!(ctx.is_suppressed("ModifierOrder", near_end));
    }

    #[test]
    fn test_comment_markers_inside_strings_ignored() {
        let source = r#"
class Foo {
    String s = "// CHECKSTYLE:OFF:ModifierOrder";
    static public void method() { }
}
"#;

        let filter = PlainTextCommentFilterConfig::checkstyle_default();
        let ctx = SuppressionContext::from_source(source, &[filter]);

        assert!(!ctx.has_suppressions());
    }

    #[test]
    fn test_comment_markers_inside_text_blocks_ignored() {
        let source = r#"
class Foo {
    String s = """
        // CHECKSTYLE:OFF:ModifierOrder
        /* CHECKSTYLE:OFF:ModifierOrder */
        """;
    static public int x;
}
"#;

        let filter = PlainTextCommentFilterConfig::checkstyle_default();
        let ctx = SuppressionContext::from_source(source, &[filter]);

        assert!(!ctx.has_suppressions());
        assert!(!ctx.is_suppressed("ModifierOrder", pos(source, "public int")));
    }

    #[test]
    fn test_from_root_uses_parsed_comments() {
        let source = "class A {\n    // CHECKSTYLE:OFF:ModifierOrder\n    static public int x;\n}\n";
        let mut parser = JavaParser::new();
        let result = parser.parse(source).expect("Failed to parse");
        let root = CstNode::new(result.tree.root_node(), source);

        let ctx = SuppressionContext::from_root(
            &root,
            &[PlainTextCommentFilterConfig::checkstyle_default()],
        );
        assert!(ctx.is_suppressed("ModifierOrder", pos(source, "public int")));
    }

    #[test]
    fn test_custom_pattern_without_rule_group() {
        let source = r#"
class Foo {
    // GENERATED START
    static public void method() { }
    // GENERATED END
    static public void other() { }
}
"#;

        let filter =
            PlainTextCommentFilterConfig::new("GENERATED START", "GENERATED END", None).unwrap();
        let ctx = SuppressionContext::from_source(source, &[filter]);

        assert!(ctx.is_suppressed("ModifierOrder", pos(source, "public void method")));
        assert!(ctx.is_suppressed("AnyOtherRule", pos(source, "public void method")));
        assert!(!ctx.is_suppressed("ModifierOrder", pos(source, "public void other")));
    }

    #[test]
    fn test_filter_from_module_defaults() {
        let xml = r#"<module name="Checker">
    <module name="SuppressWithPlainTextCommentFilter"/>
</module>"#;
        let config = modorder_checkstyle::CheckstyleConfig::parse(xml).unwrap();
        let filter = PlainTextCommentFilterConfig::from_module(config.file_modules()[0]).unwrap();

        let source = "class A {\n// CHECKSTYLE:OFF\nstatic public int x;\n// CHECKSTYLE:ON\n}\n";
        let ctx = SuppressionContext::from_source(source, &[filter]);
        assert!(ctx.is_suppressed("ModifierOrder", pos(source, "public int")));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(PlainTextCommentFilterConfig::new("(", "ON", None).is_none());
    }

    #[test]
    fn test_suppress_warnings_annotation() {
        let source = r#"
class Foo {
    @SuppressWarnings({"checkstyle:ModifierOrder", "unchecked"})
    static public void method() {
    }

    static public void other() {
    }
}
"#;

        let mut parser = JavaParser::new();
        let result = parser.parse(source).expect("Failed to parse");
        let root = CstNode::new(result.tree.root_node(), source);

        let mut ctx = SuppressionContext::new();
        ctx.parse_suppress_warnings(&root);

        assert!(ctx.has_suppressions());
        assert!(ctx.is_suppressed("ModifierOrder", pos(source, "public void method")));
        assert!(!ctx.is_suppressed("ModifierOrder", pos(source, "public void other")));
    }

    #[test]
    fn test_suppress_warnings_all_on_class() {
        let source = r#"
@SuppressWarnings("checkstyle:all")
class Foo {
    static public void method() { }
}
"#;

        let mut parser = JavaParser::new();
        let result = parser.parse(source).expect("Failed to parse");
        let root = CstNode::new(result.tree.root_node(), source);

        let mut ctx = SuppressionContext::new();
        ctx.parse_suppress_warnings(&root);

        assert!(ctx.is_suppressed("ModifierOrder", pos(source, "public void")));
    }
}
