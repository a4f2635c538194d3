//! ModifierOrder rule implementation.
//!
//! Checks that the order of modifiers conforms to the JLS suggestions:
//! `public protected private abstract static final transient volatile
//! synchronized native strictfp`.

use modorder_diagnostics::{Diagnostic, Violation};
use modorder_java_cst::{CstNode, NodeKind};

use super::common::{JLS_MODIFIER_ORDER, ModifierToken, modifier_tokens};
use crate::{CheckContext, FromConfig, Properties, Rule};

/// Configuration for ModifierOrder rule.
#[derive(Debug, Clone, Default)]
pub struct ModifierOrder;

const RELEVANT_KINDS: &[NodeKind] = &[NodeKind::Modifiers];

impl FromConfig for ModifierOrder {
    const MODULE_NAME: &'static str = "ModifierOrder";

    fn from_config(_properties: &Properties) -> Self {
        Self
    }
}

/// Violation for modifier out of order.
#[derive(Debug, Clone)]
pub struct ModifierOutOfOrder {
    pub modifier: String,
}

impl Violation for ModifierOutOfOrder {
    const MESSAGE_KEY: &'static str = "mod.order";

    fn message(&self) -> String {
        format!(
            "'{}' modifier out of order with the JLS suggestions",
            self.modifier
        )
    }
}

impl Rule for ModifierOrder {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [NodeKind] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        if !node.node_kind().is_modifiers() {
            return vec![];
        }

        let modifiers = modifier_tokens(ctx, node);

        check_order_suggested_by_jls(&modifiers)
            .map(|error| {
                Diagnostic::new(
                    ModifierOutOfOrder {
                        modifier: error.keyword.to_string(),
                    },
                    error.range,
                )
            })
            .into_iter()
            .collect()
    }
}

/// Find the first modifier that breaks [`JLS_MODIFIER_ORDER`].
///
/// A single cursor moves forward through the order table and never back.
/// Each modifier is searched for from the cursor; once found, the cursor
/// moves past its slot, so a repeated keyword cannot match again. The first
/// modifier the search misses (it belongs earlier, repeats, or is not in the
/// table) is returned and nothing after it is examined.
///
/// Repeated modifiers are reported on purpose, so the cursor must step past
/// the matched slot rather than stay on it.
pub fn check_order_suggested_by_jls<'t, 'a>(
    modifiers: &'t [ModifierToken<'a>],
) -> Option<&'t ModifierToken<'a>> {
    let mut index = 0;

    for modifier in modifiers {
        let Some(found) = JLS_MODIFIER_ORDER[index..]
            .iter()
            .position(|keyword| *keyword == modifier.keyword)
        else {
            return Some(modifier);
        };
        index += found + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use modorder_java_cst::TreeWalker;
    use modorder_java_parser::JavaParser;
    use modorder_source_file::{LineColumn, OneIndexed};
    use modorder_text_size::{TextRange, TextSize};

    /// Tokens laid out on one line, separated by single spaces.
    fn tokens<'a>(keywords: &[&'a str]) -> Vec<ModifierToken<'a>> {
        let mut offset = 0u32;
        keywords
            .iter()
            .map(|&keyword| {
                let len = u32::try_from(keyword.len()).unwrap();
                let range = TextRange::at(TextSize::new(offset), TextSize::new(len));
                let location = LineColumn {
                    line: OneIndexed::MIN,
                    column: OneIndexed::from_zero_indexed(offset as usize),
                };
                offset += len + 1;
                ModifierToken::new(keyword, location, range)
            })
            .collect()
    }

    fn violation(keywords: &[&str]) -> Option<(usize, String)> {
        let tokens = tokens(keywords);
        check_order_suggested_by_jls(&tokens).map(|t| {
            let position = tokens.iter().position(|other| other == t).unwrap();
            (position, t.keyword.to_string())
        })
    }

    fn check_source(source: &str) -> Vec<Diagnostic> {
        let mut parser = JavaParser::new();
        let result = parser.parse(source).unwrap();
        let ctx = CheckContext::new(source);
        let rule = ModifierOrder;

        let mut diagnostics = vec![];
        for node in TreeWalker::new(result.tree.root_node(), source) {
            if rule.wants(node.node_kind()) {
                diagnostics.extend(rule.check(&ctx, &node));
            }
        }
        diagnostics
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        assert_eq!(violation(&[]), None);
    }

    #[test]
    fn test_canonical_subsequences_are_valid() {
        assert_eq!(violation(&["public", "static", "final"]), None);
        assert_eq!(violation(&["public", "abstract", "static"]), None);
        assert_eq!(violation(&["private", "transient", "volatile"]), None);
        assert_eq!(violation(&["strictfp"]), None);
    }

    #[test]
    fn test_full_canonical_sequence_is_valid() {
        assert_eq!(violation(&JLS_MODIFIER_ORDER), None);
    }

    #[test]
    fn test_earlier_keyword_after_later_one() {
        assert_eq!(violation(&["static", "public"]), Some((1, "public".into())));
        assert_eq!(
            violation(&["native", "synchronized"]),
            Some((1, "synchronized".into()))
        );
    }

    #[test]
    fn test_duplicate_flagged_on_second_occurrence() {
        assert_eq!(violation(&["public", "public"]), Some((1, "public".into())));
        assert_eq!(
            violation(&["public", "final", "final"]),
            Some((2, "final".into()))
        );
    }

    #[test]
    fn test_unknown_keyword_always_flagged() {
        assert_eq!(
            violation(&["nonexistentKeyword"]),
            Some((0, "nonexistentKeyword".into()))
        );
        assert_eq!(
            violation(&["public", "default"]),
            Some((1, "default".into()))
        );
        assert_eq!(violation(&["sealed", "public"]), Some((0, "sealed".into())));
    }

    #[test]
    fn test_reports_only_first_violation() {
        // `public` and `abstract` are both out of place; only `public` is reported.
        assert_eq!(
            violation(&["final", "public", "abstract"]),
            Some((1, "public".into()))
        );
    }

    #[test]
    fn test_violation_carries_token_position() {
        let tokens = tokens(&["static", "public"]);
        let error = check_order_suggested_by_jls(&tokens).unwrap();
        assert_eq!(error.location.column.get(), 8);
        assert_eq!(error.range, TextRange::at(TextSize::new(7), TextSize::new(6)));
    }

    #[test]
    fn test_message() {
        let violation = ModifierOutOfOrder {
            modifier: "final".to_string(),
        };
        assert_eq!(
            violation.message(),
            "'final' modifier out of order with the JLS suggestions"
        );
    }

    #[test]
    fn test_correct_order() {
        let source = "class Foo { public static final void test() {} }";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn test_incorrect_order_final_before_static() {
        let source = "class Foo { final static void test() {} }";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind.code, "ModifierOutOfOrder");
        assert_eq!(diagnostics[0].kind.message_key, "mod.order");
        assert_eq!(&source[diagnostics[0].range], "static");
    }

    #[test]
    fn test_annotation_before_modifiers_ok() {
        let source = "class Foo { @Override public void test() {} }";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn test_annotation_between_modifiers_ignored() {
        let source = "class Foo { public @Deprecated static void test() {} }";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn test_one_report_per_clause() {
        let source = r#"
class Foo {
    static public final int A = 1;
    final private static int B = 2;
    private static final int C = 3;
}
"#;
        let diagnostics = check_source(source);
        let flagged: Vec<_> = diagnostics.iter().map(|d| &source[d.range]).collect();
        assert_eq!(flagged, vec!["public", "private"]);
    }

    #[test]
    fn test_default_method_is_flagged() {
        let source = "interface Foo { default void run() {} }";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(&source[diagnostics[0].range], "default");
    }

    #[test]
    fn test_duplicate_modifier_in_source() {
        // Not legal Java, but tree-sitter still produces a modifiers clause.
        let source = "class Foo { public public void run() {} }";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start().to_usize(), 19);
    }

    #[test]
    fn test_other_nodes_ignored() {
        let mut parser = JavaParser::new();
        let source = "class Foo { static public int x; }";
        let result = parser.parse(source).unwrap();
        let ctx = CheckContext::new(source);
        let root = CstNode::new(result.tree.root_node(), source);

        assert!(!ModifierOrder.wants(root.node_kind()));
        assert!(ModifierOrder.check(&ctx, &root).is_empty());
    }
}
