//! Fixture tests for the ModifierOrder rule.
//!
//! Each fixture marks the lines that must be reported with `// violation`;
//! the expected tables below pin the exact columns.

use std::collections::HashMap;
use std::path::PathBuf;

use modorder_java_cst::TreeWalker;
use modorder_java_parser::JavaParser;
use modorder_linter::rules::ModifierOrder;
use modorder_linter::{CheckContext, FromConfig, Linter, Rule};
use modorder_source_file::{LineIndex, SourceCode};

/// A violation at a specific location.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Violation {
    line: usize,
    column: usize,
    modifier: String,
}

impl Violation {
    fn new(line: usize, column: usize, modifier: &str) -> Self {
        Self {
            line,
            column,
            modifier: modifier.to_string(),
        }
    }
}

fn load_fixture(file_name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(file_name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Run the rule directly over every node and collect violations.
fn check_modifier_order(source: &str) -> Vec<Violation> {
    let mut parser = JavaParser::new();
    let Some(result) = parser.parse(source) else {
        panic!("Failed to parse source");
    };

    let properties = HashMap::new();
    let rule = ModifierOrder::from_config(&properties);
    let ctx = CheckContext::new(source);
    let line_index = LineIndex::from_source_text(source);
    let source_code = SourceCode::new(source, &line_index);

    let mut violations = vec![];

    for node in TreeWalker::new(result.tree.root_node(), source) {
        for diagnostic in rule.check(&ctx, &node) {
            assert_eq!(diagnostic.kind.message_key, "mod.order");
            let loc = source_code.line_column(diagnostic.range.start());
            violations.push(Violation {
                line: loc.line.get(),
                column: loc.column.get(),
                modifier: source[diagnostic.range].to_string(),
            });
        }
    }

    violations
}

/// Lines carrying a `// violation` marker.
fn marked_lines(source: &str) -> Vec<usize> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| line.trim_end().ends_with("// violation"))
        .map(|(i, _)| i + 1)
        .collect()
}

fn verify_violations(violations: &[Violation], expected: &[Violation]) {
    let missing: Vec<_> = expected.iter().filter(|e| !violations.contains(e)).collect();
    let unexpected: Vec<_> = violations.iter().filter(|v| !expected.contains(v)).collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        println!("\n=== Violations Report ===");
        if !missing.is_empty() {
            println!("\nMissing violations:");
            for v in &missing {
                println!("  {}:{}: {}", v.line, v.column, v.modifier);
            }
        }
        if !unexpected.is_empty() {
            println!("\nUnexpected violations:");
            for v in &unexpected {
                println!("  {}:{}: {}", v.line, v.column, v.modifier);
            }
        }
        panic!("Violation mismatch detected");
    }
}

// =============================================================================
// File: InputModifierOrder.java
// Expected violations:
//    9:11  static
//   11:12  private
//   18:12  private
//   22:14  transient
//   24:19  static
//   29:9   default
//   34:9   public
//   37:14  public
//   43:12  public
// =============================================================================

fn expected_modifier_order() -> Vec<Violation> {
    vec![
        Violation::new(9, 11, "static"),
        Violation::new(11, 12, "private"),
        Violation::new(18, 12, "private"),
        Violation::new(22, 14, "transient"),
        Violation::new(24, 19, "static"),
        Violation::new(29, 9, "default"),
        Violation::new(34, 9, "public"),
        Violation::new(37, 14, "public"),
        Violation::new(43, 12, "public"),
    ]
}

#[test]
fn test_modifier_order_fixture() {
    let source = load_fixture("InputModifierOrder.java");
    let violations = check_modifier_order(&source);
    verify_violations(&violations, &expected_modifier_order());
}

#[test]
fn test_fixture_markers_match_table() {
    let source = load_fixture("InputModifierOrder.java");
    let expected_lines: Vec<_> = expected_modifier_order().iter().map(|v| v.line).collect();
    assert_eq!(marked_lines(&source), expected_lines);
}

#[test]
fn test_linter_matches_rule() {
    let source = load_fixture("InputModifierOrder.java");
    let result = Linter::with_defaults().check_source(&source).unwrap();

    assert!(!result.has_syntax_errors);
    let violations: Vec<_> = result
        .messages
        .iter()
        .map(|m| {
            Violation::new(
                m.location.line.get(),
                m.location.column.get(),
                &source[m.diagnostic.range],
            )
        })
        .collect();
    assert_eq!(violations, expected_modifier_order());
}

// =============================================================================
// File: InputModifierOrderSuppressed.java
// Expected violations:
//    8:12  public
//   14:11  static
// =============================================================================

#[test]
fn test_suppressed_fixture() {
    let source = load_fixture("InputModifierOrderSuppressed.java");

    // The rule itself knows nothing of suppression.
    assert_eq!(check_modifier_order(&source).len(), 4);

    let result = Linter::with_defaults().check_source(&source).unwrap();
    let positions: Vec<_> = result
        .messages
        .iter()
        .map(|m| (m.location.line.get(), m.location.column.get()))
        .collect();
    assert_eq!(positions, vec![(8, 12), (14, 11)]);
    assert_eq!(
        positions.iter().map(|p| p.0).collect::<Vec<_>>(),
        marked_lines(&source)
    );
}
