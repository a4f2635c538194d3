//! Print the tree-sitter syntax tree of a Java file, one node per line.
//!
//! Usage: `dump_java_ast <File.java>`

use std::process::ExitCode;

use modorder_java_parser::JavaParser;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dump_java_ast <File.java>");
        return ExitCode::FAILURE;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut parser = JavaParser::new();
    let Some(result) = parser.parse(&source) else {
        eprintln!("{path}: failed to parse");
        return ExitCode::FAILURE;
    };

    dump(result.tree.root_node(), &source, 0);
    ExitCode::SUCCESS
}

fn dump(node: tree_sitter::Node, source: &str, depth: usize) {
    let start = node.start_position();
    let indent = "  ".repeat(depth);
    if node.child_count() == 0 {
        let text = node.utf8_text(source.as_bytes()).unwrap_or("");
        println!(
            "{indent}{} [{}:{}] {text:?}",
            node.kind(),
            start.row + 1,
            start.column + 1
        );
    } else {
        println!("{indent}{} [{}:{}]", node.kind(), start.row + 1, start.column + 1);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        dump(child, source, depth + 1);
    }
}
