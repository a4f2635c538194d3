//! Shared helpers for modifier rules.

use modorder_java_cst::CstNode;
use modorder_source_file::LineColumn;
use modorder_text_size::{Ranged, TextRange};

use crate::CheckContext;

/// Modifier order suggested by sections 8.1.1, 8.3.1 and 8.4.3 of the JLS.
pub const JLS_MODIFIER_ORDER: [&str; 11] = [
    "public",
    "protected",
    "private",
    "abstract",
    "static",
    "final",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
];

/// One modifier keyword as written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierToken<'a> {
    pub keyword: &'a str,
    pub location: LineColumn,
    pub range: TextRange,
}

impl<'a> ModifierToken<'a> {
    pub fn new(keyword: &'a str, location: LineColumn, range: TextRange) -> Self {
        Self {
            keyword,
            location,
            range,
        }
    }
}

impl Ranged for ModifierToken<'_> {
    fn range(&self) -> TextRange {
        self.range
    }
}

/// Collect the keyword modifiers of a `modifiers` node in lexical order.
///
/// Annotations and comments inside the clause are not modifier keywords and
/// are skipped, as are nodes the parser inserted while recovering from errors.
pub fn modifier_tokens<'a>(
    ctx: &CheckContext<'a>,
    modifiers: &CstNode<'a>,
) -> Vec<ModifierToken<'a>> {
    let source_code = ctx.source_code();
    modifiers
        .children()
        .filter(|child| {
            let kind = child.node_kind();
            !(kind.is_any_annotation() || kind.is_comment() || child.is_error())
        })
        .map(|child| {
            let range = child.range();
            ModifierToken::new(
                ctx.text_at(range),
                source_code.line_column(range.start()),
                range,
            )
        })
        .collect()
}
