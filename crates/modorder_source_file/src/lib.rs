//! Line and column lookups for source files.

mod line_index;

pub use line_index::{LineColumn, LineIndex, OneIndexed};

use modorder_text_size::{TextRange, TextSize};

/// Source text paired with its [`LineIndex`].
#[derive(Debug, Clone, Copy)]
pub struct SourceCode<'src, 'index> {
    text: &'src str,
    index: &'index LineIndex,
}

impl<'src, 'index> SourceCode<'src, 'index> {
    pub fn new(text: &'src str, index: &'index LineIndex) -> Self {
        Self { text, index }
    }

    /// Line and column of a byte offset.
    pub fn line_column(&self, offset: TextSize) -> LineColumn {
        self.index.line_column(offset, self.text)
    }

    /// Text of `line`, excluding its terminator.
    pub fn line_text(&self, line: OneIndexed) -> &'src str {
        let range = self.index.line_range(line, self.text);
        self.text[range].trim_end_matches(['\n', '\r'])
    }

    /// Byte range of `line`, including its terminator.
    pub fn line_range(&self, line: OneIndexed) -> TextRange {
        self.index.line_range(line, self.text)
    }

    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    pub fn text(&self) -> &'src str {
        self.text
    }
}
