use std::fmt;
use std::num::NonZeroUsize;

use modorder_text_size::{TextRange, TextSize};

/// A 1-based line or column number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneIndexed(NonZeroUsize);

impl OneIndexed {
    pub const MIN: Self = Self(NonZeroUsize::MIN);

    /// Returns `None` for zero.
    pub const fn new(value: usize) -> Option<Self> {
        match NonZeroUsize::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn from_zero_indexed(value: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(value))
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub const fn to_zero_indexed(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Debug for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A 1-based line and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of every line start in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    ascii: bool,
}

impl LineIndex {
    /// Build the index. `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn from_source_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = Vec::with_capacity(text.len() / 40 + 1);
        line_starts.push(TextSize::default());

        let mut pos = 0;
        while let Some(found) = memchr::memchr2(b'\n', b'\r', &bytes[pos..]) {
            let mut end = pos + found;
            if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
                end += 1;
            }
            pos = end + 1;
            line_starts.push(offset(pos));
        }

        Self {
            line_starts,
            ascii: text.is_ascii(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[TextSize] {
        &self.line_starts
    }

    /// The line containing `offset`.
    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        let zero_based = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        OneIndexed::from_zero_indexed(zero_based)
    }

    /// Start offset of `line`. Lines past the end map to the end of `text`.
    pub fn line_start(&self, line: OneIndexed, text: &str) -> TextSize {
        self.line_starts
            .get(line.to_zero_indexed())
            .copied()
            .unwrap_or_else(|| TextSize::of(text))
    }

    /// Range of `line` including its terminator.
    pub fn line_range(&self, line: OneIndexed, text: &str) -> TextRange {
        let start = self.line_start(line, text);
        let end = self
            .line_starts
            .get(line.get())
            .copied()
            .unwrap_or_else(|| TextSize::of(text));
        TextRange::new(start, end)
    }

    /// Line and character column of `offset`.
    pub fn line_column(&self, offset: TextSize, text: &str) -> LineColumn {
        let line = self.line_index(offset);
        let line_start = self.line_start(line, text);

        let column = if self.ascii {
            usize::from(offset - line_start)
        } else {
            text[TextRange::new(line_start, offset)].chars().count()
        };

        LineColumn {
            line,
            column: OneIndexed::from_zero_indexed(column),
        }
    }
}

fn offset(pos: usize) -> TextSize {
    TextSize::try_from(pos).expect("source text exceeds u32::MAX bytes")
}
