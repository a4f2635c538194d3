use std::fmt;
use std::ops::{Index, Range};

use crate::TextSize;

/// A half-open byte range `[start, end)` into source text.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl TextRange {
    /// Create a range. Panics if `end < start`.
    #[inline]
    pub const fn new(start: TextSize, end: TextSize) -> Self {
        assert!(start.to_u32() <= end.to_u32());
        Self { start, end }
    }

    /// An empty range at `offset`.
    #[inline]
    pub const fn empty(offset: TextSize) -> Self {
        Self::new(offset, offset)
    }

    /// A range of `len` bytes starting at `offset`.
    #[inline]
    pub fn at(offset: TextSize, len: TextSize) -> Self {
        Self::new(offset, offset + len)
    }

    #[inline]
    pub const fn start(self) -> TextSize {
        self.start
    }

    #[inline]
    pub const fn end(self) -> TextSize {
        self.end
    }

    #[inline]
    pub fn len(self) -> TextSize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies inside the range. The end is exclusive.
    #[inline]
    pub fn contains(self, offset: TextSize) -> bool {
        self.start <= offset && offset < self.end
    }

    #[inline]
    pub fn contains_range(self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(range: TextRange) -> Self {
        range.start.to_usize()..range.end.to_usize()
    }
}

impl Index<TextRange> for str {
    type Output = str;

    #[inline]
    fn index(&self, index: TextRange) -> &str {
        &self[Range::<usize>::from(index)]
    }
}

impl Index<TextRange> for String {
    type Output = str;

    #[inline]
    fn index(&self, index: TextRange) -> &str {
        &self.as_str()[index]
    }
}
