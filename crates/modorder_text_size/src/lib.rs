//! Byte offsets and ranges into Java source text.
//!
//! Offsets are stored as `u32`; source files larger than 4 GiB are not
//! supported.

mod range;
mod size;

pub use range::TextRange;
pub use size::TextSize;

/// A type that occupies a range of source text.
pub trait Ranged {
    fn range(&self) -> TextRange;

    fn start(&self) -> TextSize {
        self.range().start()
    }

    fn end(&self) -> TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T: Ranged> Ranged for &T {
    fn range(&self) -> TextRange {
        T::range(self)
    }
}
