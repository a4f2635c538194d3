//! Diagnostic types for reporting violations.

use modorder_text_size::{Ranged, TextRange};

/// A trait for violations that can be reported as diagnostics.
pub trait Violation: std::fmt::Debug + Clone + Send + Sync {
    /// Checkstyle message key, e.g. `mod.order`.
    const MESSAGE_KEY: &'static str;

    /// Returns the message describing the violation.
    fn message(&self) -> String;
}

/// The kind of diagnostic (violation type, message key and message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticKind {
    /// The violation type name (e.g., "ModifierOutOfOrder").
    pub code: String,
    /// The checkstyle message key.
    pub message_key: &'static str,
    /// The message body.
    pub body: String,
}

/// A diagnostic representing a violation found in source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The kind of diagnostic.
    pub kind: DiagnosticKind,
    /// The range in the source where the violation occurs.
    pub range: TextRange,
}

impl Diagnostic {
    /// Create a new diagnostic from a violation.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new<V: Violation>(violation: V, range: TextRange) -> Self {
        Self {
            kind: DiagnosticKind {
                code: std::any::type_name::<V>()
                    .split("::")
                    .last()
                    .unwrap_or("Unknown")
                    .to_string(),
                message_key: V::MESSAGE_KEY,
                body: violation.message(),
            },
            range,
        }
    }
}

impl Ranged for Diagnostic {
    fn range(&self) -> TextRange {
        self.range
    }
}
