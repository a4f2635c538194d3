//! Diagnostic infrastructure for reporting rule violations.

pub use diagnostic::{Diagnostic, DiagnosticKind, Violation};
pub use severity::{ParseSeverityError, Severity};

mod diagnostic;
mod severity;
