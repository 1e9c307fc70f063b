//! Diagnostic severity and the message record itself.

use std::fmt;

use crate::location::SourceLocation;

/// Severity level of a diagnostic. Ordered so that `Fatal > Error > Warning
/// > Note`, which lets callers pick the worst severity seen with a plain
/// `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal error"),
        }
    }
}

/// A single reported diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourceLocation,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            severity,
            location,
            message: message.into(),
        }
    }

    /// Renders the diagnostic per spec.md §6: `{file}:{line}:{col}: {level}:
    /// {message}` when the location has a filename, else `{level}: {message}`.
    pub fn format_plain(&self) -> String {
        match &self.location.filename {
            Some(file) => format!(
                "{file}:{line}:{col}: {sev}: {msg}",
                file = file,
                line = self.location.line,
                col = self.location.column,
                sev = self.severity,
                msg = self.message
            ),
            None => format!("{sev}: {msg}", sev = self.severity, msg = self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_plain())
    }
}
