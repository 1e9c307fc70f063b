//! Diagnostic engine: the polymorphic receiver for categorized messages.
//!
//! Mirrors spec.md §4.1: one engine, a pluggable [`DiagnosticConsumer`],
//! counters for errors/warnings, a `fatal_occurred` latch, and suppression
//! flags that silence *delivery* without ever hiding a message from the
//! counters.

mod consumer;
mod message;
mod printer;


pub use consumer::{BufferConsumer, DiagnosticConsumer, FileConsumer, StderrConsumer};
pub use message::{Diagnostic, Severity};
pub use printer::DiagnosticsPrinter;

use crate::location::SourceLocation;

/// The diagnostic sink threaded through the lexer and the AST builder.
///
/// Suppression flags silence *delivery* to the consumer only — the error
/// and warning counters always increment, and a fatal diagnostic is always
/// delivered regardless of suppression.
pub struct DiagnosticEngine {
    consumer: Box<dyn DiagnosticConsumer>,
    error_count: usize,
    warning_count: usize,
    fatal_occurred: bool,
    suppress_warnings: bool,
    suppress_errors: bool,
}

impl DiagnosticEngine {
    pub fn new(consumer: Box<dyn DiagnosticConsumer>) -> Self {
        Self {
            consumer,
            error_count: 0,
            warning_count: 0,
            fatal_occurred: false,
            suppress_warnings: false,
            suppress_errors: false,
        }
    }

    pub fn set_suppress_warnings(&mut self, value: bool) {
        self.suppress_warnings = value;
    }

    pub fn set_suppress_errors(&mut self, value: bool) {
        self.suppress_errors = value;
    }

    pub fn note(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.report(Severity::Note, location, message);
    }

    pub fn warning(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.report(Severity::Warning, location, message);
    }

    pub fn error(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.report(Severity::Error, location, message);
    }

    pub fn fatal(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.report(Severity::Fatal, location, message);
    }

    /// The single entry point all the `note`/`warning`/`error`/`fatal`
    /// helpers funnel through — counters and the `fatal_occurred` latch
    /// update here regardless of whether the message is actually delivered.
    #[tracing::instrument(level = "trace", skip(self, message), fields(%location))]
    pub fn report(&mut self, severity: Severity, location: SourceLocation, message: impl Into<String>) {
        match severity {
            Severity::Error => self.error_count += 1,
            Severity::Fatal => {
                self.error_count += 1;
                self.fatal_occurred = true;
            }
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }

        let suppressed = match severity {
            Severity::Warning => self.suppress_warnings,
            Severity::Error => self.suppress_errors,
            Severity::Fatal | Severity::Note => false,
        };

        if suppressed {
            return;
        }

        let diagnostic = Diagnostic::new(severity, location, message);
        self.consumer.handle(&diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn fatal_occurred(&self) -> bool {
        self.fatal_occurred
    }

    pub fn close(&mut self) {
        self.consumer.close();
    }
}

impl Drop for DiagnosticEngine {
    fn drop(&mut self) {
        self.consumer.close();
    }
}
