//! Source-snippet rendering of diagnostics via `annotate-snippets`.
//!
//! Plain rendering (the spec-mandated `{file}:{line}:{col}: {level}:
//! {message}` line) lives on [`Diagnostic::format_plain`] and needs no
//! extra machinery; this printer is the richer, optionally colorized
//! rendering used by the stderr consumer when source text is available —
//! the same snippet-with-pointer shape the AST dumper's `color_output`
//! option produces for node listings.

use std::fmt::{self, Write};

use annotate_snippets::{AnnotationKind, Level, Renderer};

use super::message::{Diagnostic, Severity};

/// Builder for rendering a batch of diagnostics against their source text.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d [Diagnostic],
    source: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d [Diagnostic]) -> Self {
        Self {
            diagnostics,
            source: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let range = point_range(diag.location.offset, source.len());
            let snippet = annotate_snippets::Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range).label(&diag.message));

            let level = severity_to_level(diag.severity);
            let group = level.primary_title(&diag.message).element(snippet);

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&[group]))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag.format_plain())?;
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Note => Level::NOTE,
        Severity::Warning => Level::WARNING,
        Severity::Error | Severity::Fatal => Level::ERROR,
    }
}

/// A one-byte-wide span at `offset`, clamped to the source length — the
/// diagnostic sink reports at a single point, not a range, so the printer
/// synthesizes a minimal span to point the snippet annotation at it.
fn point_range(offset: usize, limit: usize) -> std::ops::Range<usize> {
    let start = offset.min(limit);
    start..(start + 1).min(limit.max(start))
}

#[cfg(test)]
mod printer_tests {
    use super::*;
    use crate::location::SourceLocation;

    #[test]
    fn plain_rendering_matches_contract() {
        let diag = Diagnostic::new(
            Severity::Error,
            SourceLocation::new(Some("a.c".into()), 1, 5, 4),
            "unexpected token",
        );
        let printer = DiagnosticsPrinter::new(std::slice::from_ref(&diag));
        assert_eq!(printer.render(), "a.c:1:5: error: unexpected token");
    }

    #[test]
    fn source_rendering_contains_message() {
        let diag = Diagnostic::new(
            Severity::Error,
            SourceLocation::unknown(1, 1, 0),
            "unexpected token",
        );
        let printer = DiagnosticsPrinter::new(std::slice::from_ref(&diag)).source("int x;");
        let rendered = printer.render();
        assert!(rendered.contains("unexpected token"));
    }
}
