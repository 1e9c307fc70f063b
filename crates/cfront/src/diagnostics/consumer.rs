//! Diagnostic consumers: the capability set that receives delivered
//! diagnostics. Three variants per spec.md §4.1/§9: stderr (colorized),
//! file, and in-memory buffer.

use std::fs::File;
use std::io::{self, Write as _};
use std::path::Path;

use super::message::Diagnostic;
use super::printer::DiagnosticsPrinter;

/// A sink that receives each diagnostic as it is delivered and is closed
/// once, at engine shutdown.
pub trait DiagnosticConsumer {
    fn handle(&mut self, diagnostic: &Diagnostic);
    fn close(&mut self);
}

/// Writes to stderr, optionally colorized via `annotate-snippets`.
pub struct StderrConsumer {
    colored: bool,
}

impl StderrConsumer {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }
}

impl DiagnosticConsumer for StderrConsumer {
    fn handle(&mut self, diagnostic: &Diagnostic) {
        let rendered = DiagnosticsPrinter::new(std::slice::from_ref(diagnostic))
            .colored(self.colored)
            .render();
        eprintln!("{rendered}");
    }

    fn close(&mut self) {}
}

/// Writes each diagnostic as a line to an owned file handle.
pub struct FileConsumer {
    file: Option<File>,
}

impl FileConsumer {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: Some(File::create(path)?),
        })
    }
}

impl DiagnosticConsumer for FileConsumer {
    fn handle(&mut self, diagnostic: &Diagnostic) {
        if let Some(file) = &mut self.file {
            // Best-effort: a failing diagnostic sink must not itself panic
            // the compiler it is reporting errors for.
            let _ = writeln!(file, "{}", diagnostic.format_plain());
        }
    }

    fn close(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }
    }
}

/// Accumulates rendered diagnostics in memory — used by tests and by
/// hosts that want to inspect output without touching stdio.
#[derive(Debug, Default)]
pub struct BufferConsumer {
    lines: Vec<String>,
}

impl BufferConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }
}

impl DiagnosticConsumer for BufferConsumer {
    fn handle(&mut self, diagnostic: &Diagnostic) {
        self.lines.push(diagnostic.format_plain());
    }

    fn close(&mut self) {}
}

#[cfg(test)]
#[path = "consumer_tests.rs"]
mod consumer_tests;
