//! Source location: an immutable `(file, line, column, offset)` record.
//!
//! Every token and AST node carries one by value. Locations are produced
//! exclusively by the lexer; nothing downstream mutates them.

use std::fmt;

/// A single point in a source file.
///
/// `line` and `column` are 1-based; `offset` is the 0-based byte offset
/// into the source buffer the location was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SourceLocation {
    pub filename: Option<String>,
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(filename: Option<String>, line: u32, column: u32, offset: usize) -> Self {
        Self {
            filename,
            line,
            column,
            offset,
        }
    }

    /// A location with no known file, for tests and synthetic nodes.
    pub fn unknown(line: u32, column: u32, offset: usize) -> Self {
        Self::new(None, line, column, offset)
    }

    pub fn is_valid(&self) -> bool {
        self.line > 0 && self.column > 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(file) => write!(f, "{file}:{line}:{col}", file = file, line = self.line, col = self.column),
            None => write!(f, "line {line}, column {col}", line = self.line, col = self.column),
        }
    }
}

#[cfg(test)]
mod location_tests {
    use super::*;

    #[test]
    fn display_with_filename() {
        let loc = SourceLocation::new(Some("main.c".to_string()), 3, 7, 42);
        assert_eq!(loc.to_string(), "main.c:3:7");
    }

    #[test]
    fn display_without_filename() {
        let loc = SourceLocation::unknown(3, 7, 42);
        assert_eq!(loc.to_string(), "line 3, column 7");
    }

    #[test]
    fn validity() {
        assert!(SourceLocation::unknown(1, 1, 0).is_valid());
        assert!(!SourceLocation::unknown(0, 1, 0).is_valid());
        assert!(!SourceLocation::unknown(1, 0, 0).is_valid());
    }
}
