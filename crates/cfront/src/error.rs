//! Crate-level error types.
//!
//! spec.md §7 states the propagation policy plainly: "all errors are
//! *surfaced* through the diagnostic sink; none throw". The diagnostic
//! engine in [`crate::diagnostics`] remains that primary channel. These
//! `thiserror` types exist alongside it for callers who want an ordinary
//! `Result`-shaped API: the `AstBuilder::create*`/`add*` family returns
//! `Result<NodeId, BuilderError>` on top of reporting through whatever
//! `DiagnosticEngine` they were given, and `Lexer::from_file` returns
//! `error::Result<Lexer>` for the one failure mode (file I/O) that has no
//! source location to report a diagnostic against. `Lexer::next` itself
//! stays infallible — per spec.md §4.3 it always produces a token (`Eof`
//! on any fatal) — but it still constructs the matching `LexError` variant
//! at each error site and reports `err.to_string()` through the sink,
//! rather than an ad hoc message, so `ast::utils::validate`'s
//! `ValidationError` and `LexError` taxonomies stay the single source of
//! truth for what a diagnostic's text says.

use crate::location::SourceLocation;

/// Lexical errors and fatals, per spec.md §4.3's error taxonomy. Every
/// variant is constructed at its matching `Lexer` call site and fed to
/// `DiagnosticEngine` as `err.to_string()`, so the taxonomy and the sink
/// never drift apart.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexError {
    #[error("{location}: invalid character {character:?}")]
    InvalidCharacter {
        location: SourceLocation,
        character: char,
    },

    #[error("{location}: invalid escape sequence '\\{escape}'")]
    InvalidEscape {
        location: SourceLocation,
        escape: char,
    },

    #[error("{location}: invalid escape sequence at end of input")]
    EofInEscape { location: SourceLocation },

    #[error("{location}: invalid \\x escape: no hex digits")]
    InvalidHexEscape { location: SourceLocation },

    #[error("{location}: invalid number format: {text}")]
    InvalidNumberFormat {
        location: SourceLocation,
        text: String,
    },

    #[error("{location}: invalid unicode escape: {text}")]
    InvalidUnicode {
        location: SourceLocation,
        text: String,
    },

    #[error("{location}: unterminated /* comment")]
    UnterminatedComment { location: SourceLocation },

    #[error("{location}: unterminated character literal")]
    UnterminatedChar { location: SourceLocation },

    #[error("{location}: unterminated string literal")]
    UnterminatedString { location: SourceLocation },
}

impl LexError {
    /// The three "unterminated" variants abort scanning of the current
    /// token with `Eof`/a best-effort token; the rest are recoverable and
    /// let scanning continue from the next character. See spec.md §4.3/§7.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LexError::UnterminatedComment { .. }
                | LexError::UnterminatedChar { .. }
                | LexError::UnterminatedString { .. }
        )
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            LexError::InvalidCharacter { location, .. }
            | LexError::InvalidEscape { location, .. }
            | LexError::EofInEscape { location }
            | LexError::InvalidHexEscape { location }
            | LexError::InvalidNumberFormat { location, .. }
            | LexError::InvalidUnicode { location, .. }
            | LexError::UnterminatedComment { location }
            | LexError::UnterminatedChar { location }
            | LexError::UnterminatedString { location } => location,
        }
    }
}

/// AST construction errors raised by [`crate::ast::builder::AstBuilder`],
/// per spec.md §4.6/§7 item 3.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuilderError {
    #[error("allocation failure while constructing {what}")]
    AllocationFailure { what: &'static str },

    #[error("invalid identifier {name:?}: must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidIdentifier { name: String },

    #[error("{what} requires a non-null {child}")]
    MissingRequiredChild {
        what: &'static str,
        child: &'static str,
    },

    #[error("case statement with kind=Label requires a value")]
    CaseLabelMissingValue,

    #[error("case statement with kind=Default must not carry a value")]
    CaseDefaultHasValue,
}

/// Structural violations found by [`crate::ast::utils::validate`], per
/// spec.md §4.7.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("literal expression carries an unknown token kind")]
    LiteralUnknownKind,

    #[error("identifier expression has an empty name")]
    EmptyIdentifierName,

    #[error("{op} expression is missing an operand")]
    MissingOperand { op: &'static str },

    #[error("{what} is missing a required body")]
    MissingBody { what: &'static str },

    #[error("variable declaration {name:?} is missing a type")]
    VariableMissingType { name: String },

    #[error("variable declaration has an empty name")]
    VariableEmptyName,

    #[error("function declaration {name:?} is missing a return type")]
    FunctionMissingReturnType { name: String },

    #[error("function declaration has an empty name")]
    FunctionEmptyName,
}

/// Top-level error type unifying the above with I/O failures, e.g. from
/// `Lexer::from_file`'s file-reading path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read source file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
