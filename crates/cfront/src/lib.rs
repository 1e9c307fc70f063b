//! cfront: front-end of a C11/C17 compiler.
//!
//! Turns raw C source text into a structured AST: a streaming [`lexer`]
//! with look-ahead and precise source locations, a polymorphic [`ast`]
//! node model across four families (expressions, statements,
//! declarations, type specifiers), and a traversal layer (visitor,
//! builder, utilities, dumper) over that tree.
//!
//! The parser that drives [`ast::builder::AstBuilder`], the later semantic
//! analyzer, code generation, and cross-translation-unit linking are
//! external collaborators and out of scope for this crate.
//!
//! # Example
//!
//! ```
//! use cfront::diagnostics::{BufferConsumer, DiagnosticEngine};
//! use cfront::lexer::Lexer;
//!
//! let mut diagnostics = DiagnosticEngine::new(Box::new(BufferConsumer::new()));
//! let mut lexer = Lexer::new("int main(void) { return 0; }");
//! let tokens = lexer.tokenize(&mut diagnostics);
//! assert_eq!(diagnostics.error_count(), 0);
//! assert!(!tokens.is_empty());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod location;
pub mod token;

pub use error::{BuilderError, Error, LexError, Result, ValidationError};
pub use location::SourceLocation;
pub use token::{Token, TokenKind};
