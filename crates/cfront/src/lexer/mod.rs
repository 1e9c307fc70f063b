//! The lexer: a streaming, pull-based scanner over a source buffer.
//!
//! Mirrors spec.md §4.3. `next()` produces one token per call; `peek()` is
//! implemented as snapshot → `next()` → restore, exactly as the spec
//! prescribes; `tokenize()` drains the buffer into a `Vec<Token>` including
//! the terminating `Eof`.

mod keywords;

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod lexer_tests;

use std::fs;
use std::path::Path;

use crate::diagnostics::DiagnosticEngine;
use crate::error::{self, Error, LexError};
use crate::location::SourceLocation;
use crate::token::{LiteralBase, LiteralValue, Token, TokenKind};

/// A point-in-time cursor position, captured for `peek()`'s
/// snapshot/restore and for re-scanning decimal numbers that turn out not
/// to have an exponent.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    position: usize,
    line: u32,
    column: u32,
    line_start_offset: usize,
}

/// Pull-based scanner over an owned character buffer.
///
/// The buffer is decoded to `char`s up front so offsets, escape handling,
/// and look-ahead stay simple; C source is overwhelmingly ASCII, and the
/// rare non-ASCII byte (inside a string or comment) still round-trips
/// through `char` without loss. `location.offset` is therefore a char
/// index into this buffer, which coincides with the byte offset for ASCII
/// source — the common case this crate targets (see DESIGN.md).
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    line_start_offset: usize,
    filename: Option<String>,
    in_preprocessor: bool,
    in_comment: bool,
    support_unicode: bool,
    preserve_comments: bool,
}

impl Lexer {
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn new(source: impl AsRef<str>) -> Self {
        Self::with_filename_opt(source, None)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn with_filename(source: impl AsRef<str>, filename: impl Into<String>) -> Self {
        Self::with_filename_opt(source, Some(filename.into()))
    }

    fn with_filename_opt(source: impl AsRef<str>, filename: Option<String>) -> Self {
        Self {
            chars: source.as_ref().chars().collect::<Vec<_>>(),
            position: 0,
            line: 1,
            column: 1,
            line_start_offset: 0,
            filename,
            in_preprocessor: false,
            in_comment: false,
            support_unicode: true,
            preserve_comments: false,
        }
    }

    /// The out-of-scope-elsewhere "external collaborator" path: reads a
    /// file and constructs a lexer over it, surfacing I/O failure as
    /// `Error::Io` rather than the diagnostic sink (there is no location to
    /// report against yet).
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> error::Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path.to_string_lossy().into_owned();
        Ok(Self::with_filename(source, filename))
    }

    /// Emit `Comment` tokens instead of silently discarding comment text.
    /// Off by default, matching "machine-readable" token streams.
    pub fn with_preserve_comments(mut self, value: bool) -> Self {
        self.preserve_comments = value;
        self
    }

    /// Whether `\u`/`\U` escapes decode to real UTF-8 bytes (the default,
    /// per DESIGN.md's resolution of Open Question 1) or fall back to the
    /// `?` placeholder the original scanner used.
    pub fn with_unicode_escapes(mut self, value: bool) -> Self {
        self.support_unicode = value;
        self
    }

    /// Whether the cursor is currently inside a `#`-directive line.
    pub fn in_preprocessor(&self) -> bool {
        self.in_preprocessor
    }

    /// Whether the cursor is currently inside a `/* ... */` block comment.
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            line: self.line,
            column: self.column,
            line_start_offset: self.line_start_offset,
        }
    }

    fn restore(&mut self, s: Snapshot) {
        self.position = s.position;
        self.line = s.line;
        self.column = s.column;
        self.line_start_offset = s.line_start_offset;
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = *self.chars.get(self.position)?;
        self.position += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_start_offset = self.position;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn location_at(&self, s: &Snapshot) -> SourceLocation {
        SourceLocation::new(self.filename.clone(), s.line, s.column, s.position)
    }

    /// Reports a taxonomy error through `diagnostics`, routing to `fatal`
    /// or `error` per [`LexError::is_fatal`] and rendering the message via
    /// `Display` rather than an ad hoc string at the call site.
    fn report_lex_error(&self, diagnostics: &mut DiagnosticEngine, err: LexError) {
        let location = err.location().clone();
        let message = err.to_string();
        if err.is_fatal() {
            diagnostics.fatal(location, message);
        } else {
            diagnostics.error(location, message);
        }
    }

    fn lexeme_since(&self, start: Snapshot) -> String {
        self.chars[start.position..self.position].iter().collect()
    }

    /// Step 1 of spec.md §4.3's algorithm: whitespace and backslash-newline
    /// line continuations (both characters consumed, line counter bumped).
    fn skip_whitespace_and_continuations(&mut self) {
        loop {
            match self.peek_char(0) {
                Some(' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C') => {
                    self.advance();
                }
                Some('\\') if self.peek_char(1) == Some('\n') => {
                    self.advance();
                    self.advance();
                }
                Some('\\') if self.peek_char(1) == Some('\r') && self.peek_char(2) == Some('\n') => {
                    self.advance();
                    self.advance();
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn consume_line_comment(&mut self) {
        while let Some(c) = self.peek_char(0) {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Returns `true` if the comment was properly closed with `*/`.
    fn consume_block_comment(&mut self) -> bool {
        self.advance(); // '/'
        self.advance(); // '*'
        loop {
            match (self.peek_char(0), self.peek_char(1)) {
                (Some('*'), Some('/')) => {
                    self.advance();
                    self.advance();
                    return true;
                }
                (Some(_), _) => {
                    self.advance();
                }
                (None, _) => return false,
            }
        }
    }

    /// Produces the next token, reporting lexical errors and fatals through
    /// `diagnostics` as spec.md §4.1/§4.3 require.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn next(&mut self, diagnostics: &mut DiagnosticEngine) -> Token {
        loop {
            self.skip_whitespace_and_continuations();
            match (self.peek_char(0), self.peek_char(1)) {
                (Some('/'), Some('/')) => {
                    let start = self.snapshot();
                    self.consume_line_comment();
                    if self.preserve_comments {
                        return self.finish_token(start, TokenKind::Comment);
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.snapshot();
                    let loc = self.location_at(&start);
                    self.in_comment = true;
                    let terminated = self.consume_block_comment();
                    self.in_comment = false;
                    if !terminated {
                        self.report_lex_error(diagnostics, LexError::UnterminatedComment { location: loc });
                        return Token::new(TokenKind::Eof, "", self.location_at(&self.snapshot()));
                    }
                    if self.preserve_comments {
                        return self.finish_token(start, TokenKind::Comment);
                    }
                }
                _ => break,
            }
        }

        let start = self.snapshot();
        let Some(c) = self.peek_char(0) else {
            return Token::new(TokenKind::Eof, "", self.location_at(&start));
        };

        if c == '#' {
            return self.scan_preprocessor(start);
        }
        if c == 'L' && matches!(self.peek_char(1), Some('\'' | '"')) {
            return if self.peek_char(1) == Some('\'') {
                self.scan_char_literal(start, true, diagnostics)
            } else {
                self.scan_string_literal(start, true, diagnostics)
            };
        }
        if is_ident_start(c) {
            return self.scan_identifier(start);
        }
        if c.is_ascii_digit() {
            return self.scan_number(start, diagnostics);
        }
        if c == '\'' {
            return self.scan_char_literal(start, false, diagnostics);
        }
        if c == '"' {
            return self.scan_string_literal(start, false, diagnostics);
        }
        self.scan_operator(start, diagnostics)
    }

    /// `peek()`: snapshot, scan one token, restore. spec.md §4.3 mandates
    /// this exact implementation strategy over a dedicated lookahead buffer.
    pub fn peek(&mut self, diagnostics: &mut DiagnosticEngine) -> Token {
        let saved = self.snapshot();
        let token = self.next(diagnostics);
        self.restore(saved);
        token
    }

    /// Drains the buffer into a vector of tokens, `Eof` included.
    pub fn tokenize(&mut self, diagnostics: &mut DiagnosticEngine) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next(diagnostics);
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn finish_token(&self, start: Snapshot, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme_since(start), self.location_at(&start))
    }

    fn scan_identifier(&mut self, start: Snapshot) -> Token {
        while let Some(c) = self.peek_char(0) {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let lexeme = self.lexeme_since(start);
        let kind = keywords::lookup(&lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, self.location_at(&start))
    }

    /// Consumes `#`, intra-line whitespace, the directive name, and the
    /// rest of the line up to (not including) the newline — all as one
    /// token's lexeme, per spec.md §4.3.
    fn scan_preprocessor(&mut self, start: Snapshot) -> Token {
        let loc = self.location_at(&start);
        self.in_preprocessor = true;
        self.advance(); // '#'
        while matches!(self.peek_char(0), Some(' ' | '\t')) {
            self.advance();
        }
        let name_start = self.snapshot();
        while let Some(c) = self.peek_char(0) {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let name = self.lexeme_since(name_start);
        let kind = keywords::lookup_directive(&name).unwrap_or(TokenKind::Identifier);
        while !matches!(self.peek_char(0), Some('\n') | None) {
            self.advance();
        }
        self.in_preprocessor = false;
        Token::new(kind, self.lexeme_since(start), loc)
    }

    fn scan_char_literal(&mut self, start: Snapshot, is_wide: bool, diagnostics: &mut DiagnosticEngine) -> Token {
        let loc = self.location_at(&start);
        if is_wide {
            self.advance(); // 'L'
        }
        self.advance(); // opening '\''

        let value = match self.peek_char(0) {
            Some('\\') => {
                self.advance();
                self.decode_escape(diagnostics, loc.clone())
            }
            Some(c) => {
                self.advance();
                c as u32
            }
            None => {
                self.report_lex_error(diagnostics, LexError::UnterminatedChar { location: loc.clone() });
                return Token::new(TokenKind::CharLiteral, self.lexeme_since(start), loc)
                    .with_literal(LiteralBase::Char, LiteralValue::Char(0))
                    .with_wide(is_wide);
            }
        };

        if self.peek_char(0) == Some('\'') {
            self.advance();
        } else {
            self.report_lex_error(diagnostics, LexError::UnterminatedChar { location: loc.clone() });
        }

        let base = if is_wide { LiteralBase::WChar } else { LiteralBase::Char };
        Token::new(TokenKind::CharLiteral, self.lexeme_since(start), loc)
            .with_literal(base, LiteralValue::Char(value))
            .with_wide(is_wide)
    }

    fn scan_string_literal(&mut self, start: Snapshot, is_wide: bool, diagnostics: &mut DiagnosticEngine) -> Token {
        let loc = self.location_at(&start);
        if is_wide {
            self.advance(); // 'L'
        }
        self.advance(); // opening quote

        let mut bytes = Vec::new();
        loop {
            match self.peek_char(0) {
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\n') | None => {
                    self.report_lex_error(diagnostics, LexError::UnterminatedString { location: loc.clone() });
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let cp = self.decode_escape(diagnostics, loc.clone());
                    push_code_point(&mut bytes, cp);
                }
                Some(c) => {
                    self.advance();
                    push_code_point(&mut bytes, c as u32);
                }
            }
        }

        let base = if is_wide { LiteralBase::WString } else { LiteralBase::String };
        Token::new(TokenKind::StringLiteral, self.lexeme_since(start), loc)
            .with_literal(base, LiteralValue::String(bytes))
            .with_wide(is_wide)
    }

    /// Decodes one escape sequence (the backslash has already been
    /// consumed) and returns its code point. Per spec.md §4.3's escape
    /// table plus DESIGN.md's resolution of Open Question 1: `\u`/`\U`
    /// decode to real code points when `support_unicode` is set (the
    /// default), falling back to `?` otherwise.
    fn decode_escape(&mut self, diagnostics: &mut DiagnosticEngine, loc: SourceLocation) -> u32 {
        let Some(c) = self.peek_char(0) else {
            self.report_lex_error(diagnostics, LexError::EofInEscape { location: loc });
            return '?' as u32;
        };
        match c {
            'n' => { self.advance(); '\n' as u32 }
            't' => { self.advance(); '\t' as u32 }
            'r' => { self.advance(); '\r' as u32 }
            'b' => { self.advance(); 0x08 }
            'f' => { self.advance(); 0x0C }
            'v' => { self.advance(); 0x0B }
            'a' => { self.advance(); 0x07 }
            '\\' => { self.advance(); '\\' as u32 }
            '?' => { self.advance(); '?' as u32 }
            '\'' => { self.advance(); '\'' as u32 }
            '"' => { self.advance(); '"' as u32 }
            '0'..='7' => self.decode_octal_escape(),
            'x' => self.decode_hex_escape(diagnostics, loc),
            'u' => self.decode_unicode_escape(4, diagnostics, loc),
            'U' => self.decode_unicode_escape(8, diagnostics, loc),
            other => {
                self.advance();
                self.report_lex_error(diagnostics, LexError::InvalidEscape { location: loc, escape: other });
                other as u32
            }
        }
    }

    fn decode_octal_escape(&mut self) -> u32 {
        let mut value = 0u32;
        for _ in 0..3 {
            match self.peek_char(0) {
                Some(c @ '0'..='7') => {
                    self.advance();
                    value = value * 8 + c.to_digit(8).unwrap();
                }
                _ => break,
            }
        }
        value
    }

    fn decode_hex_escape(&mut self, diagnostics: &mut DiagnosticEngine, loc: SourceLocation) -> u32 {
        self.advance(); // 'x'
        let digits_start = self.snapshot();
        for _ in 0..2 {
            match self.peek_char(0) {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.advance();
                }
                _ => break,
            }
        }
        let digits = self.lexeme_since(digits_start);
        if digits.is_empty() {
            self.report_lex_error(diagnostics, LexError::InvalidHexEscape { location: loc });
            return '?' as u32;
        }
        u32::from_str_radix(&digits, 16).unwrap_or(0)
    }

    fn decode_unicode_escape(&mut self, width: usize, diagnostics: &mut DiagnosticEngine, loc: SourceLocation) -> u32 {
        self.advance(); // 'u' or 'U'
        if !self.support_unicode {
            for _ in 0..width {
                if self.peek_char(0).is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.advance();
                }
            }
            return '?' as u32;
        }

        let digits_start = self.snapshot();
        for _ in 0..width {
            match self.peek_char(0) {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.advance();
                }
                _ => break,
            }
        }
        let digits = self.lexeme_since(digits_start);
        if digits.len() != width {
            let text = format!("expected {width} hex digits, got {digits:?}");
            self.report_lex_error(diagnostics, LexError::InvalidUnicode { location: loc, text });
            return 0xFFFD;
        }
        let code = u32::from_str_radix(&digits, 16).unwrap_or(0);
        match char::from_u32(code) {
            Some(_) => code,
            None => {
                let text = format!("code point U+{code:04X} is not a valid scalar value");
                self.report_lex_error(diagnostics, LexError::InvalidUnicode { location: loc, text });
                0xFFFD
            }
        }
    }

    fn scan_number(&mut self, start: Snapshot, diagnostics: &mut DiagnosticEngine) -> Token {
        let loc = self.location_at(&start);

        if self.peek_char(0) == Some('0') && matches!(self.peek_char(1), Some('x' | 'X')) {
            self.advance();
            self.advance();
            let digits = self.consume_while(|c| c.is_ascii_hexdigit());
            self.consume_integer_suffix();
            let lexeme = self.lexeme_since(start);
            let value = i64::from_str_radix(&digits, 16).unwrap_or_else(|_| {
                self.report_lex_error(diagnostics, LexError::InvalidNumberFormat { location: loc.clone(), text: lexeme.clone() });
                0
            });
            return Token::new(TokenKind::IntegerLiteral, lexeme, loc)
                .with_literal(LiteralBase::Hex, LiteralValue::Integer(value));
        }

        if self.peek_char(0) == Some('0') && matches!(self.peek_char(1), Some('b' | 'B')) {
            self.advance();
            self.advance();
            let digits = self.consume_while(|c| c == '0' || c == '1');
            self.consume_integer_suffix();
            let lexeme = self.lexeme_since(start);
            let value = i64::from_str_radix(&digits, 2).unwrap_or_else(|_| {
                self.report_lex_error(diagnostics, LexError::InvalidNumberFormat { location: loc.clone(), text: lexeme.clone() });
                0
            });
            return Token::new(TokenKind::IntegerLiteral, lexeme, loc)
                .with_literal(LiteralBase::Binary, LiteralValue::Integer(value));
        }

        if self.peek_char(0) == Some('0') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            let digits = self.consume_while(|c| c.is_ascii_digit());
            self.consume_integer_suffix();
            let lexeme = self.lexeme_since(start);
            let value = i64::from_str_radix(&digits, 8).unwrap_or_else(|_| {
                self.report_lex_error(diagnostics, LexError::InvalidNumberFormat { location: loc.clone(), text: lexeme.clone() });
                0
            });
            return Token::new(TokenKind::IntegerLiteral, lexeme, loc)
                .with_literal(LiteralBase::Octal, LiteralValue::Integer(value));
        }

        // Decimal, possibly promoted to a float below.
        self.consume_while(|c| c.is_ascii_digit());
        let mut is_float = false;

        if self.peek_char(0) == Some('.') {
            is_float = true;
            self.advance();
            self.consume_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek_char(0), Some('e' | 'E')) {
            let before_exponent = self.snapshot();
            self.advance();
            if matches!(self.peek_char(0), Some('+' | '-')) {
                self.advance();
            }
            if self.peek_char(0).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.consume_while(|c| c.is_ascii_digit());
            } else {
                self.restore(before_exponent);
            }
        }

        if is_float {
            let mut base = LiteralBase::Double;
            if matches!(self.peek_char(0), Some('f' | 'F')) {
                self.advance();
                base = LiteralBase::Float;
            } else if matches!(self.peek_char(0), Some('l' | 'L')) {
                self.advance();
            }
            let lexeme = self.lexeme_since(start);
            let numeric_text = lexeme.trim_end_matches(['f', 'F', 'l', 'L']);
            let value: f64 = numeric_text.parse().unwrap_or_else(|_| {
                self.report_lex_error(diagnostics, LexError::InvalidNumberFormat { location: loc.clone(), text: lexeme.clone() });
                0.0
            });
            return Token::new(TokenKind::FloatLiteral, lexeme, loc).with_literal(base, LiteralValue::Float(value));
        }

        self.consume_integer_suffix();
        let lexeme = self.lexeme_since(start);
        let digits = lexeme.trim_end_matches(['u', 'U', 'l', 'L']);
        let value: i64 = digits.parse().unwrap_or_else(|_| {
            self.report_lex_error(diagnostics, LexError::InvalidNumberFormat { location: loc.clone(), text: lexeme.clone() });
            0
        });
        Token::new(TokenKind::IntegerLiteral, lexeme, loc).with_literal(LiteralBase::Decimal, LiteralValue::Integer(value))
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.snapshot();
        while self.peek_char(0).is_some_and(&pred) {
            self.advance();
        }
        self.lexeme_since(start)
    }

    /// Consumed case-insensitively, any combination, never validated —
    /// per spec.md §4.3.
    fn consume_integer_suffix(&mut self) {
        while matches!(self.peek_char(0), Some('u' | 'U' | 'l' | 'L')) {
            self.advance();
        }
    }

    /// Longest-match scan of the operator/punctuator table in spec.md
    /// §4.3. The `<<=`/`>>=`/`&=`/`|=`/`^=` forms get their own kinds
    /// rather than the source's observed conflation, per DESIGN.md's
    /// resolution of Open Question 2.
    fn scan_operator(&mut self, start: Snapshot, diagnostics: &mut DiagnosticEngine) -> Token {
        let loc = self.location_at(&start);
        let c = self.advance().expect("dispatch only reaches here with a char present");
        let kind = match c {
            '=' => self.match_one('=', TokenKind::EqEq, TokenKind::Assign),
            '!' => self.match_one('=', TokenKind::NotEq, TokenKind::Not),
            '<' => {
                if self.peek_char(0) == Some('<') {
                    self.advance();
                    self.match_one('=', TokenKind::ShlAssign, TokenKind::Shl)
                } else {
                    self.match_one('=', TokenKind::LtEq, TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek_char(0) == Some('>') {
                    self.advance();
                    self.match_one('=', TokenKind::ShrAssign, TokenKind::Shr)
                } else {
                    self.match_one('=', TokenKind::GtEq, TokenKind::Gt)
                }
            }
            '&' => {
                if self.peek_char(0) == Some('&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    self.match_one('=', TokenKind::AndAssign, TokenKind::Amp)
                }
            }
            '|' => {
                if self.peek_char(0) == Some('|') {
                    self.advance();
                    TokenKind::OrOr
                } else {
                    self.match_one('=', TokenKind::OrAssign, TokenKind::Pipe)
                }
            }
            '^' => self.match_one('=', TokenKind::XorAssign, TokenKind::Caret),
            '+' => {
                if self.peek_char(0) == Some('+') {
                    self.advance();
                    TokenKind::PlusPlus
                } else {
                    self.match_one('=', TokenKind::PlusAssign, TokenKind::Plus)
                }
            }
            '-' => {
                if self.peek_char(0) == Some('-') {
                    self.advance();
                    TokenKind::MinusMinus
                } else if self.peek_char(0) == Some('>') {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    self.match_one('=', TokenKind::MinusAssign, TokenKind::Minus)
                }
            }
            '*' => self.match_one('=', TokenKind::StarAssign, TokenKind::Star),
            '/' => self.match_one('=', TokenKind::SlashAssign, TokenKind::Slash),
            '%' => self.match_one('=', TokenKind::PercentAssign, TokenKind::Percent),
            '.' => {
                if self.peek_char(0) == Some('.') && self.peek_char(1) == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '~' => TokenKind::Tilde,
            other => {
                // Resolution of Open Question 4: report and still produce a
                // total token stream.
                self.report_lex_error(diagnostics, LexError::InvalidCharacter { location: loc.clone(), character: other });
                TokenKind::Unknown
            }
        };
        Token::new(kind, self.lexeme_since(start), loc)
    }

    fn match_one(&mut self, expect: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.peek_char(0) == Some(expect) {
            self.advance();
            matched
        } else {
            otherwise
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Appends the UTF-8 encoding of a (already-validated) code point to a
/// growing string-literal byte buffer.
fn push_code_point(bytes: &mut Vec<u8>, code_point: u32) {
    match char::from_u32(code_point) {
        Some(c) => {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
        None => bytes.push(b'?'),
    }
}
