//! Token model: the tagged record the lexer emits.

use crate::location::SourceLocation;

/// The closed kind enumeration. Keywords, operators, literals, preprocessor
/// directives, and sentinels all live in one flat enum — the lexer never
/// needs to distinguish "families" of token the way the AST does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    // C89/C99 keywords
    Int,
    Float,
    Char,
    Double,
    Void,
    If,
    Else,
    While,
    For,
    Do,
    Return,
    Break,
    Continue,
    Switch,
    Case,
    Default,
    Struct,
    Union,
    Enum,
    Typedef,
    Static,
    Extern,
    Const,
    Unsigned,
    Signed,
    Sizeof,
    Auto,
    Register,
    Volatile,
    Goto,

    // C11/C17 keywords. Both spellings (`alignas`/`_Alignas`) map here.
    Alignas,
    Alignof,
    Atomic,
    Generic,
    StaticAssert,
    ThreadLocal,
    Noreturn,

    Identifier,

    // Literals
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,

    // Operators and punctuators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,
    Not,
    Amp,
    Pipe,
    Tilde,
    Caret,
    Shl,
    Shr,
    PlusPlus,
    MinusMinus,
    Arrow,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    Ellipsis,

    // Preprocessor
    Hash,
    HashHash,
    PpDefine,
    PpUndef,
    PpInclude,
    PpIf,
    PpIfdef,
    PpIfndef,
    PpElif,
    PpElse,
    PpEndif,
    PpLine,
    PpError,
    PpPragma,
    PpWarning,

    // Sentinels
    Eof,
    Newline,
    Whitespace,
    Comment,
    Unknown,
}

/// Numeric radix used by the scanner, and the literal "shape" for
/// char/string/float/double tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LiteralBase {
    Decimal,
    Hex,
    Octal,
    Binary,
    Float,
    Double,
    Char,
    WChar,
    String,
    WString,
}

/// Decoded literal payload. Integer and float literals carry a parsed
/// numeric value; char/string literals carry decoded bytes (not the raw
/// lexeme, which may include quotes and escape sequences).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LiteralValue {
    Integer(i64),
    Float(f64),
    /// Decoded code point. Widened past a single byte so that wide
    /// (`L'...'`) and `\u`/`\U`-escaped characters are representable; see
    /// DESIGN.md's resolution of Open Question 1.
    Char(u32),
    String(Vec<u8>),
}

/// Extensible per-token flag bits. Currently unused by any operation in
/// this crate; reserved so later passes (e.g. "this identifier was
/// produced by macro expansion") can set bits without changing the
/// `Token` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenFlags(u8);

impl TokenFlags {
    pub const NONE: Self = Self(0);

    pub const fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub const fn set(self, bit: u8) -> Self {
        Self(self.0 | bit)
    }
}

/// A single lexical token: kind, raw text, length, location, and an
/// optional decoded literal payload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub length: usize,
    pub location: SourceLocation,
    pub literal_value: Option<LiteralValue>,
    pub is_wide: bool,
    pub literal_base: Option<LiteralBase>,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        let lexeme = lexeme.into();
        let length = lexeme.len();
        Self {
            kind,
            lexeme,
            length,
            location,
            literal_value: None,
            is_wide: false,
            literal_base: None,
            flags: TokenFlags::NONE,
        }
    }

    pub fn with_literal(mut self, base: LiteralBase, value: LiteralValue) -> Self {
        self.literal_base = Some(base);
        self.literal_value = Some(value);
        self
    }

    pub fn with_wide(mut self, is_wide: bool) -> Self {
        self.is_wide = is_wide;
        self
    }

    pub fn is_valid(&self) -> bool {
        // `TokenKind` is a closed enum; every constructed value is "known".
        // This predicate exists per the spec contract and as a seam for a
        // future extensible-kind representation.
        true
    }

    pub fn has_valid_location(&self) -> bool {
        self.location.is_valid()
    }

    pub fn has_valid_lexeme(&self) -> bool {
        !self.lexeme.is_empty() || self.kind == TokenKind::Eof
    }
}

/// Token equality compares kind and lexeme only — location and decoded
/// literal payload are deliberately excluded (two identical tokens at
/// different offsets still compare equal, matching the idempotence
/// property in spec.md §8).
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme
    }
}
impl Eq for Token {}

#[cfg(test)]
#[path = "token_tests.rs"]
mod token_tests;
