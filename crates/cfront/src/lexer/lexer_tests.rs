use super::*;
use crate::diagnostics::{BufferConsumer, DiagnosticEngine};
use indoc::indoc;

fn tokenize(src: &str) -> (Vec<Token>, DiagnosticEngine) {
    let mut diagnostics = DiagnosticEngine::new(Box::new(BufferConsumer::new()));
    let mut lexer = Lexer::new(src);
    let tokens = lexer.tokenize(&mut diagnostics);
    (tokens, diagnostics)
}

fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src).0.into_iter().map(|t| t.kind).collect()
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn number_literals() {
    let (tokens, _) = tokenize("0 0x10 010 0b101 3.14 1e10 1.5e-3f");
    let values: Vec<_> = tokens
        .iter()
        .filter_map(|t| t.literal_value.clone())
        .collect();
    assert_eq!(
        values,
        vec![
            LiteralValue::Integer(0),
            LiteralValue::Integer(16),
            LiteralValue::Integer(8),
            LiteralValue::Integer(5),
            LiteralValue::Float(3.14),
            LiteralValue::Float(1e10),
            LiteralValue::Float(1.5e-3),
        ]
    );
    let bases: Vec<_> = tokens.iter().filter_map(|t| t.literal_base).collect();
    assert_eq!(
        bases,
        vec![
            LiteralBase::Decimal,
            LiteralBase::Hex,
            LiteralBase::Octal,
            LiteralBase::Binary,
            LiteralBase::Double,
            LiteralBase::Double,
            LiteralBase::Float,
        ]
    );
}

#[test]
fn keyword_vs_identifier() {
    assert_eq!(kinds("int")[0], TokenKind::Int);
    assert_eq!(kinds("int_")[0], TokenKind::Identifier);
    assert_eq!(kinds("Int")[0], TokenKind::Identifier);
    assert_eq!(kinds("_int")[0], TokenKind::Identifier);
}

#[test]
fn both_alignas_spellings_agree() {
    assert_eq!(kinds("alignas")[0], TokenKind::Alignas);
    assert_eq!(kinds("_Alignas")[0], TokenKind::Alignas);
}

#[test]
fn longest_match_eqeq_then_identifier() {
    assert_eq!(kinds("==a"), vec![TokenKind::EqEq, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn longest_match_shift_assign_is_distinct_from_conflated_shift() {
    assert_eq!(kinds("<<="), vec![TokenKind::ShlAssign, TokenKind::Eof]);
    assert_eq!(kinds("<<"), vec![TokenKind::Shl, TokenKind::Eof]);
    assert_eq!(kinds(">>="), vec![TokenKind::ShrAssign, TokenKind::Eof]);
    assert_eq!(kinds("&="), vec![TokenKind::AndAssign, TokenKind::Eof]);
    assert_eq!(kinds("|="), vec![TokenKind::OrAssign, TokenKind::Eof]);
    assert_eq!(kinds("^="), vec![TokenKind::XorAssign, TokenKind::Eof]);
}

#[test]
fn block_comment_is_skipped_with_no_intervening_token() {
    assert_eq!(kinds("a/* b */c"), vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn line_comment_is_skipped() {
    assert_eq!(kinds("a//b\nc"), vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn unterminated_block_comment_is_fatal_and_still_yields_eof() {
    let (tokens, diagnostics) = tokenize("a /*");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
    assert!(diagnostics.fatal_occurred());
}

#[test]
fn unterminated_string_is_reported_fatal() {
    let (tokens, diagnostics) = tokenize("\"abc");
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert!(diagnostics.fatal_occurred());
}

#[test]
fn char_literal_decodes_tab_escape() {
    let (tokens, _) = tokenize(r"'\t'");
    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].literal_value, Some(LiteralValue::Char(0x09)));
    assert!(!tokens[0].is_wide);
}

#[test]
fn wide_string_literal_decodes_bytes_and_wide_flag() {
    let (tokens, _) = tokenize(r#"L"hi""#);
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].literal_value, Some(LiteralValue::String(b"hi".to_vec())));
    assert!(tokens[0].is_wide);
}

#[test]
fn include_directive_captures_full_line() {
    let (tokens, _) = tokenize("#include <stdio.h>\n");
    assert_eq!(tokens[0].kind, TokenKind::PpInclude);
    assert_eq!(tokens[0].lexeme, "#include <stdio.h>");
}

#[test]
fn unknown_directive_becomes_identifier() {
    let (tokens, _) = tokenize("#bogus foo\n");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
}

#[test]
fn unknown_leading_character_reports_invalid_character_and_still_tokenizes() {
    let (tokens, diagnostics) = tokenize("`");
    assert_eq!(tokens[0].kind, TokenKind::Unknown);
    assert!(!diagnostics.fatal_occurred());
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn end_to_end_int_main() {
    let src = indoc! {"
        int main(void) {
            return 0;
        }
    "};
    let (tokens, _) = tokenize(src);
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Void,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::IntegerLiteral,
            TokenKind::Semicolon,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn idempotence_of_tokenize() {
    let src = "int x = 1 + 2 * (3 - 4) / 5 % 6;\n#define FOO 1\n\"a\\nb\" 'c'";
    let (first, _) = tokenize(src);
    let (second, _) = tokenize(src);
    assert_eq!(first, second);
}

#[test]
fn peek_does_not_consume() {
    let mut diagnostics = DiagnosticEngine::new(Box::new(BufferConsumer::new()));
    let mut lexer = Lexer::new("foo bar");
    let peeked = lexer.peek(&mut diagnostics);
    let next = lexer.next(&mut diagnostics);
    assert_eq!(peeked, next);
    assert_eq!(next.kind, TokenKind::Identifier);
    let second = lexer.next(&mut diagnostics);
    assert_eq!(second.lexeme, "bar");
}

#[test]
fn token_offset_matches_lexeme_for_ascii_source() {
    let src = "int  foo";
    let (tokens, _) = tokenize(src);
    let foo = &tokens[1];
    assert_eq!(&src[foo.location.offset..foo.location.offset + foo.length], "foo");
}

#[test]
fn line_continuation_joins_lines() {
    let (tokens, _) = tokenize("foo\\\nbar");
    assert_eq!(tokens[0].lexeme, "foo");
    assert_eq!(tokens[1].lexeme, "bar");
    assert_eq!(tokens[1].location.line, 2);
}

#[test]
fn from_file_reads_source_and_records_filename() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.c");
    std::fs::write(&path, "int main(void) { return 0; }").expect("write sample source");

    let mut lexer = Lexer::from_file(&path).expect("lex file");
    let mut diagnostics = DiagnosticEngine::new(Box::new(BufferConsumer::new()));
    let tokens = lexer.tokenize(&mut diagnostics);

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].location.filename.as_deref(), Some(path.to_string_lossy().as_ref()));
}

#[test]
fn from_file_surfaces_io_error_for_missing_path() {
    let result = Lexer::from_file("/nonexistent/path/does-not-exist.c");
    assert!(matches!(result, Err(Error::Io { .. })));
}
