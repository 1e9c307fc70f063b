use super::*;
use crate::location::SourceLocation;

fn loc() -> SourceLocation {
    SourceLocation::unknown(1, 1, 0)
}

#[test]
fn equality_ignores_location_and_literal() {
    let a = Token::new(TokenKind::IntegerLiteral, "42", SourceLocation::unknown(1, 1, 0))
        .with_literal(LiteralBase::Decimal, LiteralValue::Integer(42));
    let b = Token::new(TokenKind::IntegerLiteral, "42", SourceLocation::unknown(9, 3, 50));
    assert_eq!(a, b);
}

#[test]
fn equality_distinguishes_kind() {
    let a = Token::new(TokenKind::Identifier, "x", loc());
    let b = Token::new(TokenKind::IntegerLiteral, "x", loc());
    assert_ne!(a, b);
}

#[test]
fn eof_has_valid_lexeme_when_empty() {
    let eof = Token::new(TokenKind::Eof, "", loc());
    assert!(eof.has_valid_lexeme());
}

#[test]
fn non_eof_empty_lexeme_is_invalid() {
    let t = Token::new(TokenKind::Identifier, "", loc());
    assert!(!t.has_valid_lexeme());
}

#[test]
fn has_valid_location_requires_positive_line_and_column() {
    let good = Token::new(TokenKind::Identifier, "x", SourceLocation::unknown(1, 1, 0));
    let bad = Token::new(TokenKind::Identifier, "x", SourceLocation::unknown(0, 1, 0));
    assert!(good.has_valid_location());
    assert!(!bad.has_valid_location());
}

#[test]
fn token_round_trips_through_json() {
    let original = Token::new(TokenKind::IntegerLiteral, "42", SourceLocation::unknown(3, 5, 20))
        .with_literal(LiteralBase::Decimal, LiteralValue::Integer(42));
    let json = serde_json::to_string(&original).expect("serialize");
    let restored: Token = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored.kind, original.kind);
    assert_eq!(restored.lexeme, original.lexeme);
    assert_eq!(restored.literal_value, original.literal_value);
    assert_eq!(restored.location, original.location);
}
