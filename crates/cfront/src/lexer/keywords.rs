//! The keyword table: 30 C89/C99 keywords plus the 7 C11/C17 keywords in
//! both their canonical and underscore-prefixed spellings.

use crate::token::TokenKind;

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("char", TokenKind::Char),
    ("double", TokenKind::Double),
    ("void", TokenKind::Void),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("do", TokenKind::Do),
    ("return", TokenKind::Return),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("struct", TokenKind::Struct),
    ("union", TokenKind::Union),
    ("enum", TokenKind::Enum),
    ("typedef", TokenKind::Typedef),
    ("static", TokenKind::Static),
    ("extern", TokenKind::Extern),
    ("const", TokenKind::Const),
    ("unsigned", TokenKind::Unsigned),
    ("signed", TokenKind::Signed),
    ("sizeof", TokenKind::Sizeof),
    ("auto", TokenKind::Auto),
    ("register", TokenKind::Register),
    ("volatile", TokenKind::Volatile),
    ("goto", TokenKind::Goto),
    // C11/C17: both spellings map to the same kind.
    ("alignas", TokenKind::Alignas),
    ("_Alignas", TokenKind::Alignas),
    ("alignof", TokenKind::Alignof),
    ("_Alignof", TokenKind::Alignof),
    ("atomic", TokenKind::Atomic),
    ("_Atomic", TokenKind::Atomic),
    ("generic", TokenKind::Generic),
    ("_Generic", TokenKind::Generic),
    ("static_assert", TokenKind::StaticAssert),
    ("_Static_assert", TokenKind::StaticAssert),
    ("thread_local", TokenKind::ThreadLocal),
    ("_Thread_local", TokenKind::ThreadLocal),
    ("noreturn", TokenKind::Noreturn),
    ("_Noreturn", TokenKind::Noreturn),
];

/// Linear lookup, per spec.md §4.2: "keyword lookup is linear over the
/// keyword table". The table is small enough that a hash map buys nothing.
pub fn lookup(ident: &str) -> Option<TokenKind> {
    KEYWORDS.iter().find(|(name, _)| *name == ident).map(|(_, kind)| *kind)
}

const DIRECTIVES: &[(&str, TokenKind)] = &[
    ("define", TokenKind::PpDefine),
    ("undef", TokenKind::PpUndef),
    ("include", TokenKind::PpInclude),
    ("if", TokenKind::PpIf),
    ("ifdef", TokenKind::PpIfdef),
    ("ifndef", TokenKind::PpIfndef),
    ("elif", TokenKind::PpElif),
    ("else", TokenKind::PpElse),
    ("endif", TokenKind::PpEndif),
    ("line", TokenKind::PpLine),
    ("error", TokenKind::PpError),
    ("pragma", TokenKind::PpPragma),
    ("warning", TokenKind::PpWarning),
];

/// Maps a directive name (the identifier-shaped text right after `#`) to
/// its token kind. Unknown directive names return `None`; the caller falls
/// back to an identifier-kinded token, per spec.md §4.3.
pub fn lookup_directive(name: &str) -> Option<TokenKind> {
    DIRECTIVES.iter().find(|(n, _)| *n == name).map(|(_, kind)| *kind)
}

#[cfg(test)]
mod keyword_tests {
    use super::*;

    #[test]
    fn both_alignas_spellings_map_to_same_kind() {
        assert_eq!(lookup("alignas"), Some(TokenKind::Alignas));
        assert_eq!(lookup("_Alignas"), Some(TokenKind::Alignas));
    }

    #[test]
    fn near_misses_are_not_keywords() {
        assert_eq!(lookup("int_"), None);
        assert_eq!(lookup("Int"), None);
        assert_eq!(lookup("_int"), None);
    }

    #[test]
    fn unknown_directive_is_none() {
        assert_eq!(lookup_directive("bogus"), None);
        assert_eq!(lookup_directive("include"), Some(TokenKind::PpInclude));
    }
}
