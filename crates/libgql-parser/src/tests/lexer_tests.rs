use crate::token::TokenKind;
use crate::Lexer;

fn lex_kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source).map(|token| token.kind).collect()
}

#[test]
fn lexes_punctuators() {
    assert_eq!(
        lex_kinds("! $ ( ) ... : = @ [ ] { | } &"),
        vec![
            TokenKind::Bang,
            TokenKind::Dollar,
            TokenKind::ParenOpen,
            TokenKind::ParenClose,
            TokenKind::Ellipsis,
            TokenKind::Colon,
            TokenKind::Equals,
            TokenKind::At,
            TokenKind::SquareBracketOpen,
            TokenKind::SquareBracketClose,
            TokenKind::CurlyBraceOpen,
            TokenKind::Pipe,
            TokenKind::CurlyBraceClose,
            TokenKind::Ampersand,
            TokenKind::Eof,
        ],
    );
}

#[test]
fn lexes_names_and_keywords() {
    assert_eq!(
        lex_kinds("foo _bar Baz9 true false null"),
        vec![
            TokenKind::Name("foo".to_string()),
            TokenKind::Name("_bar".to_string()),
            TokenKind::Name("Baz9".to_string()),
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::Eof,
        ],
    );
}

#[test]
fn skips_ignored_tokens() {
    // BOM, whitespace, commas, and comments are all ignored.
    assert_eq!(
        lex_kinds("\u{FEFF}  a, # comment to end of line\n\tb,,,c"),
        vec![
            TokenKind::Name("a".to_string()),
            TokenKind::Name("b".to_string()),
            TokenKind::Name("c".to_string()),
            TokenKind::Eof,
        ],
    );
}

#[test]
fn lexes_int_and_float() {
    assert_eq!(
        lex_kinds("0 -9 42 3.14 -1.5e3 2E-2 10e5"),
        vec![
            TokenKind::Int("0".to_string()),
            TokenKind::Int("-9".to_string()),
            TokenKind::Int("42".to_string()),
            TokenKind::Float("3.14".to_string()),
            TokenKind::Float("-1.5e3".to_string()),
            TokenKind::Float("2E-2".to_string()),
            TokenKind::Float("10e5".to_string()),
            TokenKind::Eof,
        ],
    );
}

#[test]
fn rejects_number_followed_by_name_start() {
    // `0xF1` must be a single lex error, not `[Int 0, Name xF1]`.
    let kinds = lex_kinds("0xF1");
    assert_eq!(kinds.len(), 2, "{kinds:?}");
    assert!(
        matches!(&kinds[0], TokenKind::Error { .. }),
        "{kinds:?}",
    );
    assert_eq!(kinds[1], TokenKind::Eof);
}

#[test]
fn rejects_leading_zeros() {
    let kinds = lex_kinds("007");
    assert!(matches!(&kinds[0], TokenKind::Error { message } if message.contains("leading zeros")));
}

#[test]
fn rejects_bare_exponent() {
    let kinds = lex_kinds("1.0e");
    assert!(matches!(&kinds[0], TokenKind::Error { message } if message.contains("exponent")));
}

#[test]
fn lexes_strings_with_escapes() {
    let kinds = lex_kinds(r#""a\n\"b\\" "#);
    let TokenKind::StringValue(raw) = &kinds[0] else {
        panic!("expected string, got {kinds:?}");
    };
    let decoded = kinds[0].parse_string_value().unwrap().unwrap();
    assert_eq!(raw, r#""a\n\"b\\""#);
    assert_eq!(decoded.value, "a\n\"b\\");
    assert!(!decoded.block);
}

#[test]
fn decodes_unicode_escapes() {
    let kinds = lex_kinds("\"A\\u00E9\"");
    let decoded = kinds[0].parse_string_value().unwrap().unwrap();
    assert_eq!(decoded.value, "A\u{00E9}");
}

#[test]
fn decodes_surrogate_pairs() {
    let kinds = lex_kinds("\"\\uD83C\\uDF89\"");
    let decoded = kinds[0].parse_string_value().unwrap().unwrap();
    assert_eq!(decoded.value, "\u{1F389}");
}

#[test]
fn rejects_lone_surrogate() {
    let kinds = lex_kinds(r#""\uD83C""#);
    assert!(kinds[0].parse_string_value().unwrap().is_err());
}

#[test]
fn rejects_unterminated_string() {
    let kinds = lex_kinds("\"abc\ndef\"");
    assert!(matches!(&kinds[0], TokenKind::Error { message } if message.contains("unterminated")));
}

#[test]
fn strips_block_string_indentation() {
    let source = "\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n\"\"\"";
    let kinds = lex_kinds(source);
    let decoded = kinds[0].parse_string_value().unwrap().unwrap();
    assert_eq!(decoded.value, "Hello,\n  World!\n\nYours,\n  GraphQL.");
    assert!(decoded.block);
}

#[test]
fn block_string_keeps_escaped_triple_quote() {
    let kinds = lex_kinds("\"\"\"contains \\\"\"\" quote\"\"\"");
    let decoded = kinds[0].parse_string_value().unwrap().unwrap();
    assert_eq!(decoded.value, "contains \"\"\" quote");
}

#[test]
fn tracks_line_and_column() {
    let mut lexer = Lexer::new("a\nbb\r\n  c");
    let a = lexer.next_token();
    assert_eq!((a.span.start.line(), a.span.start.col()), (0, 0));
    let b = lexer.next_token();
    assert_eq!((b.span.start.line(), b.span.start.col()), (1, 0));
    let c = lexer.next_token();
    assert_eq!((c.span.start.line(), c.span.start.col()), (2, 2));
}

#[test]
fn crlf_counts_as_one_newline() {
    let mut lexer = Lexer::new("\r\n\r\nx");
    let x = lexer.next_token();
    assert_eq!(x.span.start.line(), 2);
}

#[test]
fn reports_unexpected_characters() {
    let kinds = lex_kinds("?");
    assert!(matches!(&kinds[0], TokenKind::Error { message } if message.contains("`?`")));
}
