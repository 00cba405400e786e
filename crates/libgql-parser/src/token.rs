//! Token types produced by the [`Lexer`](crate::Lexer).

use crate::SourceSpan;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// A lexed GraphQL token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(kind: TokenKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}

/// The kind of a GraphQL token.
///
/// Literal kinds (`Int`, `Float`, `StringValue`) store the raw source text;
/// use [`parse_int_value`](TokenKind::parse_int_value),
/// [`parse_float_value`](TokenKind::parse_float_value), and
/// [`parse_string_value`](TokenKind::parse_string_value) to decode them.
///
/// Negative numeric literals like `-123` are lexed as single tokens, matching
/// the spec's `IntValue`/`FloatValue` grammar.
///
/// Lexer errors are tokens too (`Error`), which lets the parser report them
/// with the same expectation/location machinery as grammar errors.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    /// A name/identifier: `/[_A-Za-z][_0-9A-Za-z]*/`.
    Name(String),
    /// Raw source text of an integer literal (e.g. `"-123"`, `"0"`).
    Int(String),
    /// Raw source text of a float literal (e.g. `"-1.23e-4"`).
    Float(String),
    /// Raw source text of a string literal, quotes included. Block strings
    /// keep their `"""` delimiters so decoding can pick the right algorithm.
    StringValue(String),

    /// The `true` literal.
    True,
    /// The `false` literal.
    False,
    /// The `null` literal.
    Null,

    /// End of input.
    Eof,

    /// A lexer error, surfaced through the token stream so the parser can
    /// attach its usual location reporting.
    Error { message: String },
}

impl TokenKind {
    /// Returns the punctuator's source text, or `None` for non-punctuators.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            TokenKind::Ampersand => Some("&"),
            TokenKind::At => Some("@"),
            TokenKind::Bang => Some("!"),
            TokenKind::Colon => Some(":"),
            TokenKind::CurlyBraceClose => Some("}"),
            TokenKind::CurlyBraceOpen => Some("{"),
            TokenKind::Dollar => Some("$"),
            TokenKind::Ellipsis => Some("..."),
            TokenKind::Equals => Some("="),
            TokenKind::ParenClose => Some(")"),
            TokenKind::ParenOpen => Some("("),
            TokenKind::Pipe => Some("|"),
            TokenKind::SquareBracketClose => Some("]"),
            TokenKind::SquareBracketOpen => Some("["),
            _ => None,
        }
    }

    /// A short human-readable description used in "expected X, found Y"
    /// parse errors.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Name(name) => format!("`{name}`"),
            TokenKind::Int(raw) | TokenKind::Float(raw) => format!("`{raw}`"),
            TokenKind::StringValue(_) => "string".to_string(),
            TokenKind::True => "`true`".to_string(),
            TokenKind::False => "`false`".to_string(),
            TokenKind::Null => "`null`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Error { message } => message.clone(),
            other => format!(
                "`{}`",
                other.as_punctuator_str().expect("punctuator"),
            ),
        }
    }

    /// Parse an `Int` token's raw text to `i64`.
    ///
    /// Returns `None` if this is not an `Int` token.
    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            TokenKind::Int(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parse a `Float` token's raw text to `f64`.
    ///
    /// Returns `None` if this is not a `Float` token.
    pub fn parse_float_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            TokenKind::Float(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Decode a `StringValue` token's raw text.
    ///
    /// Single-line strings get their escape sequences processed (`\"`, `\\`,
    /// `\/`, `\b`, `\f`, `\n`, `\r`, `\t`, and `\uXXXX` with surrogate-pair
    /// validation). Block strings get the common-indentation stripping
    /// algorithm from the spec's `BlockStringValue`, plus the `\"""` escape.
    ///
    /// Returns `None` if this is not a `StringValue` token.
    pub fn parse_string_value(&self) -> Option<Result<DecodedString, StringParsingError>> {
        match self {
            TokenKind::StringValue(raw) => Some(decode_string(raw)),
            _ => None,
        }
    }
}

/// A decoded string literal: its value plus whether it was a block string.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedString {
    pub value: String,
    pub block: bool,
}

/// Errors produced while decoding a string literal's raw text.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StringParsingError {
    #[error("invalid escape sequence `{0}`")]
    InvalidEscapeSequence(String),

    #[error("invalid unicode escape `{0}`")]
    InvalidUnicodeEscape(String),

    #[error("unterminated string literal")]
    UnterminatedString,
}

fn decode_string(raw: &str) -> Result<DecodedString, StringParsingError> {
    if raw.starts_with("\"\"\"") {
        decode_block_string(raw)
    } else {
        decode_single_line_string(raw)
    }
}

fn decode_single_line_string(raw: &str) -> Result<DecodedString, StringParsingError> {
    if !raw.starts_with('"') || !raw.ends_with('"') || raw.len() < 2 {
        return Err(StringParsingError::UnterminatedString);
    }
    let content = &raw[1..raw.len() - 1];

    let mut value = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some('\\') => value.push('\\'),
            Some('"') => value.push('"'),
            Some('/') => value.push('/'),
            Some('b') => value.push('\u{0008}'),
            Some('f') => value.push('\u{000C}'),
            Some('u') => value.push(decode_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(StringParsingError::InvalidEscapeSequence(format!(
                    "\\{other}"
                )));
            }
            None => {
                return Err(StringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            }
        }
    }

    Ok(DecodedString {
        value,
        block: false,
    })
}

/// Decode a `\uXXXX` escape after the `\u` has been consumed.
///
/// A leading surrogate must be followed by `\uXXXX` holding a trailing
/// surrogate; the pair is combined into a single code point.
fn decode_unicode_escape(chars: &mut std::str::Chars) -> Result<char, StringParsingError> {
    let first = read_hex4(chars)?;

    if (0xD800..=0xDBFF).contains(&first) {
        // Leading surrogate: require a `\uXXXX` trailing surrogate.
        if chars.next() != Some('\\') || chars.next() != Some('u') {
            return Err(StringParsingError::InvalidUnicodeEscape(format!(
                "\\u{first:04X}"
            )));
        }
        let second = read_hex4(chars)?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err(StringParsingError::InvalidUnicodeEscape(format!(
                "\\u{first:04X}\\u{second:04X}"
            )));
        }
        let code_point = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
        return char::from_u32(code_point).ok_or_else(|| {
            StringParsingError::InvalidUnicodeEscape(format!(
                "\\u{first:04X}\\u{second:04X}"
            ))
        });
    }

    if (0xDC00..=0xDFFF).contains(&first) {
        // Lone trailing surrogate.
        return Err(StringParsingError::InvalidUnicodeEscape(format!(
            "\\u{first:04X}"
        )));
    }

    char::from_u32(first).ok_or_else(|| {
        StringParsingError::InvalidUnicodeEscape(format!("\\u{first:04X}"))
    })
}

fn read_hex4(chars: &mut std::str::Chars) -> Result<u32, StringParsingError> {
    let mut hex = String::with_capacity(4);
    for _ in 0..4 {
        match chars.next() {
            Some(c) if c.is_ascii_hexdigit() => hex.push(c),
            Some(c) => {
                return Err(StringParsingError::InvalidUnicodeEscape(format!(
                    "\\u{hex}{c}"
                )));
            }
            None => {
                return Err(StringParsingError::InvalidUnicodeEscape(format!(
                    "\\u{hex}"
                )));
            }
        }
    }
    u32::from_str_radix(&hex, 16)
        .map_err(|_| StringParsingError::InvalidUnicodeEscape(format!("\\u{hex}")))
}

/// Decode a block string per the spec's `BlockStringValue` algorithm:
/// strip the common indentation of all lines after the first, then drop
/// leading and trailing blank lines.
fn decode_block_string(raw: &str) -> Result<DecodedString, StringParsingError> {
    if !raw.starts_with("\"\"\"") || !raw.ends_with("\"\"\"") || raw.len() < 6 {
        return Err(StringParsingError::UnterminatedString);
    }
    let content = &raw[3..raw.len() - 3];
    let content = content.replace("\\\"\"\"", "\"\"\"");

    let lines: Vec<&str> = content.split('\n').collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut result_lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.len() < common_indent {
                *line
            } else {
                &line[common_indent..]
            }
        })
        .collect();

    while result_lines.first().is_some_and(|l| l.trim().is_empty()) {
        result_lines.remove(0);
    }
    while result_lines.last().is_some_and(|l| l.trim().is_empty()) {
        result_lines.pop();
    }

    Ok(DecodedString {
        value: result_lines.join("\n"),
        block: true,
    })
}
