use crate::token::Token;
use crate::token::TokenKind;
use crate::SourcePosition;
use crate::SourceSpan;

/// A pull-based lexer over a `&str` GraphQL source.
///
/// `next_token()` returns the next significant token and advances the
/// lexer's position tracking. Ignored tokens (the Unicode BOM, whitespace,
/// commas, line terminators, and `# …` comments) are skipped silently.
///
/// Invalid input produces [`TokenKind::Error`] tokens rather than panicking
/// or returning `Result`, so the parser can report lexer errors with the
/// same expectation/location machinery it uses for grammar errors.
pub struct Lexer<'src> {
    source: &'src str,

    /// Current byte offset; the remaining text is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    /// Current 0-based line number.
    curr_line: usize,

    /// Current 0-based character column.
    curr_col: usize,

    /// Whether the previous character was `\r`, so a following `\n` is
    /// treated as part of the same `\r\n` newline.
    last_char_was_cr: bool,

    /// Whether the EOF token has been emitted.
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col: 0,
            last_char_was_cr: false,
            finished: false,
        }
    }

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_col, self.curr_byte_offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character, updating line/column tracking.
    ///
    /// `\n`, `\r`, and `\r\n` each count as a single newline.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                // The `\n` of a `\r\n` pair; the line was already counted.
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_col = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_col = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_col += 1;
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn make_span(&self, start: SourcePosition) -> SourceSpan {
        SourceSpan::new(start, self.curr_position())
    }

    /// Returns the next significant token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_ignored();

            let start = self.curr_position();

            let ch = match self.peek_char() {
                None => return Token::new(TokenKind::Eof, self.make_span(start)),
                Some(ch) => ch,
            };

            let kind = match ch {
                '#' => {
                    self.skip_comment();
                    continue;
                }

                '!' => self.punctuator(TokenKind::Bang),
                '$' => self.punctuator(TokenKind::Dollar),
                '&' => self.punctuator(TokenKind::Ampersand),
                '(' => self.punctuator(TokenKind::ParenOpen),
                ')' => self.punctuator(TokenKind::ParenClose),
                ':' => self.punctuator(TokenKind::Colon),
                '=' => self.punctuator(TokenKind::Equals),
                '@' => self.punctuator(TokenKind::At),
                '[' => self.punctuator(TokenKind::SquareBracketOpen),
                ']' => self.punctuator(TokenKind::SquareBracketClose),
                '{' => self.punctuator(TokenKind::CurlyBraceOpen),
                '}' => self.punctuator(TokenKind::CurlyBraceClose),
                '|' => self.punctuator(TokenKind::Pipe),

                '.' => self.lex_ellipsis(),
                '"' => self.lex_string(),
                c if is_name_start(c) => self.lex_name(),
                c if c == '-' || c.is_ascii_digit() => self.lex_number(),

                c => {
                    self.consume();
                    TokenKind::Error {
                        message: format!("unexpected character {}", describe_char(c)),
                    }
                }
            };

            return Token::new(kind, self.make_span(start));
        }
    }

    /// Skips whitespace-class ignored tokens: space, tab, newlines, the
    /// Unicode BOM, and commas.
    fn skip_ignored(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}' => {
                    self.consume();
                }
                _ => break,
            }
        }
    }

    /// Skips a `# …` comment through the end of the line.
    fn skip_comment(&mut self) {
        self.consume();
        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.consume();
        }
    }

    fn punctuator(&mut self, kind: TokenKind) -> TokenKind {
        self.consume();
        kind
    }

    fn lex_ellipsis(&mut self) -> TokenKind {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            TokenKind::Ellipsis
        } else {
            self.consume();
            TokenKind::Error {
                message: "unexpected `.` (use `...` for a fragment spread)".to_string(),
            }
        }
    }

    fn lex_name(&mut self) -> TokenKind {
        let name_start = self.curr_byte_offset;
        self.consume();
        while let Some(ch) = self.peek_char() {
            if is_name_continue(ch) {
                self.consume();
            } else {
                break;
            }
        }
        let name = &self.source[name_start..self.curr_byte_offset];
        match name {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Name(name.to_string()),
        }
    }

    /// Lexes an integer or float literal.
    ///
    /// IntegerPart is an optional `-`, then `0` or `[1-9][0-9]*`; a
    /// fractional part or exponent makes the literal a float. Per the spec, a
    /// numeric literal may not be immediately followed by a name-start
    /// character, a digit, or `.`, which is what makes `0xF1` a lex error
    /// rather than `[Int 0, Name xF1]`.
    fn lex_number(&mut self) -> TokenKind {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if let Some(ch) = self.peek_char() {
                    if ch.is_ascii_digit() {
                        return self.lex_number_error(
                            num_start,
                            "leading zeros are not allowed in numbers",
                        );
                    }
                }
            }
            Some(ch) if ch.is_ascii_digit() => {
                self.consume();
                while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                    self.consume();
                }
            }
            _ => {
                // A bare `-` with no digits.
                return TokenKind::Error {
                    message: "unexpected `-`".to_string(),
                };
            }
        }

        if self.peek_char() == Some('.')
            && matches!(self.peek_char_nth(1), Some(c) if c.is_ascii_digit())
        {
            is_float = true;
            self.consume();
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.consume();
            }
        }

        if matches!(self.peek_char(), Some('e') | Some('E')) {
            is_float = true;
            self.consume();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.consume();
            }
            if !matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                return self.lex_number_error(
                    num_start,
                    "exponent must have at least one digit",
                );
            }
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.consume();
            }
        }

        // NumericLiteral lookahead restriction.
        if let Some(ch) = self.peek_char() {
            if is_name_start(ch) || ch.is_ascii_digit() || ch == '.' {
                return self.lex_number_error(
                    num_start,
                    "a number may not be immediately followed by a name or `.`",
                );
            }
        }

        let raw = self.source[num_start..self.curr_byte_offset].to_string();
        if is_float {
            TokenKind::Float(raw)
        } else {
            TokenKind::Int(raw)
        }
    }

    /// Consumes the rest of a malformed number so the error span covers it,
    /// then returns an error token.
    fn lex_number_error(&mut self, num_start: usize, message: &str) -> TokenKind {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit()
                || is_name_continue(ch)
                || matches!(ch, '.' | '+' | '-')
            {
                self.consume();
            } else {
                break;
            }
        }
        let invalid = &self.source[num_start..self.curr_byte_offset];
        TokenKind::Error {
            message: format!("invalid number `{invalid}`: {message}"),
        }
    }

    /// Lexes a single-line or block string literal. The token keeps the raw
    /// text (quotes included); decoding happens in
    /// [`TokenKind::parse_string_value`].
    fn lex_string(&mut self) -> TokenKind {
        let str_start = self.curr_byte_offset;

        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(str_start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None => {
                    return TokenKind::Error {
                        message: "unterminated string literal".to_string(),
                    };
                }
                Some('\n') | Some('\r') => {
                    return TokenKind::Error {
                        message: "unterminated string literal \
                                  (strings may not contain unescaped newlines)"
                            .to_string(),
                    };
                }
                Some('"') => {
                    self.consume();
                    break;
                }
                Some('\\') => {
                    self.consume();
                    if self.peek_char().is_some() {
                        self.consume();
                    }
                }
                Some(_) => {
                    self.consume();
                }
            }
        }

        TokenKind::StringValue(self.source[str_start..self.curr_byte_offset].to_string())
    }

    fn lex_block_string(&mut self, str_start: usize) -> TokenKind {
        self.consume();
        self.consume();
        self.consume();

        loop {
            match self.peek_char() {
                None => {
                    return TokenKind::Error {
                        message: "unterminated block string".to_string(),
                    };
                }
                Some('\\') => {
                    if self.remaining().starts_with("\\\"\"\"") {
                        for _ in 0..4 {
                            self.consume();
                        }
                    } else {
                        self.consume();
                    }
                }
                Some('"') => {
                    if self.remaining().starts_with("\"\"\"") {
                        self.consume();
                        self.consume();
                        self.consume();
                        break;
                    }
                    self.consume();
                }
                Some(_) => {
                    self.consume();
                }
            }
        }

        TokenKind::StringValue(self.source[str_start..self.curr_byte_offset].to_string())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

/// Returns `true` if `ch` can start a GraphQL name.
fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Returns `true` if `ch` can continue a GraphQL name.
fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Describes a character for error messages; invisible characters get their
/// code point spelled out.
fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') {
        format!("U+{:04X}", ch as u32)
    } else {
        format!("`{ch}`")
    }
}
