use crate::SourceSpan;

/// A syntax error produced by the lexer or parser.
///
/// Carries the expectation that failed (as a [`ParseErrorKind`]) and the
/// source span where it failed. Parse errors are fatal for a request: a
/// document that fails to parse is never validated or executed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct ParseError {
    message: String,
    span: SourceSpan,
    kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        span: SourceSpan,
        kind: ParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Formats this error as a one-line summary with a 1-based
    /// `line:column` location:
    ///
    /// ```text
    /// 5:12: syntax error: expected `:`, found `String`
    /// ```
    pub fn format_oneline(&self) -> String {
        format!(
            "{}:{}: syntax error: {}",
            self.span.start.line() + 1,
            self.span.start.col() + 1,
            self.message,
        )
    }

    /// Formats this error with a source snippet and caret underline:
    ///
    /// ```text
    /// syntax error: expected `:`, found `String`
    ///   --> 5:12
    ///    |
    ///  5 |     userName String
    ///    |              ^^^^^^
    /// ```
    pub fn format_detailed(&self, source: &str) -> String {
        let mut output = String::new();
        output.push_str("syntax error: ");
        output.push_str(&self.message);
        output.push('\n');

        let line = self.span.start.line();
        let col = self.span.start.col();
        output.push_str(&format!("  --> {}:{}\n", line + 1, col + 1));

        let Some(line_content) = source.lines().nth(line) else {
            return output;
        };
        let display_line = line + 1;
        let width = display_line.to_string().len().max(2);

        let underline_len = if self.span.end.line() == line && self.span.end.col() > col {
            self.span.end.col() - col
        } else {
            1
        };

        output.push_str(&format!("{:>width$} |\n", ""));
        output.push_str(&format!("{display_line:>width$} | {line_content}\n"));
        output.push_str(&format!(
            "{:>width$} | {:>col$}{}\n",
            "",
            "",
            "^".repeat(underline_len),
        ));

        output
    }
}

/// Categorized parse-error kinds, for programmatic handling without string
/// matching.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// The lexer could not produce a token at this position.
    LexerError,

    /// A token appeared where a different one was expected.
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The input ended mid-production.
    UnexpectedEof { expected: Vec<String> },

    /// A type-system definition appeared while parsing an executable
    /// document (or vice versa).
    WrongDocumentKind { found: String },

    /// Values, selection sets, or type annotations nested too deeply.
    RecursionLimitExceeded,
}
