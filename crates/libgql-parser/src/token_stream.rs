use crate::token::Token;
use crate::token::TokenKind;
use crate::Lexer;
use smallvec::SmallVec;

/// A token stream over a [`Lexer`] with arbitrary lookahead.
///
/// The parser mostly needs one token of lookahead, with an occasional
/// two-token peek to distinguish descriptions from string values and
/// `extend <kind>` forms; a small inline buffer covers both without
/// allocation.
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    buffer: SmallVec<[Token; 2]>,
    eof_seen: bool,
}

impl<'src> TokenStream<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            buffer: SmallVec::new(),
            eof_seen: false,
        }
    }

    fn fill(&mut self, n: usize) {
        while self.buffer.len() <= n && !self.eof_seen {
            let token = self.lexer.next_token();
            if matches!(token.kind, TokenKind::Eof) {
                self.eof_seen = true;
            }
            self.buffer.push(token);
        }
    }

    /// Peek at the next token without consuming it. After EOF this keeps
    /// returning the EOF token.
    pub fn peek(&mut self) -> &Token {
        self.peek_nth(0)
    }

    /// Peek `n` tokens ahead (`peek_nth(0)` == `peek()`).
    pub fn peek_nth(&mut self, n: usize) -> &Token {
        self.fill(n);
        let idx = n.min(self.buffer.len().saturating_sub(1));
        &self.buffer[idx]
    }

    /// Consume and return the next token.
    pub fn advance(&mut self) -> Token {
        self.fill(0);
        if self.buffer.len() == 1 && self.eof_seen {
            // Keep the EOF token around so repeated peeks stay valid.
            return self.buffer[0].clone();
        }
        self.buffer.remove(0)
    }
}
