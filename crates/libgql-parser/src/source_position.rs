/// A position within a GraphQL source text.
///
/// All fields are 0-based: the first character of a document sits at
/// `line: 0, col: 0, byte_offset: 0`. Error surfaces that need the familiar
/// 1-based convention add one at the display boundary (see
/// [`ParseError::format_oneline`](crate::ParseError::format_oneline)).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    col: usize,
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, col: usize, byte_offset: usize) -> Self {
        Self {
            line,
            col,
            byte_offset,
        }
    }

    /// 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based character column within the current line.
    pub fn col(&self) -> usize {
        self.col
    }

    /// 0-based byte offset from the start of the document.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }
}
