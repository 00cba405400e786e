use crate::SourcePosition;

/// A contiguous region of a GraphQL source text.
///
/// `start` is inclusive and `end` is exclusive, mirroring Rust range
/// conventions. Every AST node carries one of these.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// A span covering both `self` and `other`.
    pub fn through(&self, other: &SourceSpan) -> SourceSpan {
        SourceSpan {
            start: self.start,
            end: other.end,
        }
    }
}
