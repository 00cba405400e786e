use libgql_parser::SourceSpan;
use serde::Serialize;

/// A 1-based line/column location, as surfaced in responses.
///
/// The parser tracks positions 0-based; this is the wire-facing form used
/// by validation and execution errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<&SourceSpan> for Location {
    fn from(span: &SourceSpan) -> Self {
        Self {
            line: span.start.line() + 1,
            column: span.start.col() + 1,
        }
    }
}

/// Where a schema element was defined.
///
/// Built-in types and directives (`Int`, `@skip`, the introspection types)
/// have no source location.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DefLocation {
    /// Implicitly defined by GraphQL itself.
    Builtin,
    /// Defined in SDL source at this location.
    Source(Location),
}

impl DefLocation {
    pub fn location(&self) -> Option<Location> {
        match self {
            DefLocation::Builtin => None,
            DefLocation::Source(location) => Some(*location),
        }
    }
}

impl From<&SourceSpan> for DefLocation {
    fn from(span: &SourceSpan) -> Self {
        DefLocation::Source(Location::from(span))
    }
}

impl std::fmt::Display for DefLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefLocation::Builtin => write!(f, "<builtin>"),
            DefLocation::Source(location) => {
                write!(f, "{}:{}", location.line, location.column)
            }
        }
    }
}
