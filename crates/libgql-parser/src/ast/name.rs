use crate::SourceSpan;

/// A GraphQL name with its source span.
///
/// See [Names](https://spec.graphql.org/June2018/#sec-Names) in the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    pub value: String,
    pub span: SourceSpan,
}

impl Name {
    pub fn new(value: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            value: value.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
