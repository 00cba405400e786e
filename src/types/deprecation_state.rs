/// Whether a field or enum value carries a `@deprecated` annotation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DeprecationState {
    #[default]
    NotDeprecated,
    Deprecated(Option<String>),
}

impl DeprecationState {
    pub fn is_deprecated(&self) -> bool {
        matches!(self, DeprecationState::Deprecated(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            DeprecationState::NotDeprecated => None,
            DeprecationState::Deprecated(reason) => reason.as_deref(),
        }
    }
}
