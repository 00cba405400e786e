use crate::loc::Location;
use crate::schema::Schema;
use crate::types::Directive;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeRef;
use libgql_parser::ast;
use libgql_parser::SourceSpan;
use std::collections::HashMap;

/// A query-validity violation, with the locations of the offending nodes.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub locations: Vec<Location>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, spans: &[&SourceSpan]) -> Self {
        Self {
            message: message.into(),
            locations: spans.iter().map(|span| Location::from(*span)).collect(),
        }
    }
}

/// Shared state for one validation pass: the error sink plus the type-info
/// tracker every rule reads.
pub struct ValidationContext<'a> {
    pub schema: &'a Schema,
    pub document: &'a ast::Document,
    pub fragments: HashMap<&'a str, &'a ast::FragmentDefinition>,

    errors: Vec<ValidationError>,

    /// The composite type enclosing the current selection set (`None` when
    /// the position is unresolvable, e.g. under an unknown field).
    parent_types: Vec<Option<&'a GraphQLType>>,

    /// The field definition for the field currently being walked.
    field_defs: Vec<Option<&'a Field>>,

    /// The expected input type at the current argument position.
    input_types: Vec<Option<TypeRef>>,

    /// The directive annotation (and its definition, when known) currently
    /// being walked, if any.
    directive_context: Option<(&'a ast::DirectiveAnnotation, Option<&'a Directive>)>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(schema: &'a Schema, document: &'a ast::Document) -> Self {
        let fragments = document
            .fragments()
            .map(|fragment| (fragment.name.as_str(), fragment))
            .collect();
        Self {
            schema,
            document,
            fragments,
            errors: vec![],
            parent_types: vec![],
            field_defs: vec![],
            input_types: vec![],
            directive_context: None,
        }
    }

    pub fn report(&mut self, message: impl Into<String>, spans: &[&SourceSpan]) {
        self.errors.push(ValidationError::new(message, spans));
    }

    pub fn report_with_locations(&mut self, message: impl Into<String>, locations: Vec<Location>) {
        self.errors.push(ValidationError {
            message: message.into(),
            locations,
        });
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn parent_type(&self) -> Option<&'a GraphQLType> {
        self.parent_types.last().copied().flatten()
    }

    pub fn field_def(&self) -> Option<&'a Field> {
        self.field_defs.last().copied().flatten()
    }

    pub fn current_input_type(&self) -> Option<&TypeRef> {
        self.input_types.last().and_then(|t| t.as_ref())
    }

    pub fn directive_context(
        &self,
    ) -> Option<(&'a ast::DirectiveAnnotation, Option<&'a Directive>)> {
        self.directive_context
    }

    pub(crate) fn push_parent_type(&mut self, parent: Option<&'a GraphQLType>) {
        self.parent_types.push(parent);
    }

    pub(crate) fn pop_parent_type(&mut self) {
        self.parent_types.pop();
    }

    pub(crate) fn push_field_def(&mut self, field_def: Option<&'a Field>) {
        self.field_defs.push(field_def);
    }

    pub(crate) fn pop_field_def(&mut self) {
        self.field_defs.pop();
    }

    pub(crate) fn push_input_type(&mut self, input_type: Option<TypeRef>) {
        self.input_types.push(input_type);
    }

    pub(crate) fn pop_input_type(&mut self) {
        self.input_types.pop();
    }

    pub(crate) fn set_directive_context(
        &mut self,
        context: Option<(&'a ast::DirectiveAnnotation, Option<&'a Directive>)>,
    ) {
        self.directive_context = context;
    }
}
