//! Recursive descent parser for GraphQL documents.
//!
//! One parser covers both the query language and the SDL; the
//! [`ParseOptions::allow_type_system`] flag gates the SDL productions so
//! executable endpoints reject schema definitions with a useful error
//! instead of a generic "unexpected token".
//!
//! Parsing is O(N) in token count with one token of lookahead (two in the
//! handful of places that need to distinguish a description string or an
//! `extend` target). Errors are fatal: the first [`ParseError`] aborts the
//! parse.

use crate::ast;
use crate::ast::DirectiveLocation;
use crate::ast::OperationKind;
use crate::lexer::Lexer;
use crate::parse_error::ParseError;
use crate::parse_error::ParseErrorKind;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token_stream::TokenStream;
use crate::SourcePosition;
use crate::SourceSpan;

type Result<T> = std::result::Result<T, ParseError>;

/// Options controlling [`parse_document`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// When `true`, type-system definitions and extensions are accepted
    /// alongside executable definitions. When `false`, encountering one is
    /// a syntax error.
    pub allow_type_system: bool,
}

/// Parses a GraphQL document.
pub fn parse_document(source: &str, options: ParseOptions) -> Result<ast::Document> {
    Parser::new(source, options).parse_document_impl(DocumentKind::Mixed)
}

/// Parses an executable document: operations and fragments only.
pub fn parse_executable_document(source: &str) -> Result<ast::Document> {
    Parser::new(
        source,
        ParseOptions {
            allow_type_system: false,
        },
    )
    .parse_document_impl(DocumentKind::Executable)
}

/// Parses an SDL document: type-system definitions and extensions only.
pub fn parse_schema_document(source: &str) -> Result<ast::Document> {
    Parser::new(
        source,
        ParseOptions {
            allow_type_system: true,
        },
    )
    .parse_document_impl(DocumentKind::TypeSystem)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DocumentKind {
    /// Any definition kind is accepted.
    Mixed,
    /// Operations and fragments only.
    Executable,
    /// Type-system definitions and extensions only.
    TypeSystem,
}

/// Whether variables are allowed in the value being parsed, and if not,
/// which const context to blame in the error message.
#[derive(Clone, Copy, Debug)]
enum ConstContext {
    AllowVariables,
    DefaultValue,
    SchemaDirectiveArgument,
}

impl ConstContext {
    fn description(&self) -> &'static str {
        match self {
            ConstContext::AllowVariables => {
                unreachable!("description() called on AllowVariables")
            }
            ConstContext::DefaultValue => "default values",
            ConstContext::SchemaDirectiveArgument => "schema directive arguments",
        }
    }
}

/// A recursive descent parser over a [`TokenStream`].
pub struct Parser<'src> {
    token_stream: TokenStream<'src>,
    options: ParseOptions,

    /// Shared recursion depth counter for values, selection sets, and type
    /// annotations. Prevents stack overflow on adversarial inputs like
    /// `[[[[…` with hundreds of unclosed brackets.
    recursion_depth: usize,

    /// End position of the most recently consumed token; anchors node spans
    /// and EOF errors.
    last_end: SourcePosition,
}

impl<'src> Parser<'src> {
    /// Maximum nesting depth for recursive productions. Far beyond any
    /// realistic document while staying safe in debug builds.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            token_stream: TokenStream::new(Lexer::new(source)),
            options,
            recursion_depth: 0,
            last_end: SourcePosition::default(),
        }
    }

    /// Parses a whole document, honoring this parser's [`ParseOptions`].
    pub fn parse(self) -> Result<ast::Document> {
        self.parse_document_impl(DocumentKind::Mixed)
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn peek(&mut self) -> &Token {
        self.token_stream.peek()
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.token_stream.peek().kind.clone()
    }

    fn peek_span(&mut self) -> SourceSpan {
        self.token_stream.peek().span.clone()
    }

    fn advance(&mut self) -> Token {
        let token = self.token_stream.advance();
        self.last_end = token.span.end;
        token
    }

    /// Span from `start` through the end of the last consumed token.
    fn span_from(&self, start: &SourceSpan) -> SourceSpan {
        SourceSpan::new(start.start, self.last_end)
    }

    /// True if the next token is the name `keyword` (the keyword tokens of
    /// GraphQL are contextual, so this is how productions dispatch).
    fn peek_is_keyword(&mut self, keyword: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Name(name) if name == keyword)
    }

    fn error_at_peek(&mut self, message: String, expected: Vec<String>) -> ParseError {
        let token = self.peek();
        let span = token.span.clone();
        let kind = match &token.kind {
            TokenKind::Eof => ParseErrorKind::UnexpectedEof { expected },
            TokenKind::Error { .. } => ParseErrorKind::LexerError,
            other => ParseErrorKind::UnexpectedToken {
                expected,
                found: other.display_name(),
            },
        };
        // Lexer errors carry their own message; prefer it.
        let message = match &token.kind {
            TokenKind::Error { message } => message.clone(),
            _ => message,
        };
        ParseError::new(message, span, kind)
    }

    fn unexpected(&mut self, expected: &str) -> ParseError {
        let found = self.peek().kind.display_name();
        self.error_at_peek(
            format!("expected {expected}, found {found}"),
            vec![expected.to_string()],
        )
    }

    /// Expects and consumes a specific punctuator-like token kind.
    fn expect(&mut self, expected: &TokenKind) -> Result<Token> {
        if std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&expected.display_name()))
        }
    }

    /// Expects and consumes a name token.
    ///
    /// `true`, `false`, and `null` are lexed as dedicated token kinds but
    /// are still legal names outside of value positions, so they are
    /// accepted here.
    fn expect_name(&mut self) -> Result<ast::Name> {
        let value = match &self.peek().kind {
            TokenKind::Name(name) => name.clone(),
            TokenKind::True => "true".to_string(),
            TokenKind::False => "false".to_string(),
            TokenKind::Null => "null".to_string(),
            _ => return Err(self.unexpected("a name")),
        };
        let token = self.advance();
        Ok(ast::Name::new(value, token.span))
    }

    /// Expects and consumes the contextual keyword `keyword`.
    fn expect_keyword(&mut self, keyword: &str) -> Result<Token> {
        if self.peek_is_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("`{keyword}`")))
        }
    }

    fn enter_recursion(&mut self) -> Result<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            let span = self.peek_span();
            return Err(ParseError::new(
                format!(
                    "document exceeds the maximum nesting depth of {}",
                    Self::MAX_RECURSION_DEPTH,
                ),
                span,
                ParseErrorKind::RecursionLimitExceeded,
            ));
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // =========================================================================
    // Document
    // =========================================================================

    fn parse_document_impl(mut self, doc_kind: DocumentKind) -> Result<ast::Document> {
        let start = self.peek_span();
        let mut definitions = vec![];

        loop {
            match self.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::Error { .. } => {
                    return Err(self.error_at_peek(String::new(), vec![]));
                }
                _ => {
                    definitions.push(self.parse_definition(doc_kind)?);
                }
            }
        }

        if definitions.is_empty() {
            return Err(self.error_at_peek(
                "expected at least one definition".to_string(),
                vec!["a definition".to_string()],
            ));
        }

        Ok(ast::Document {
            definitions,
            span: self.span_from(&start),
        })
    }

    fn parse_definition(&mut self, doc_kind: DocumentKind) -> Result<ast::Definition> {
        // A description string can only precede a type-system definition.
        let has_description =
            matches!(self.peek().kind, TokenKind::StringValue(_));

        if !has_description {
            match self.peek_kind() {
                TokenKind::CurlyBraceOpen => {
                    self.check_executable_allowed(doc_kind, "an operation")?;
                    return Ok(ast::Definition::Operation(
                        self.parse_shorthand_operation()?,
                    ));
                }
                TokenKind::Name(name) => match name.as_str() {
                    "query" | "mutation" | "subscription" => {
                        self.check_executable_allowed(doc_kind, "an operation")?;
                        return Ok(ast::Definition::Operation(self.parse_operation()?));
                    }
                    "fragment" => {
                        self.check_executable_allowed(doc_kind, "a fragment")?;
                        return Ok(ast::Definition::Fragment(self.parse_fragment_definition()?));
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        self.check_type_system_allowed(doc_kind)?;
        self.parse_type_system_definition()
    }

    fn check_executable_allowed(
        &mut self,
        doc_kind: DocumentKind,
        what: &str,
    ) -> Result<()> {
        if doc_kind == DocumentKind::TypeSystem {
            let span = self.peek_span();
            return Err(ParseError::new(
                format!("{what} may not appear in a schema document"),
                span,
                ParseErrorKind::WrongDocumentKind {
                    found: what.to_string(),
                },
            ));
        }
        Ok(())
    }

    fn check_type_system_allowed(&mut self, doc_kind: DocumentKind) -> Result<()> {
        let allowed = match doc_kind {
            DocumentKind::Mixed => self.options.allow_type_system,
            DocumentKind::TypeSystem => true,
            DocumentKind::Executable => false,
        };
        if !allowed {
            let found = self.peek().kind.display_name();
            let span = self.peek_span();
            return Err(ParseError::new(
                format!(
                    "type-system definitions are not allowed in an executable \
                     document (found {found})"
                ),
                span,
                ParseErrorKind::WrongDocumentKind { found },
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Operations and fragments
    // =========================================================================

    /// Parses the query-shorthand form: a bare selection set.
    fn parse_shorthand_operation(&mut self) -> Result<ast::OperationDefinition> {
        let start = self.peek_span();
        let selection_set = self.parse_selection_set()?;
        Ok(ast::OperationDefinition {
            kind: OperationKind::Query,
            name: None,
            variable_definitions: vec![],
            directives: vec![],
            selection_set,
            shorthand: true,
            span: self.span_from(&start),
        })
    }

    fn parse_operation(&mut self) -> Result<ast::OperationDefinition> {
        let start = self.peek_span();

        let kind_name = self.expect_name()?;
        let kind = match kind_name.as_str() {
            "query" => OperationKind::Query,
            "mutation" => OperationKind::Mutation,
            "subscription" => OperationKind::Subscription,
            other => {
                return Err(ParseError::new(
                    format!("expected an operation kind, found `{other}`"),
                    kind_name.span.clone(),
                    ParseErrorKind::UnexpectedToken {
                        expected: vec![
                            "`query`".to_string(),
                            "`mutation`".to_string(),
                            "`subscription`".to_string(),
                        ],
                        found: format!("`{other}`"),
                    },
                ));
            }
        };

        let name = match &self.peek().kind {
            TokenKind::Name(_) | TokenKind::True | TokenKind::False | TokenKind::Null => {
                Some(self.expect_name()?)
            }
            _ => None,
        };

        let variable_definitions =
            if matches!(self.peek().kind, TokenKind::ParenOpen) {
                self.parse_variable_definitions()?
            } else {
                vec![]
            };

        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::OperationDefinition {
            kind,
            name,
            variable_definitions,
            directives,
            selection_set,
            shorthand: false,
            span: self.span_from(&start),
        })
    }

    fn parse_variable_definitions(&mut self) -> Result<Vec<ast::VariableDefinition>> {
        self.expect(&TokenKind::ParenOpen)?;
        let mut defs = vec![];
        while !matches!(self.peek().kind, TokenKind::ParenClose) {
            defs.push(self.parse_variable_definition()?);
        }
        if defs.is_empty() {
            return Err(self.unexpected("a variable definition"));
        }
        self.expect(&TokenKind::ParenClose)?;
        Ok(defs)
    }

    fn parse_variable_definition(&mut self) -> Result<ast::VariableDefinition> {
        let start = self.peek_span();
        self.expect(&TokenKind::Dollar)?;
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let var_type = self.parse_type_annotation()?;

        let default_value = if matches!(self.peek().kind, TokenKind::Equals) {
            self.advance();
            Some(self.parse_value(ConstContext::DefaultValue)?)
        } else {
            None
        };

        // Directives on variable definitions: graphql-spec PR 510 (syntax
        // only; no semantics attached downstream).
        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;

        Ok(ast::VariableDefinition {
            name,
            var_type,
            default_value,
            directives,
            span: self.span_from(&start),
        })
    }

    fn parse_selection_set(&mut self) -> Result<ast::SelectionSet> {
        self.enter_recursion()?;
        let result = self.parse_selection_set_inner();
        self.exit_recursion();
        result
    }

    fn parse_selection_set_inner(&mut self) -> Result<ast::SelectionSet> {
        let start = self.peek_span();
        self.expect(&TokenKind::CurlyBraceOpen)?;

        let mut selections = vec![];
        loop {
            match self.peek_kind() {
                TokenKind::CurlyBraceClose => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.unexpected("`}`"));
                }
                TokenKind::Ellipsis => {
                    selections.push(self.parse_fragment_selection()?);
                }
                _ => {
                    selections.push(ast::Selection::Field(self.parse_field()?));
                }
            }
        }

        if selections.is_empty() {
            return Err(ParseError::new(
                "a selection set may not be empty".to_string(),
                self.span_from(&start),
                ParseErrorKind::UnexpectedToken {
                    expected: vec!["a selection".to_string()],
                    found: "`}`".to_string(),
                },
            ));
        }

        Ok(ast::SelectionSet {
            selections,
            span: self.span_from(&start),
        })
    }

    fn parse_field(&mut self) -> Result<ast::Field> {
        let start = self.peek_span();
        let name_or_alias = self.expect_name()?;

        let (alias, name) = if matches!(self.peek().kind, TokenKind::Colon) {
            self.advance();
            (Some(name_or_alias), self.expect_name()?)
        } else {
            (None, name_or_alias)
        };

        let arguments = if matches!(self.peek().kind, TokenKind::ParenOpen) {
            self.parse_arguments(ConstContext::AllowVariables)?
        } else {
            vec![]
        };

        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;

        let selection_set = if matches!(self.peek().kind, TokenKind::CurlyBraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        Ok(ast::Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            span: self.span_from(&start),
        })
    }

    /// Parses a fragment spread or inline fragment, starting at `...`.
    fn parse_fragment_selection(&mut self) -> Result<ast::Selection> {
        let start = self.peek_span();
        self.expect(&TokenKind::Ellipsis)?;

        // `... on Type { … }` or `... @dir { … }` or `... { … }` are inline
        // fragments; `...Name` is a named spread. The name `on` is reserved
        // to introduce a type condition.
        let is_spread = match &self.peek().kind {
            TokenKind::Name(name) => name != "on",
            TokenKind::True | TokenKind::False | TokenKind::Null => true,
            _ => false,
        };

        if is_spread {
            let name = self.expect_name()?;
            let directives =
                self.parse_directive_annotations(ConstContext::AllowVariables)?;
            return Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                name,
                directives,
                span: self.span_from(&start),
            }));
        }

        let type_condition = if self.peek_is_keyword("on") {
            Some(self.parse_type_condition()?)
        } else {
            None
        };
        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            type_condition,
            directives,
            selection_set,
            span: self.span_from(&start),
        }))
    }

    fn parse_fragment_definition(&mut self) -> Result<ast::FragmentDefinition> {
        let start = self.peek_span();
        self.expect_keyword("fragment")?;

        let name = self.expect_name()?;
        if name.as_str() == "on" {
            return Err(ParseError::new(
                "a fragment may not be named `on`".to_string(),
                name.span,
                ParseErrorKind::UnexpectedToken {
                    expected: vec!["a fragment name".to_string()],
                    found: "`on`".to_string(),
                },
            ));
        }

        let type_condition = self.parse_type_condition()?;
        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
            span: self.span_from(&start),
        })
    }

    fn parse_type_condition(&mut self) -> Result<ast::TypeCondition> {
        let start = self.peek_span();
        self.expect_keyword("on")?;
        let on_type = self.expect_name()?;
        Ok(ast::TypeCondition {
            on_type,
            span: self.span_from(&start),
        })
    }

    // =========================================================================
    // Arguments, directives, values, types
    // =========================================================================

    fn parse_arguments(&mut self, const_ctx: ConstContext) -> Result<Vec<ast::Argument>> {
        self.expect(&TokenKind::ParenOpen)?;
        let mut arguments = vec![];
        while !matches!(self.peek().kind, TokenKind::ParenClose) {
            let start = self.peek_span();
            let name = self.expect_name()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_value(const_ctx)?;
            arguments.push(ast::Argument {
                name,
                value,
                span: self.span_from(&start),
            });
        }
        if arguments.is_empty() {
            return Err(self.unexpected("an argument"));
        }
        self.expect(&TokenKind::ParenClose)?;
        Ok(arguments)
    }

    fn parse_directive_annotations(
        &mut self,
        const_ctx: ConstContext,
    ) -> Result<Vec<ast::DirectiveAnnotation>> {
        let mut annotations = vec![];
        while matches!(self.peek().kind, TokenKind::At) {
            let start = self.peek_span();
            self.advance();
            let name = self.expect_name()?;
            let arguments = if matches!(self.peek().kind, TokenKind::ParenOpen) {
                self.parse_arguments(const_ctx)?
            } else {
                vec![]
            };
            annotations.push(ast::DirectiveAnnotation {
                name,
                arguments,
                span: self.span_from(&start),
            });
        }
        Ok(annotations)
    }

    fn parse_value(&mut self, const_ctx: ConstContext) -> Result<ast::Value> {
        self.enter_recursion()?;
        let result = self.parse_value_inner(const_ctx);
        self.exit_recursion();
        result
    }

    fn parse_value_inner(&mut self, const_ctx: ConstContext) -> Result<ast::Value> {
        let start = self.peek_span();
        match self.peek_kind() {
            TokenKind::Dollar => {
                if !matches!(const_ctx, ConstContext::AllowVariables) {
                    return Err(ParseError::new(
                        format!(
                            "variables are not allowed in {}",
                            const_ctx.description(),
                        ),
                        start,
                        ParseErrorKind::UnexpectedToken {
                            expected: vec!["a constant value".to_string()],
                            found: "`$`".to_string(),
                        },
                    ));
                }
                self.advance();
                let name = self.expect_name()?;
                Ok(ast::Value::Variable(ast::VariableValue {
                    name: name.value,
                    span: self.span_from(&start),
                }))
            }

            TokenKind::Int(raw) => {
                self.advance();
                Ok(ast::Value::Int(ast::IntValue {
                    raw,
                    span: self.span_from(&start),
                }))
            }

            TokenKind::Float(raw) => {
                self.advance();
                Ok(ast::Value::Float(ast::FloatValue {
                    raw,
                    span: self.span_from(&start),
                }))
            }

            TokenKind::StringValue(_) => {
                let string_value = self.parse_string_value()?;
                Ok(ast::Value::String(string_value))
            }

            TokenKind::True | TokenKind::False => {
                let value = matches!(self.peek().kind, TokenKind::True);
                self.advance();
                Ok(ast::Value::Boolean(ast::BooleanValue {
                    value,
                    span: self.span_from(&start),
                }))
            }

            TokenKind::Null => {
                self.advance();
                Ok(ast::Value::Null(ast::NullValue {
                    span: self.span_from(&start),
                }))
            }

            TokenKind::Name(value) => {
                self.advance();
                Ok(ast::Value::Enum(ast::EnumValue {
                    value,
                    span: self.span_from(&start),
                }))
            }

            TokenKind::SquareBracketOpen => {
                self.advance();
                let mut values = vec![];
                while !matches!(self.peek().kind, TokenKind::SquareBracketClose) {
                    if matches!(self.peek().kind, TokenKind::Eof) {
                        return Err(self.unexpected("`]`"));
                    }
                    values.push(self.parse_value(const_ctx)?);
                }
                self.advance();
                Ok(ast::Value::List(ast::ListValue {
                    values,
                    span: self.span_from(&start),
                }))
            }

            TokenKind::CurlyBraceOpen => {
                self.advance();
                let mut fields = vec![];
                while !matches!(self.peek().kind, TokenKind::CurlyBraceClose) {
                    if matches!(self.peek().kind, TokenKind::Eof) {
                        return Err(self.unexpected("`}`"));
                    }
                    let field_start = self.peek_span();
                    let name = self.expect_name()?;
                    self.expect(&TokenKind::Colon)?;
                    let value = self.parse_value(const_ctx)?;
                    fields.push(ast::ObjectField {
                        name,
                        value,
                        span: self.span_from(&field_start),
                    });
                }
                self.advance();
                Ok(ast::Value::Object(ast::ObjectValue {
                    fields,
                    span: self.span_from(&start),
                }))
            }

            _ => Err(self.unexpected("a value")),
        }
    }

    fn parse_string_value(&mut self) -> Result<ast::StringValue> {
        let decoded = match self.peek().kind.parse_string_value() {
            Some(Ok(decoded)) => decoded,
            Some(Err(err)) => {
                let span = self.peek_span();
                return Err(ParseError::new(
                    err.to_string(),
                    span,
                    ParseErrorKind::LexerError,
                ));
            }
            None => return Err(self.unexpected("a string")),
        };
        let token = self.advance();
        Ok(ast::StringValue {
            value: decoded.value,
            block: decoded.block,
            span: token.span,
        })
    }

    fn parse_type_annotation(&mut self) -> Result<ast::TypeAnnotation> {
        self.enter_recursion()?;
        let result = self.parse_type_annotation_inner();
        self.exit_recursion();
        result
    }

    fn parse_type_annotation_inner(&mut self) -> Result<ast::TypeAnnotation> {
        let start = self.peek_span();

        if matches!(self.peek().kind, TokenKind::SquareBracketOpen) {
            self.advance();
            let inner = self.parse_type_annotation()?;
            self.expect(&TokenKind::SquareBracketClose)?;
            let nullable = !self.eat_bang();
            return Ok(ast::TypeAnnotation::List(Box::new(
                ast::ListTypeAnnotation {
                    inner,
                    nullable,
                    span: self.span_from(&start),
                },
            )));
        }

        let name = self.expect_name()?;
        let nullable = !self.eat_bang();
        Ok(ast::TypeAnnotation::Named(ast::NamedTypeAnnotation {
            name,
            nullable,
            span: self.span_from(&start),
        }))
    }

    fn eat_bang(&mut self) -> bool {
        if matches!(self.peek().kind, TokenKind::Bang) {
            self.advance();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Type-system definitions
    // =========================================================================

    fn parse_type_system_definition(&mut self) -> Result<ast::Definition> {
        let description = if matches!(self.peek().kind, TokenKind::StringValue(_)) {
            Some(self.parse_string_value()?)
        } else {
            None
        };

        let keyword = match &self.peek().kind {
            TokenKind::Name(name) => name.clone(),
            _ => return Err(self.unexpected("a type-system definition")),
        };

        match keyword.as_str() {
            "schema" => self
                .parse_schema_definition(description)
                .map(ast::Definition::Schema),
            "scalar" => Ok(ast::Definition::Type(ast::TypeDefinition::Scalar(
                self.parse_scalar_type(description)?,
            ))),
            "type" => Ok(ast::Definition::Type(ast::TypeDefinition::Object(
                self.parse_object_type(description)?,
            ))),
            "interface" => Ok(ast::Definition::Type(ast::TypeDefinition::Interface(
                self.parse_interface_type(description)?,
            ))),
            "union" => Ok(ast::Definition::Type(ast::TypeDefinition::Union(
                self.parse_union_type(description)?,
            ))),
            "enum" => Ok(ast::Definition::Type(ast::TypeDefinition::Enum(
                self.parse_enum_type(description)?,
            ))),
            "input" => Ok(ast::Definition::Type(ast::TypeDefinition::InputObject(
                self.parse_input_object_type(description)?,
            ))),
            "directive" => Ok(ast::Definition::Directive(
                self.parse_directive_definition(description)?,
            )),
            "extend" => {
                if description.is_some() {
                    return Err(self.unexpected(
                        "a type-system definition (extensions may not have \
                         descriptions)",
                    ));
                }
                self.parse_type_system_extension()
            }
            _ => Err(self.unexpected("a type-system definition")),
        }
    }

    fn parse_schema_definition(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::SchemaDefinition> {
        let start = self.peek_span();
        self.expect_keyword("schema")?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
        let operation_types = self.parse_root_operation_types()?;
        Ok(ast::SchemaDefinition {
            description,
            directives,
            operation_types,
            span: self.span_from(&start),
        })
    }

    fn parse_root_operation_types(
        &mut self,
    ) -> Result<Vec<ast::RootOperationTypeDefinition>> {
        self.expect(&TokenKind::CurlyBraceOpen)?;
        let mut operation_types = vec![];
        while !matches!(self.peek().kind, TokenKind::CurlyBraceClose) {
            if matches!(self.peek().kind, TokenKind::Eof) {
                return Err(self.unexpected("`}`"));
            }
            let start = self.peek_span();
            let op_name = self.expect_name()?;
            let operation = match op_name.as_str() {
                "query" => OperationKind::Query,
                "mutation" => OperationKind::Mutation,
                "subscription" => OperationKind::Subscription,
                other => {
                    return Err(ParseError::new(
                        format!(
                            "expected `query`, `mutation`, or `subscription`, \
                             found `{other}`"
                        ),
                        op_name.span.clone(),
                        ParseErrorKind::UnexpectedToken {
                            expected: vec![
                                "`query`".to_string(),
                                "`mutation`".to_string(),
                                "`subscription`".to_string(),
                            ],
                            found: format!("`{other}`"),
                        },
                    ));
                }
            };
            self.expect(&TokenKind::Colon)?;
            let named_type = self.expect_name()?;
            operation_types.push(ast::RootOperationTypeDefinition {
                operation,
                named_type,
                span: self.span_from(&start),
            });
        }
        self.advance();
        Ok(operation_types)
    }

    fn parse_scalar_type(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::ScalarTypeDefinition> {
        let start = self.peek_span();
        self.expect_keyword("scalar")?;
        let name = self.expect_name()?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
        Ok(ast::ScalarTypeDefinition {
            description,
            name,
            directives,
            span: self.span_from(&start),
        })
    }

    fn parse_object_type(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::ObjectTypeDefinition> {
        let start = self.peek_span();
        self.expect_keyword("type")?;
        let name = self.expect_name()?;
        let interfaces = self.parse_implements_interfaces()?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
        let fields = self.parse_field_definitions()?;
        Ok(ast::ObjectTypeDefinition {
            description,
            name,
            interfaces,
            directives,
            fields,
            span: self.span_from(&start),
        })
    }

    fn parse_interface_type(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::InterfaceTypeDefinition> {
        let start = self.peek_span();
        self.expect_keyword("interface")?;
        let name = self.expect_name()?;
        let interfaces = self.parse_implements_interfaces()?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
        let fields = self.parse_field_definitions()?;
        Ok(ast::InterfaceTypeDefinition {
            description,
            name,
            interfaces,
            directives,
            fields,
            span: self.span_from(&start),
        })
    }

    /// Parses `implements I1 & I2 & …` (empty when absent). A leading `&`
    /// after the keyword is tolerated per the spec grammar.
    fn parse_implements_interfaces(&mut self) -> Result<Vec<ast::Name>> {
        if !self.peek_is_keyword("implements") {
            return Ok(vec![]);
        }
        self.advance();

        let mut interfaces = vec![];
        if matches!(self.peek().kind, TokenKind::Ampersand) {
            self.advance();
        }
        interfaces.push(self.expect_name()?);
        while matches!(self.peek().kind, TokenKind::Ampersand) {
            self.advance();
            interfaces.push(self.expect_name()?);
        }
        Ok(interfaces)
    }

    /// Parses `{ field defs }`, or nothing: object/interface definitions
    /// without a body are legal SDL (they can be filled by extensions).
    fn parse_field_definitions(&mut self) -> Result<Vec<ast::FieldDefinition>> {
        if !matches!(self.peek().kind, TokenKind::CurlyBraceOpen) {
            return Ok(vec![]);
        }
        self.advance();

        let mut fields = vec![];
        while !matches!(self.peek().kind, TokenKind::CurlyBraceClose) {
            if matches!(self.peek().kind, TokenKind::Eof) {
                return Err(self.unexpected("`}`"));
            }
            fields.push(self.parse_field_definition()?);
        }
        if fields.is_empty() {
            return Err(self.unexpected("a field definition"));
        }
        self.advance();
        Ok(fields)
    }

    fn parse_field_definition(&mut self) -> Result<ast::FieldDefinition> {
        let start = self.peek_span();
        let description = if matches!(self.peek().kind, TokenKind::StringValue(_)) {
            Some(self.parse_string_value()?)
        } else {
            None
        };
        let name = self.expect_name()?;
        let arguments = if matches!(self.peek().kind, TokenKind::ParenOpen) {
            self.parse_input_value_definitions(TokenKind::ParenOpen, TokenKind::ParenClose)?
        } else {
            vec![]
        };
        self.expect(&TokenKind::Colon)?;
        let field_type = self.parse_type_annotation()?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
        Ok(ast::FieldDefinition {
            description,
            name,
            arguments,
            field_type,
            directives,
            span: self.span_from(&start),
        })
    }

    /// Parses a delimited list of input value definitions: `(…)` for
    /// argument definitions, `{…}` for input-object fields.
    fn parse_input_value_definitions(
        &mut self,
        open: TokenKind,
        close: TokenKind,
    ) -> Result<Vec<ast::InputValueDefinition>> {
        self.expect(&open)?;
        let mut defs = vec![];
        loop {
            if std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(&close) {
                break;
            }
            if matches!(self.peek().kind, TokenKind::Eof) {
                return Err(self.unexpected(&close.display_name()));
            }
            defs.push(self.parse_input_value_definition()?);
        }
        if defs.is_empty() {
            return Err(self.unexpected("an input value definition"));
        }
        self.expect(&close)?;
        Ok(defs)
    }

    fn parse_input_value_definition(&mut self) -> Result<ast::InputValueDefinition> {
        let start = self.peek_span();
        let description = if matches!(self.peek().kind, TokenKind::StringValue(_)) {
            Some(self.parse_string_value()?)
        } else {
            None
        };
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let value_type = self.parse_type_annotation()?;
        let default_value = if matches!(self.peek().kind, TokenKind::Equals) {
            self.advance();
            Some(self.parse_value(ConstContext::DefaultValue)?)
        } else {
            None
        };
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
        Ok(ast::InputValueDefinition {
            description,
            name,
            value_type,
            default_value,
            directives,
            span: self.span_from(&start),
        })
    }

    fn parse_union_type(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::UnionTypeDefinition> {
        let start = self.peek_span();
        self.expect_keyword("union")?;
        let name = self.expect_name()?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;

        let members = if matches!(self.peek().kind, TokenKind::Equals) {
            self.advance();
            let mut members = vec![];
            if matches!(self.peek().kind, TokenKind::Pipe) {
                self.advance();
            }
            members.push(self.expect_name()?);
            while matches!(self.peek().kind, TokenKind::Pipe) {
                self.advance();
                members.push(self.expect_name()?);
            }
            members
        } else {
            vec![]
        };

        Ok(ast::UnionTypeDefinition {
            description,
            name,
            directives,
            members,
            span: self.span_from(&start),
        })
    }

    fn parse_enum_type(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::EnumTypeDefinition> {
        let start = self.peek_span();
        self.expect_keyword("enum")?;
        let name = self.expect_name()?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;

        let mut values = vec![];
        if matches!(self.peek().kind, TokenKind::CurlyBraceOpen) {
            self.advance();
            while !matches!(self.peek().kind, TokenKind::CurlyBraceClose) {
                if matches!(self.peek().kind, TokenKind::Eof) {
                    return Err(self.unexpected("`}`"));
                }
                let value_start = self.peek_span();
                let value_description =
                    if matches!(self.peek().kind, TokenKind::StringValue(_)) {
                        Some(self.parse_string_value()?)
                    } else {
                        None
                    };
                let value_name = match &self.peek().kind {
                    TokenKind::Name(_) => self.expect_name()?,
                    // `true`, `false`, and `null` are not legal enum values.
                    _ => return Err(self.unexpected("an enum value name")),
                };
                let value_directives =
                    self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
                values.push(ast::EnumValueDefinition {
                    description: value_description,
                    name: value_name,
                    directives: value_directives,
                    span: self.span_from(&value_start),
                });
            }
            if values.is_empty() {
                return Err(self.unexpected("an enum value definition"));
            }
            self.advance();
        }

        Ok(ast::EnumTypeDefinition {
            description,
            name,
            directives,
            values,
            span: self.span_from(&start),
        })
    }

    fn parse_input_object_type(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::InputObjectTypeDefinition> {
        let start = self.peek_span();
        self.expect_keyword("input")?;
        let name = self.expect_name()?;
        let directives =
            self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
        let fields = if matches!(self.peek().kind, TokenKind::CurlyBraceOpen) {
            self.parse_input_value_definitions(
                TokenKind::CurlyBraceOpen,
                TokenKind::CurlyBraceClose,
            )?
        } else {
            vec![]
        };
        Ok(ast::InputObjectTypeDefinition {
            description,
            name,
            directives,
            fields,
            span: self.span_from(&start),
        })
    }

    fn parse_directive_definition(
        &mut self,
        description: Option<ast::StringValue>,
    ) -> Result<ast::DirectiveDefinition> {
        let start = self.peek_span();
        self.expect_keyword("directive")?;
        self.expect(&TokenKind::At)?;
        let name = self.expect_name()?;

        let arguments = if matches!(self.peek().kind, TokenKind::ParenOpen) {
            self.parse_input_value_definitions(TokenKind::ParenOpen, TokenKind::ParenClose)?
        } else {
            vec![]
        };

        let repeatable = if self.peek_is_keyword("repeatable") {
            self.advance();
            true
        } else {
            false
        };

        self.expect_keyword("on")?;

        let mut locations = vec![];
        if matches!(self.peek().kind, TokenKind::Pipe) {
            self.advance();
        }
        locations.push(self.parse_directive_location()?);
        while matches!(self.peek().kind, TokenKind::Pipe) {
            self.advance();
            locations.push(self.parse_directive_location()?);
        }

        Ok(ast::DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations,
            span: self.span_from(&start),
        })
    }

    fn parse_directive_location(&mut self) -> Result<DirectiveLocation> {
        let name = self.expect_name()?;
        DirectiveLocation::from_str(name.as_str()).ok_or_else(|| {
            ParseError::new(
                format!("`{}` is not a directive location", name.as_str()),
                name.span.clone(),
                ParseErrorKind::UnexpectedToken {
                    expected: vec!["a directive location".to_string()],
                    found: format!("`{}`", name.as_str()),
                },
            )
        })
    }

    // =========================================================================
    // Type-system extensions
    // =========================================================================

    fn parse_type_system_extension(&mut self) -> Result<ast::Definition> {
        let start = self.peek_span();
        self.expect_keyword("extend")?;

        let keyword = match &self.peek().kind {
            TokenKind::Name(name) => name.clone(),
            _ => return Err(self.unexpected("a type-system extension")),
        };

        match keyword.as_str() {
            "schema" => {
                self.expect_keyword("schema")?;
                let directives =
                    self.parse_directive_annotations(ConstContext::SchemaDirectiveArgument)?;
                let operation_types =
                    if matches!(self.peek().kind, TokenKind::CurlyBraceOpen) {
                        self.parse_root_operation_types()?
                    } else {
                        vec![]
                    };
                Ok(ast::Definition::SchemaExtension(ast::SchemaExtension {
                    directives,
                    operation_types,
                    span: self.span_from(&start),
                }))
            }
            "scalar" => {
                let mut def = self.parse_scalar_type(None)?;
                def.span = self.span_from(&start);
                Ok(ast::Definition::TypeExtension(ast::TypeExtension::Scalar(def)))
            }
            "type" => {
                let mut def = self.parse_object_type(None)?;
                def.span = self.span_from(&start);
                Ok(ast::Definition::TypeExtension(ast::TypeExtension::Object(def)))
            }
            "interface" => {
                let mut def = self.parse_interface_type(None)?;
                def.span = self.span_from(&start);
                Ok(ast::Definition::TypeExtension(ast::TypeExtension::Interface(def)))
            }
            "union" => {
                let mut def = self.parse_union_type(None)?;
                def.span = self.span_from(&start);
                Ok(ast::Definition::TypeExtension(ast::TypeExtension::Union(def)))
            }
            "enum" => {
                let mut def = self.parse_enum_type(None)?;
                def.span = self.span_from(&start);
                Ok(ast::Definition::TypeExtension(ast::TypeExtension::Enum(def)))
            }
            "input" => {
                let mut def = self.parse_input_object_type(None)?;
                def.span = self.span_from(&start);
                Ok(ast::Definition::TypeExtension(ast::TypeExtension::InputObject(def)))
            }
            _ => Err(self.unexpected("a type-system extension")),
        }
    }
}
