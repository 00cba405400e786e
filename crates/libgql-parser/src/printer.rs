//! Canonical source printing for AST nodes.
//!
//! [`print_ast`] (and the per-node `write_source` methods it drives) emit a
//! normalized form of a document: two-space indentation, one selection or
//! field definition per line, definitions separated by blank lines. The
//! output of printing a parsed document re-parses to a structurally
//! equivalent document: `print(parse(print(parse(s))))` is a fixed point.
//!
//! Every node exposes `write_source` as an inherent method (via the
//! `inherent` crate) so callers don't need the [`AstNode`] trait in scope.

use crate::ast;
use inherent::inherent;

/// Prints any AST node to its canonical source form.
pub fn print_ast(node: &impl AstNode) -> String {
    let mut w = SourceWriter::new();
    node.write_source(&mut w);
    w.finish()
}

/// Trait implemented by all AST node types; provides source printing.
pub trait AstNode {
    /// Append this node's canonical source representation to `w`.
    fn write_source(&self, w: &mut SourceWriter);
}

/// An indentation-tracking string sink for source printing.
pub struct SourceWriter {
    buf: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
        for _ in 0..self.indent {
            self.buf.push_str("  ");
        }
    }

    fn open_block(&mut self) {
        self.push("{");
        self.indent += 1;
    }

    fn close_block(&mut self) {
        self.indent -= 1;
        self.newline();
        self.push("}");
    }
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

fn write_string_literal(w: &mut SourceWriter, value: &str, block: bool) {
    if block {
        w.push("\"\"\"");
        let escaped = value.replace("\"\"\"", "\\\"\"\"");
        if escaped.contains('\n') {
            for line in escaped.split('\n') {
                w.newline();
                w.push(line);
            }
            w.newline();
        } else {
            w.push(&escaped);
        }
        w.push("\"\"\"");
        return;
    }

    w.push("\"");
    for c in value.chars() {
        match c {
            '"' => w.push("\\\""),
            '\\' => w.push("\\\\"),
            '\n' => w.push("\\n"),
            '\r' => w.push("\\r"),
            '\t' => w.push("\\t"),
            c if (c as u32) < 0x20 => {
                w.push(&format!("\\u{:04X}", c as u32));
            }
            c => w.push(&c.to_string()),
        }
    }
    w.push("\"");
}

/// Descriptions print in block form, matching common SDL style.
fn write_description(w: &mut SourceWriter, description: &Option<ast::StringValue>) {
    if let Some(description) = description {
        write_string_literal(w, &description.value, true);
        w.newline();
    }
}

fn write_directives(w: &mut SourceWriter, directives: &[ast::DirectiveAnnotation]) {
    for directive in directives {
        w.push(" ");
        directive.write_source(w);
    }
}

fn write_arguments(w: &mut SourceWriter, arguments: &[ast::Argument]) {
    if arguments.is_empty() {
        return;
    }
    w.push("(");
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.push(argument.name.as_str());
        w.push(": ");
        argument.value.write_source(w);
    }
    w.push(")");
}

fn write_implements(w: &mut SourceWriter, interfaces: &[ast::Name]) {
    if interfaces.is_empty() {
        return;
    }
    w.push(" implements ");
    for (i, interface) in interfaces.iter().enumerate() {
        if i > 0 {
            w.push(" & ");
        }
        w.push(interface.as_str());
    }
}

fn write_field_definitions(w: &mut SourceWriter, fields: &[ast::FieldDefinition]) {
    if fields.is_empty() {
        return;
    }
    w.push(" ");
    w.open_block();
    for field in fields {
        w.newline();
        field.write_source(w);
    }
    w.close_block();
}

fn write_input_value_definitions_inline(
    w: &mut SourceWriter,
    defs: &[ast::InputValueDefinition],
) {
    if defs.is_empty() {
        return;
    }
    w.push("(");
    for (i, def) in defs.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        def.write_source(w);
    }
    w.push(")");
}

// =============================================================================
// Documents and executable definitions
// =============================================================================

#[inherent]
impl AstNode for ast::Document {
    pub fn write_source(&self, w: &mut SourceWriter) {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                w.push("\n\n");
            }
            definition.write_source(w);
        }
        w.push("\n");
    }
}

#[inherent]
impl AstNode for ast::Definition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        match self {
            ast::Definition::Operation(def) => def.write_source(w),
            ast::Definition::Fragment(def) => def.write_source(w),
            ast::Definition::Schema(def) => def.write_source(w),
            ast::Definition::SchemaExtension(def) => def.write_source(w),
            ast::Definition::Type(def) => def.write_source(w),
            ast::Definition::TypeExtension(def) => def.write_source(w),
            ast::Definition::Directive(def) => def.write_source(w),
        }
    }
}

#[inherent]
impl AstNode for ast::OperationDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        if self.shorthand {
            self.selection_set.write_source(w);
            return;
        }

        w.push(self.kind.as_str());
        if let Some(name) = &self.name {
            w.push(" ");
            w.push(name.as_str());
        }
        if !self.variable_definitions.is_empty() {
            w.push("(");
            for (i, def) in self.variable_definitions.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                def.write_source(w);
            }
            w.push(")");
        }
        write_directives(w, &self.directives);
        w.push(" ");
        self.selection_set.write_source(w);
    }
}

#[inherent]
impl AstNode for ast::VariableDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.push("$");
        w.push(self.name.as_str());
        w.push(": ");
        w.push(&self.var_type.to_string());
        if let Some(default) = &self.default_value {
            w.push(" = ");
            default.write_source(w);
        }
        write_directives(w, &self.directives);
    }
}

#[inherent]
impl AstNode for ast::SelectionSet {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.open_block();
        for selection in &self.selections {
            w.newline();
            selection.write_source(w);
        }
        w.close_block();
    }
}

#[inherent]
impl AstNode for ast::Selection {
    pub fn write_source(&self, w: &mut SourceWriter) {
        match self {
            ast::Selection::Field(field) => field.write_source(w),
            ast::Selection::FragmentSpread(spread) => spread.write_source(w),
            ast::Selection::InlineFragment(frag) => frag.write_source(w),
        }
    }
}

#[inherent]
impl AstNode for ast::Field {
    pub fn write_source(&self, w: &mut SourceWriter) {
        if let Some(alias) = &self.alias {
            w.push(alias.as_str());
            w.push(": ");
        }
        w.push(self.name.as_str());
        write_arguments(w, &self.arguments);
        write_directives(w, &self.directives);
        if let Some(selection_set) = &self.selection_set {
            w.push(" ");
            selection_set.write_source(w);
        }
    }
}

#[inherent]
impl AstNode for ast::FragmentSpread {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.push("...");
        w.push(self.name.as_str());
        write_directives(w, &self.directives);
    }
}

#[inherent]
impl AstNode for ast::InlineFragment {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.push("...");
        if let Some(type_condition) = &self.type_condition {
            w.push(" on ");
            w.push(type_condition.on_type.as_str());
        }
        write_directives(w, &self.directives);
        w.push(" ");
        self.selection_set.write_source(w);
    }
}

#[inherent]
impl AstNode for ast::FragmentDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.push("fragment ");
        w.push(self.name.as_str());
        w.push(" on ");
        w.push(self.type_condition.on_type.as_str());
        write_directives(w, &self.directives);
        w.push(" ");
        self.selection_set.write_source(w);
    }
}

#[inherent]
impl AstNode for ast::DirectiveAnnotation {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.push("@");
        w.push(self.name.as_str());
        write_arguments(w, &self.arguments);
    }
}

// =============================================================================
// Values
// =============================================================================

#[inherent]
impl AstNode for ast::Value {
    pub fn write_source(&self, w: &mut SourceWriter) {
        match self {
            ast::Value::Variable(v) => {
                w.push("$");
                w.push(&v.name);
            }
            ast::Value::Int(v) => w.push(&v.raw),
            ast::Value::Float(v) => w.push(&v.raw),
            ast::Value::String(v) => write_string_literal(w, &v.value, v.block),
            ast::Value::Boolean(v) => w.push(if v.value { "true" } else { "false" }),
            ast::Value::Null(_) => w.push("null"),
            ast::Value::Enum(v) => w.push(&v.value),
            ast::Value::List(v) => {
                w.push("[");
                for (i, value) in v.values.iter().enumerate() {
                    if i > 0 {
                        w.push(", ");
                    }
                    value.write_source(w);
                }
                w.push("]");
            }
            ast::Value::Object(v) => {
                w.push("{");
                for (i, field) in v.fields.iter().enumerate() {
                    if i > 0 {
                        w.push(", ");
                    }
                    w.push(field.name.as_str());
                    w.push(": ");
                    field.value.write_source(w);
                }
                w.push("}");
            }
        }
    }
}

// =============================================================================
// Type-system definitions
// =============================================================================

#[inherent]
impl AstNode for ast::SchemaDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("schema");
        write_directives(w, &self.directives);
        w.push(" ");
        w.open_block();
        for op_type in &self.operation_types {
            w.newline();
            w.push(op_type.operation.as_str());
            w.push(": ");
            w.push(op_type.named_type.as_str());
        }
        w.close_block();
    }
}

#[inherent]
impl AstNode for ast::SchemaExtension {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.push("extend schema");
        write_directives(w, &self.directives);
        if !self.operation_types.is_empty() {
            w.push(" ");
            w.open_block();
            for op_type in &self.operation_types {
                w.newline();
                w.push(op_type.operation.as_str());
                w.push(": ");
                w.push(op_type.named_type.as_str());
            }
            w.close_block();
        }
    }
}

#[inherent]
impl AstNode for ast::TypeDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        match self {
            ast::TypeDefinition::Scalar(def) => def.write_source(w),
            ast::TypeDefinition::Object(def) => def.write_source(w),
            ast::TypeDefinition::Interface(def) => def.write_source(w),
            ast::TypeDefinition::Union(def) => def.write_source(w),
            ast::TypeDefinition::Enum(def) => def.write_source(w),
            ast::TypeDefinition::InputObject(def) => def.write_source(w),
        }
    }
}

#[inherent]
impl AstNode for ast::TypeExtension {
    pub fn write_source(&self, w: &mut SourceWriter) {
        w.push("extend ");
        match self {
            ast::TypeExtension::Scalar(def) => def.write_source(w),
            ast::TypeExtension::Object(def) => def.write_source(w),
            ast::TypeExtension::Interface(def) => def.write_source(w),
            ast::TypeExtension::Union(def) => def.write_source(w),
            ast::TypeExtension::Enum(def) => def.write_source(w),
            ast::TypeExtension::InputObject(def) => def.write_source(w),
        }
    }
}

#[inherent]
impl AstNode for ast::ScalarTypeDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("scalar ");
        w.push(self.name.as_str());
        write_directives(w, &self.directives);
    }
}

#[inherent]
impl AstNode for ast::ObjectTypeDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("type ");
        w.push(self.name.as_str());
        write_implements(w, &self.interfaces);
        write_directives(w, &self.directives);
        write_field_definitions(w, &self.fields);
    }
}

#[inherent]
impl AstNode for ast::InterfaceTypeDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("interface ");
        w.push(self.name.as_str());
        write_implements(w, &self.interfaces);
        write_directives(w, &self.directives);
        write_field_definitions(w, &self.fields);
    }
}

#[inherent]
impl AstNode for ast::UnionTypeDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("union ");
        w.push(self.name.as_str());
        write_directives(w, &self.directives);
        if !self.members.is_empty() {
            w.push(" = ");
            for (i, member) in self.members.iter().enumerate() {
                if i > 0 {
                    w.push(" | ");
                }
                w.push(member.as_str());
            }
        }
    }
}

#[inherent]
impl AstNode for ast::EnumTypeDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("enum ");
        w.push(self.name.as_str());
        write_directives(w, &self.directives);
        if !self.values.is_empty() {
            w.push(" ");
            w.open_block();
            for value in &self.values {
                w.newline();
                write_description(w, &value.description);
                w.push(value.name.as_str());
                write_directives(w, &value.directives);
            }
            w.close_block();
        }
    }
}

#[inherent]
impl AstNode for ast::InputObjectTypeDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("input ");
        w.push(self.name.as_str());
        write_directives(w, &self.directives);
        if !self.fields.is_empty() {
            w.push(" ");
            w.open_block();
            for field in &self.fields {
                w.newline();
                field.write_source(w);
            }
            w.close_block();
        }
    }
}

#[inherent]
impl AstNode for ast::FieldDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push(self.name.as_str());
        write_input_value_definitions_inline(w, &self.arguments);
        w.push(": ");
        w.push(&self.field_type.to_string());
        write_directives(w, &self.directives);
    }
}

#[inherent]
impl AstNode for ast::InputValueDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        // Inline positions (argument lists) can't fit a block description;
        // re-parsers treat it as equivalent either way.
        if let Some(description) = &self.description {
            write_string_literal(w, &description.value, false);
            w.push(" ");
        }
        w.push(self.name.as_str());
        w.push(": ");
        w.push(&self.value_type.to_string());
        if let Some(default) = &self.default_value {
            w.push(" = ");
            default.write_source(w);
        }
        write_directives(w, &self.directives);
    }
}

#[inherent]
impl AstNode for ast::DirectiveDefinition {
    pub fn write_source(&self, w: &mut SourceWriter) {
        write_description(w, &self.description);
        w.push("directive @");
        w.push(self.name.as_str());
        write_input_value_definitions_inline(w, &self.arguments);
        if self.repeatable {
            w.push(" repeatable");
        }
        w.push(" on ");
        for (i, location) in self.locations.iter().enumerate() {
            if i > 0 {
                w.push(" | ");
            }
            w.push(location.as_str());
        }
    }
}
