//! The document AST this crate executes.
//!
//! Producing this tree (lexing, parsing) is an external collaborator's job;
//! the executor only ever reads it. Every node that can be the subject of an
//! execution error carries a [`Spanning`] so [`crate::error::located_error`]
//! can resolve a `(line, column)` pair.

use fnv::FnvHashMap;
use indexmap::IndexMap;

use crate::source::Spanning;

/// A parsed, statically-valid GraphQL request: a list of operation and
/// fragment definitions in source order.
#[derive(Debug, Clone)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }

    pub fn operations(&self) -> impl Iterator<Item = &Spanning<OperationDefinition>> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
    }

    /// Collects every fragment definition in the document, by name — the
    /// map an [`crate::context::ExecutionContext`] carries for the lifetime
    /// of one execution.
    pub fn fragments_by_name(&self) -> FnvHashMap<&str, &FragmentDefinition> {
        self.definitions
            .iter()
            .filter_map(|d| match d {
                Definition::Fragment(f) => Some((f.item.name.as_str(), &f.item)),
                Definition::Operation(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum Definition {
    Operation(Spanning<OperationDefinition>),
    Fragment(Spanning<FragmentDefinition>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Debug, Clone)]
pub struct OperationDefinition {
    pub name: Option<String>,
    pub operation_type: OperationType,
    pub variable_definitions: Vec<Spanning<VariableDefinition>>,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

#[derive(Debug, Clone)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

#[derive(Debug, Clone)]
pub struct VariableDefinition {
    pub name: String,
    pub var_type: Type,
    pub default_value: Option<Spanning<InputValue>>,
}

#[derive(Debug, Clone)]
pub enum Selection {
    Field(Spanning<Field>),
    FragmentSpread(Spanning<FragmentSpread>),
    InlineFragment(Spanning<InlineFragment>),
}

#[derive(Debug, Clone)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<(String, Spanning<InputValue>)>,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

impl Field {
    /// The key this field occupies in the response object: its alias if it
    /// has one, else its name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

#[derive(Debug, Clone)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, Spanning<InputValue>)>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Spanning<InputValue>> {
        self.arguments.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// A type reference as written in the document (`Int`, `[Int!]`, `Foo!`),
/// carrying no semantic information — it may name a type the schema doesn't
/// have, which is precisely why [`crate::coerce::variables`] has to look it
/// up and fail if it's missing or not an input type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// The innermost named type, stripping every `List`/`NonNull` wrapper.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(n) => n,
            Self::List(t) | Self::NonNull(t) => t.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNull(t) => write!(f, "{t}!"),
        }
    }
}

/// A literal value as written in the document. Unlike [`crate::value::Value`]
/// this can reference a variable or name an enum by its external name, and
/// carries no serialized scalar representation yet — that only happens once
/// it is coerced against a concrete input type (see [`crate::coerce`]).
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    Variable(String),
    List(Vec<Spanning<InputValue>>),
    Object(IndexMap<String, Spanning<InputValue>>),
}

impl InputValue {
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            _ => None,
        }
    }
}
