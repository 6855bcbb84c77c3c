//! Error model: response-level [`GraphQlError`], resolver-level
//! [`FieldError`], and the top-level [`GraphQLError`] a failed execution
//! *setup* (as opposed to a failed field) returns.
//!
//! Grounded on `juniper::executor::{FieldError, ExecutionError}` and
//! `juniper::GraphQLError`, folded into a single per-field error type since
//! this crate (unlike juniper) builds locations eagerly rather than
//! deferring to a `SourcePosition` resolved later against a `Source`.

use derive_more::{Display, Error as DeriveError, From};
use itertools::Itertools as _;
use serde::Serialize;

use crate::{
    path::{Path, PathSegment},
    source::{Source, Spanning},
    value::{Object, Value},
};

/// A `(line, column)` pair, one-based — the shape `errors[].locations[]`
/// is reported in over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// The error a resolver (or a scalar's `serialize`/`parseValue`, or variable
/// coercion) raises. Carries no location yet — that's attached once the
/// executor catches it, via [`located_error`].
#[derive(Debug, Clone, PartialEq, DeriveError, Display)]
#[display("{message}")]
pub struct FieldError {
    message: String,
    extensions: Value,
}

impl FieldError {
    pub fn new(message: impl Into<String>, extensions: Value) -> Self {
        Self { message: message.into(), extensions }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

impl From<&str> for FieldError {
    fn from(s: &str) -> Self {
        Self::new(s, Value::Null)
    }
}

impl From<String> for FieldError {
    fn from(s: String) -> Self {
        Self::new(s, Value::Null)
    }
}

/// A fully located, response-ready error: one element of the wire `errors`
/// array. Only `message`, `locations`, `path`, and non-empty `extensions`
/// are ever serialized — `nodes` aren't part of this type at all because by
/// the time one is constructed the node information has already been
/// resolved into `locations`.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlError {
    message: String,
    locations: Vec<Location>,
    path: Vec<PathSegment>,
    extensions: Object,
}

impl GraphQlError {
    /// Constructs an error rooted at `nodes`' first span, resolved against
    /// `source`. Mirrors graphql-js's `GraphQLError` constructor: when
    /// `nodes` is given and no explicit source/positions are, the source
    /// and every node's start offset are derived from the nodes themselves.
    pub fn new<T>(
        message: impl Into<String>,
        nodes: &[&Spanning<T>],
        source: Option<&Source<'_>>,
        path: &[PathSegment],
        extensions: Object,
    ) -> Self {
        let locations = match source {
            Some(src) => nodes
                .iter()
                .map(|n| {
                    let (line, column) = src.location_for(n.start().index());
                    Location { line, column }
                })
                .collect(),
            None => Vec::new(),
        };
        Self { message: message.into(), locations, path: path.to_vec(), extensions }
    }

    /// Constructs an error with already-resolved locations (used when a
    /// caller resolved `(line, column)` itself, e.g. from raw positions).
    pub fn with_locations(
        message: impl Into<String>,
        locations: Vec<Location>,
        path: Vec<PathSegment>,
        extensions: Object,
    ) -> Self {
        Self { message: message.into(), locations, path, extensions }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn extensions(&self) -> &Object {
        &self.extensions
    }

    /// Renders `message` followed by a blank line and a caret-annotated
    /// snippet for every node with a source span — the human-readable
    /// rendering `graphql-js`'s `printError` produces.
    pub fn print_with_source(&self, source: &Source<'_>) -> String {
        let mut out = self.message.clone();
        for loc in &self.locations {
            // `location_for` is one-based; `render_snippet` wants a byte offset,
            // so walk the source back to the matching line start.
            let offset = source
                .body()
                .lines()
                .take(loc.line - 1)
                .map(|l| l.len() + 1)
                .sum::<usize>();
            out.push_str("\n\n");
            out.push_str(&source.render_snippet(offset));
        }
        out
    }
}

/// Wraps a thrown value into a response-ready [`GraphQlError`].
///
/// Per spec §4.4: if the value already bubbled up from a nested child (it
/// already carries a path), it is returned unchanged; otherwise it is a
/// fresh [`FieldError`] from this field's own resolver/completion step, and
/// gets `path` attached here.
pub enum Thrown {
    /// A fresh error from this field's own resolution step.
    Field(FieldError),
    /// An error that already bubbled up from a child field's completion.
    Located(GraphQlError),
}

impl From<FieldError> for Thrown {
    fn from(e: FieldError) -> Self {
        Thrown::Field(e)
    }
}

impl From<GraphQlError> for Thrown {
    fn from(e: GraphQlError) -> Self {
        Thrown::Located(e)
    }
}

/// Wraps `thrown` into a response-ready [`GraphQlError`], deriving its
/// `locations` from `node`'s span against `source` — `None` when the node
/// is a fresh [`Thrown::Field`] and a [`Source`] was supplied, empty
/// otherwise, matching [`GraphQlError::new`].
pub fn located_error<T>(
    thrown: Thrown,
    path: &Path,
    node: &Spanning<T>,
    source: Option<&Source<'_>>,
) -> GraphQlError {
    match thrown {
        Thrown::Located(already) => already,
        Thrown::Field(field_err) => {
            let extensions = match field_err.extensions() {
                Value::Object(o) => o.clone(),
                Value::Null => Object::default(),
                other => {
                    let mut o = Object::with_capacity(1);
                    o.add_field("value", other.clone());
                    o
                }
            };
            GraphQlError::new(field_err.message().to_owned(), &[node], source, &path.to_vec(), extensions)
        }
    }
}

/// The serialized wire shape of a [`GraphQlError`]: `locations`/`path` are
/// omitted when empty, `extensions` when it has no fields.
impl Serialize for GraphQlError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut fields = 1;
        if !self.locations.is_empty() {
            fields += 1;
        }
        if !self.path.is_empty() {
            fields += 1;
        }
        if !self.extensions.is_empty() {
            fields += 1;
        }

        let mut map = serializer.serialize_map(Some(fields))?;
        map.serialize_entry("message", &self.message)?;
        if !self.locations.is_empty() {
            map.serialize_entry("locations", &self.locations)?;
        }
        if !self.path.is_empty() {
            let path: Vec<serde_json::Value> =
                self.path.iter().cloned().map(Into::into).collect();
            map.serialize_entry("path", &path)?;
        }
        if !self.extensions.is_empty() {
            map.serialize_entry("extensions", &self.extensions)?;
        }
        map.end()
    }
}

/// A fault in the request itself — wrong schema/document/variables shape —
/// raised before (or instead of) producing a per-field `errors` entry.
/// Category 4 in spec §7: re-thrown by the engine, never folded into
/// `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Display, DeriveError)]
pub enum SystemFault {
    #[display("Schema is not configured for {_0} operations")]
    NoRootType(#[error(ignore)] &'static str),
    #[display("Must provide an operation")]
    NoOperationProvided,
    #[display("Must provide operation name if query contains multiple operations")]
    MultipleOperationsProvided,
    #[display("Unknown operation named \"{_0}\"")]
    UnknownOperationName(#[error(ignore)] String),
    #[display("Cannot execute a subscription as a query or mutation")]
    IsSubscription,
    #[display("Cannot execute a query or mutation as a subscription")]
    NotSubscription,
    #[display("Must provide a document")]
    NoDocument,
    #[display("Variables must be provided as an object")]
    VariablesNotAnObject,
}

/// The top-level failure of `execute`/`subscribe`/`create_source_event_stream`
/// setup — distinct from a field-level [`GraphQlError`] recorded in a
/// successful response's `errors` array. Mirrors `juniper::GraphQLError`.
#[derive(Debug, Clone, PartialEq, Display, DeriveError, From)]
pub enum GraphQLError {
    /// Variable or argument coercion failed before execution began
    /// (spec §7 category 2): no `data` is produced, only `errors`.
    #[display("{}", _0.iter().map(GraphQlError::message).format("; "))]
    Coercion(Vec<GraphQlError>),
    /// `subscribe`'s field did not yield a usable source stream
    /// (spec §7 category 3).
    Subscription(GraphQlError),
    /// Category 4: a schema/document/request shape invariant was violated.
    SystemFault(SystemFault),
}
