#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(any(doc, test), doc = include_str!("../README.md"))]
#![cfg_attr(not(any(doc, test)), doc = env!("CARGO_PKG_NAME"))]

//! A GraphQL execution engine: selection-set walking, field resolution with
//! parallel-query/serial-mutation semantics, non-null propagation,
//! abstract-type resolution, variable/argument coercion, and a two-phase
//! subscription pipeline.
//!
//! This crate does not parse or validate GraphQL source text — it executes
//! an already-parsed, already-validated [`ast::Document`] against a
//! [`schema::model::Schema`] built directly by the embedder. See
//! [`ExecutionInput`] for the entry point.

mod ast;
mod coerce;
mod collect;
mod context;
mod error;
pub mod executor;
mod introspection;
mod path;
pub mod schema;
mod source;
pub mod subscription;
#[cfg(test)]
mod tests;
mod value;

pub use crate::{
    ast::{
        Definition, Document, Field, FragmentDefinition, InputValue, OperationDefinition,
        OperationType, Selection, Type, VariableDefinition,
    },
    error::{FieldError, GraphQLError, GraphQlError, Location, SystemFault},
    path::{Path, PathSegment},
    source::{Source, SourcePosition, Span, Spanning},
    value::{Object, Value},
};

use serde::{Serialize, Serializer};

use crate::{
    executor::{execute_operation, prepare, root_type_for},
    schema::model::{RootOperation, Schema},
};

/// Everything one execution needs: the document and schema to run against,
/// the root value resolvers see as their parent, the context value threaded
/// through every resolver call, which operation to run if the document
/// defines more than one, and the raw (not yet coerced) variable values.
///
/// Deliberately omits a `field_resolver`/`subscribe_field_resolver`
/// override: unlike `juniper`, every field's resolver already lives on its
/// own [`schema::meta::FieldMeta`] (via `.resolve()`/`.subscribe()`), so a
/// second, schema-wide override would just be a second place the same
/// behavior could be configured.
pub struct ExecutionInput<'a, CtxT> {
    pub document: &'a Document,
    pub schema: &'a Schema<CtxT>,
    pub context_value: &'a CtxT,
    pub root_value: Value,
    pub operation_name: Option<String>,
    pub variable_values: Value,
    /// The document's original query text, if the caller has it — used only
    /// to render `locations` on any error this execution raises. Absent when
    /// a document was built directly rather than parsed from source text.
    pub source: Option<Source<'a>>,
}

impl<'a, CtxT> ExecutionInput<'a, CtxT> {
    pub fn new(document: &'a Document, schema: &'a Schema<CtxT>, context_value: &'a CtxT) -> Self {
        Self {
            document,
            schema,
            context_value,
            root_value: Value::Null,
            operation_name: None,
            variable_values: Value::Object(Object::default()),
            source: None,
        }
    }

    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn variable_values(mut self, variables: Value) -> Self {
        self.variable_values = variables;
        self
    }

    #[must_use]
    pub fn root_value(mut self, root_value: Value) -> Self {
        self.root_value = root_value;
        self
    }

    #[must_use]
    pub fn source(mut self, source: Source<'a>) -> Self {
        self.source = Some(source);
        self
    }
}

/// The wire-ready result of one execution: `data` is omitted when the
/// request failed before execution began (a [`GraphQLError`]); `errors` is
/// omitted when empty. Mirrors `juniper::http::GraphQLResponse`'s
/// hand-rolled `Serialize` impl.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub data: Option<Value>,
    pub errors: Vec<GraphQlError>,
}

impl Response {
    fn from_setup_error(err: GraphQLError) -> Self {
        let errors = match err {
            GraphQLError::Coercion(errs) => errs,
            GraphQLError::Subscription(e) => vec![e],
            GraphQLError::SystemFault(fault) => {
                vec![GraphQlError::with_locations(fault.to_string(), Vec::new(), Vec::new(), Object::default())]
            }
        };
        Self { data: None, errors }
    }
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut fields = 0;
        if self.data.is_some() {
            fields += 1;
        }
        if !self.errors.is_empty() {
            fields += 1;
        }

        let mut map = serializer.serialize_map(Some(fields))?;
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        map.end()
    }
}

/// Executes a query or mutation, returning the response whenever the
/// request itself was well-formed. A [`SystemFault`] — a subscription
/// operation given here, an unknown operation name, a schema with no root
/// type for the requested operation kind — is never folded into a
/// [`Response`]'s `errors`, unlike coercion or subscription-setup failures;
/// it is re-thrown instead, since none of those describe a problem a client
/// can see reflected in a GraphQL response shape.
pub async fn execute<'a, CtxT>(input: &ExecutionInput<'a, CtxT>) -> Result<Response, SystemFault>
where
    CtxT: Sync,
{
    let prepared = match prepare(
        input.schema,
        input.document,
        input.operation_name.as_deref(),
        &input.variable_values,
        input.context_value,
        input.source,
    ) {
        Ok(p) => p,
        Err(GraphQLError::SystemFault(fault)) => return Err(fault),
        Err(setup_err) => return Ok(Response::from_setup_error(setup_err)),
    };

    if prepared.operation_kind == RootOperation::Subscription {
        return Err(SystemFault::IsSubscription);
    }

    let root_type = root_type_for(input.schema, prepared.operation_kind)?;

    let data = execute_operation(
        &prepared.context,
        root_type,
        prepared.operation_kind,
        &prepared.operation.selection_set,
        input.root_value.clone(),
    )
    .await;

    Ok(Response { data: Some(data), errors: prepared.context.into_errors() })
}

/// Runs the subscription operation's source stream through one execution
/// per event. See [`subscription::subscribe`].
pub async fn subscribe<'a, CtxT>(
    input: &'a ExecutionInput<'a, CtxT>,
) -> Result<futures::stream::BoxStream<'a, Response>, SystemFault>
where
    CtxT: Sync,
{
    subscription::subscribe(
        input.schema,
        input.document,
        input.operation_name.as_deref(),
        &input.variable_values,
        input.context_value,
        input.source,
    )
    .await
}

/// Obtains the subscription operation's raw source event stream without
/// mapping it through execution. See [`subscription::create_source_event_stream`].
pub async fn create_source_event_stream<'a, CtxT>(
    input: &'a ExecutionInput<'a, CtxT>,
) -> Result<schema::meta::SourceStream, GraphQLError>
where
    CtxT: Sync,
{
    subscription::create_source_event_stream(
        input.schema,
        input.document,
        input.operation_name.as_deref(),
        &input.variable_values,
        input.context_value,
        input.source,
    )
    .await
}
