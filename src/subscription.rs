//! The two-phase subscription pipeline: `createSourceEventStream` picks the
//! single top-level subscription field and invokes its `subscribe` resolver
//! to obtain a raw event stream; `subscribe` then maps each event through
//! one ordinary query-shaped execution (`MapSourceToResponseEvent` in the
//! GraphQL spec), using that event as the operation's root value.
//!
//! Grounded on `juniper_subscriptions`'s `Coordinator`/`SubscriptionConnection`
//! split, collapsed from a stateful connection object into two plain
//! functions since this crate has no transport layer of its own to keep
//! state for.

use std::collections::HashSet;

use futures::stream::{self, BoxStream, StreamExt};
use indexmap::IndexMap;

use crate::{
    ast::{Document, Field, Selection},
    coerce::coerce_argument_values,
    collect::collect_fields,
    context::ExecutionContext,
    error::{located_error, FieldError, GraphQLError, GraphQlError, SystemFault, Thrown},
    executor::{self, execute_operation},
    path::Path,
    schema::{
        meta::{ResolveInfo, SourceStream},
        model::{RootOperation, Schema},
    },
    source::{Source, Spanning},
    value::{Object, Value},
    Response,
};

/// Resolves the subscription operation's single root field and invokes its
/// `subscribe` resolver, producing the raw stream of source events.
///
/// Per spec: a subscription operation must select exactly one top-level
/// field, and that field must carry a `subscribe` resolver — both are
/// checked here and surfaced as [`GraphQLError::Subscription`].
pub async fn create_source_event_stream<'a, CtxT>(
    schema: &'a Schema<CtxT>,
    document: &'a Document,
    operation_name: Option<&str>,
    raw_variables: &Value,
    context_value: &'a CtxT,
    source: Option<Source<'a>>,
) -> Result<SourceStream, GraphQLError>
where
    CtxT: Sync,
{
    let prepared = executor::prepare(schema, document, operation_name, raw_variables, context_value, source)?;
    if prepared.operation_kind != RootOperation::Subscription {
        return Err(GraphQLError::SystemFault(SystemFault::NotSubscription));
    }
    let root_type = executor::root_type_for(schema, prepared.operation_kind)?;

    let mut grouped: IndexMap<String, Vec<&'a Spanning<Field>>> = IndexMap::new();
    let mut visited = HashSet::new();
    collect_fields(&prepared.context, root_type, &prepared.operation.selection_set, &mut visited, &mut grouped);

    if grouped.len() != 1 {
        return Err(GraphQLError::Subscription(GraphQlError::with_locations(
            "Subscription operation must select exactly one top-level field.".to_owned(),
            Vec::new(),
            Vec::new(),
            Object::default(),
        )));
    }
    let (response_key, field_nodes) = grouped.into_iter().next().expect("checked len == 1 above");
    let field_node = field_nodes[0];
    let path = Path::root().push_key(response_key);

    let Some(field_def) = root_type.field_by_name(&field_node.item.name) else {
        return Err(GraphQLError::Subscription(located_error(
            Thrown::Field(FieldError::from(format!(
                "Cannot query field \"{}\" on type \"{}\".",
                field_node.item.name,
                root_type.name()
            ))),
            &path,
            field_node,
            prepared.context.source.as_ref(),
        )));
    };

    let Some(subscribe_fn) = &field_def.subscribe_fn else {
        return Err(GraphQLError::Subscription(located_error(
            Thrown::Field(FieldError::from(format!(
                "Field \"{}\" is not subscribable.",
                field_node.item.name
            ))),
            &path,
            field_node,
            prepared.context.source.as_ref(),
        )));
    };

    let arguments = coerce_argument_values(
        schema,
        field_def,
        &field_node.item.arguments,
        &prepared.context.variables,
    )
    .map_err(|e| {
        GraphQLError::Subscription(located_error(Thrown::Field(e), &path, field_node, prepared.context.source.as_ref()))
    })?;

    let root_value = Value::Null;
    let info = ResolveInfo {
        field_name: &field_node.item.name,
        parent: &root_value,
        arguments: &arguments,
        context: context_value,
    };

    subscribe_fn(info).await.map_err(|e| {
        GraphQLError::Subscription(located_error(Thrown::Field(e), &path, field_node, prepared.context.source.as_ref()))
    })
}

/// Runs `createSourceEventStream`, then maps every event it yields through
/// one full execution of the subscription's selection set, with that event
/// as the root value — each event becomes its own independent [`Response`],
/// with its own error list.
///
/// A setup failure that isn't a [`SystemFault`] (bad variables, an
/// unsubscribable field) can't be reported as a stream failure the way a
/// per-event resolver error is — there is no later `Response` to attach it
/// to — so it's surfaced as a one-element stream yielding a single error
/// response, mirroring how `execute` folds the same categories into
/// `Response::from_setup_error`. A genuine [`SystemFault`] still propagates
/// as `Err`, since category 4 is never converted into a response at all.
pub async fn subscribe<'a, CtxT>(
    schema: &'a Schema<CtxT>,
    document: &'a Document,
    operation_name: Option<&str>,
    raw_variables: &Value,
    context_value: &'a CtxT,
    source: Option<Source<'a>>,
) -> Result<BoxStream<'a, Response>, SystemFault>
where
    CtxT: Sync,
{
    let source_stream =
        match create_source_event_stream(schema, document, operation_name, raw_variables, context_value, source).await
        {
            Ok(s) => s,
            Err(GraphQLError::SystemFault(fault)) => return Err(fault),
            Err(setup_err) => {
                let response = Response::from_setup_error(setup_err);
                return Ok(Box::pin(stream::once(async move { response })));
            }
        };

    let prepared = match executor::prepare(schema, document, operation_name, raw_variables, context_value, source) {
        Ok(p) => p,
        Err(GraphQLError::SystemFault(fault)) => return Err(fault),
        Err(setup_err) => {
            let response = Response::from_setup_error(setup_err);
            return Ok(Box::pin(stream::once(async move { response })));
        }
    };
    let root_type = executor::root_type_for(schema, prepared.operation_kind)?;
    let selection_set: &'a [Selection] = &prepared.operation.selection_set;
    let variables = prepared.context.variables.clone();

    let mapped = source_stream.then(move |event| {
        let ctx = ExecutionContext::new(schema, document, variables.clone(), context_value, source);
        async move {
            let data = execute_operation(&ctx, root_type, RootOperation::Subscription, selection_set, event).await;
            Response { data: Some(data), errors: ctx.into_errors() }
        }
    });

    Ok(Box::pin(mapped))
}
