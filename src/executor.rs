//! The core execution algorithm: operation dispatch, field execution, and
//! value completion.
//!
//! Grounded on `juniper::executor::Executor` — the `'r`/`'a` lifetime split
//! (`'a` for everything borrowed from the schema/document for the whole
//! request, `'r` for the shorter-lived borrow of the shared
//! [`ExecutionContext`] threaded through one recursive call tree) is carried
//! over directly. What changes is dispatch: instead of calling back into a
//! `GraphQLValue::resolve_field` trait method, every step here looks up a
//! boxed resolver off a [`crate::schema::meta::FieldMeta`] and awaits it.

use std::{collections::HashSet, sync::Arc};

use futures::future::{join_all, BoxFuture};
use indexmap::IndexMap;

use crate::{
    ast::{Document, Field, OperationDefinition, OperationType, Selection, Type},
    coerce::{coerce_argument_values, coerce_variable_values},
    collect::collect_fields,
    context::ExecutionContext,
    error::{located_error, FieldError, GraphQLError, GraphQlError, SystemFault, Thrown},
    introspection,
    path::Path,
    schema::{
        meta::ResolveInfo,
        model::{RootOperation, Schema},
        NamedType,
    },
    source::{Source, Spanning},
    value::{Object, Value},
};

/// Marks that a value was nulled out by a non-null violation that has
/// already been recorded in [`ExecutionContext`]'s error list, and must
/// keep propagating upward until it reaches a nullable position.
pub(crate) struct PropagateNull;

pub(crate) type CompleteResult = Result<Value, PropagateNull>;

fn fail<CtxT>(
    ctx: &ExecutionContext<'_, CtxT>,
    field_type_is_non_null: bool,
    error: GraphQlError,
) -> CompleteResult {
    ctx.push_error(error);
    propagate(field_type_is_non_null)
}

fn propagate(field_type_is_non_null: bool) -> CompleteResult {
    if field_type_is_non_null { Err(PropagateNull) } else { Ok(Value::Null) }
}

/// An operation selected from a document, with its variables already
/// coerced against its own `VariableDefinition`s.
pub struct PreparedOperation<'a, CtxT> {
    pub context: ExecutionContext<'a, CtxT>,
    pub operation: &'a OperationDefinition,
    pub operation_kind: RootOperation,
}

/// Picks the operation to run (by name, or the document's sole operation),
/// and coerces its variables. Mirrors `graphql-js`'s `buildExecutionContext`.
pub fn prepare<'a, CtxT>(
    schema: &'a Schema<CtxT>,
    document: &'a Document,
    operation_name: Option<&str>,
    raw_variables: &Value,
    context_value: &'a CtxT,
    source: Option<Source<'a>>,
) -> Result<PreparedOperation<'a, CtxT>, GraphQLError> {
    let operation = match operation_name {
        Some(name) => document
            .operations()
            .find(|op| op.item.name.as_deref() == Some(name))
            .ok_or_else(|| GraphQLError::SystemFault(SystemFault::UnknownOperationName(name.to_owned())))?,
        None => {
            let mut operations = document.operations();
            let first = operations
                .next()
                .ok_or(GraphQLError::SystemFault(SystemFault::NoOperationProvided))?;
            if operations.next().is_some() {
                return Err(GraphQLError::SystemFault(SystemFault::MultipleOperationsProvided));
            }
            first
        }
    };

    let operation_kind = match operation.item.operation_type {
        OperationType::Query => RootOperation::Query,
        OperationType::Mutation => RootOperation::Mutation,
        OperationType::Subscription => RootOperation::Subscription,
    };

    let variables = coerce_variable_values(
        schema,
        &operation.item.variable_definitions,
        raw_variables,
        source.as_ref(),
    )
    .map_err(GraphQLError::Coercion)?;

    let context = ExecutionContext::new(schema, document, variables, context_value, source);

    Ok(PreparedOperation { context, operation: &operation.item, operation_kind })
}

/// The root type a prepared operation must execute against, or the
/// [`SystemFault`] raised when the schema doesn't support that operation
/// kind.
pub fn root_type_for<'a, CtxT>(
    schema: &'a Schema<CtxT>,
    operation_kind: RootOperation,
) -> Result<&'a NamedType<CtxT>, SystemFault> {
    schema.root_type_for(operation_kind).ok_or(SystemFault::NoRootType(match operation_kind {
        RootOperation::Query => "query",
        RootOperation::Mutation => "mutation",
        RootOperation::Subscription => "subscription",
    }))
}

/// Executes every top-level field of `selection_set` against `root_value`:
/// serially, in source order, for a mutation; concurrently for a query (or
/// for the one-shot query each subscription event is mapped through).
pub async fn execute_operation<'a, CtxT>(
    ctx: &ExecutionContext<'a, CtxT>,
    root_type: &'a NamedType<CtxT>,
    operation_kind: RootOperation,
    selection_set: &'a [Selection],
    root_value: Value,
) -> Value
where
    CtxT: Sync,
{
    let mut grouped: IndexMap<String, Vec<&'a Spanning<Field>>> = IndexMap::new();
    let mut visited = HashSet::new();
    collect_fields(ctx, root_type, selection_set, &mut visited, &mut grouped);

    let root_value = Arc::new(root_value);
    let mut out = Object::with_capacity(grouped.len());
    let mut failed = false;

    if operation_kind == RootOperation::Mutation {
        for (response_key, field_nodes) in grouped {
            if failed {
                break;
            }
            let path = Path::root().push_key(response_key.clone());
            match execute_field(ctx, root_type, &root_value, &field_nodes, path).await {
                Ok(v) => {
                    out.add_field(response_key, v);
                }
                Err(PropagateNull) => failed = true,
            }
        }
    } else {
        let futs = grouped.into_iter().map(|(response_key, field_nodes)| {
            let path = Path::root().push_key(response_key.clone());
            let root_value = Arc::clone(&root_value);
            async move {
                let result = execute_field(ctx, root_type, &root_value, &field_nodes, path).await;
                (response_key, result)
            }
        });
        for (key, result) in join_all(futs).await {
            match result {
                Ok(v) => {
                    out.add_field(key, v);
                }
                Err(PropagateNull) => failed = true,
            }
        }
    }

    if failed { Value::Null } else { Value::Object(out) }
}

/// Resolves one field: looks up its metadata, coerces its arguments, awaits
/// its resolver (or applies the default property-lookup resolver), and
/// completes the resulting value against the field's declared type.
///
/// `__schema`/`__type` are special-cased ahead of the ordinary `field_by_name`
/// lookup since neither names a `FieldMeta` the schema's own types carry —
/// they're routed to [`introspection`] and fed through the same
/// [`complete_value`] dispatch as any other field, so their own sub-selection
/// sets are honored like any other object-typed field. An unrecognized field
/// name is otherwise treated as already-validated-away: it completes to
/// `null` rather than raising an error, since a fully validated request can't
/// reach this branch in practice.
pub(crate) fn execute_field<'r, 'a, CtxT>(
    ctx: &'r ExecutionContext<'a, CtxT>,
    parent_type: &'a NamedType<CtxT>,
    parent_value: &'r Value,
    field_nodes: &'r [&'a Spanning<Field>],
    path: Arc<Path>,
) -> BoxFuture<'r, CompleteResult>
where
    CtxT: Sync,
    'a: 'r,
{
    Box::pin(async move {
        let field_node = field_nodes[0];
        let field_name = field_node.item.name.as_str();

        if field_name == "__typename" {
            return Ok(Value::String(parent_type.name().to_owned()));
        }

        if field_name == "__schema" {
            let raw = introspection::schema_value(ctx.schema);
            let type_ref = Type::NonNull(Box::new(Type::Named("__Schema".to_owned())));
            return complete_value(ctx, &type_ref, field_nodes, path, raw).await;
        }

        if field_name == "__type" {
            let Some(name) = introspection::type_name_argument(&field_node.item, &ctx.variables) else {
                let err = located_error(
                    Thrown::Field(FieldError::from(
                        "Field \"__type\" argument \"name\" of type \"String!\" is required.",
                    )),
                    &path,
                    field_node,
                    ctx.source.as_ref(),
                );
                return fail(ctx, false, err);
            };
            let raw = introspection::type_value(ctx.schema, &name);
            let type_ref = Type::Named("__Type".to_owned());
            return complete_value(ctx, &type_ref, field_nodes, path, raw).await;
        }

        let Some(field_def) = parent_type.field_by_name(field_name) else {
            return Ok(Value::Null);
        };

        let arguments = match coerce_argument_values(
            ctx.schema,
            field_def,
            &field_node.item.arguments,
            &ctx.variables,
        ) {
            Ok(args) => args,
            Err(field_err) => {
                let err = located_error(Thrown::Field(field_err), &path, field_node, ctx.source.as_ref());
                return fail(ctx, field_def.field_type.is_non_null(), err);
            }
        };

        let info = ResolveInfo {
            field_name,
            parent: parent_value,
            arguments: &arguments,
            context: ctx.context,
        };

        let resolved = match &field_def.resolve_fn {
            Some(resolve) => resolve(info).await,
            None => Ok(default_resolve(parent_value, field_name)),
        };

        let raw = match resolved {
            Ok(v) => v,
            Err(field_err) => {
                let err = located_error(Thrown::Field(field_err), &path, field_node, ctx.source.as_ref());
                return fail(ctx, field_def.field_type.is_non_null(), err);
            }
        };

        complete_value(ctx, &field_def.field_type, field_nodes, path, raw).await
    })
}

/// The default field resolver: looks `field_name` up as a property of
/// `parent`, the behavior `graphql-js` falls back to whenever a field has
/// no resolver of its own.
fn default_resolve(parent: &Value, field_name: &str) -> Value {
    parent.as_object().and_then(|o| o.get(field_name)).cloned().unwrap_or(Value::Null)
}

/// Completes a resolved value against its field's declared type: unwraps
/// non-null/list wrappers, serializes scalars, resolves abstract types, and
/// recurses into an object's own sub-selections.
pub(crate) fn complete_value<'r, 'a, CtxT>(
    ctx: &'r ExecutionContext<'a, CtxT>,
    type_ref: &'r Type,
    field_nodes: &'r [&'a Spanning<Field>],
    path: Arc<Path>,
    raw: Value,
) -> BoxFuture<'r, CompleteResult>
where
    CtxT: Sync,
    'a: 'r,
{
    Box::pin(async move {
        let (is_non_null, inner_type) = match type_ref {
            Type::NonNull(inner) => (true, inner.as_ref()),
            other => (false, other),
        };

        if raw.is_null() {
            if is_non_null {
                let err = located_error(
                    Thrown::Field(FieldError::from(format!(
                        "Cannot return null for non-nullable field \"{}\".",
                        field_nodes[0].item.response_key()
                    ))),
                    &path,
                    field_nodes[0],
                    ctx.source.as_ref(),
                );
                return fail(ctx, true, err);
            }
            return Ok(Value::Null);
        }

        match inner_type {
            Type::NonNull(_) => unreachable!("a type reference never nests NonNull directly inside NonNull"),
            Type::List(item_type) => {
                complete_list(ctx, item_type.as_ref(), is_non_null, field_nodes, path, raw).await
            }
            Type::Named(name) => complete_named(ctx, name, is_non_null, field_nodes, path, raw).await,
        }
    })
}

fn complete_list<'r, 'a, CtxT>(
    ctx: &'r ExecutionContext<'a, CtxT>,
    item_type: &'r Type,
    is_non_null: bool,
    field_nodes: &'r [&'a Spanning<Field>],
    path: Arc<Path>,
    raw: Value,
) -> BoxFuture<'r, CompleteResult>
where
    CtxT: Sync,
    'a: 'r,
{
    Box::pin(async move {
        let Value::List(items) = raw else {
            let err = located_error(
                Thrown::Field(FieldError::from(format!(
                    "Expected an iterable for field \"{}\", found a non-list value.",
                    field_nodes[0].item.response_key()
                ))),
                &path,
                field_nodes[0],
                ctx.source.as_ref(),
            );
            return fail(ctx, is_non_null, err);
        };

        let futs = items.into_iter().enumerate().map(|(idx, item_raw)| {
            let item_path = path.push_index(idx);
            complete_value(ctx, item_type, field_nodes, item_path, item_raw)
        });
        let completed = join_all(futs).await;

        let mut out = Vec::with_capacity(completed.len());
        for item in completed {
            match item {
                Ok(v) => out.push(v),
                Err(PropagateNull) => return propagate(is_non_null),
            }
        }
        Ok(Value::List(out))
    })
}

fn complete_named<'r, 'a, CtxT>(
    ctx: &'r ExecutionContext<'a, CtxT>,
    name: &'r str,
    is_non_null: bool,
    field_nodes: &'r [&'a Spanning<Field>],
    path: Arc<Path>,
    raw: Value,
) -> BoxFuture<'r, CompleteResult>
where
    CtxT: Sync,
    'a: 'r,
{
    Box::pin(async move {
        let Some(named_type) = ctx.schema.type_by_name(name) else {
            let err = located_error(
                Thrown::Field(FieldError::from(format!("Unknown type \"{name}\" in schema."))),
                &path,
                field_nodes[0],
                ctx.source.as_ref(),
            );
            return fail(ctx, is_non_null, err);
        };

        match named_type {
            NamedType::Scalar(s) => match s.serialize(&raw) {
                Ok(v) => Ok(v),
                Err(message) => fail(
                    ctx,
                    is_non_null,
                    located_error(Thrown::Field(FieldError::from(message)), &path, field_nodes[0], ctx.source.as_ref()),
                ),
            },
            NamedType::Enum(e) => match raw.as_str() {
                Some(v) if e.value_by_name(v).is_some() => Ok(Value::String(v.to_owned())),
                _ => fail(
                    ctx,
                    is_non_null,
                    located_error(
                        Thrown::Field(FieldError::from(format!(
                            "Expected a value of enum type \"{name}\"."
                        ))),
                        &path,
                        field_nodes[0],
                        ctx.source.as_ref(),
                    ),
                ),
            },
            NamedType::Object(obj) => {
                if let Some(is_type_of) = &obj.is_type_of {
                    if !is_type_of(&raw).await {
                        return fail(
                            ctx,
                            is_non_null,
                            located_error(
                                Thrown::Field(FieldError::from(format!(
                                    "Resolved value does not match expected type \"{name}\"."
                                ))),
                                &path,
                                field_nodes[0],
                                ctx.source.as_ref(),
                            ),
                        );
                    }
                }
                complete_object(ctx, named_type, is_non_null, field_nodes, path, raw).await
            }
            NamedType::Interface(_) | NamedType::Union(_) => {
                match resolve_abstract_type(ctx, named_type, &raw).await {
                    Ok(concrete) => complete_object(ctx, concrete, is_non_null, field_nodes, path, raw).await,
                    Err(message) => fail(
                        ctx,
                        is_non_null,
                        located_error(Thrown::Field(FieldError::from(message)), &path, field_nodes[0], ctx.source.as_ref()),
                    ),
                }
            }
            NamedType::InputObject(_) => fail(
                ctx,
                is_non_null,
                located_error(
                    Thrown::Field(FieldError::from(format!(
                        "\"{name}\" is an input type and cannot be used in an output position."
                    ))),
                    &path,
                    field_nodes[0],
                    ctx.source.as_ref(),
                ),
            ),
        }
    })
}

/// Collects and executes an object's own sub-selection set, merged across
/// every field node that produced this value (fields sharing a response
/// key have their selection sets combined, per the field-merging rule).
fn complete_object<'r, 'a, CtxT>(
    ctx: &'r ExecutionContext<'a, CtxT>,
    object_type: &'a NamedType<CtxT>,
    is_non_null: bool,
    field_nodes: &'r [&'a Spanning<Field>],
    path: Arc<Path>,
    parent_value: Value,
) -> BoxFuture<'r, CompleteResult>
where
    CtxT: Sync,
    'a: 'r,
{
    Box::pin(async move {
        let mut grouped: IndexMap<String, Vec<&'a Spanning<Field>>> = IndexMap::new();
        let mut visited = HashSet::new();
        for node in field_nodes {
            collect_fields(ctx, object_type, &node.item.selection_set, &mut visited, &mut grouped);
        }

        let parent_value = Arc::new(parent_value);
        let futs = grouped.into_iter().map(|(response_key, sub_nodes)| {
            let field_path = path.push_key(response_key.clone());
            let parent_value = Arc::clone(&parent_value);
            async move {
                let result = execute_field(ctx, object_type, &parent_value, &sub_nodes, field_path).await;
                (response_key, result)
            }
        });
        let results = join_all(futs).await;

        let mut out = Object::with_capacity(results.len());
        for (key, result) in results {
            match result {
                Ok(v) => {
                    out.add_field(key, v);
                }
                Err(PropagateNull) => return propagate(is_non_null),
            }
        }
        Ok(Value::Object(out))
    })
}

/// Picks the concrete object type a resolved value represents: first via
/// the abstract type's own `resolveType`, falling back to probing every
/// possible type's `isTypeOf` concurrently and taking the first match.
async fn resolve_abstract_type<'a, CtxT>(
    ctx: &ExecutionContext<'a, CtxT>,
    abstract_type: &'a NamedType<CtxT>,
    raw: &Value,
) -> Result<&'a NamedType<CtxT>, String>
where
    CtxT: Sync,
{
    let resolve_type_fn = match abstract_type {
        NamedType::Interface(i) => i.resolve_type_fn.as_ref(),
        NamedType::Union(u) => u.resolve_type_fn.as_ref(),
        _ => None,
    };

    if let Some(resolve) = resolve_type_fn {
        if let Some(type_name) = resolve(raw).await {
            return ctx.schema.type_by_name(&type_name).ok_or_else(|| {
                format!(
                    "resolveType returned unknown type \"{type_name}\" for abstract type \"{}\".",
                    abstract_type.name()
                )
            });
        }
    }

    let candidates = ctx.schema.possible_types(abstract_type);
    let checks = candidates.iter().map(|candidate| async move {
        match candidate {
            NamedType::Object(obj) => match &obj.is_type_of {
                Some(is_type_of) => is_type_of(raw).await,
                None => false,
            },
            _ => false,
        }
    });
    let results = join_all(checks).await;

    for (candidate, matched) in candidates.into_iter().zip(results) {
        if matched {
            return Ok(candidate);
        }
    }

    Err(format!("Could not resolve a concrete type for abstract type \"{}\".", abstract_type.name()))
}
