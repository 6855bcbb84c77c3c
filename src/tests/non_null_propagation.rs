//! A non-null field that resolves to null (or errors) nulls out the nearest
//! nullable ancestor, not necessarily the whole response.

use crate::{
    execute,
    schema::meta::{FieldFuture, FieldMeta, NamedType, ObjectMeta, ResolveInfo},
    schema::model::Schema,
    ExecutionInput, Object, Type, Value,
};

use super::support::{field, query_document, FieldExt};

struct Ctx;

fn resolve_maybe<'a>(_info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move { Ok(Value::Object(Object::with_capacity(0))) })
}

fn resolve_widget_name<'a>(_info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move { Ok(Value::Null) })
}

fn resolve_required<'a>(_info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move { Err("boom".into()) })
}

fn build_schema() -> Schema<Ctx> {
    let widget = ObjectMeta::new(
        "Widget",
        vec![FieldMeta::new("name", Type::NonNull(Box::new(Type::Named("String".into()))))
            .resolve(resolve_widget_name)],
    );
    let query = ObjectMeta::new(
        "Query",
        vec![
            FieldMeta::new("maybe", Type::Named("Widget".into())).resolve(resolve_maybe),
            FieldMeta::new("required", Type::NonNull(Box::new(Type::Named("String".into()))))
                .resolve(resolve_required),
        ],
    );
    Schema::new(
        "Query",
        None,
        None,
        vec![NamedType::Object(query), NamedType::Object(widget), super::support::string_scalar()],
    )
}

#[tokio::test]
async fn non_null_field_failure_nulls_nearest_nullable_ancestor() {
    let schema = build_schema();
    let ctx = Ctx;
    let document = query_document(vec![field("maybe").select(vec![field("name")])]);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let response = execute(&input).await.unwrap();

    let mut expected = Object::with_capacity(1);
    expected.add_field("maybe", Value::Null);
    assert_eq!(response.data, Some(Value::Object(expected)));
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message().contains("non-nullable field"));
}

#[tokio::test]
async fn non_null_top_level_field_failure_nulls_entire_response() {
    let schema = build_schema();
    let ctx = Ctx;
    let document = query_document(vec![field("required")]);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let response = execute(&input).await.unwrap();

    assert_eq!(response.data, Some(Value::Null));
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message(), "boom");
}
