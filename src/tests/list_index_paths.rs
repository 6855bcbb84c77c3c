//! A non-null list item that resolves to null nulls the list itself, and
//! the recorded error's path names the exact index that failed.

use crate::{
    execute,
    schema::meta::{FieldFuture, FieldMeta, NamedType, ObjectMeta, ResolveInfo},
    schema::model::Schema,
    ExecutionInput, Object, PathSegment, Type, Value,
};

use super::support::{field, query_document};

struct Ctx;

fn resolve_items<'a>(_info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move {
        Ok(Value::List(vec![
            Value::String("a".to_owned()),
            Value::Null,
            Value::String("c".to_owned()),
        ]))
    })
}

fn build_schema() -> Schema<Ctx> {
    let item_type = Type::NonNull(Box::new(Type::Named("String".into())));
    let query = ObjectMeta::new(
        "Query",
        vec![FieldMeta::new("items", Type::List(Box::new(item_type))).resolve(resolve_items)],
    );
    Schema::new("Query", None, None, vec![NamedType::Object(query), super::support::string_scalar()])
}

#[tokio::test]
async fn null_list_item_nulls_the_list_and_reports_its_index() {
    let schema = build_schema();
    let ctx = Ctx;
    let document = query_document(vec![field("items")]);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let response = execute(&input).await.unwrap();

    let mut expected = Object::with_capacity(1);
    expected.add_field("items", Value::Null);
    assert_eq!(response.data, Some(Value::Object(expected)));

    assert_eq!(response.errors.len(), 1);
    assert_eq!(
        response.errors[0].path(),
        &[PathSegment::Key("items".to_owned()), PathSegment::Index(1)]
    );
}
