//! Mutation root fields execute strictly in selection order, one at a time —
//! unlike query fields, which fan out concurrently.

use std::sync::Mutex;
use std::time::Duration;

use crate::{
    execute,
    schema::meta::{FieldFuture, FieldMeta, NamedType, ObjectMeta, ResolveInfo},
    schema::model::Schema,
    ExecutionInput, Type, Value,
};

use super::support::{field, mutation_document};

struct Ctx {
    log: Mutex<Vec<&'static str>>,
}

fn resolve_first<'a>(info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        info.context.log.lock().unwrap().push("first");
        Ok(Value::String("first".to_owned()))
    })
}

fn resolve_second<'a>(info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move {
        info.context.log.lock().unwrap().push("second");
        Ok(Value::String("second".to_owned()))
    })
}

fn resolve_third<'a>(info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move {
        info.context.log.lock().unwrap().push("third");
        Ok(Value::String("third".to_owned()))
    })
}

fn build_schema() -> Schema<Ctx> {
    let query = ObjectMeta::new("Query", Vec::new());
    let mutation = ObjectMeta::new(
        "Mutation",
        vec![
            FieldMeta::new("first", Type::Named("String".into())).resolve(resolve_first),
            FieldMeta::new("second", Type::Named("String".into())).resolve(resolve_second),
            FieldMeta::new("third", Type::Named("String".into())).resolve(resolve_third),
        ],
    );
    Schema::new(
        "Query",
        Some("Mutation".to_owned()),
        None,
        vec![NamedType::Object(query), NamedType::Object(mutation), super::support::string_scalar()],
    )
}

#[tokio::test]
async fn mutation_fields_resolve_serially_in_selection_order() {
    let schema = build_schema();
    let ctx = Ctx { log: Mutex::new(Vec::new()) };
    let document = mutation_document(vec![field("first"), field("second"), field("third")]);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let response = execute(&input).await.unwrap();

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    // "first" sleeps before logging; if mutation fields ran concurrently
    // "second"/"third" would log first. They don't.
    assert_eq!(*ctx.log.lock().unwrap(), vec!["first", "second", "third"]);
}
