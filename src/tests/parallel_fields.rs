//! Top-level query fields resolve concurrently, not one at a time.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use crate::{
    execute,
    schema::meta::{FieldFuture, FieldMeta, NamedType, ObjectMeta, ResolveInfo},
    schema::model::Schema,
    ExecutionInput, Value,
};

use super::support::{field, query_document};

struct Ctx {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

fn resolve_slow<'a>(info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move {
        let now = info.context.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        info.context.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        info.context.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Value::String(info.field_name.to_owned()))
    })
}

fn build_schema() -> Schema<Ctx> {
    let query = ObjectMeta::new(
        "Query",
        vec![
            FieldMeta::new("a", crate::Type::Named("String".into())).resolve(resolve_slow),
            FieldMeta::new("b", crate::Type::Named("String".into())).resolve(resolve_slow),
            FieldMeta::new("c", crate::Type::Named("String".into())).resolve(resolve_slow),
        ],
    );
    Schema::new("Query", None, None, vec![NamedType::Object(query), super::support::string_scalar()])
}

#[tokio::test]
async fn top_level_query_fields_run_concurrently() {
    let schema = build_schema();
    let ctx = Ctx { in_flight: AtomicUsize::new(0), peak: AtomicUsize::new(0) };
    let document = query_document(vec![field("a"), field("b"), field("c")]);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let response = execute(&input).await.unwrap();

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(ctx.peak.load(Ordering::SeqCst), 3);
}
