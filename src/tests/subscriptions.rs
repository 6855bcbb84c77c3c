//! The two-phase subscription pipeline: `subscribe` maps each source event
//! through its own independent query-shaped execution.

use futures::stream::{self, StreamExt};

use crate::{
    schema::meta::{FieldFuture, FieldMeta, NamedType, ObjectMeta, ResolveInfo, SourceStreamFuture},
    schema::model::Schema,
    subscribe, ExecutionInput, Object, Type, Value,
};

use super::support::{field, subscription_document};

struct Ctx;

fn resolve_passthrough<'a>(info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move { Ok(info.parent.clone()) })
}

fn subscribe_counted<'a>(_info: ResolveInfo<'a, Ctx>) -> SourceStreamFuture<'a> {
    Box::pin(async move {
        let events = stream::iter(vec![Value::Int(1), Value::Int(2), Value::Int(3)]).boxed();
        Ok(events)
    })
}

fn build_schema() -> Schema<Ctx> {
    let subscription = ObjectMeta::new(
        "Subscription",
        vec![FieldMeta::new("counted", Type::Named("Int".into()))
            .resolve(resolve_passthrough)
            .subscribe(subscribe_counted)],
    );
    let query = ObjectMeta::new("Query", Vec::new());
    Schema::new(
        "Query",
        None,
        Some("Subscription".to_owned()),
        vec![NamedType::Object(query), NamedType::Object(subscription), super::support::int_scalar()],
    )
}

#[tokio::test]
async fn each_source_event_becomes_its_own_response() {
    let schema = build_schema();
    let ctx = Ctx;
    let document = subscription_document(vec![field("counted")]);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let responses: Vec<_> = subscribe(&input).await.unwrap().collect().await;

    assert_eq!(responses.len(), 3);
    for (idx, response) in responses.iter().enumerate() {
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let mut expected = Object::with_capacity(1);
        expected.add_field("counted", Value::Int(idx as i32 + 1));
        assert_eq!(response.data, Some(Value::Object(expected)));
    }
}

fn resolve_rejecting_even<'a>(info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move {
        match info.parent {
            Value::Int(n) if n % 2 == 0 => Err(format!("{n} is even").into()),
            other => Ok(other.clone()),
        }
    })
}

fn build_schema_with_failing_event() -> Schema<Ctx> {
    let subscription = ObjectMeta::new(
        "Subscription",
        vec![FieldMeta::new("counted", Type::NonNull(Box::new(Type::Named("Int".into()))))
            .resolve(resolve_rejecting_even)
            .subscribe(subscribe_counted)],
    );
    let query = ObjectMeta::new("Query", Vec::new());
    Schema::new(
        "Query",
        None,
        Some("Subscription".to_owned()),
        vec![NamedType::Object(query), NamedType::Object(subscription), super::support::int_scalar()],
    )
}

#[tokio::test]
async fn a_failing_event_does_not_terminate_the_outer_stream() {
    let schema = build_schema_with_failing_event();
    let ctx = Ctx;
    let document = subscription_document(vec![field("counted")]);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let responses: Vec<_> = subscribe(&input).await.unwrap().collect().await;

    assert_eq!(responses.len(), 3, "one event erroring must not cut the stream short");

    assert!(responses[0].errors.is_empty(), "{:?}", responses[0].errors);
    let mut expected = Object::with_capacity(1);
    expected.add_field("counted", Value::Int(1));
    assert_eq!(responses[0].data, Some(Value::Object(expected)));

    assert_eq!(responses[1].errors.len(), 1);
    assert!(responses[1].errors[0].message().contains("2 is even"));
    assert_eq!(responses[1].data, Some(Value::Null));

    assert!(responses[2].errors.is_empty(), "{:?}", responses[2].errors);
    let mut expected = Object::with_capacity(1);
    expected.add_field("counted", Value::Int(3));
    assert_eq!(responses[2].data, Some(Value::Object(expected)));
}
