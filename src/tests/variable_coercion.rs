//! `$variables` coercion: a provided value flows through to the resolver,
//! a missing required variable fails before execution begins, and a
//! declared default is used when the variable is omitted.

use crate::{
    execute,
    schema::meta::{FieldFuture, FieldMeta, InputFieldMeta, NamedType, ObjectMeta, ResolveInfo},
    schema::model::Schema,
    Definition, Document, ExecutionInput, InputValue, Object, OperationDefinition, OperationType,
    Spanning, Type, Value, VariableDefinition,
};

use super::support::{field, FieldExt};

struct Ctx;

fn resolve_echo<'a>(info: ResolveInfo<'a, Ctx>) -> FieldFuture<'a> {
    Box::pin(async move { Ok(info.arguments.get("text").cloned().unwrap_or(Value::Null)) })
}

fn build_schema() -> Schema<Ctx> {
    let query = ObjectMeta::new(
        "Query",
        vec![FieldMeta::new("echo", Type::Named("String".into()))
            .argument(InputFieldMeta::new(
                "text",
                Type::NonNull(Box::new(Type::Named("String".into()))),
            ))
            .resolve(resolve_echo)],
    );
    Schema::new("Query", None, None, vec![NamedType::Object(query), super::support::string_scalar()])
}

fn echo_document(var_type: Type, default_value: Option<InputValue>) -> Document {
    let operation = OperationDefinition {
        name: None,
        operation_type: OperationType::Query,
        variable_definitions: vec![Spanning::unlocated(VariableDefinition {
            name: "text".to_owned(),
            var_type,
            default_value: default_value.map(Spanning::unlocated),
        })],
        directives: Vec::new(),
        selection_set: super::support::fields_to_selection_set(vec![
            field("echo").arg("text", InputValue::Variable("text".to_owned()))
        ]),
    };
    Document::new(vec![Definition::Operation(Spanning::unlocated(operation))])
}

fn required_string() -> Type {
    Type::NonNull(Box::new(Type::Named("String".into())))
}

#[tokio::test]
async fn provided_variable_flows_through_to_the_resolver() {
    let schema = build_schema();
    let ctx = Ctx;
    let document = echo_document(required_string(), None);
    let mut variables = Object::with_capacity(1);
    variables.add_field("text", Value::String("hi".to_owned()));
    let input = ExecutionInput::new(&document, &schema, &ctx).variable_values(Value::Object(variables));

    let response = execute(&input).await.unwrap();

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let mut expected = Object::with_capacity(1);
    expected.add_field("echo", Value::String("hi".to_owned()));
    assert_eq!(response.data, Some(Value::Object(expected)));
}

#[tokio::test]
async fn missing_required_variable_fails_before_execution() {
    let schema = build_schema();
    let ctx = Ctx;
    let document = echo_document(required_string(), None);
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let response = execute(&input).await.unwrap();

    assert!(response.data.is_none());
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message().contains("text"));
}

#[tokio::test]
async fn declared_default_is_used_when_variable_is_omitted() {
    let schema = build_schema();
    let ctx = Ctx;
    let document = echo_document(required_string(), Some(InputValue::String("fallback".to_owned())));
    let input = ExecutionInput::new(&document, &schema, &ctx);

    let response = execute(&input).await.unwrap();

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let mut expected = Object::with_capacity(1);
    expected.add_field("echo", Value::String("fallback".to_owned()));
    assert_eq!(response.data, Some(Value::Object(expected)));
}
