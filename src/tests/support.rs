//! Small hand-written AST builders for these tests.
//!
//! This crate has no parser of its own — constructing the document tree
//! directly is the documented way an embedder (and these tests) drive
//! execution, so these helpers exist purely to keep test bodies readable.

#![allow(dead_code)]

use crate::{
    schema::meta::{NamedType, ScalarMeta},
    Definition, Document, Field, InputValue, OperationDefinition, OperationType, Selection,
    Spanning,
};

/// A field under construction: `name`, with an optional alias, arguments,
/// and sub-selections added via the builder methods below.
pub fn field(name: &str) -> Field {
    Field {
        alias: None,
        name: name.to_owned(),
        arguments: Vec::new(),
        directives: Vec::new(),
        selection_set: Vec::new(),
    }
}

pub trait FieldExt {
    fn alias(self, alias: &str) -> Self;
    fn arg(self, name: &str, value: InputValue) -> Self;
    fn select(self, sub_fields: Vec<Field>) -> Self;
}

impl FieldExt for Field {
    fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_owned());
        self
    }

    fn arg(mut self, name: &str, value: InputValue) -> Self {
        self.arguments.push((name.to_owned(), Spanning::unlocated(value)));
        self
    }

    fn select(mut self, sub_fields: Vec<Field>) -> Self {
        self.selection_set = fields_to_selection_set(sub_fields);
        self
    }
}

pub fn fields_to_selection_set(fields: Vec<Field>) -> Vec<Selection> {
    fields.into_iter().map(|f| Selection::Field(Spanning::unlocated(f))).collect()
}

fn operation_document(operation_type: OperationType, top_level: Vec<Field>) -> Document {
    let operation = OperationDefinition {
        name: None,
        operation_type,
        variable_definitions: Vec::new(),
        directives: Vec::new(),
        selection_set: fields_to_selection_set(top_level),
    };
    Document::new(vec![Definition::Operation(Spanning::unlocated(operation))])
}

pub fn query_document(top_level: Vec<Field>) -> Document {
    operation_document(OperationType::Query, top_level)
}

pub fn mutation_document(top_level: Vec<Field>) -> Document {
    operation_document(OperationType::Mutation, top_level)
}

pub fn subscription_document(top_level: Vec<Field>) -> Document {
    operation_document(OperationType::Subscription, top_level)
}

/// A `String` scalar with the obvious identity serialize/parse_value and a
/// string-literal parse_literal — every test schema needs one of these to
/// give leaf fields somewhere to complete to.
pub fn string_scalar<CtxT>() -> NamedType<CtxT> {
    NamedType::Scalar(ScalarMeta::new(
        "String",
        |v: &crate::Value| match v {
            crate::Value::String(_) => Ok(v.clone()),
            _ => Err("String cannot represent a non-string value".to_owned()),
        },
        |v: &crate::Value| match v {
            crate::Value::String(_) => Ok(v.clone()),
            _ => Err("String cannot represent a non-string value".to_owned()),
        },
        |v: &InputValue| match v {
            InputValue::String(s) => Ok(crate::Value::String(s.clone())),
            _ => Err("String cannot represent a non-string literal".to_owned()),
        },
    ))
}

pub fn int_scalar<CtxT>() -> NamedType<CtxT> {
    NamedType::Scalar(ScalarMeta::new(
        "Int",
        |v: &crate::Value| match v {
            crate::Value::Int(_) => Ok(v.clone()),
            _ => Err("Int cannot represent a non-integer value".to_owned()),
        },
        |v: &crate::Value| match v {
            crate::Value::Int(_) => Ok(v.clone()),
            _ => Err("Int cannot represent a non-integer value".to_owned()),
        },
        |v: &InputValue| match v {
            InputValue::Int(i) => i32::try_from(*i)
                .map(crate::Value::Int)
                .map_err(|_| "Int cannot represent a value outside i32 range".to_owned()),
            _ => Err("Int cannot represent a non-integer literal".to_owned()),
        },
    ))
}

pub fn boolean_scalar<CtxT>() -> NamedType<CtxT> {
    NamedType::Scalar(ScalarMeta::new(
        "Boolean",
        |v: &crate::Value| match v {
            crate::Value::Boolean(_) => Ok(v.clone()),
            _ => Err("Boolean cannot represent a non-boolean value".to_owned()),
        },
        |v: &crate::Value| match v {
            crate::Value::Boolean(_) => Ok(v.clone()),
            _ => Err("Boolean cannot represent a non-boolean value".to_owned()),
        },
        |v: &InputValue| match v {
            InputValue::Boolean(b) => Ok(crate::Value::Boolean(*b)),
            _ => Err("Boolean cannot represent a non-boolean literal".to_owned()),
        },
    ))
}
