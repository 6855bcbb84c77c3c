//! Coercion of a single input position: either an AST literal (which may
//! reference a variable) or a raw [`Value`] such as one of `$variables`'
//! own entries. Mirrors `graphql-js`'s `valueFromAST.ts` /
//! `coerceInputValue.ts` pair — kept as two functions rather than one
//! generalized over a "literal or JSON" source, the same way the originals
//! are.

use crate::{
    ast::{InputValue as AstInputValue, Type},
    coerce::{did_you_mean, suggestion_list},
    schema::{model::Schema, NamedType},
    source::Spanning,
    value::{Object, Value},
};

/// Coerces an AST literal (from a query document, or a schema-declared
/// default value) against `type_ref`, resolving any `$variable` reference
/// against `variables`.
pub fn coerce_ast_literal<CtxT>(
    schema: &Schema<CtxT>,
    type_ref: &Type,
    literal: &Spanning<AstInputValue>,
    variables: &Object,
) -> Result<Value, String> {
    if let AstInputValue::Variable(name) = &literal.item {
        return variable_or_err(variables, name, type_ref);
    }

    match type_ref {
        Type::NonNull(inner) => {
            if matches!(literal.item, AstInputValue::Null) {
                return Err(format!("expected value of type \"{type_ref}\", found null"));
            }
            coerce_ast_literal(schema, inner, literal, variables)
        }
        Type::List(inner) => match &literal.item {
            AstInputValue::Null => Ok(Value::Null),
            AstInputValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(coerce_ast_literal(schema, inner, item, variables)?);
                }
                Ok(Value::List(out))
            }
            // a bare value in list position is coerced as a single-element list.
            _ => Ok(Value::List(vec![coerce_ast_literal(schema, inner, literal, variables)?])),
        },
        Type::Named(name) => {
            if matches!(literal.item, AstInputValue::Null) {
                return Ok(Value::Null);
            }
            let named = schema
                .type_by_name(name)
                .ok_or_else(|| format!("unknown type \"{name}\""))?;
            match named {
                NamedType::Scalar(s) => s.parse_literal(&literal.item),
                NamedType::Enum(e) => match &literal.item {
                    AstInputValue::Enum(v) if e.value_by_name(v).is_some() => {
                        Ok(Value::String(v.clone()))
                    }
                    AstInputValue::Enum(v) => {
                        Err(format!("value \"{v}\" is not a valid value for enum \"{name}\""))
                    }
                    _ => Err(format!("expected enum literal for type \"{name}\"")),
                },
                NamedType::InputObject(obj) => match &literal.item {
                    AstInputValue::Object(fields) => {
                        for field_name in fields.keys() {
                            if obj.field_by_name(field_name).is_none() {
                                let suggestions = suggestion_list(
                                    field_name,
                                    obj.input_fields.keys().map(|k| k.as_str()),
                                );
                                return Err(format!(
                                    "field \"{field_name}\" is not defined on input object \"{name}\".{}",
                                    did_you_mean(&suggestions)
                                ));
                            }
                        }
                        let mut out = Object::with_capacity(obj.input_fields.len());
                        for (field_name, field_meta) in &obj.input_fields {
                            match fields.get(field_name.as_str()) {
                                Some(v) => {
                                    out.add_field(
                                        field_name.to_string(),
                                        coerce_ast_literal(schema, &field_meta.type_ref, v, variables)?,
                                    );
                                }
                                None => match &field_meta.default_value {
                                    Some(default) => out.add_field(
                                        field_name.to_string(),
                                        coerce_ast_literal(
                                            schema,
                                            &field_meta.type_ref,
                                            &Spanning::unlocated(default.clone()),
                                            &Object::default(),
                                        )?,
                                    ),
                                    None if field_meta.type_ref.is_non_null() => {
                                        return Err(format!(
                                            "missing required field \"{field_name}\" of input object \"{name}\""
                                        ));
                                    }
                                    None => continue,
                                },
                            };
                        }
                        Ok(Value::Object(out))
                    }
                    _ => Err(format!("expected object literal for input object \"{name}\"")),
                },
                _ => Err(format!("\"{name}\" is not an input type")),
            }
        }
    }
}

/// Coerces a raw [`Value`] — a `$variables` entry — against `type_ref`.
pub fn coerce_json_value<CtxT>(
    schema: &Schema<CtxT>,
    type_ref: &Type,
    raw: &Value,
) -> Result<Value, String> {
    match type_ref {
        Type::NonNull(inner) => {
            if raw.is_null() {
                return Err(format!("expected value of type \"{type_ref}\", found null"));
            }
            coerce_json_value(schema, inner, raw)
        }
        Type::List(inner) => match raw {
            Value::Null => Ok(Value::Null),
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(coerce_json_value(schema, inner, item)?);
                }
                Ok(Value::List(out))
            }
            single => Ok(Value::List(vec![coerce_json_value(schema, inner, single)?])),
        },
        Type::Named(name) => {
            if raw.is_null() {
                return Ok(Value::Null);
            }
            let named = schema
                .type_by_name(name)
                .ok_or_else(|| format!("unknown type \"{name}\""))?;
            match named {
                NamedType::Scalar(s) => s.parse_value(raw),
                NamedType::Enum(e) => match raw.as_str() {
                    Some(v) if e.value_by_name(v).is_some() => Ok(Value::String(v.to_owned())),
                    Some(v) => Err(format!("value \"{v}\" is not a valid value for enum \"{name}\"")),
                    None => Err(format!("enum \"{name}\" must be a string")),
                },
                NamedType::InputObject(obj) => match raw.as_object() {
                    Some(fields) => {
                        for (field_name, _) in fields.iter() {
                            if obj.field_by_name(field_name).is_none() {
                                let suggestions = suggestion_list(
                                    field_name,
                                    obj.input_fields.keys().map(|k| k.as_str()),
                                );
                                return Err(format!(
                                    "field \"{field_name}\" is not defined on input object \"{name}\".{}",
                                    did_you_mean(&suggestions)
                                ));
                            }
                        }
                        let mut out = Object::with_capacity(obj.input_fields.len());
                        for (field_name, field_meta) in &obj.input_fields {
                            match fields.get(field_name.as_str()) {
                                Some(v) => out.add_field(
                                    field_name.to_string(),
                                    coerce_json_value(schema, &field_meta.type_ref, v)?,
                                ),
                                None => match &field_meta.default_value {
                                    Some(default) => out.add_field(
                                        field_name.to_string(),
                                        coerce_ast_literal(
                                            schema,
                                            &field_meta.type_ref,
                                            &Spanning::unlocated(default.clone()),
                                            &Object::default(),
                                        )?,
                                    ),
                                    None if field_meta.type_ref.is_non_null() => {
                                        return Err(format!(
                                            "missing required field \"{field_name}\" of input object \"{name}\""
                                        ));
                                    }
                                    None => continue,
                                },
                            };
                        }
                        Ok(Value::Object(out))
                    }
                    None => Err(format!("expected object value for input object \"{name}\"")),
                },
                _ => Err(format!("\"{name}\" is not an input type")),
            }
        }
    }
}

fn variable_or_err(variables: &Object, var_name: &str, type_ref: &Type) -> Result<Value, String> {
    match variables.get(var_name) {
        Some(v) => Ok(v.clone()),
        None if type_ref.is_non_null() => {
            Err(format!("variable \"${var_name}\" of required type \"{type_ref}\" was not provided"))
        }
        None => Ok(Value::Null),
    }
}
