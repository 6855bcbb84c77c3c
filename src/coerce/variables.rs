//! Coercion of a request's `$variables` object against a document's
//! `VariableDefinition`s — `CoerceVariableValues` in the spec.

use crate::{
    ast::VariableDefinition,
    coerce::input::{coerce_ast_literal, coerce_json_value},
    error::GraphQlError,
    schema::model::Schema,
    source::{Source, Spanning},
    value::{Object, Value},
};

/// Coerces `raw_variables` against `variable_definitions`, returning every
/// coercion failure rather than stopping at the first one — so a caller can
/// report them together as the request's `errors` array.
pub fn coerce_variable_values<CtxT>(
    schema: &Schema<CtxT>,
    variable_definitions: &[Spanning<VariableDefinition>],
    raw_variables: &Value,
    source: Option<&Source<'_>>,
) -> Result<Object, Vec<GraphQlError>> {
    let raw_object = match raw_variables {
        Value::Null => Object::default(),
        Value::Object(o) => o.clone(),
        _ => {
            return Err(vec![unlocated("variables must be provided as an object".to_owned())]);
        }
    };

    let mut coerced = Object::with_capacity(variable_definitions.len());
    let mut errors = Vec::new();

    for spanned_def in variable_definitions {
        let def = &spanned_def.item;
        let type_name = def.var_type.innermost_name();
        let Some(named) = schema.type_by_name(type_name) else {
            errors.push(located(
                spanned_def,
                source,
                format!(
                    "variable \"${}\" expects type \"{}\" which does not exist in the schema",
                    def.name, def.var_type
                ),
            ));
            continue;
        };
        if !named.is_input() {
            errors.push(located(
                spanned_def,
                source,
                format!(
                    "variable \"${}\" expects value of type \"{}\" which cannot be used as an input type",
                    def.name, def.var_type
                ),
            ));
            continue;
        }

        match raw_object.get(&def.name) {
            None => match &def.default_value {
                Some(default) => {
                    match coerce_ast_literal(schema, &def.var_type, default, &Object::default()) {
                        Ok(v) => {
                            coerced.add_field(def.name.clone(), v);
                        }
                        Err(e) => {
                            errors.push(located(spanned_def, source, format!("variable \"${}\": {e}", def.name)))
                        }
                    }
                }
                None if def.var_type.is_non_null() => errors.push(located(
                    spanned_def,
                    source,
                    format!(
                        "variable \"${}\" of required type \"{}\" was not provided",
                        def.name, def.var_type
                    ),
                )),
                None => {}
            },
            Some(raw) => match coerce_json_value(schema, &def.var_type, raw) {
                Ok(v) if def.var_type.is_non_null() && v.is_null() => {
                    errors.push(located(
                        spanned_def,
                        source,
                        format!(
                            "variable \"${}\" of non-null type \"{}\" must not be null",
                            def.name, def.var_type
                        ),
                    ));
                }
                Ok(v) => {
                    coerced.add_field(def.name.clone(), v);
                }
                Err(e) => errors.push(located(
                    spanned_def,
                    source,
                    format!("variable \"${}\" got invalid value: {e}", def.name),
                )),
            },
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        Err(errors)
    }
}

/// Builds a located error rooted at a variable definition's own span.
fn located(def: &Spanning<VariableDefinition>, source: Option<&Source<'_>>, message: String) -> GraphQlError {
    GraphQlError::new(message, &[def], source, &[], Object::default())
}

fn unlocated(message: String) -> GraphQlError {
    GraphQlError::new::<()>(message, &[], None, &[], Object::default())
}
