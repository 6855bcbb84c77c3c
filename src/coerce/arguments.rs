//! Coercion of one field's argument list — `CoerceArgumentValues` in the
//! spec — against the [`FieldMeta`] arguments declared for it.

use crate::{
    ast::InputValue as AstInputValue,
    coerce::{did_you_mean, input::coerce_ast_literal, suggestion_list},
    error::FieldError,
    schema::{meta::FieldMeta, model::Schema},
    source::Spanning,
    value::{Object, Value},
};

pub fn coerce_argument_values<CtxT>(
    schema: &Schema<CtxT>,
    field_meta: &FieldMeta<CtxT>,
    ast_arguments: &[(String, Spanning<AstInputValue>)],
    variables: &Object,
) -> Result<Object, FieldError> {
    for (name, _) in ast_arguments {
        if field_meta.argument_by_name(name).is_none() {
            let suggestions =
                suggestion_list(name.as_str(), field_meta.arguments.iter().map(|a| a.name.as_str()));
            return Err(FieldError::from(format!(
                "Unknown argument \"{name}\" on field \"{}\".{}",
                field_meta.name,
                did_you_mean(&suggestions)
            )));
        }
    }

    let mut out = Object::with_capacity(field_meta.arguments.len());
    for arg_def in &field_meta.arguments {
        let provided = ast_arguments
            .iter()
            .find(|(n, _)| n.as_str() == arg_def.name.as_str())
            .map(|(_, v)| v);
        match provided {
            Some(literal) => {
                if let AstInputValue::Variable(var_name) = &literal.item {
                    if !variables.contains_field(var_name) {
                        if let Some(default) = &arg_def.default_value {
                            let coerced = coerce_ast_literal(
                                schema,
                                &arg_def.type_ref,
                                &Spanning::unlocated(default.clone()),
                                &Object::default(),
                            )
                            .map_err(FieldError::from)?;
                            out.add_field(arg_def.name.to_string(), coerced);
                            continue;
                        }
                        if arg_def.type_ref.is_non_null() {
                            return Err(FieldError::from(format!(
                                "Argument \"{}\" of required type \"{}\" was provided the variable \"${var_name}\" which was not provided.",
                                arg_def.name, arg_def.type_ref
                            )));
                        }
                        continue;
                    }
                }

                let coerced = coerce_ast_literal(schema, &arg_def.type_ref, literal, variables)
                    .map_err(|e| FieldError::from(format!("Argument \"{}\": {e}", arg_def.name)))?;
                if arg_def.type_ref.is_non_null() && matches!(coerced, Value::Null) {
                    return Err(FieldError::from(format!(
                        "Argument \"{}\" of non-null type \"{}\" must not be null.",
                        arg_def.name, arg_def.type_ref
                    )));
                }
                out.add_field(arg_def.name.to_string(), coerced);
            }
            None => match &arg_def.default_value {
                Some(default) => {
                    let coerced = coerce_ast_literal(
                        schema,
                        &arg_def.type_ref,
                        &Spanning::unlocated(default.clone()),
                        &Object::default(),
                    )
                    .map_err(FieldError::from)?;
                    out.add_field(arg_def.name.to_string(), coerced);
                }
                None if arg_def.type_ref.is_non_null() => {
                    return Err(FieldError::from(format!(
                        "Argument \"{}\" of required type \"{}\" was not provided.",
                        arg_def.name, arg_def.type_ref
                    )));
                }
                None => {}
            },
        }
    }
    Ok(out)
}
