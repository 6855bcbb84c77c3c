//! Selection-set walking: turns a selection set plus a concrete runtime
//! type into the ordered, alias-deduplicated map of fields to actually
//! resolve — `CollectFields` in the spec.
//!
//! Grounded on the field-collection pass in
//! `async-graphql`'s `resolver.rs`/`validation/utils.rs` (directive
//! short-circuiting, fragment-spread cycle guard, type-condition check via
//! schema possible-types) adapted from that crate's static `Registry`
//! lookups to this crate's [`crate::schema::model::Schema`].

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    ast::{Directive, Field, InputValue, Selection},
    context::ExecutionContext,
    schema::NamedType,
    source::Spanning,
    value::{Object, Value},
};

/// Walks `selection_set`, resolving fragment spreads and inline fragments
/// against `runtime_type`, and groups the resulting fields by response key
/// in the order each key was first seen.
///
/// Each entry keeps the field's own [`Spanning`] wrapper, not just its
/// inner [`Field`], so an error raised against it later can still resolve
/// a source location.
pub fn collect_fields<'a, CtxT>(
    ctx: &ExecutionContext<'a, CtxT>,
    runtime_type: &NamedType<CtxT>,
    selection_set: &'a [Selection],
    visited_fragments: &mut HashSet<&'a str>,
    out: &mut IndexMap<String, Vec<&'a Spanning<Field>>>,
) {
    for selection in selection_set {
        match selection {
            Selection::Field(spanned) => {
                let field = &spanned.item;
                if !should_include(&field.directives, &ctx.variables) {
                    continue;
                }
                out.entry(field.response_key().to_owned()).or_default().push(spanned);
            }
            Selection::FragmentSpread(spanned) => {
                let spread = &spanned.item;
                if !should_include(&spread.directives, &ctx.variables) {
                    continue;
                }
                if !visited_fragments.insert(spread.name.as_str()) {
                    continue;
                }
                let Some(fragment) = ctx.fragments.get(spread.name.as_str()).copied() else {
                    continue;
                };
                if !fragment_type_applies(ctx, runtime_type, &fragment.type_condition) {
                    continue;
                }
                collect_fields(ctx, runtime_type, &fragment.selection_set, visited_fragments, out);
            }
            Selection::InlineFragment(spanned) => {
                let inline = &spanned.item;
                if !should_include(&inline.directives, &ctx.variables) {
                    continue;
                }
                if let Some(condition) = &inline.type_condition {
                    if !fragment_type_applies(ctx, runtime_type, condition) {
                        continue;
                    }
                }
                collect_fields(ctx, runtime_type, &inline.selection_set, visited_fragments, out);
            }
        }
    }
}

fn fragment_type_applies<CtxT>(
    ctx: &ExecutionContext<'_, CtxT>,
    runtime_type: &NamedType<CtxT>,
    type_condition: &str,
) -> bool {
    if runtime_type.name() == type_condition {
        return true;
    }
    match ctx.schema.type_by_name(type_condition) {
        Some(condition_type) if condition_type.is_abstract() => {
            ctx.schema.is_possible_type(condition_type, runtime_type)
        }
        _ => false,
    }
}

/// Evaluates `@skip`/`@include`. `@skip(if: true)` wins over `@include`, as
/// the GraphQL spec requires.
fn should_include(directives: &[Directive], variables: &Object) -> bool {
    if let Some(directive) = directives.iter().find(|d| d.name == "skip") {
        if directive_if(directive, variables).unwrap_or(false) {
            return false;
        }
    }
    if let Some(directive) = directives.iter().find(|d| d.name == "include") {
        if !directive_if(directive, variables).unwrap_or(true) {
            return false;
        }
    }
    true
}

fn directive_if(directive: &Directive, variables: &Object) -> Option<bool> {
    let spanning = directive.argument("if")?;
    match &spanning.item {
        InputValue::Boolean(b) => Some(*b),
        InputValue::Variable(name) => variables.get(name).and_then(Value::as_bool),
        _ => None,
    }
}
