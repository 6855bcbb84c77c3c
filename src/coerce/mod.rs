//! Coercion of variables, literal values, and field arguments against a
//! schema's declared input types.
//!
//! Split the way `graphql-js` splits it: [`input`] coerces a single value
//! (either a raw JSON-ish [`crate::value::Value`] or an AST literal) against
//! a [`crate::ast::Type`](crate::ast::Type) reference, [`variables`] drives
//! that over a whole `$variables` object, and [`arguments`] drives it over
//! one field's argument list.

pub mod arguments;
pub mod input;
pub mod variables;

pub use self::{
    arguments::coerce_argument_values,
    input::{coerce_ast_literal, coerce_json_value},
    variables::coerce_variable_values,
};

/// The `strsim`-ranked suggestion list `graphql-js`'s `suggestionList` builds
/// for an unrecognized name: every candidate within edit-distance of the
/// input, closest first, capped at five.
pub(crate) fn suggestion_list<'a>(
    input: &str,
    options: impl Iterator<Item = &'a str>,
) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = options
        .map(|o| (strsim::jaro_winkler(input, o), o))
        .filter(|(score, _)| *score > 0.5)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(5).map(|(_, o)| o.to_owned()).collect()
}

/// Renders a `did_you_mean`-style suffix for an error message, or an empty
/// string if there are no suggestions.
pub(crate) fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [one] => format!(" Did you mean \"{one}\"?"),
        many => format!(" Did you mean one of \"{}\"?", many.join("\", \"")),
    }
}
