//! Per-execution state shared across every field resolved during one
//! `execute`/`subscribe` call.
//!
//! Grounded on `juniper::executor::Executor`'s `fragments`/`variables`/
//! `errors` fields, collapsed from a borrowed-per-recursion-level struct
//! into one shared context plus an explicit [`crate::path::Path`] threaded
//! through `execute_field` calls — this crate's fields aren't generic over
//! a `TypeType` borrowed from a `Registry`, so there's no need to rebuild an
//! `Executor` at every nesting level the way `juniper` does.

use std::sync::Mutex;

use fnv::FnvHashMap;

use crate::{
    ast::{Document, FragmentDefinition},
    error::GraphQlError,
    schema::model::Schema,
    source::Source,
    value::Object,
};

/// Carries everything [`crate::executor`] needs besides the current
/// field's own arguments and parent value.
///
/// The error list is a [`Mutex`] rather than `juniper`'s `RwLock`: fields
/// only ever *append* to it (readers never need concurrent access mid
/// execution — errors are drained once, after execution completes), so a
/// plain mutex is simpler and the exclusive-lock cost is negligible next to
/// an async field resolution.
pub struct ExecutionContext<'a, CtxT> {
    pub schema: &'a Schema<CtxT>,
    pub fragments: FnvHashMap<&'a str, &'a FragmentDefinition>,
    pub variables: Object,
    pub context: &'a CtxT,
    /// The original query text, if the caller supplied one — absent when a
    /// document was built directly rather than parsed from source. Errors
    /// raised without it fall back to empty `locations`, exactly as
    /// `graphql-js`'s `GraphQLError` does when constructed without a source.
    pub source: Option<Source<'a>>,
    errors: Mutex<Vec<GraphQlError>>,
}

impl<'a, CtxT> ExecutionContext<'a, CtxT> {
    pub fn new(
        schema: &'a Schema<CtxT>,
        document: &'a Document,
        variables: Object,
        context: &'a CtxT,
        source: Option<Source<'a>>,
    ) -> Self {
        Self {
            schema,
            fragments: document.fragments_by_name(),
            variables,
            context,
            source,
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Appends a located error to the shared response error list.
    pub fn push_error(&self, error: GraphQlError) {
        let mut errors = self.errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        errors.push(error);
    }

    /// Drains the accumulated errors, consuming the context.
    pub fn into_errors(self) -> Vec<GraphQlError> {
        self.errors.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
