//! End-to-end execution tests driven against hand-built schemas and
//! documents, exercising the engine the way an embedder would: through
//! [`crate::execute`]/[`crate::subscribe`] and [`crate::ExecutionInput`].

mod support;

mod list_index_paths;
mod mutation_ordering;
mod non_null_propagation;
mod parallel_fields;
mod subscriptions;
mod variable_coercion;
