//! The schema itself: the set of named types plus the three root
//! operation types, and the relationships (subtyping, possible types of an
//! abstract type) the executor needs to resolve abstract types and check
//! fragment applicability.
//!
//! Grounded on `juniper::schema::model::SchemaType` — `possible_types`,
//! `is_possible_type`, `is_subtype`, and `type_overlap` are carried over
//! near-verbatim, adapted from macro-populated `MetaType`s to the
//! directly-constructed [`NamedType`]s this crate builds schemas from.

use fnv::FnvHashMap;

use crate::{
    ast::Type,
    schema::meta::{InputFieldMeta, NamedType},
};

/// Where a directive is permitted to appear. Only the built-in `@skip`
/// and `@include` are interpreted by this crate (spec'd as argument-only,
/// execution-time directives); custom directive *definitions* are schema
/// metadata the executor never consults, so this exists purely so a
/// schema can describe what it allows, consistent with the rest of the
/// surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
}

impl std::fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
            Self::Field => "field",
            Self::FragmentDefinition => "fragment definition",
            Self::FragmentSpread => "fragment spread",
            Self::InlineFragment => "inline fragment",
        })
    }
}

pub struct DirectiveType {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: Vec<InputFieldMeta>,
}

impl DirectiveType {
    pub fn new(name: &str, locations: &[DirectiveLocation], arguments: Vec<InputFieldMeta>) -> Self {
        Self { name: name.to_owned(), description: None, locations: locations.to_vec(), arguments }
    }

    fn skip() -> Self {
        Self::new(
            "skip",
            &[DirectiveLocation::Field, DirectiveLocation::FragmentSpread, DirectiveLocation::InlineFragment],
            vec![InputFieldMeta::new("if", Type::NonNull(Box::new(Type::Named("Boolean".into()))))],
        )
    }

    fn include() -> Self {
        Self::new(
            "include",
            &[DirectiveLocation::Field, DirectiveLocation::FragmentSpread, DirectiveLocation::InlineFragment],
            vec![InputFieldMeta::new("if", Type::NonNull(Box::new(Type::Named("Boolean".into()))))],
        )
    }
}

/// The three root operation kinds a schema may expose resolvers for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RootOperation {
    Query,
    Mutation,
    Subscription,
}

impl std::fmt::Display for RootOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        })
    }
}

/// A complete, already-resolved schema: every named type plus which ones
/// serve as root operation types.
pub struct Schema<CtxT> {
    types: FnvHashMap<String, NamedType<CtxT>>,
    query_type_name: String,
    mutation_type_name: Option<String>,
    subscription_type_name: Option<String>,
    directives: FnvHashMap<String, DirectiveType>,
}

impl<CtxT> Schema<CtxT> {
    pub fn new(
        query_type_name: impl Into<String>,
        mutation_type_name: Option<String>,
        subscription_type_name: Option<String>,
        types: Vec<NamedType<CtxT>>,
    ) -> Self {
        let mut directives = FnvHashMap::default();
        directives.insert("skip".to_owned(), DirectiveType::skip());
        directives.insert("include".to_owned(), DirectiveType::include());

        let mut types: FnvHashMap<String, NamedType<CtxT>> =
            types.into_iter().map(|t| (t.name().to_owned(), t)).collect();
        for builtin in crate::introspection::builtin_types::<CtxT>() {
            types.insert(builtin.name().to_owned(), builtin);
        }

        Self {
            types,
            query_type_name: query_type_name.into(),
            mutation_type_name,
            subscription_type_name,
            directives,
        }
    }

    pub fn type_by_name(&self, name: &str) -> Option<&NamedType<CtxT>> {
        self.types.get(name)
    }

    pub fn type_list(&self) -> impl Iterator<Item = &NamedType<CtxT>> {
        self.types.values()
    }

    pub fn query_type(&self) -> &NamedType<CtxT> {
        self.types.get(&self.query_type_name).expect("query type does not exist in schema")
    }

    pub fn mutation_type(&self) -> Option<&NamedType<CtxT>> {
        self.mutation_type_name.as_ref().map(|n| {
            self.types.get(n).expect("mutation type does not exist in schema")
        })
    }

    pub fn subscription_type(&self) -> Option<&NamedType<CtxT>> {
        self.subscription_type_name.as_ref().map(|n| {
            self.types.get(n).expect("subscription type does not exist in schema")
        })
    }

    /// The root type serving `operation`, or `None` if the schema doesn't
    /// support it — `crate::executor::build_context` turns a missing
    /// mutation/subscription root into `SystemFault::NoRootType`.
    pub fn root_type_for(&self, operation: RootOperation) -> Option<&NamedType<CtxT>> {
        match operation {
            RootOperation::Query => Some(self.query_type()),
            RootOperation::Mutation => self.mutation_type(),
            RootOperation::Subscription => self.subscription_type(),
        }
    }

    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    /// All concrete object types an abstract (interface/union) type could
    /// resolve to at runtime.
    pub fn possible_types(&self, t: &NamedType<CtxT>) -> Vec<&NamedType<CtxT>> {
        match t {
            NamedType::Union(u) => {
                u.of_type_names.iter().filter_map(|n| self.type_by_name(n)).collect()
            }
            NamedType::Interface(i) => self
                .types
                .values()
                .filter(|candidate| match candidate {
                    NamedType::Object(o) => o.interface_names.iter().any(|n| **n == *i.name),
                    _ => false,
                })
                .collect(),
            _ => panic!("cannot retrieve possible types of a non-abstract type"),
        }
    }

    pub fn is_possible_type(&self, abstract_type: &NamedType<CtxT>, possible_type: &NamedType<CtxT>) -> bool {
        self.possible_types(abstract_type).iter().any(|t| t.name() == possible_type.name())
    }

    /// Whether `t1` and `t2` could ever both match the same concrete
    /// value — used to decide whether two fragments on unrelated types
    /// can be merged.
    pub fn type_overlap(&self, t1: &NamedType<CtxT>, t2: &NamedType<CtxT>) -> bool {
        if t1.name() == t2.name() {
            return true;
        }
        match (t1.is_abstract(), t2.is_abstract()) {
            (true, true) => self.possible_types(t1).iter().any(|t| self.is_possible_type(t2, t)),
            (true, false) => self.is_possible_type(t1, t2),
            (false, true) => self.is_possible_type(t2, t1),
            (false, false) => false,
        }
    }

    /// Whether `sub_type` could be used anywhere `super_type` is expected —
    /// non-null wrappers only narrow, list wrappers must match depth for
    /// depth, and named types fall back to abstract-type membership.
    pub fn is_subtype(&self, sub_type: &Type, super_type: &Type) -> bool {
        if super_type == sub_type {
            return true;
        }
        if let Type::NonNull(super_inner) = super_type {
            return match sub_type {
                Type::NonNull(sub_inner) => self.is_subtype(sub_inner, super_inner),
                _ => false,
            };
        }
        if let Type::NonNull(sub_inner) = sub_type {
            return self.is_subtype(sub_inner, super_type);
        }
        if let Type::List(super_inner) = super_type {
            return match sub_type {
                Type::List(sub_inner) => self.is_subtype(sub_inner, super_inner),
                _ => false,
            };
        }
        if matches!(sub_type, Type::List(_)) {
            return false;
        }
        match (sub_type, super_type) {
            (Type::Named(sub_name), Type::Named(super_name)) => {
                self.is_named_subtype(sub_name, super_name)
            }
            _ => false,
        }
    }

    pub fn is_named_subtype(&self, sub_type_name: &str, super_type_name: &str) -> bool {
        if sub_type_name == super_type_name {
            return true;
        }
        match (self.type_by_name(sub_type_name), self.type_by_name(super_type_name)) {
            (Some(sub), Some(sup)) => sup.is_abstract() && self.is_possible_type(sup, sub),
            _ => false,
        }
    }
}
